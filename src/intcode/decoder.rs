use crate::intcode::errors::IntcodeError;
use crate::intcode::instruction::{Instruction, Mode, Opcode};

const OPC_ADD: i64 = 1;
const OPC_MUL: i64 = 2;
const OPC_INPUT: i64 = 3;
const OPC_OUTPUT: i64 = 4;
const OPC_JUMP_TRUE: i64 = 5;
const OPC_JUMP_FALSE: i64 = 6;
const OPC_LESS: i64 = 7;
const OPC_EQUALS: i64 = 8;
const OPC_ADJUST_BASE: i64 = 9;
const OPC_HALT: i64 = 99;

/// Splits an instruction word into its opcode and up to three parameter modes.
/// `ip` is only used to locate faults.
pub fn decode(word: i64, ip: usize) -> Result<Instruction, IntcodeError> {
    if word < 0 {
        return Err(IntcodeError::UnknownOpcode { opcode: word, ip });
    }
    let opcode = match word % 100 {
        OPC_ADD => Opcode::Add,
        OPC_MUL => Opcode::Mul,
        OPC_INPUT => Opcode::Input,
        OPC_OUTPUT => Opcode::Output,
        OPC_JUMP_TRUE => Opcode::JumpIfTrue,
        OPC_JUMP_FALSE => Opcode::JumpIfFalse,
        OPC_LESS => Opcode::LessThan,
        OPC_EQUALS => Opcode::Equals,
        OPC_ADJUST_BASE => Opcode::AdjustBase,
        OPC_HALT => Opcode::Halt,
        other => return Err(IntcodeError::UnknownOpcode { opcode: other, ip }),
    };

    let mut modes = [Mode::Position; 3];
    let mut digits = word / 100;
    for mode in modes.iter_mut() {
        *mode = match digits % 10 {
            0 => Mode::Position,
            1 => Mode::Immediate,
            2 => Mode::Relative,
            m => return Err(IntcodeError::UnknownMode { mode: m, ip }),
        };
        digits /= 10;
    }

    Ok(Instruction { opcode, modes })
}
