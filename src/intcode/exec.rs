// intcode/exec.rs
use crate::intcode::{
    bridge::Io,
    decoder::decode,
    errors::IntcodeError,
    instruction::{Instruction, Mode, Opcode},
    memory::Memory,
    registers::Cpu,
};

#[inline]
fn address(value: i64, ip: usize) -> Result<usize, IntcodeError> {
    usize::try_from(value).map_err(|_| IntcodeError::NegativeAddress { addr: value, ip })
}

/// Value of parameter `n` of the instruction at `cpu.ip`.
fn param(cpu: &Cpu, mem: &Memory, instr: &Instruction, n: usize) -> Result<i64, IntcodeError> {
    let raw = mem.read(cpu.ip + 1 + n);
    Ok(match instr.mode(n) {
        Mode::Position => mem.read(address(raw, cpu.ip)?),
        Mode::Immediate => raw,
        Mode::Relative => mem.read(address(raw.wrapping_add(cpu.relative_base), cpu.ip)?),
    })
}

/// Address that parameter `n` names as a write destination.
fn dest(cpu: &Cpu, mem: &Memory, instr: &Instruction, n: usize) -> Result<usize, IntcodeError> {
    let raw = mem.read(cpu.ip + 1 + n);
    match instr.mode(n) {
        Mode::Position => address(raw, cpu.ip),
        Mode::Relative => address(raw.wrapping_add(cpu.relative_base), cpu.ip),
        Mode::Immediate => Err(IntcodeError::ImmediateWrite { ip: cpu.ip }),
    }
}

fn store(cpu: &Cpu, mem: &mut Memory, instr: &Instruction, n: usize, value: i64) -> Result<(), IntcodeError> {
    let addr = dest(cpu, mem, instr, n)?;
    mem.write(addr, value);
    Ok(())
}

/// Executes one instruction. Returns `Ok(false)` when the instruction was a
/// halt, leaving the pointer on it.
pub fn step<I: Io>(cpu: &mut Cpu, mem: &mut Memory, io: &mut I) -> Result<bool, IntcodeError> {
    let ip = cpu.ip;
    let instr = decode(mem.read(ip), ip)?;

    match instr.opcode {
        Opcode::Add => {
            let v = param(cpu, mem, &instr, 0)?.wrapping_add(param(cpu, mem, &instr, 1)?);
            store(cpu, mem, &instr, 2, v)?;
        }
        Opcode::Mul => {
            let v = param(cpu, mem, &instr, 0)?.wrapping_mul(param(cpu, mem, &instr, 1)?);
            store(cpu, mem, &instr, 2, v)?;
        }
        Opcode::Input => {
            let addr = dest(cpu, mem, &instr, 0)?;
            let v = io.input().map_err(|_| IntcodeError::InputClosed { ip })?;
            mem.write(addr, v);
        }
        Opcode::Output => {
            let v = param(cpu, mem, &instr, 0)?;
            io.output(v).map_err(|_| IntcodeError::OutputClosed { ip })?;
        }
        Opcode::JumpIfTrue | Opcode::JumpIfFalse => {
            let cond = param(cpu, mem, &instr, 0)? != 0;
            if cond == (instr.opcode == Opcode::JumpIfTrue) {
                cpu.ip = address(param(cpu, mem, &instr, 1)?, ip)?;
                return Ok(true);
            }
        }
        Opcode::LessThan => {
            let v = param(cpu, mem, &instr, 0)? < param(cpu, mem, &instr, 1)?;
            store(cpu, mem, &instr, 2, v as i64)?;
        }
        Opcode::Equals => {
            let v = param(cpu, mem, &instr, 0)? == param(cpu, mem, &instr, 1)?;
            store(cpu, mem, &instr, 2, v as i64)?;
        }
        Opcode::AdjustBase => {
            let delta = param(cpu, mem, &instr, 0)?;
            cpu.adjust_base(delta);
        }
        Opcode::Halt => return Ok(false),
    }

    cpu.advance(instr.opcode.width());
    Ok(true)
}

/// Steps until a halt instruction. Returns the number of instructions executed,
/// not counting the halt.
pub fn run<I: Io>(cpu: &mut Cpu, mem: &mut Memory, io: &mut I) -> Result<usize, IntcodeError> {
    let mut steps = 0;
    while step(cpu, mem, io)? {
        steps += 1;
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intcode::bridge::BufferedIo;

    fn exec(program: &[i64], input: &[i64]) -> (Cpu, Memory, Vec<i64>) {
        let mut cpu = Cpu::default();
        let mut mem = Memory::new(program.to_vec());
        let mut io = BufferedIo::new(input.iter().copied());
        run(&mut cpu, &mut mem, &mut io).expect("program faulted");
        (cpu, mem, io.output)
    }

    // (program, address to inspect, expected value)
    const ARITHMETIC: &[(&[i64], usize, i64)] = &[
        // add: position, immediate, relative sources
        (&[1, 5, 6, 7, 99, -4, 9, 0], 7, 5),
        (&[1101, -4, 9, 7, 99, 0, 0, 0], 7, 5),
        (&[109, 7, 22201, 0, 1, 2, 99, -4, 9, 0], 9, 5),
        (&[1001, 5, -10, 7, 99, 3, 0, 0], 7, -7),
        // mul
        (&[2, 5, 6, 7, 99, -3, 7, 0], 7, -21),
        (&[1102, -3, -7, 7, 99, 0, 0, 0], 7, 21),
        (&[1002, 5, -3, 7, 99, 4, 0, 0], 7, -12),
        (&[102, -3, 5, 7, 99, 4, 0, 0], 7, -12),
        (&[109, 7, 22202, 0, 1, 2, 99, 6, -2, 0], 9, -12),
        // less-than
        (&[7, 5, 6, 7, 99, -2, 1, 9], 7, 1),
        (&[1107, 3, -3, 7, 99, 0, 0, 9], 7, 0),
        (&[109, 7, 22207, 0, 1, 2, 99, -5, -4, 9], 9, 1),
        (&[1107, 4, 4, 7, 99, 0, 0, 9], 7, 0),
        // equals
        (&[8, 5, 6, 7, 99, -2, -2, 9], 7, 1),
        (&[1108, 3, -3, 7, 99, 0, 0, 9], 7, 0),
        (&[109, 7, 22208, 0, 1, 2, 99, 8, 8, 9], 9, 1),
        (&[1008, 5, 6, 7, 99, 5, 0, 9], 7, 0),
    ];

    #[test]
    fn arithmetic_and_comparisons() {
        for &(program, addr, expected) in ARITHMETIC {
            let (_, mem, _) = exec(program, &[]);
            assert_eq!(mem.read(addr), expected, "program {program:?}");
        }
    }

    #[test]
    fn jump_if_true() {
        // position, immediate and relative condition; a taken jump skips the output of 0
        for program in [
            vec![5, 9, 10, 104, 0, 99, 104, 1, 99, -3, 6],
            vec![1105, -3, 6, 104, 0, 99, 104, 1, 99],
            vec![109, 11, 2205, 0, 1, 104, 0, 99, 104, 1, 99, -1, 8],
        ] {
            let (_, _, out) = exec(&program, &[]);
            assert_eq!(out, vec![1], "program {program:?}");
        }
        let (cpu, _, out) = exec(&[1105, 0, 6, 104, 0, 99, 104, 1, 99], &[]);
        assert_eq!(out, vec![0]);
        assert_eq!(cpu.ip, 5);
    }

    #[test]
    fn jump_if_false() {
        let (_, _, out) = exec(&[1106, 0, 6, 104, 0, 99, 104, 1, 99], &[]);
        assert_eq!(out, vec![1]);
        let (_, _, out) = exec(&[1106, -2, 6, 104, 0, 99, 104, 1, 99], &[]);
        assert_eq!(out, vec![0]);
        let (_, _, out) = exec(&[6, 9, 10, 104, 0, 99, 104, 1, 99, 0, 6], &[]);
        assert_eq!(out, vec![1]);
        // relative condition and target, base 11
        let (_, _, out) = exec(&[109, 11, 2206, 0, 1, 104, 0, 99, 104, 1, 99, 0, 8], &[]);
        assert_eq!(out, vec![1]);
        let (cpu, _, out) = exec(&[109, 11, 2206, 0, 1, 104, 0, 99, 104, 1, 99, 5, 8], &[]);
        assert_eq!(out, vec![0]);
        assert_eq!(cpu.ip, 7);
    }

    #[test]
    fn compare_with_eight() {
        let position = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
        let immediate = [3, 3, 1107, -1, 8, 3, 4, 3, 99];
        assert_eq!(exec(&position, &[8]).2, vec![1]);
        assert_eq!(exec(&position, &[-8]).2, vec![0]);
        assert_eq!(exec(&immediate, &[7]).2, vec![1]);
        assert_eq!(exec(&immediate, &[8]).2, vec![0]);
    }

    #[test]
    fn adjust_base_accumulates() {
        let (cpu, _, out) = exec(&[109, 7, 109, -3, 209, 6, 204, 0, 99], &[]);
        // base 7, then 4, then += mem[4 + 6] = 0
        assert_eq!(cpu.relative_base, 4);
        assert_eq!(out, vec![209]);

        let (cpu, _, _) = exec(&[9, 3, 99, -12], &[]);
        assert_eq!(cpu.relative_base, -12);
    }

    #[test]
    fn large_numbers() {
        assert_eq!(exec(&[104, 1125899906842624, 99], &[]).2, vec![1125899906842624]);
        let out = exec(&[1102, 34915192, 34915192, 7, 4, 7, 99, 0], &[]).2;
        assert_eq!(out[0].to_string().len(), 16);
    }

    #[test]
    fn halt_leaves_pointer_on_halt() {
        let mut cpu = Cpu::default();
        let mut mem = Memory::new(vec![1101, 1, 1, 5, 99, 0]);
        let mut io = BufferedIo::default();
        assert!(step(&mut cpu, &mut mem, &mut io).unwrap());
        assert_eq!(cpu.ip, 4);
        assert!(!step(&mut cpu, &mut mem, &mut io).unwrap());
        assert_eq!(cpu.ip, 4);
        assert_eq!(mem.read(5), 2);
    }

    #[test]
    fn immediate_destination_faults() {
        let mut cpu = Cpu::default();
        let mut mem = Memory::new(vec![11101, 1, 1, 0, 99]);
        let err = run(&mut cpu, &mut mem, &mut BufferedIo::default()).unwrap_err();
        assert!(matches!(err, IntcodeError::ImmediateWrite { ip: 0 }));
    }

    #[test]
    fn negative_address_faults() {
        let mut cpu = Cpu::default();
        let mut mem = Memory::new(vec![4, -1, 99]);
        let err = run(&mut cpu, &mut mem, &mut BufferedIo::default()).unwrap_err();
        assert!(matches!(err, IntcodeError::NegativeAddress { addr: -1, ip: 0 }));
    }

    #[test]
    fn input_without_value_faults() {
        let mut cpu = Cpu::default();
        let mut mem = Memory::new(vec![3, 0, 99]);
        let err = run(&mut cpu, &mut mem, &mut BufferedIo::default()).unwrap_err();
        assert!(matches!(err, IntcodeError::InputClosed { ip: 0 }));
    }
}
