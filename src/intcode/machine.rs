use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::intcode::{
    bridge::{self, BufferedIo, Io, Port, Protocol},
    errors::IntcodeError,
    exec,
    memory::Memory,
    program,
    registers::Cpu,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// One Intcode core: its memory and registers. Nothing in here is shared
/// with any other core.
#[derive(Debug, Clone)]
pub struct Machine {
    cpu: Cpu,
    memory: Memory,
    state: State,
}

impl Machine {
    pub fn new(program: Vec<i64>) -> Self {
        Self {
            cpu: Cpu::default(),
            memory: Memory::new(program),
            state: State::Running,
        }
    }

    pub fn parse(text: &str) -> Result<Self, IntcodeError> {
        program::parse(text).map(Self::new)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Patches a memory cell, e.g. to switch a program into another mode
    /// before it is launched.
    pub fn poke(&mut self, addr: usize, value: i64) {
        self.memory.write(addr, value);
    }

    /// Runs on the current thread until halt. A halted machine stays halted.
    pub fn run<I: Io>(&mut self, io: &mut I) -> Result<(), IntcodeError> {
        if self.state == State::Halted {
            return Ok(());
        }
        let steps = exec::run(&mut self.cpu, &mut self.memory, io)?;
        self.state = State::Halted;
        debug!(steps, ip = self.cpu.ip, "core halted");
        Ok(())
    }

    /// Runs to completion against a fixed input queue, returning every output.
    pub fn run_buffered(&mut self, input: impl IntoIterator<Item = i64>) -> Result<Vec<i64>, IntcodeError> {
        let mut io = BufferedIo::new(input);
        self.run(&mut io)?;
        Ok(io.output)
    }

    /// Launches the machine on its own thread. The returned port is the only
    /// way to talk to it; its channels close when the machine halts or faults.
    pub fn spawn(self, protocol: Protocol) -> Result<(Handle, Port), IntcodeError> {
        let (mut io, port) = bridge::pair(protocol);
        let mut machine = self;
        let inner = thread::Builder::new()
            .name("intcode-core".into())
            .spawn(move || {
                let result = machine.run(&mut io);
                io.close();
                match result {
                    Ok(()) => Ok(machine),
                    Err(err) => {
                        error!(%err, ip = machine.cpu.ip, "core faulted");
                        Err(err)
                    }
                }
            })
            .map_err(IntcodeError::Spawn)?;
        debug!(?protocol, "core spawned");
        Ok((Handle { inner }, port))
    }
}

/// Join handle of a spawned machine.
pub struct Handle {
    inner: JoinHandle<Result<Machine, IntcodeError>>,
}

impl Handle {
    /// Waits for the core to stop and hands the machine back.
    pub fn join(self) -> Result<Machine, IntcodeError> {
        self.inner.join().map_err(|_| IntcodeError::Panicked)?
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}
