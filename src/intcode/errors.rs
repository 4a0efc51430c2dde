use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or running an Intcode program.
#[derive(Error, Debug)]
pub enum IntcodeError {
    /// A listing entry that is not a base-10 integer.
    #[error("Parse error: token {index} ({token:?}) is not an integer")]
    Parse { index: usize, token: String },

    #[error("Load error: {}: {}", .path.display(), .source)]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Problems decoding an instruction.
    #[error("Decode error: unknown opcode {opcode} at {ip}")]
    UnknownOpcode { opcode: i64, ip: usize },

    #[error("Decode error: unknown parameter mode {mode} at {ip}")]
    UnknownMode { mode: i64, ip: usize },

    /// Destination parameter given in immediate mode.
    #[error("Write error: immediate-mode destination at {ip}")]
    ImmediateWrite { ip: usize },

    #[error("Bus error: negative address {addr} at {ip}")]
    NegativeAddress { addr: i64, ip: usize },

    /// The controller hung up while the core wanted a value.
    #[error("I/O error: input closed at {ip}")]
    InputClosed { ip: usize },

    #[error("I/O error: output closed at {ip}")]
    OutputClosed { ip: usize },

    #[error("could not spawn core thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("core thread panicked")]
    Panicked,
}
