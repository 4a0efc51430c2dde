use thiserror::Error;

use crate::intcode::IntcodeError;

/// Errors raised by the controllers driving a core.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// The core halted while the controller still expected `what`.
    #[error("core closed the channel while waiting for {0}")]
    Closed(&'static str),

    #[error("unexpected {what} value {value}")]
    Unexpected { what: &'static str, value: i64 },

    #[error("camera frame shows no robot")]
    NoRobot,

    #[error("path of {0} moves cannot be split into three movement functions")]
    Uncompressible(usize),

    /// The core itself faulted.
    #[error("core fault: {0}")]
    Core(#[from] IntcodeError),
}
