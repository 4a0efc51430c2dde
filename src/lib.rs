//! Intcode virtual machine and the robot controllers that drive it.
//!
//! The core lives in [`intcode`]: a fetch/decode/execute loop over growable
//! memory, run either in place against buffered I/O or on its own thread
//! behind a rendezvous [`Port`]. [`robot`] paints the hull, [`scaffold`]
//! surveys the scaffold and guides the vacuum robot along it.

pub mod error;
pub mod grid;
pub mod intcode;
pub mod robot;
pub mod scaffold;

pub use error::ControllerError;
pub use intcode::{IntcodeError, Machine, Port, Protocol, program};
