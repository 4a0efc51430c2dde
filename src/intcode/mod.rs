pub mod bridge;
pub mod decoder;
pub mod errors;
pub mod exec;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod program;
pub mod registers;


pub use bridge::{Io, Port, Protocol, NEWLINE};
pub use errors::IntcodeError;
pub use machine::{Machine, State};
