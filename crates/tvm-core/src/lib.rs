//! TVM Interpreter - Core Library
//!
//! Stack memory for the TVM bytecode interpreter: the machine's operand
//! stack and local-variable frames in one growable integer buffer.

pub mod config;
pub mod error;
pub mod memory;

// Re-export commonly used types
pub use config::{StackConfig, DEFAULT_STACK_CAPACITY};
pub use error::{AccessKind, EmptyOp, StackError, StackResult};
pub use memory::{StackMemory, Word};
