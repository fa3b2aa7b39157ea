pub mod address;
pub mod stack;

pub use stack::StackMemory;

/// A single stack cell
pub type Word = i32;
