//! TVM Error Types
//!
//! Defines the fault conditions produced by the TVM stack memory.
//! Every fault is raised at the call site; the dispatcher decides how to report it.

use std::fmt;

use thiserror::Error;

/// Which accessor produced an invalid-address fault.
///
/// The kind selects the fault wording reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Absolute read or write (`peek_value_addressed` / `set_value_addressed`)
    Addressed,
    /// Offset read relative to the top (`peek_at`)
    OffsetRead,
    /// Offset write relative to the top (`set_value`)
    OffsetWrite,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Addressed => write!(f, "attempt to use invalid address"),
            AccessKind::OffsetRead => write!(f, "attempt to use value from invalid address"),
            AccessKind::OffsetWrite => write!(f, "attempt to set value at invalid address"),
        }
    }
}

/// Operation that hit an empty stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyOp {
    Pop,
    Peek,
}

impl fmt::Display for EmptyOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyOp::Pop => write!(f, "attempt to pop value from empty stack"),
            EmptyOp::Peek => write!(f, "attempt to peek value, but stack is empty"),
        }
    }
}

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    /// Rejected construction or reserve argument
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("segmentation fault: {operation}")]
    EmptyStack { operation: EmptyOp },

    /// `operand` is the raw address or offset as received
    #[error("segmentation fault: {kind} (operand {operand}, position {position})")]
    InvalidAddress {
        kind: AccessKind,
        operand: isize,
        position: usize,
    },
}

impl StackError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        StackError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Stable category code for reporting
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            StackError::InvalidArgument { .. } => "STACK:ARG:INVALID",
            StackError::EmptyStack { .. } => "STACK:EMPTY",
            StackError::InvalidAddress { .. } => "STACK:ADDRESS:INVALID",
        }
    }

    /// True for VM-level faults raised while executing bytecode.
    ///
    /// `InvalidArgument` comes from host-side setup and is not a fault.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            StackError::EmptyStack { .. } | StackError::InvalidAddress { .. }
        )
    }
}

pub type StackResult<T> = Result<T, StackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_messages_keep_segfault_wording() {
        let err = StackError::EmptyStack { operation: EmptyOp::Pop };
        assert_eq!(
            err.to_string(),
            "segmentation fault: attempt to pop value from empty stack"
        );

        let err = StackError::InvalidAddress {
            kind: AccessKind::OffsetWrite,
            operand: 3,
            position: 2,
        };
        assert!(err
            .to_string()
            .starts_with("segmentation fault: attempt to set value at invalid address"));
    }

    #[test]
    fn classification() {
        let arg = StackError::invalid_argument("stack size cannot be zero");
        assert_eq!(arg.code(), "STACK:ARG:INVALID");
        assert!(!arg.is_fault());

        let empty = StackError::EmptyStack { operation: EmptyOp::Peek };
        assert_eq!(empty.code(), "STACK:EMPTY");
        assert!(empty.is_fault());

        let addr = StackError::InvalidAddress {
            kind: AccessKind::Addressed,
            operand: -1,
            position: 0,
        };
        assert_eq!(addr.code(), "STACK:ADDRESS:INVALID");
        assert!(addr.is_fault());
    }
}
