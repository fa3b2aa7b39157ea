//! TVM Configuration
//!
//! Construction-time settings for the stack memory.
//! Capacity grows on demand; the configured value is only the starting size.

use crate::error::{StackError, StackResult};

/// Capacity used when none is given
pub const DEFAULT_STACK_CAPACITY: usize = 1024;

/// Stack memory configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    /// Number of cells allocated up front
    pub initial_capacity: usize,
}

impl Default for StackConfig {
    fn default() -> Self {
        StackConfig {
            initial_capacity: DEFAULT_STACK_CAPACITY,
        }
    }
}

impl StackConfig {
    /// Configuration starting at `DEFAULT_STACK_CAPACITY` cells
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Reject settings the stack cannot be built from
    pub fn validate(&self) -> StackResult<()> {
        if self.initial_capacity == 0 {
            return Err(StackError::invalid_argument("stack size cannot be equal zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_1024() {
        let config = StackConfig::new();
        assert_eq!(config.initial_capacity, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = StackConfig::new().with_initial_capacity(0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, StackError::InvalidArgument { .. }));
    }
}
