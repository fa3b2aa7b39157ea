//! TVM Stack Memory
//!
//! The operand and frame stack: the interpreter's only mutable storage.
//! Supports LIFO push/pop and random access for local-variable frames,
//! either by absolute address or by non-positive offset from the top.

use std::fmt;

use tracing::{debug, trace};

use crate::config::StackConfig;
use crate::error::{AccessKind, EmptyOp, StackError, StackResult};

use super::address::{resolve_address, resolve_offset};
use super::Word;

/// Most cells a `Vec<Word>` can address
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<Word>();

/// Growable integer stack with a movable top marker.
///
/// `position` counts the live cells and is the index of the next free slot.
/// The buffer always keeps at least one cell above `position`, so the
/// boundary address `position` is backed by storage.
///
/// A frame is allocated with [`StackMemory::reserve`] and then addressed
/// through [`StackMemory::set_value_addressed`] / [`StackMemory::peek_value_addressed`]
/// or through the offset accessors. Reserved cells are not cleared: callers
/// must initialize a slot before reading it.
#[derive(Debug, Clone)]
pub struct StackMemory {
    storage: Vec<Word>,
    position: usize,
}

impl Default for StackMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl StackMemory {
    /// Create stack memory with the default capacity (1024)
    pub fn new() -> Self {
        Self::allocate(StackConfig::default().initial_capacity)
    }

    /// Create stack memory with an explicit capacity. Zero is rejected.
    pub fn with_capacity(size: usize) -> StackResult<Self> {
        Self::from_config(&StackConfig::new().with_initial_capacity(size))
    }

    pub fn from_config(config: &StackConfig) -> StackResult<Self> {
        config.validate()?;
        Ok(Self::allocate(config.initial_capacity))
    }

    fn allocate(capacity: usize) -> Self {
        debug!(capacity, "allocating stack memory");
        StackMemory {
            storage: vec![0; capacity],
            position: 0,
        }
    }

    /// Number of live cells
    pub fn len(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.position == 0
    }

    /// Current physical capacity; only ever grows
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Live cells, bottom to top
    pub fn live(&self) -> impl Iterator<Item = Word> + '_ {
        self.storage[..self.position].iter().copied()
    }

    /// Push value onto the top of the stack
    pub fn push(&mut self, value: Word) {
        self.storage[self.position] = value;
        self.position += 1;
        self.ensure_capacity(self.position + 1);
    }

    /// Remove the top value, clearing its cell.
    ///
    /// The value is not returned; read it with [`StackMemory::peek`] first.
    pub fn pop(&mut self) -> StackResult<()> {
        if self.position == 0 {
            return Err(Self::empty_fault(EmptyOp::Pop));
        }
        self.storage[self.position - 1] = 0;
        self.position -= 1;
        Ok(())
    }

    /// Read the top value without removing it
    pub fn peek(&self) -> StackResult<Word> {
        if self.position == 0 {
            return Err(Self::empty_fault(EmptyOp::Peek));
        }
        Ok(self.storage[self.position - 1])
    }

    /// Read relative to the top: `0` is the top, negative offsets go deeper.
    pub fn peek_at(&self, offset: isize) -> StackResult<Word> {
        let index = resolve_offset(offset, self.position)
            .ok_or_else(|| self.address_fault(AccessKind::OffsetRead, offset))?;
        Ok(self.storage[index])
    }

    /// Overwrite a cell relative to the top, same offsets as [`StackMemory::peek_at`]
    pub fn set_value(&mut self, value: Word, offset: isize) -> StackResult<()> {
        let index = resolve_offset(offset, self.position)
            .ok_or_else(|| self.address_fault(AccessKind::OffsetWrite, offset))?;
        self.storage[index] = value;
        Ok(())
    }

    /// Advance the top by `size` cells without initializing them.
    ///
    /// Only freshly grown capacity reads as zero; reused cells keep stale data.
    pub fn reserve(&mut self, size: isize) -> StackResult<()> {
        if size < 0 {
            return Err(StackError::invalid_argument(format!(
                "cannot reserve a negative number of cells: {size}"
            )));
        }
        let new_position = self
            .position
            .checked_add(size as usize)
            .filter(|p| *p < MAX_CELLS)
            .ok_or_else(|| {
                StackError::invalid_argument(format!(
                    "reserving {size} cells overflows the stack address space"
                ))
            })?;

        self.ensure_capacity(new_position + 1);
        self.position = new_position;
        Ok(())
    }

    /// Write by absolute address in `0..=position`
    pub fn set_value_addressed(&mut self, value: Word, address: isize) -> StackResult<()> {
        let index = resolve_address(address, self.position)
            .ok_or_else(|| self.address_fault(AccessKind::Addressed, address))?;
        self.storage[index] = value;
        Ok(())
    }

    /// Read by absolute address in `0..=position`
    pub fn peek_value_addressed(&self, address: isize) -> StackResult<Word> {
        let index = resolve_address(address, self.position)
            .ok_or_else(|| self.address_fault(AccessKind::Addressed, address))?;
        Ok(self.storage[index])
    }

    /// Double the buffer until it holds `required` cells. New cells are zero.
    fn ensure_capacity(&mut self, required: usize) {
        let old = self.storage.len();
        if required <= old {
            return;
        }
        let mut capacity = old.max(1);
        while capacity < required && capacity < MAX_CELLS {
            capacity = capacity.saturating_mul(2).min(MAX_CELLS);
        }
        trace!(old, new = capacity, position = self.position, "growing stack memory");
        self.storage.resize(capacity, 0);
    }

    #[cold]
    #[inline(never)]
    fn empty_fault(operation: EmptyOp) -> StackError {
        debug!(%operation, "stack fault: empty stack");
        StackError::EmptyStack { operation }
    }

    #[cold]
    #[inline(never)]
    fn address_fault(&self, kind: AccessKind, operand: isize) -> StackError {
        debug!(%kind, operand, position = self.position, "stack fault: invalid address");
        StackError::InvalidAddress {
            kind,
            operand,
            position: self.position,
        }
    }
}

impl fmt::Display for StackMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StackMemory[{}/{}]: [", self.position, self.capacity())?;
        for (i, value) in self.live().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}
