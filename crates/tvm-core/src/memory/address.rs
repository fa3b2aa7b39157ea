//! Operand Resolution
//!
//! Maps raw dispatcher operands (absolute addresses, top-relative offsets)
//! to storage indices. Pure functions; the stack turns `None` into a fault.

/// Resolve an absolute address against the live region.
///
/// Legal when the stack is non-empty and `0 <= address <= position`.
/// `address == position` names the cell just above the top.
#[inline]
pub fn resolve_address(address: isize, position: usize) -> Option<usize> {
    if position == 0 || address < 0 {
        return None;
    }
    let index = address as usize;
    (index <= position).then_some(index)
}

/// Resolve a top-relative offset. `0` is the top cell, `-1` the one below it.
///
/// Positive offsets never resolve. Neither does an offset reaching below cell 0.
#[inline]
pub fn resolve_offset(offset: isize, position: usize) -> Option<usize> {
    if position == 0 || offset > 0 {
        return None;
    }
    let depth = offset.unsigned_abs();
    (depth < position).then(|| position - 1 - depth)
}
