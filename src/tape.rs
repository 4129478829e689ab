//! The memory tape the interpreter operates on.
//!
//! A [`Tape`] is a zero-indexed sequence of unsigned byte cells plus a data
//! pointer. It starts tiny (4 cells) and doubles whenever the pointer walks
//! past the last valid index, so programs may move arbitrarily far right.
//! The left side is a fixed origin: moving below cell 0 is an error, never a
//! wrap or a growth. Cell arithmetic wraps modulo 256.

/// Number of cells a fresh tape starts with. Growth doubles from here:
/// 4 -> 8 -> 16 -> 32 -> ...
const INITIAL_CELLS: usize = 4;

/// Errors raised by [`Tape`] operations.
#[derive(Debug, thiserror::Error)]
pub enum TapeError {
    /// The data pointer was asked to move left of cell 0.
    #[error("tape pointer cannot move below cell 0")]
    NegativeTapePointer,

    /// A value outside `0..=255` was written to a cell.
    #[error("invalid byte value {value}: cells hold 0..=255")]
    InvalidByteValue { value: u16 },
}

/// A growable, wraparound byte tape with a data pointer.
///
/// Invariant: the pointer always addresses a valid cell
/// (`0 <= cursor < cells.len()`) after every operation completes.
pub struct Tape {
    cells: Vec<u8>,
    cursor: usize,
}

impl Tape {
    /// Create a tape of [`INITIAL_CELLS`] zeroed cells with the pointer at 0.
    pub fn new() -> Self {
        Self {
            cells: vec![0; INITIAL_CELLS],
            cursor: 0,
        }
    }

    /// Move the pointer one cell to the right.
    ///
    /// When the pointer crosses the last valid index the tape doubles in
    /// length and every new cell reads as 0. Doubling keeps growth amortized
    /// constant-time for programs that run far to the right.
    pub fn increment_pointer(&mut self) {
        self.cursor += 1;
        if self.cursor >= self.cells.len() {
            self.cells.resize(self.cells.len() * 2, 0);
        }
    }

    /// Move the pointer one cell to the left.
    ///
    /// Fails with [`TapeError::NegativeTapePointer`] when the pointer is
    /// already at cell 0; the pointer is left unchanged in that case.
    pub fn decrement_pointer(&mut self) -> Result<(), TapeError> {
        if self.cursor == 0 {
            return Err(TapeError::NegativeTapePointer);
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Add 1 to the current cell, wrapping 255 -> 0.
    pub fn increment_cell(&mut self) {
        self.cells[self.cursor] = self.cells[self.cursor].wrapping_add(1);
    }

    /// Subtract 1 from the current cell, wrapping 0 -> 255.
    pub fn decrement_cell(&mut self) {
        self.cells[self.cursor] = self.cells[self.cursor].wrapping_sub(1);
    }

    /// Overwrite the current cell.
    ///
    /// The parameter is wider than a cell so that out-of-range writes can be
    /// rejected with [`TapeError::InvalidByteValue`] instead of silently
    /// truncated. Program execution only ever supplies bytes; this guards
    /// callers that inject values directly.
    pub fn set_cell(&mut self, value: u16) -> Result<(), TapeError> {
        if value > u16::from(u8::MAX) {
            return Err(TapeError::InvalidByteValue { value });
        }
        self.cells[self.cursor] = value as u8;
        Ok(())
    }

    /// Read the current cell.
    pub fn get_cell(&self) -> u8 {
        self.cells[self.cursor]
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}
