//! The memory tape: a fixed run of byte cells addressed by the data pointer.

/// Cell count of the standard tape.
pub const TAPE_LEN: usize = 30_000;

/// A flat, zero-initialized run of unsigned byte cells.
///
/// The tape has no opinion about where the data pointer may go; movement
/// bounds belong to the executor, which owns the pointer.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u8>,
}

impl Tape {
    /// A tape with the standard 30,000 cells, all zero.
    pub fn new() -> Self {
        Self::with_len(TAPE_LEN)
    }

    /// A tape with a custom cell count.
    pub fn with_len(len: usize) -> Self {
        Self { cells: vec![0; len] }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The byte at `ptr`.
    pub fn read(&self, ptr: usize) -> u8 {
        self.cells[ptr]
    }

    /// Store `byte` at `ptr`.
    pub fn write(&mut self, ptr: usize, byte: u8) {
        self.cells[ptr] = byte;
    }

    /// Add one to the cell at `ptr`, wrapping modulo 256.
    pub fn increment(&mut self, ptr: usize) {
        self.cells[ptr] = self.cells[ptr].wrapping_add(1);
    }

    /// Subtract one from the cell at `ptr`, wrapping modulo 256.
    pub fn decrement(&mut self, ptr: usize) {
        self.cells[ptr] = self.cells[ptr].wrapping_sub(1);
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}
