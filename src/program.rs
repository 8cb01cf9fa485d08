/// An immutable program text, indexed by instruction position.
///
/// Indexing is per character, not per byte, so multibyte characters in
/// comments cannot skew instruction positions.
#[derive(Debug, Clone)]
pub struct Program {
    symbols: Vec<char>,
}

impl Program {
    pub fn new(source: &str) -> Self {
        Self {
            symbols: source.chars().collect(),
        }
    }

    /// The symbol at `index`, or `None` past the end of the program.
    pub fn symbol_at(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
