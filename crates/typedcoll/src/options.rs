/// How [`Collection::map_with`](crate::Collection::map_with) pairs the primary
/// collection with additional collections.
///
/// Pairing is positional: the n-th value in iteration order of every
/// collection goes into the n-th call, whatever its index key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Stop at the end of the shortest collection. Every additional value is `Some`.
    #[default]
    Shortest,
    /// Visit every value of the primary collection. Additional collections
    /// that run out yield `None` for the remaining positions.
    Primary,
}

/// Options for mapping over several collections at once.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapOptions {
    pub alignment: Alignment,
}

impl MapOptions {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl From<Alignment> for MapOptions {
    fn from(alignment: Alignment) -> Self {
        Self::new(alignment)
    }
}
