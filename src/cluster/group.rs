use crate::error::{Error, Result};
use crate::geometry::Coord;

/// Symbols used when no palette is configured.
pub const DEFAULT_SYMBOLS: [char; 10] = ['o', '#', '@', 'S', '%', '&', 'V', '?', 'Z', 'W'];

/// One cluster produced by a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Display name, `Group-1`, `Group-2`, ...
    pub name: String,
    /// Single-character label used when plotting members.
    pub symbol: char,
    /// Final centroid of the cluster.
    pub centroid: Coord,
}

impl Group {
    /// Build the group with 0-based index `index`, taking its symbol from `palette`.
    pub fn new(index: usize, centroid: Coord, palette: &Palette) -> Self {
        Self {
            name: format!("Group-{}", index + 1),
            symbol: palette.symbol(index),
            centroid,
        }
    }

    /// Short label shown in point listings (`G-1`, `G-2`, ...).
    pub fn short_label(index: usize) -> String {
        format!("G-{}", index + 1)
    }
}

/// Ordered set of distinct group symbols.
///
/// Its length doubles as the largest cluster count a session accepts, so every
/// group on screen gets its own symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    symbols: Vec<char>,
}

impl Palette {
    /// Build a palette from distinct symbols.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(Error::InvalidParameter {
                name: "palette",
                message: "must contain at least one symbol",
            });
        }
        for (i, s) in symbols.iter().enumerate() {
            if symbols[..i].contains(s) {
                return Err(Error::InvalidParameter {
                    name: "palette",
                    message: "symbols must be distinct",
                });
            }
        }
        Ok(Self { symbols })
    }

    /// Symbol for group `index`, cycling through the palette.
    #[inline]
    pub fn symbol(&self, index: usize) -> char {
        self.symbols[index % self.symbols.len()]
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; a palette holds at least one symbol.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.to_vec(),
        }
    }
}
