// Memory tile and its visible face.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `Hidden -> Flipped -> {Matched | Hidden}`. `Matched` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TileFace {
    #[default]
    Hidden,
    Flipped,
    Matched,
}

impl TileFace {
    /// Every state class a tile element can carry.
    pub const CSS_CLASSES: [&'static str; 2] = ["flipped", "matched"];

    /// Classes present on the tile element. Matched tiles stay `flipped`.
    pub fn css_classes(self) -> &'static [&'static str] {
        match self {
            TileFace::Hidden => &[],
            TileFace::Flipped => &["flipped"],
            TileFace::Matched => &["flipped", "matched"],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Tile {
    pub symbol: &'static str,
    pub face: TileFace,
}

impl Tile {
    pub fn new(symbol: &'static str) -> Self {
        Self {
            symbol,
            face: TileFace::Hidden,
        }
    }

    /// Text shown on the tile: the symbol once turned over, empty while hidden.
    pub fn display_symbol(&self) -> &'static str {
        match self.face {
            TileFace::Hidden => "",
            TileFace::Flipped | TileFace::Matched => self.symbol,
        }
    }

    /// Matched tiles stop taking pointer input.
    pub fn is_interactive(&self) -> bool {
        self.face != TileFace::Matched
    }

    pub fn is_matched(&self) -> bool {
        self.face == TileFace::Matched
    }
}
