//! Chip colors.
//!
//! Each player picks one chip from a fixed palette. Colors are unique within
//! a session; the session enforces that, this module only describes them.

use serde::{Deserialize, Serialize};

/// A chip color from the fixed palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Black,
    White,
    Brown,
}

impl ChipColor {
    /// Every color in palette order.
    pub const ALL: [ChipColor; 9] = [
        ChipColor::Red,
        ChipColor::Orange,
        ChipColor::Yellow,
        ChipColor::Green,
        ChipColor::Blue,
        ChipColor::Purple,
        ChipColor::Black,
        ChipColor::White,
        ChipColor::Brown,
    ];

    /// Lowercase name, as used in callback data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ChipColor::Red => "red",
            ChipColor::Orange => "orange",
            ChipColor::Yellow => "yellow",
            ChipColor::Green => "green",
            ChipColor::Blue => "blue",
            ChipColor::Purple => "purple",
            ChipColor::Black => "black",
            ChipColor::White => "white",
            ChipColor::Brown => "brown",
        }
    }

    /// Emoji shown next to the player name.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            ChipColor::Red => "\u{1F534}",
            ChipColor::Orange => "\u{1F7E0}",
            ChipColor::Yellow => "\u{1F7E1}",
            ChipColor::Green => "\u{1F7E2}",
            ChipColor::Blue => "\u{1F535}",
            ChipColor::Purple => "\u{1F7E3}",
            ChipColor::Black => "\u{26AB}",
            ChipColor::White => "\u{26AA}",
            ChipColor::Brown => "\u{1F7E4}",
        }
    }

    /// RGB triple used when drawing the chip.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            ChipColor::Red => (188, 21, 21),
            ChipColor::Orange => (210, 105, 0),
            ChipColor::Yellow => (255, 205, 0),
            ChipColor::Green => (15, 150, 0),
            ChipColor::Blue => (5, 55, 175),
            ChipColor::Purple => (170, 35, 240),
            ChipColor::Black => (0, 0, 0),
            ChipColor::White => (217, 217, 217),
            ChipColor::Brown => (100, 45, 10),
        }
    }

    /// CSS-style `rgba(...)` string.
    ///
    /// Renderers draw the current chip at full opacity and the previous
    /// position at half.
    ///
    /// ```
    /// use rust_snl::core::ChipColor;
    ///
    /// assert_eq!(ChipColor::Red.rgba(0.5), "rgba(188,21,21,0.5)");
    /// assert_eq!(ChipColor::Black.rgba(1.0), "rgba(0,0,0,1)");
    /// ```
    #[must_use]
    pub fn rgba(self, opacity: f32) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({},{},{},{})", r, g, b, opacity)
    }

    /// Parse a lowercase color name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for ChipColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_names_are_unique() {
        let mut names: Vec<_> = ChipColor::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ChipColor::ALL.len());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ChipColor::from_name("purple"), Some(ChipColor::Purple));
        assert_eq!(ChipColor::from_name("Purple"), None);
        assert_eq!(ChipColor::from_name("pink"), None);
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&ChipColor::Brown).unwrap();
        assert_eq!(json, "\"brown\"");
    }
}
