//! Map glyphs and the character sets used to print them
//!
//! The grid stores typed glyphs; a `GlyphSet` turns them into characters
//! only when the map is serialized or drawn.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

/// What occupies a grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Glyph {
    #[default]
    Blank,
    Corridor,
    LockedRoom,
    UnlockedRoom,
    Start,
    Boss,
    HBorder,
    VBorder,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Glyph {
    /// Any room marker, start and boss included
    pub const fn is_room(&self) -> bool {
        matches!(
            self,
            Glyph::LockedRoom | Glyph::UnlockedRoom | Glyph::Start | Glyph::Boss
        )
    }

    /// Room markers that read as unlocked on the map
    pub const fn is_open_room(&self) -> bool {
        matches!(self, Glyph::UnlockedRoom | Glyph::Start | Glyph::Boss)
    }

    pub const fn is_corner(&self) -> bool {
        matches!(
            self,
            Glyph::TopLeft | Glyph::TopRight | Glyph::BottomLeft | Glyph::BottomRight
        )
    }

    pub const fn is_border(&self) -> bool {
        matches!(self, Glyph::HBorder | Glyph::VBorder) || self.is_corner()
    }
}

/// Available character sets for printing maps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
    VariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum GraphicsMode {
    /// Plain ASCII characters.
    Classic,
    /// Unicode box-drawing and symbol characters.
    Fancy,
    /// Pick fancy when the terminal looks UTF-8 capable.
    #[default]
    Auto,
}

/// Maps glyphs to printable characters.
pub trait GlyphSet: Send + Sync {
    fn glyph_char(&self, glyph: Glyph) -> char;
}

/// ASCII glyph set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicGlyphs;

impl GlyphSet for ClassicGlyphs {
    fn glyph_char(&self, glyph: Glyph) -> char {
        match glyph {
            Glyph::Blank => ' ',
            Glyph::Corridor => '.',
            Glyph::LockedRoom => '#',
            Glyph::UnlockedRoom => 'o',
            Glyph::Start => '@',
            Glyph::Boss => 'B',
            Glyph::HBorder => '-',
            Glyph::VBorder => '|',
            Glyph::TopLeft | Glyph::TopRight | Glyph::BottomLeft | Glyph::BottomRight => '+',
        }
    }
}

/// Unicode glyph set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FancyGlyphs;

impl GlyphSet for FancyGlyphs {
    fn glyph_char(&self, glyph: Glyph) -> char {
        match glyph {
            Glyph::Blank => ' ',
            Glyph::Corridor => '·',
            Glyph::LockedRoom => '■',
            Glyph::UnlockedRoom => '□',
            Glyph::Start => '◎',
            Glyph::Boss => '☠',
            Glyph::HBorder => '─',
            Glyph::VBorder => '│',
            Glyph::TopLeft => '┌',
            Glyph::TopRight => '┐',
            Glyph::BottomLeft => '└',
            Glyph::BottomRight => '┘',
        }
    }
}

/// Glyph set for an explicit mode; `Auto` resolves through `unicode_ok`.
pub fn glyph_set_for(mode: GraphicsMode, unicode_ok: bool) -> Box<dyn GlyphSet> {
    match mode {
        GraphicsMode::Classic => Box::new(ClassicGlyphs),
        GraphicsMode::Fancy => Box::new(FancyGlyphs),
        GraphicsMode::Auto if unicode_ok => Box::new(FancyGlyphs),
        GraphicsMode::Auto => Box::new(ClassicGlyphs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_room_classes() {
        assert!(Glyph::Boss.is_room());
        assert!(Glyph::Start.is_open_room());
        assert!(!Glyph::LockedRoom.is_open_room());
        assert!(!Glyph::Corridor.is_room());
        assert!(Glyph::TopLeft.is_border());
        assert!(!Glyph::HBorder.is_corner());
    }

    #[test]
    fn test_fancy_chars_distinct() {
        let chars: HashSet<char> = Glyph::iter().map(|g| FancyGlyphs.glyph_char(g)).collect();
        assert_eq!(chars.len(), Glyph::iter().count());
    }

    #[test]
    fn test_classic_room_chars_distinct() {
        let rooms = [
            Glyph::Corridor,
            Glyph::LockedRoom,
            Glyph::UnlockedRoom,
            Glyph::Start,
            Glyph::Boss,
        ];
        let chars: HashSet<char> = rooms.iter().map(|g| ClassicGlyphs.glyph_char(*g)).collect();
        assert_eq!(chars.len(), rooms.len());
    }

    #[test]
    fn test_graphics_mode_parse() {
        assert_eq!(GraphicsMode::from_str("classic").unwrap(), GraphicsMode::Classic);
        assert_eq!(GraphicsMode::from_str("Fancy").unwrap(), GraphicsMode::Fancy);
        assert!(GraphicsMode::from_str("sparkly").is_err());
        assert_eq!(GraphicsMode::Auto.to_string(), "auto");
    }

    #[test]
    fn test_auto_resolution() {
        let set = glyph_set_for(GraphicsMode::Auto, false);
        assert_eq!(set.glyph_char(Glyph::Corridor), '.');
        let set = glyph_set_for(GraphicsMode::Auto, true);
        assert_eq!(set.glyph_char(Glyph::Corridor), '·');
        let set = glyph_set_for(GraphicsMode::Classic, true);
        assert_eq!(set.glyph_char(Glyph::Start), '@');
    }
}
