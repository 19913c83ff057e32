//! Glyph set selection for the terminal
//!
//! The glyph tables themselves live in `qb_core::dungeon`; this module only
//! decides whether the running terminal can show the fancy ones.

use qb_core::dungeon::{GlyphSet, GraphicsMode, glyph_set_for};

/// Detect if the terminal supports Unicode/UTF-8.
pub fn supports_unicode() -> bool {
    // LC_ALL overrides LC_CTYPE which overrides LANG
    for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(val) = std::env::var(var)
            && !val.is_empty()
        {
            return is_utf8_locale(&val);
        }
    }
    false
}

fn is_utf8_locale(val: &str) -> bool {
    let upper = val.to_uppercase();
    upper.contains("UTF-8") || upper.contains("UTF8")
}

/// Returns the best available glyph set for the current environment.
pub fn detect_glyph_set(mode: GraphicsMode) -> Box<dyn GlyphSet> {
    glyph_set_for(mode, mode == GraphicsMode::Auto && supports_unicode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qb_core::dungeon::Glyph;

    #[test]
    fn test_utf8_locale_names() {
        assert!(is_utf8_locale("en_US.UTF-8"));
        assert!(is_utf8_locale("C.utf8"));
        assert!(!is_utf8_locale("POSIX"));
        assert!(!is_utf8_locale("en_US.ISO-8859-1"));
    }

    #[test]
    fn test_explicit_modes_ignore_locale() {
        assert_eq!(detect_glyph_set(GraphicsMode::Classic).glyph_char(Glyph::Start), '@');
        assert_eq!(detect_glyph_set(GraphicsMode::Fancy).glyph_char(Glyph::Start), '◎');
    }
}
