//! Resolution of the run's inputs from the command line, the environment and built-in defaults.

use core::{error, fmt};

use log::warn;

/// The codepoint rendered when neither the command line nor the environment supply a usable one.
pub const DEFAULT_GLYPH: char = '\u{f005}';

/// Environment variable consulted for the glyph when the argument is missing or unusable.
pub const GLYPH_ENV: &str = "NICE_VIEW_GLYPH";

/// Environment variable holding the host build's palette inversion setting.
pub const INVERTED_ENV: &str = "CONFIG_NICE_VIEW_WIDGET_INVERTED";

/// Values taken from the process environment.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Environment {
    /// The value of [`GLYPH_ENV`].
    pub glyph: Option<String>,
    /// The value of [`INVERTED_ENV`].
    pub inverted: Option<String>,
}

impl Environment {
    /// Captures the relevant variables from the current process.
    pub fn from_process() -> Self {
        Self {
            glyph: std::env::var(GLYPH_ENV).ok(),
            inverted: std::env::var(INVERTED_ENV).ok(),
        }
    }

    /// Returns `true` if [`INVERTED_ENV`] holds a truthy value.
    pub fn inverted(&self) -> bool {
        parse_flag(self.inverted.as_deref())
    }
}

/// Where a [`ResolvedGlyph`] came from.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum GlyphOrigin {
    /// The `--glyph` argument.
    Argument,
    /// The [`GLYPH_ENV`] environment variable.
    Environment,
    /// [`DEFAULT_GLYPH`].
    Default,
}

impl fmt::Display for GlyphOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument => f.write_str("command line"),
            Self::Environment => write!(f, "{GLYPH_ENV}"),
            Self::Default => f.write_str("built-in default"),
        }
    }
}

/// The codepoint rendered by the run and its provenance.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct ResolvedGlyph {
    /// The codepoint to render.
    pub codepoint: char,
    /// Where [`ResolvedGlyph::codepoint`] came from.
    pub origin: GlyphOrigin,
}

impl ResolvedGlyph {
    /// Returns the codepoint as lowercase hexadecimal without a prefix, e.g. `f005`.
    pub fn hex(&self) -> String {
        format!("{:x}", u32::from(self.codepoint))
    }
}

/// Picks the glyph to render.
///
/// The `argument` takes precedence over the `environment`, which takes precedence over
/// [`DEFAULT_GLYPH`]. A candidate that is not valid hexadecimal is skipped with a warning.
pub fn resolve_glyph(argument: Option<&str>, environment: Option<&str>) -> ResolvedGlyph {
    let candidates = [
        (argument, GlyphOrigin::Argument),
        (environment, GlyphOrigin::Environment),
    ];

    for (candidate, origin) in candidates {
        let Some(text) = candidate else {
            continue;
        };

        match parse_codepoint(text) {
            Ok(codepoint) => return ResolvedGlyph { codepoint, origin },
            Err(error) => warn!("ignoring glyph from {origin}: {error}"),
        }
    }

    ResolvedGlyph {
        codepoint: DEFAULT_GLYPH,
        origin: GlyphOrigin::Default,
    }
}

/// Parses a hexadecimal codepoint such as `f005`. A leading `0x` is tolerated.
///
/// # Errors
///
/// Returns [`InvalidGlyphHex`] if `text` is empty, contains a non-hexadecimal digit, or does not
/// name a Unicode scalar value.
pub fn parse_codepoint(text: &str) -> Result<char, InvalidGlyphHex> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(InvalidGlyphHex::Empty);
    }
    if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(InvalidGlyphHex::NotHex(text.to_owned()));
    }

    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| InvalidGlyphHex::NotScalar(text.to_owned()))
}

/// Interprets a configuration flag the way Kconfig exports it.
///
/// `y`, `yes`, `1`, `true` and `on` (in any case) are set; anything else is unset.
pub fn parse_flag(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };

    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "1" | "true" | "on"
    )
}

/// Reasons a glyph string is rejected.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum InvalidGlyphHex {
    /// No digits were supplied.
    Empty,
    /// The string contains a character that is not a hexadecimal digit.
    NotHex(String),
    /// The value is not a Unicode scalar value.
    NotScalar(String),
}

impl fmt::Display for InvalidGlyphHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("glyph is empty"),
            Self::NotHex(text) => write!(f, "glyph {text:?} is not hexadecimal"),
            Self::NotScalar(text) => write!(f, "glyph {text:?} is not a Unicode scalar value"),
        }
    }
}

impl error::Error for InvalidGlyphHex {}

#[cfg(test)]
mod test {
    use super::{
        DEFAULT_GLYPH, Environment, GlyphOrigin, InvalidGlyphHex, parse_codepoint, parse_flag,
        resolve_glyph,
    };

    #[test]
    fn parses_plain_and_prefixed_hex() {
        assert_eq!(parse_codepoint("f005"), Ok('\u{f005}'));
        assert_eq!(parse_codepoint("F1E1"), Ok('\u{f1e1}'));
        assert_eq!(parse_codepoint("0xf005"), Ok('\u{f005}'));
        assert_eq!(parse_codepoint(" 41 "), Ok('A'));
    }

    #[test]
    fn rejects_invalid_hex() {
        assert_eq!(parse_codepoint(""), Err(InvalidGlyphHex::Empty));
        assert_eq!(parse_codepoint("0x"), Err(InvalidGlyphHex::Empty));
        assert_eq!(
            parse_codepoint("zz9"),
            Err(InvalidGlyphHex::NotHex("zz9".to_owned()))
        );
        assert_eq!(
            parse_codepoint("+f005"),
            Err(InvalidGlyphHex::NotHex("+f005".to_owned()))
        );
        assert_eq!(
            parse_codepoint("d800"),
            Err(InvalidGlyphHex::NotScalar("d800".to_owned()))
        );
        assert_eq!(
            parse_codepoint("110000"),
            Err(InvalidGlyphHex::NotScalar("110000".to_owned()))
        );
        assert_eq!(
            parse_codepoint("fffffffff"),
            Err(InvalidGlyphHex::NotScalar("fffffffff".to_owned()))
        );
    }

    #[test]
    fn argument_beats_environment() {
        let glyph = resolve_glyph(Some("f004"), Some("f1e1"));
        assert_eq!(glyph.codepoint, '\u{f004}');
        assert_eq!(glyph.origin, GlyphOrigin::Argument);
    }

    #[test]
    fn environment_fills_in_missing_argument() {
        let glyph = resolve_glyph(None, Some("f1e1"));
        assert_eq!(glyph.codepoint, '\u{f1e1}');
        assert_eq!(glyph.origin, GlyphOrigin::Environment);
        assert_eq!(glyph.hex(), "f1e1");
    }

    #[test]
    fn invalid_argument_falls_through() {
        let glyph = resolve_glyph(Some("zz9"), Some("f1e1"));
        assert_eq!(glyph.codepoint, '\u{f1e1}');
        assert_eq!(glyph.origin, GlyphOrigin::Environment);

        let glyph = resolve_glyph(Some("zz9"), None);
        assert_eq!(glyph.codepoint, DEFAULT_GLYPH);
        assert_eq!(glyph.origin, GlyphOrigin::Default);

        let glyph = resolve_glyph(Some("zz9"), Some("nope"));
        assert_eq!(glyph.codepoint, DEFAULT_GLYPH);
        assert_eq!(glyph.origin, GlyphOrigin::Default);
    }

    #[test]
    fn default_without_sources() {
        let glyph = resolve_glyph(None, None);
        assert_eq!(glyph.codepoint, DEFAULT_GLYPH);
        assert_eq!(glyph.hex(), "f005");
    }

    #[test]
    fn kconfig_flags() {
        for value in ["y", "Y", "yes", "1", "true", "ON"] {
            assert!(parse_flag(Some(value)), "{value}");
        }
        for value in ["n", "0", "", "false", "maybe"] {
            assert!(!parse_flag(Some(value)), "{value}");
        }
        assert!(!parse_flag(None));

        let environment = Environment {
            glyph: None,
            inverted: Some("y".to_owned()),
        };
        assert!(environment.inverted());
        assert!(!Environment::default().inverted());
    }
}
