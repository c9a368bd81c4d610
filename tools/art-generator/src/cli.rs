//! Command line parsing and [`GenerateConfig`] construction.

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, builder::EnumValueParser, value_parser};
use glyph_art::orientation::Orientation;

/// Default location of the generated C source, relative to the module root.
pub const DEFAULT_ART_FILE: &str = "boards/shields/nice_view_glyphs/widgets/art.c";

/// Default directory for preview images.
pub const DEFAULT_PREVIEW_DIR: &str = "previews";

/// Default bundled font directory, searched before the operating system's font directories.
pub const DEFAULT_FONT_DIR: &str = "fonts";

/// What the run produces.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Mode {
    /// A C source file holding every pattern asset.
    Art,
    /// One PNG per pattern.
    #[default]
    Previews,
}

impl Mode {
    /// Returns the textual representation of the [`Mode`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Art => "art",
            Self::Previews => "previews",
        }
    }
}

impl clap::ValueEnum for Mode {
    fn value_variants<'a>() -> &'a [Self] {
        static MODES: &[Mode] = &[Mode::Art, Mode::Previews];

        MODES
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Description of the glyph to render, how to lay it out and where the results go.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GenerateConfig {
    /// The raw `--glyph` argument, validated later so that a bad value can fall back.
    pub glyph: Option<String>,
    /// What to produce.
    pub mode: Mode,
    /// The orientation the patterns are authored in.
    pub orientation: Orientation,
    /// The C source file written in [`Mode::Art`].
    pub art_file: PathBuf,
    /// The directory written in [`Mode::Previews`].
    pub preview_dir: PathBuf,
    /// An explicit font file, tried before any directory.
    pub font: Option<PathBuf>,
    /// The bundled font directory.
    pub font_dir: PathBuf,
}

/// Parses the process arguments into a [`GenerateConfig`].
pub fn get_config() -> GenerateConfig {
    parse_arguments(&command_parser().get_matches())
}

/// Parses the arguments required to produce a valid [`GenerateConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> GenerateConfig {
    let glyph = matches.get_one::<String>("glyph").cloned();

    let mode = matches
        .get_one::<Mode>("mode")
        .copied()
        .unwrap_or_else(|| unreachable!("`mode` should have a default value"));

    let orientation = matches
        .get_one::<Orientation>("orientation")
        .copied()
        .unwrap_or_else(|| unreachable!("`orientation` should have a default value"));

    let art_file = matches
        .get_one::<PathBuf>("art-file")
        .cloned()
        .unwrap_or_else(|| unreachable!("`art-file` should have a default value"));

    let preview_dir = matches
        .get_one::<PathBuf>("preview-dir")
        .cloned()
        .unwrap_or_else(|| unreachable!("`preview-dir` should have a default value"));

    let font = matches.get_one::<PathBuf>("font").cloned();

    let font_dir = matches
        .get_one::<PathBuf>("font-dir")
        .cloned()
        .unwrap_or_else(|| unreachable!("`font-dir` should have a default value"));

    GenerateConfig {
        glyph,
        mode,
        orientation,
        art_file,
        preview_dir,
        font,
        font_dir,
    }
}

/// Returns the command parser for `art-generator`.
pub fn command_parser() -> Command {
    let glyph = Arg::new("glyph")
        .long("glyph")
        .value_name("HEX")
        .help("Hexadecimal codepoint to render, e.g. f005 [fallback: $NICE_VIEW_GLYPH]");

    let mode = Arg::new("mode")
        .long("mode")
        .value_parser(EnumValueParser::<Mode>::new())
        .default_value("previews")
        .help("Emit the C source file (art) or PNG previews (previews)");

    let orientation = Arg::new("orientation")
        .long("orientation")
        .value_parser(EnumValueParser::<Orientation>::new())
        .default_value("portrait")
        .help("Orientation the patterns are authored in");

    let art_file = Arg::new("art-file")
        .long("art-file")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_ART_FILE)
        .help("C source file overwritten in art mode");

    let preview_dir = Arg::new("preview-dir")
        .long("preview-dir")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_PREVIEW_DIR)
        .help("Directory receiving the PNGs in previews mode");

    let font = Arg::new("font")
        .long("font")
        .value_parser(value_parser!(PathBuf))
        .help("Font file to use instead of searching for one");

    let font_dir = Arg::new("font-dir")
        .long("font-dir")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_FONT_DIR)
        .help("Bundled font directory, searched before the system font directories");

    Command::new("art-generator")
        .about("Renders a glyph into the ten nice!view pattern assets")
        .arg(glyph)
        .arg(mode)
        .arg(orientation)
        .arg(art_file)
        .arg(preview_dir)
        .arg(font)
        .arg(font_dir)
}
