//! Sequencing of the generation stages for a [`GenerateConfig`].

use core::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use glyph_art::{
    canvas::Canvas,
    compose::{GlyphCache, GlyphSource, compose},
    orientation::{Orientation, to_raster},
    packing::{PackedAsset, pack},
    pattern::{PATTERNS, PatternSpec, font_px, max_size},
};
use log::{debug, info};

use crate::{
    cli::{GenerateConfig, Mode},
    emit,
    font::{FontProvider, resolve_font},
    input::{Environment, ResolvedGlyph, resolve_glyph},
    raster::FontGlyph,
};

/// The states a run moves through. A fatal error in any of them aborts the run.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Stage {
    /// Reading the command line and environment.
    ParseInputs,
    /// Choosing the codepoint.
    ResolveGlyph,
    /// Locating and parsing a font.
    ResolveFont,
    /// Composing, transforming and packing every pattern.
    ComposeAll,
    /// Writing the output.
    EmitAll,
    /// Every output was written.
    Done,
    /// A fatal error aborted the run.
    Fail,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ParseInputs => "parsing inputs",
            Self::ResolveGlyph => "resolving the glyph",
            Self::ResolveFont => "resolving a font",
            Self::ComposeAll => "composing patterns",
            Self::EmitAll => "emitting assets",
            Self::Done => "done",
            Self::Fail => "failed",
        };
        f.write_str(name)
    }
}

/// Logs entry into `stage`.
pub fn enter(stage: Stage) {
    debug!("stage: {stage}");
}

/// The intermediates and result produced for a single [`PatternSpec`].
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Composite {
    /// The pattern that was composed.
    pub pattern: &'static PatternSpec,
    /// The logical canvas, before orientation.
    pub canvas: Canvas,
    /// The packed device raster.
    pub asset: PackedAsset,
}

/// Composes, orients and packs every built-in pattern, in index order.
///
/// Each distinct glyph size is rasterized once and reused across patterns.
pub fn compose_all<S: GlyphSource>(
    source: S,
    orientation: Orientation,
    palette_inverted: bool,
) -> Vec<Composite> {
    let mut cache = GlyphCache::new(source);

    // The largest size is rasterized first and shared with every pattern that uses it.
    let largest = font_px(max_size());
    let mask = cache.mask(largest);
    debug!("largest glyph: {largest}px, {}x{}", mask.width(), mask.height());

    let composites = PATTERNS
        .iter()
        .map(|pattern| {
            let canvas = compose(pattern, orientation, &mut cache);
            let asset = pack(pattern.name, &to_raster(&canvas), palette_inverted);
            Composite {
                pattern,
                canvas,
                asset,
            }
        })
        .collect();

    debug!("rasterized {} distinct glyph sizes", cache.len());
    composites
}

/// Writes `composites` as requested by `mode`, returning the written paths.
///
/// # Errors
///
/// Returns an error if any output cannot be encoded or written.
pub fn emit_all(
    config: &GenerateConfig,
    glyph: &ResolvedGlyph,
    composites: &[Composite],
) -> Result<Vec<PathBuf>> {
    let written = match config.mode {
        Mode::Art => {
            let assets: Vec<PackedAsset> = composites
                .iter()
                .map(|composite| composite.asset.clone())
                .collect();
            vec![emit::write_art_file(
                &config.art_file,
                &assets,
                glyph,
                config.orientation,
            )?]
        }
        Mode::Previews => emit::write_previews(
            &config.preview_dir,
            glyph,
            composites
                .iter()
                .map(|composite| (composite.pattern.name, &composite.canvas)),
        )?,
    };

    Ok(written)
}

/// Runs every stage for `config` and `environment`, returning the written paths.
///
/// The font is the first candidate of `providers` that parses.
///
/// # Errors
///
/// Returns an error naming the failed [`Stage`] if no font is usable or the output cannot be
/// written. Nothing is written before every pattern has been composed.
pub fn run(
    config: &GenerateConfig,
    environment: &Environment,
    providers: &[Box<dyn FontProvider>],
) -> Result<Vec<PathBuf>> {
    let result = run_stages(config, environment, providers);
    enter(if result.is_ok() { Stage::Done } else { Stage::Fail });
    result
}

/// Moves through every stage up to [`Stage::EmitAll`].
fn run_stages(
    config: &GenerateConfig,
    environment: &Environment,
    providers: &[Box<dyn FontProvider>],
) -> Result<Vec<PathBuf>> {
    enter(Stage::ResolveGlyph);
    let glyph = resolve_glyph(config.glyph.as_deref(), environment.glyph.as_deref());
    let palette_inverted = environment.inverted();
    info!(
        "rendering U+{:04X} from {} ({} orientation, palette {})",
        u32::from(glyph.codepoint),
        glyph.origin,
        config.orientation.as_str(),
        if palette_inverted { "inverted" } else { "normal" },
    );

    enter(Stage::ResolveFont);
    let (font_path, source) = resolve_font(providers, |bytes| {
        FontGlyph::from_bytes(bytes, glyph.codepoint)
    })
    .with_context(|| format!("failed while {}", Stage::ResolveFont))?;
    info!("using font {}", font_path.display());

    enter(Stage::ComposeAll);
    let composites = compose_all(&source, config.orientation, palette_inverted);

    enter(Stage::EmitAll);
    emit_all(config, &glyph, &composites)
        .with_context(|| format!("failed while {}", Stage::EmitAll))
}
