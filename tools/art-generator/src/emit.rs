//! Emission of the generated assets: an LVGL C source file or PNG previews.
//!
//! Everything is rendered in memory before the first file is touched, and every file is written
//! to a sibling temporary file that is then renamed over the target.

use core::{error, fmt, fmt::Write as _};
use std::{
    ffi::OsString,
    fs,
    io::{self, Cursor},
    path::{Path, PathBuf},
};

use glyph_art::{
    canvas::Canvas,
    orientation::Orientation,
    packing::{PackedAsset, Palette},
};
use image::{GrayImage, ImageFormat};
use log::info;

use crate::input::{INVERTED_ENV, ResolvedGlyph};

/// Opens the generated region of the C source.
const BEGIN_MARKER: &str = "/* BEGIN AUTO-GENERATED PATTERN IMAGES (do not edit manually) */";

/// Closes the generated region of the C source.
const END_MARKER: &str = "/* END AUTO-GENERATED PATTERN IMAGES */";

/// Renders `assets` as a complete C translation unit of `lv_img_dsc_t` descriptors.
///
/// Both palettes are emitted behind `#if CONFIG_NICE_VIEW_WIDGET_INVERTED`, so the firmware build
/// picks the polarity. The palette the assets were packed with is recorded in the header.
pub fn render_art_source(
    assets: &[PackedAsset],
    glyph: &ResolvedGlyph,
    orientation: Orientation,
) -> String {
    let mut source = String::new();

    // Writing to a `String` cannot fail.
    let _ = write_art_source(&mut source, assets, glyph, orientation);
    source
}

/// Writes the C translation unit for `assets` into `out`.
fn write_art_source(
    out: &mut String,
    assets: &[PackedAsset],
    glyph: &ResolvedGlyph,
    orientation: Orientation,
) -> fmt::Result {
    writeln!(out, "/*")?;
    writeln!(out, " * Generated pattern assets (pattern1..pattern{})", assets.len())?;
    writeln!(
        out,
        " * Glyph U+{:04X}, {} orientation.",
        u32::from(glyph.codepoint),
        orientation.as_str()
    )?;
    let inverted = assets.iter().any(PackedAsset::palette_inverted);
    writeln!(
        out,
        " * Generated with {} palette; {INVERTED_ENV} selects it at build time.",
        if inverted { "an inverted" } else { "a normal" }
    )?;
    writeln!(out, " * Do not edit; regenerate with art-generator --mode art.")?;
    writeln!(out, " */")?;
    writeln!(out)?;
    writeln!(out, "#include <lvgl.h>")?;
    writeln!(out)?;
    writeln!(out, "#ifndef LV_ATTRIBUTE_MEM_ALIGN")?;
    writeln!(out, "#define LV_ATTRIBUTE_MEM_ALIGN")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(out, "{BEGIN_MARKER}")?;

    for asset in assets {
        let name = asset.name();
        let attribute = format!("LV_ATTRIBUTE_IMG_{}", name.to_uppercase());

        writeln!(out, "#ifndef {attribute}")?;
        writeln!(out, "#define {attribute}")?;
        writeln!(out, "#endif")?;
        writeln!(
            out,
            "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST {attribute} uint8_t {name}_map[] = {{"
        )?;

        writeln!(out, "#if {INVERTED_ENV}")?;
        write_palette(out, Palette::new(true))?;
        writeln!(out, "#else")?;
        write_palette(out, Palette::new(false))?;
        writeln!(out, "#endif")?;
        for (y, row) in asset.rows().enumerate() {
            writeln!(out, "    /* y{y:02} */ {},", hex_list(row.bytes()))?;
        }
        writeln!(out, "}};")?;
        writeln!(out)?;

        writeln!(out, "const lv_img_dsc_t {name} = {{")?;
        writeln!(out, "  .header.cf = LV_IMG_CF_INDEXED_{}BIT,", asset.bit_depth())?;
        writeln!(out, "  .header.always_zero = 0,")?;
        writeln!(out, "  .header.reserved = 0,")?;
        writeln!(out, "  .header.w = {},", asset.width())?;
        writeln!(out, "  .header.h = {},", asset.height())?;
        writeln!(out, "  .data_size = {},", asset.stride() * asset.height())?;
        writeln!(out, "  .data = {name}_map,")?;
        writeln!(out, "}};")?;
        writeln!(out)?;
    }

    writeln!(out, "{END_MARKER}")
}

/// Writes the entries of `palette` as `map[]` initializer lines.
fn write_palette(out: &mut String, palette: Palette) -> fmt::Result {
    for (index, color) in palette.entries().iter().enumerate() {
        writeln!(out, "    {}, /*Color of index {index}*/", hex_list(color))?;
    }

    Ok(())
}

/// Formats `bytes` as a comma separated list of `0x..` literals.
fn hex_list(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("0x{byte:02x}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Replaces `path` with the C source for `assets`.
///
/// # Errors
///
/// Returns [`EmitError::Io`] if the file cannot be written; `path` is left untouched in that
/// case.
pub fn write_art_file(
    path: &Path,
    assets: &[PackedAsset],
    glyph: &ResolvedGlyph,
    orientation: Orientation,
) -> Result<PathBuf, EmitError> {
    let source = render_art_source(assets, glyph, orientation);
    write_atomically(path, source.as_bytes())?;

    info!("wrote {} assets to {}", assets.len(), path.display());
    Ok(path.to_path_buf())
}

/// Encodes `canvas` as a grayscale PNG.
///
/// # Errors
///
/// Returns [`EmitError::Encode`] if encoding fails.
pub fn encode_preview(name: &str, canvas: &Canvas) -> Result<Vec<u8>, EmitError> {
    let (Ok(width), Ok(height)) = (u32::try_from(canvas.width()), u32::try_from(canvas.height()))
    else {
        unreachable!("canvas dimensions always fit in a u32")
    };
    let Some(image) = GrayImage::from_raw(width, height, canvas.as_slice().to_vec()) else {
        unreachable!("canvas data always matches its dimensions")
    };

    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|source| EmitError::Encode {
            name: name.to_owned(),
            source,
        })?;
    Ok(png.into_inner())
}

/// Returns the file name of the preview of `pattern_name` for `glyph`, e.g.
/// `f005_pattern3.png`.
pub fn preview_file_name(glyph: &ResolvedGlyph, pattern_name: &str) -> String {
    format!("{}_{pattern_name}.png", glyph.hex())
}

/// Writes one PNG per `(pattern name, canvas)` pair into `dir`, creating it if needed.
///
/// All images are encoded before any file is written.
///
/// # Errors
///
/// Returns [`EmitError::Encode`] if an image cannot be encoded and [`EmitError::Io`] if the
/// directory or a file cannot be written.
pub fn write_previews<'canvas>(
    dir: &Path,
    glyph: &ResolvedGlyph,
    previews: impl IntoIterator<Item = (&'canvas str, &'canvas Canvas)>,
) -> Result<Vec<PathBuf>, EmitError> {
    let encoded = previews
        .into_iter()
        .map(|(name, canvas)| {
            let png = encode_preview(name, canvas)?;
            Ok((dir.join(preview_file_name(glyph, name)), png))
        })
        .collect::<Result<Vec<_>, EmitError>>()?;

    fs::create_dir_all(dir).map_err(|source| EmitError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(encoded.len());
    for (path, png) in encoded {
        write_atomically(&path, &png)?;
        info!("saved {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Writes `contents` to a temporary file next to `path`, then renames it over `path`.
///
/// # Errors
///
/// Returns [`EmitError::Io`] if writing or renaming fails. The temporary file is removed on
/// failure.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), EmitError> {
    let temporary = temporary_path(path);

    let result = fs::write(&temporary, contents).and_then(|()| fs::rename(&temporary, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&temporary);
        return Err(EmitError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Returns `path` with `.tmp` appended to its file name.
fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Various errors that can occur while emitting assets.
#[derive(Debug)]
pub enum EmitError {
    /// A file or directory could not be written.
    Io {
        /// The path being written.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// A preview image could not be encoded.
    Encode {
        /// The name of the pattern being encoded.
        name: String,
        /// The underlying error.
        source: image::ImageError,
    },
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "error writing {}: {source}", path.display()),
            Self::Encode { name, source } => write!(f, "error encoding {name} preview: {source}"),
        }
    }
}

impl error::Error for EmitError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}
