//! Generator for the nice!view glyph pattern assets.
//!
//! Resolves a codepoint and a font, renders the ten built-in patterns through the [`glyph_art`]
//! stages and writes either an LVGL C source file or PNG previews.

pub mod cli;
pub mod emit;
pub mod font;
pub mod input;
pub mod pipeline;
pub mod raster;

#[cfg(test)]
mod test {
    use std::{fs, path::PathBuf, process};

    /// Returns an empty directory unique to `name` and this process.
    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("art-generator-{name}-{}", process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }
}
