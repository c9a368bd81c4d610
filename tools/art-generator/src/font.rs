//! Discovery of a usable font file from an ordered list of [`FontProvider`]s.

use core::{error, fmt};
use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

/// File name keywords that mark a font as a candidate. Patched Nerd Fonts carry the icon glyphs
/// the patterns are usually drawn with.
pub const PREFERRED_KEYWORDS: &[&str] = &["caskaydia", "cascadia", "nerd", "code"];

/// A place that may hold usable font files.
pub trait FontProvider {
    /// Returns a human readable description of the searched location.
    fn describe(&self) -> String;

    /// Returns the font files offered by this provider, best first.
    ///
    /// A provider whose location does not exist offers nothing.
    fn candidates(&self) -> Vec<PathBuf>;
}

/// A single, explicitly named font file.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontFile(pub PathBuf);

impl FontProvider for FontFile {
    fn describe(&self) -> String {
        self.0.display().to_string()
    }

    fn candidates(&self) -> Vec<PathBuf> {
        if self.0.is_file() {
            vec![self.0.clone()]
        } else {
            Vec::new()
        }
    }
}

/// A directory tree searched for font files whose names contain a [`PREFERRED_KEYWORDS`] entry.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontDirectory(pub PathBuf);

impl FontProvider for FontDirectory {
    fn describe(&self) -> String {
        self.0.display().to_string()
    }

    fn candidates(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        collect_fonts(&self.0, &mut files);

        files.sort_by(|a, b| {
            let (a_name, b_name) = (lowercase_file_name(a), lowercase_file_name(b));
            score(&b_name)
                .cmp(&score(&a_name))
                .then(a_name.len().cmp(&b_name.len()))
                .then(a.cmp(b))
        });
        files
    }
}

/// Recursively gathers preferred font files below `dir`, ignoring unreadable entries.
fn collect_fonts(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            collect_fonts(&path, files);
        } else if is_preferred_font(&path) {
            files.push(path);
        }
    }
}

/// Returns `true` if `path` names a TrueType or OpenType file with a preferred keyword.
fn is_preferred_font(path: &Path) -> bool {
    let is_font = path.extension().is_some_and(|extension| {
        extension.eq_ignore_ascii_case("ttf") || extension.eq_ignore_ascii_case("otf")
    });
    let name = lowercase_file_name(path);

    is_font && PREFERRED_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}

/// Returns the lowercase file name of `path`.
fn lowercase_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Ranks a lowercase file name by the number of keywords it contains.
fn score(name: &str) -> usize {
    PREFERRED_KEYWORDS
        .iter()
        .filter(|keyword| name.contains(**keyword))
        .count()
}

/// Returns the operating system's font directories, in search order.
pub fn platform_font_dirs(home: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    #[cfg(target_os = "macos")]
    {
        dirs.push(PathBuf::from("/Library/Fonts"));
        if let Some(home) = home {
            dirs.push(home.join("Library/Fonts"));
        }
        dirs.push(PathBuf::from("/System/Library/Fonts/Supplemental"));
    }

    #[cfg(target_os = "windows")]
    {
        let _ = home;
        if let Some(windir) = std::env::var_os("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        }
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join("Microsoft/Windows/Fonts"));
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = home {
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
    }

    dirs
}

/// Builds the provider list: the explicit `font` file, then the `bundled` directory, then the
/// operating system directories.
pub fn providers(
    font: Option<PathBuf>,
    bundled: PathBuf,
    home: Option<&Path>,
) -> Vec<Box<dyn FontProvider>> {
    let mut providers: Vec<Box<dyn FontProvider>> = Vec::new();
    if let Some(font) = font {
        providers.push(Box::new(FontFile(font)));
    }
    providers.push(Box::new(FontDirectory(bundled)));
    for dir in platform_font_dirs(home) {
        providers.push(Box::new(FontDirectory(dir)));
    }

    providers
}

/// Returns the first candidate, across `providers` in order, that can be read and that `load`
/// accepts.
///
/// Candidates rejected by `load` are skipped with a warning.
///
/// # Errors
///
/// Returns [`FontNotFound`] naming every searched location if no candidate is accepted.
pub fn resolve_font<T, E, F>(
    providers: &[Box<dyn FontProvider>],
    mut load: F,
) -> Result<(PathBuf, T), FontNotFound>
where
    E: fmt::Display,
    F: FnMut(Vec<u8>) -> Result<T, E>,
{
    for provider in providers {
        for path in provider.candidates() {
            debug!("trying font {}", path.display());

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(error) => {
                    warn!("skipping font {}: {error}", path.display());
                    continue;
                }
            };

            match load(bytes) {
                Ok(font) => return Ok((path, font)),
                Err(error) => warn!("skipping font {}: {error}", path.display()),
            }
        }
    }

    Err(FontNotFound {
        searched: providers.iter().map(|provider| provider.describe()).collect(),
    })
}

/// No provider offered a usable font.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontNotFound {
    /// The searched locations, in search order.
    pub searched: Vec<String>,
}

impl fmt::Display for FontNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no usable font matching {PREFERRED_KEYWORDS:?} found; install a Nerd Font \
             (https://www.nerdfonts.com) or pass --font. Searched: {}",
            self.searched.join(", ")
        )
    }
}

impl error::Error for FontNotFound {}

#[cfg(test)]
mod test {
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use super::{FontDirectory, FontFile, FontProvider, platform_font_dirs, resolve_font};
    use crate::test::scratch_dir;

    /// Creates the standard font tree used by these tests below `root`.
    fn populate(root: &Path) {
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("DejaVuSans.ttf"), b"plain").unwrap();
        fs::write(root.join("CaskaydiaCoveNerdFontMono-Regular.ttf"), b"caskaydia").unwrap();
        fs::write(root.join("CascadiaCode.ttf"), b"cascadia").unwrap();
        fs::write(root.join("sub/FiraCodeNerdFont.otf"), b"fira").unwrap();
        fs::write(root.join("nerd-notes.txt"), b"notes").unwrap();
    }

    #[test]
    fn directory_ranks_candidates() {
        let root = scratch_dir("font-rank");
        populate(&root);

        let names: Vec<String> = FontDirectory(root.clone())
            .candidates()
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "CascadiaCode.ttf",
                "FiraCodeNerdFont.otf",
                "CaskaydiaCoveNerdFontMono-Regular.ttf",
            ]
        );

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn missing_locations_offer_nothing() {
        let root = scratch_dir("font-missing");
        assert!(FontDirectory(root.join("absent")).candidates().is_empty());
        assert!(FontFile(root.join("absent.ttf")).candidates().is_empty());
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn unloadable_candidates_are_skipped() {
        let root = scratch_dir("font-skip");
        populate(&root);

        let providers: Vec<Box<dyn FontProvider>> = vec![
            Box::new(FontFile(root.join("absent.ttf"))),
            Box::new(FontDirectory(root.clone())),
        ];
        let (path, contents) = resolve_font(&providers, |bytes| {
            if bytes == b"cascadia" {
                Err("unsupported outline format")
            } else {
                Ok(String::from_utf8(bytes).unwrap())
            }
        })
        .unwrap();

        assert_eq!(path, root.join("sub/FiraCodeNerdFont.otf"));
        assert_eq!(contents, "fira");

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn explicit_file_wins() {
        let root = scratch_dir("font-explicit");
        populate(&root);

        let providers: Vec<Box<dyn FontProvider>> = vec![
            Box::new(FontFile(root.join("DejaVuSans.ttf"))),
            Box::new(FontDirectory(root.clone())),
        ];
        let (path, _) = resolve_font(&providers, Ok::<_, String>).unwrap();
        assert_eq!(path, root.join("DejaVuSans.ttf"));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn not_found_names_every_location() {
        let root = scratch_dir("font-none");
        let providers: Vec<Box<dyn FontProvider>> = vec![
            Box::new(FontFile(root.join("absent.ttf"))),
            Box::new(FontDirectory(root.join("fonts"))),
        ];

        let error = resolve_font(&providers, Ok::<_, String>).unwrap_err();
        assert_eq!(error.searched.len(), 2);
        let message = error.to_string();
        assert!(message.contains("absent.ttf"));
        assert!(message.contains(&root.join("fonts").display().to_string()));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn platform_dirs_include_home() {
        let home = PathBuf::from("/home/someone");
        let dirs = platform_font_dirs(Some(&home));
        assert!(!dirs.is_empty());

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        assert!(dirs.contains(&home.join(".fonts")));
    }
}
