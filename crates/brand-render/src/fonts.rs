//! Arabic font acquisition
//!
//! The font pair is loaded at most once per [`FontCache`]; the outcome,
//! including "unavailable", is remembered so later renders never retry.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use arabic_text::Shaper;

pub const REGULAR_FONT_FILE: &str = "NotoNaskhArabic-Regular.ttf";
pub const BOLD_FONT_FILE: &str = "NotoNaskhArabic-Bold.ttf";

/// Environment variable overriding the font directory
pub const FONT_DIR_ENV: &str = "BRAND_RENDER_FONT_DIR";
pub const DEFAULT_FONT_DIR: &str = "assets/fonts";

/// Loaded font bytes; a missing regular face means substitution is off
#[derive(Debug, Clone, Default)]
pub struct FontAssets {
    pub regular: Option<Arc<Vec<u8>>>,
    pub bold: Option<Arc<Vec<u8>>>,
}

impl FontAssets {
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Validate raw font bytes; faces that do not parse are dropped
    pub fn from_bytes(regular: Option<Vec<u8>>, bold: Option<Vec<u8>>) -> Self {
        let check = |bytes: Vec<u8>, which: &str| {
            if Shaper::new(&bytes).is_ok() {
                Some(Arc::new(bytes))
            } else {
                log::warn!("Arabic {which} font could not be parsed, ignoring it");
                None
            }
        };
        let regular = regular.and_then(|b| check(b, "regular"));
        let bold = bold.and_then(|b| check(b, "bold"));
        if regular.is_none() && bold.is_some() {
            log::warn!("Arabic bold font without a regular face, ignoring it");
            return Self::unavailable();
        }
        Self { regular, bold }
    }

    pub fn is_available(&self) -> bool {
        self.regular.is_some()
    }
}

/// Source of font files
pub trait FontLoader {
    fn load(&self, file_name: &str) -> io::Result<Vec<u8>>;
}

/// Reads fonts from a directory on disk
#[derive(Debug, Clone)]
pub struct FsFontLoader {
    dir: PathBuf,
}

impl FsFontLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$BRAND_RENDER_FONT_DIR`, or `assets/fonts`
    pub fn from_env() -> Self {
        let dir = std::env::var_os(FONT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_DIR));
        Self::new(dir)
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

impl FontLoader for FsFontLoader {
    fn load(&self, file_name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.dir.join(file_name))
    }
}

/// Load the regular/bold pair through a loader; failures degrade to None
pub fn load_font_assets(loader: &dyn FontLoader) -> FontAssets {
    let fetch = |file: &str| match loader.load(file) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("Could not load {file}: {e}");
            None
        }
    };

    let regular = fetch(REGULAR_FONT_FILE);
    let bold = if regular.is_some() {
        fetch(BOLD_FONT_FILE)
    } else {
        None
    };
    let assets = FontAssets::from_bytes(regular, bold);
    if assets.is_available() {
        log::debug!(
            "Arabic fonts loaded (bold face: {})",
            if assets.bold.is_some() { "yes" } else { "regular fallback" }
        );
    } else {
        log::warn!("Arabic font unavailable; RTL documents render without shaping");
    }
    assets
}

/// Memoized font pair
#[derive(Debug, Default)]
pub struct FontCache {
    cell: OnceLock<FontAssets>,
}

impl FontCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Load on first call; later calls return the remembered outcome
    pub fn ensure(&self, loader: &dyn FontLoader) -> &FontAssets {
        self.cell.get_or_init(|| load_font_assets(loader))
    }

    pub fn get(&self) -> Option<&FontAssets> {
        self.cell.get()
    }
}

/// Process-wide cache used by [`crate::render`]
pub fn global_font_cache() -> &'static FontCache {
    static CACHE: FontCache = FontCache::new();
    &CACHE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingLoader {
        calls: Cell<usize>,
    }

    impl FontLoader for CountingLoader {
        fn load(&self, _file_name: &str) -> io::Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            Err(io::Error::new(io::ErrorKind::NotFound, "offline"))
        }
    }

    struct GarbageLoader;

    impl FontLoader for GarbageLoader {
        fn load(&self, _file_name: &str) -> io::Result<Vec<u8>> {
            Ok(vec![0u8; 128])
        }
    }

    #[test]
    fn test_failure_is_cached() {
        let cache = FontCache::new();
        let loader = CountingLoader { calls: Cell::new(0) };

        assert!(!cache.ensure(&loader).is_available());
        assert!(!cache.ensure(&loader).is_available());
        // the bold face is not requested once regular fails
        assert_eq!(loader.calls.get(), 1);
        assert!(cache.get().is_some());
    }

    #[test]
    fn test_unparsable_font_is_unavailable() {
        let assets = load_font_assets(&GarbageLoader);
        assert!(!assets.is_available());
        assert!(assets.bold.is_none());
    }

    #[test]
    fn test_missing_directory() {
        let loader = FsFontLoader::new("/nonexistent/fonts");
        assert!(!load_font_assets(&loader).is_available());
        assert_eq!(loader.dir(), std::path::Path::new("/nonexistent/fonts"));
    }
}
