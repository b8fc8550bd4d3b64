//! Lookup-key normalization.
//!
//! Every word is stored and resolved under a normalization key: lowercase,
//! Unicode-decomposed, combining marks stripped, everything outside
//! `[a-z0-9]` removed. The original surface form is kept alongside the key
//! because display and segmentation always operate on the surface.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Derive the normalization key for a surface form.
///
/// Pure and total: never fails, and an empty input yields an empty key.
///
/// # Example
/// ```
/// use libsyllabe_core::normalizer::normalize_key;
///
/// assert_eq!(normalize_key("École"), "ecole");
/// assert_eq!(normalize_key("aujourd'hui"), "aujourdhui");
/// assert_eq!(normalize_key(""), "");
/// ```
pub fn normalize_key(surface: &str) -> String {
    surface
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// A word as handled by the engine: the surface form exactly as it appeared
/// in the text, plus its normalization key. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    surface: String,
    key: String,
}

impl Word {
    pub fn new<S: Into<String>>(surface: S) -> Self {
        let surface = surface.into();
        let key = normalize_key(&surface);
        Self { surface, key }
    }

    /// The original surface form, for display and slicing.
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// The normalization key, for record lookups and deduplication.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.surface)
    }
}
