//! Name Localization Service
//!
//! Resolves a display name from a locale-keyed name map with an optional
//! English fallback.

use std::collections::HashMap;

/// Resolver for localized display names.
pub struct NameLocalizer;

impl NameLocalizer {
    /// Resolve a name for `locale` (trimmed, case-insensitive) from `names`.
    ///
    /// Falls back to the English name when `fallback_to_english` is set and
    /// the requested locale is missing. `None` means no localized name is
    /// available, which callers do not treat as an error.
    pub fn resolve(
        names: &HashMap<String, String>,
        locale: &str,
        fallback_to_english: bool,
    ) -> Option<String> {
        let locale = locale.trim().to_lowercase();

        if let Some(name) = names.get(&locale) {
            return Some(name.clone());
        }

        if fallback_to_english {
            return names.get("en").cloned();
        }

        None
    }
}
