//! JSON-backed translations with per-locale bundles.

use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    En,
    /// Vietnamese.
    Vi,
}

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Vi, Self::En]
    }

    /// Two-letter code for the locale.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }

    /// Human-friendly label for dropdowns.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Vi => "Tiếng Việt",
        }
    }

    /// Map a browser language tag (`vi-VN`, `en`) to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.to_ascii_lowercase();
        let base = lowered.split('-').next().unwrap_or_default();
        Self::all().into_iter().find(|locale| locale.code() == base)
    }
}

/// Default locale of the browse view.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::Vi;

/// Translation bundle containing a parsed JSON tree for the locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Build a bundle for `locale`; missing keys degrade to English.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        Self { locale, tree }
    }

    /// Resolve a dotted path (`section.key`) with English fallback and caller default.
    ///
    /// Only the first `.` separates section from key, so tokens such as
    /// `Sci-Fi` or `Slice of Life` resolve as written.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let (section, key) = path.split_once('.')?;
    tree.get(section)?
        .get(key)?
        .as_str()
        .map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::Vi => include_str!("../../i18n/vi.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::Vi);
        assert_eq!(bundle.text("genre.Isekai", "Isekai"), "Isekai");
        assert_eq!(bundle.text("nonexistent", "fallback"), "fallback");
    }

    #[test]
    fn keys_with_spaces_and_dashes_resolve() {
        let bundle = TranslationBundle::new(LocaleCode::En);
        assert_eq!(bundle.text("genre.Slice of Life", ""), "Slice of Life");
        assert_eq!(bundle.text("genre.Sci-Fi", ""), "Sci-Fi");
        assert_eq!(
            TranslationBundle::new(LocaleCode::Vi).text("season.FALL", ""),
            "Mùa thu"
        );
    }

    #[test]
    fn every_locale_covers_the_browse_labels() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            assert_eq!(bundle.locale, locale);
            for key in ["keyword", "genres", "season", "end_of_results", "fetch_failed"] {
                let path = format!("browse.{key}");
                assert_ne!(resolve(&bundle.tree, &path), None, "{path} missing for {locale:?}");
            }
        }
    }

    #[test]
    fn language_tags_map_to_locales() {
        assert_eq!(LocaleCode::from_lang_tag("vi-VN"), Some(LocaleCode::Vi));
        assert_eq!(LocaleCode::from_lang_tag("EN"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("fr"), None);
    }
}
