//! Persistence and environment helpers for the app shell.

use crate::core::settings::BrowseSettings;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use web_sys::Url;

pub(crate) const LOCALE_KEY: &str = "kaguya.locale";

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(nav) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&nav) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    if let Err(err) = LocalStorage::set(LOCALE_KEY, locale.code()) {
        console::warn!(format!("failed to persist locale: {err}"));
    }
}

/// Settings for the running page; the REST origin follows the page origin.
pub(crate) fn load_settings() -> BrowseSettings {
    BrowseSettings {
        api_base_url: api_base_url(),
        ..BrowseSettings::default()
    }
}

fn api_base_url() -> String {
    let href = window()
        .location()
        .href()
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    if let Ok(url) = Url::new(&href) {
        let protocol = url.protocol();
        let host = url.hostname();
        let port = url.port();
        let mapped_port = match port.as_str() {
            "" => None,
            "8080" => Some("7070"),
            other => Some(other),
        };

        let mut base = format!("{protocol}//{host}");
        if let Some(port) = mapped_port {
            base.push(':');
            base.push_str(port);
        }
        return base;
    }

    crate::core::settings::DEFAULT_API_BASE_URL.to_string()
}
