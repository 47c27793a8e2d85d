use serde::{Deserialize, Serialize};

/// App manifest (`manifest.json`). Only the display name is consumed;
/// every other field is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
}

/// Outbound wire catalog (`translations/en.yml`) as uploaded to the
/// translation platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireCatalog {
    pub title: Option<String>,
    #[serde(default)]
    pub packages: Vec<String>,
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePart {
    pub translation: WireEntry,
}

/// One catalog entry on the wire: a fully prefixed flat key plus its
/// title/value pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEntry {
    pub key: String,
    pub title: String,
    pub value: String,
}

/// Locale listing returned by the translation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleListing {
    pub locales: Vec<RemoteLocale>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLocale {
    pub locale: String,
    pub url: String,
}

/// Envelope around one per-locale response:
/// `{ "locale": { "locale": "...", "translations": { ... } } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleEnvelope {
    pub locale: LocalePayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalePayload {
    pub locale: String,
    /// Flat mapping of fully prefixed keys to raw values.
    #[serde(default)]
    pub translations: serde_json::Map<String, serde_json::Value>,
}
