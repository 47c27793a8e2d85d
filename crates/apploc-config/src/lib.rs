use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplocConfig {
    /// Locale-listing URL override.
    pub endpoint: Option<String>,
    pub app: Option<AppCfg>,
    pub update: Option<UpdateCfg>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppCfg {
    /// Fallback display name when manifest.json carries none.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCfg {
    /// Package name; set to skip the interactive prompt.
    pub package: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Other(String),
}

pub fn load_config() -> Result<ApplocConfig, ConfigError> {
    // Search order: CWD/apploc.toml, <config dir>/apploc/apploc.toml
    let mut merged = ApplocConfig::default();
    if let Ok(p) = std::env::current_dir() {
        merged = merge(merged, load_from(&p.join("apploc.toml")));
    }
    if let Some(base) = dirs::config_dir() {
        merged = merge(merged, load_from(&base.join("apploc").join("apploc.toml")));
    }
    Ok(merged)
}

fn load_from(path: &Path) -> ApplocConfig {
    if let Ok(s) = std::fs::read_to_string(path) {
        if let Ok(cfg) = toml::from_str::<ApplocConfig>(&s) {
            return cfg;
        }
    }
    ApplocConfig::default()
}

fn merge(mut a: ApplocConfig, b: ApplocConfig) -> ApplocConfig {
    if a.endpoint.is_none() {
        a.endpoint = b.endpoint;
    }
    a.app = merge_opt(a.app, b.app, merge_app);
    a.update = merge_opt(a.update, b.update, merge_update);
    a
}

fn merge_opt<T: Default>(a: Option<T>, b: Option<T>, f: fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (None, Some(b)) => Some(b),
        (Some(a), None) => Some(a),
        (None, None) => None,
    }
}

fn merge_app(mut a: AppCfg, b: AppCfg) -> AppCfg {
    if a.name.is_none() {
        a.name = b.name;
    }
    a
}

fn merge_update(mut a: UpdateCfg, b: UpdateCfg) -> UpdateCfg {
    if a.package.is_none() {
        a.package = b.package;
    }
    a
}
