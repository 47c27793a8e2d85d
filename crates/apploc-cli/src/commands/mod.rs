pub mod pseudotranslate;
pub mod to_json;
pub mod to_yml;
pub mod update;
