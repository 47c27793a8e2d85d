use apploc_config::ApplocConfig;
use std::path::Path;

pub fn run_to_yml(app_dir: &Path, use_color: bool, quiet: bool) -> color_eyre::Result<()> {
    tracing::debug!(event = "to_yml_args", path = ?app_dir);

    let cfg = apploc_config::load_config().unwrap_or_default();
    let app_name = resolve_app_name(app_dir, &cfg)?;
    let summary = apploc_services::export_catalog(app_dir, &app_name)?;
    tracing::debug!(event = "to_yml_done", records = summary.records, out = ?summary.out_path);

    if !quiet {
        let path = summary.out_path.display().to_string();
        if use_color {
            use owo_colors::OwoColorize;
            println!(
                "{} {}",
                "✔".green(),
                tr!("toyml-done", records = (summary.records as i64), path = path)
            );
        } else {
            ui_ok!("toyml-done", records = (summary.records as i64), path = path);
        }
    }
    Ok(())
}

/// Config beats the manifest, the manifest beats the interactive prompt.
fn resolve_app_name(app_dir: &Path, cfg: &ApplocConfig) -> color_eyre::Result<String> {
    if let Some(name) = cfg.app.as_ref().and_then(|app| app.name.clone()) {
        return Ok(name);
    }
    if let Some(name) = apploc_services::util::manifest_app_name(app_dir) {
        return Ok(name);
    }
    let stdin = std::io::stdin();
    let name = crate::prompt::prompt_value(
        &mut stdin.lock(),
        &mut std::io::stdout(),
        &tr!("prompt-app-name"),
        &tr!("prompt-app-name-retry"),
        |value| !value.is_empty(),
    )?;
    Ok(name)
}
