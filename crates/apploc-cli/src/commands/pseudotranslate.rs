use std::path::Path;

pub fn run_pseudotranslate(app_dir: &Path, use_color: bool, quiet: bool) -> color_eyre::Result<()> {
    tracing::debug!(event = "pseudotranslate_args", path = ?app_dir);

    let summary = apploc_services::pseudotranslate_file(app_dir)?;
    tracing::debug!(event = "pseudotranslate_done", keys = summary.keys, out = ?summary.out_path);

    if !quiet {
        let path = summary.out_path.display().to_string();
        if use_color {
            use owo_colors::OwoColorize;
            println!(
                "{} {}",
                "✔".green(),
                tr!("pseudo-done", keys = (summary.keys as i64), path = path)
            );
        } else {
            ui_ok!("pseudo-done", keys = (summary.keys as i64), path = path);
        }
    }
    Ok(())
}
