use std::path::Path;

pub fn run_to_json(app_dir: &Path, use_color: bool, quiet: bool) -> color_eyre::Result<()> {
    tracing::debug!(event = "to_json_args", path = ?app_dir);

    let summary = apploc_services::import_catalog(app_dir)?;
    tracing::debug!(
        event = "to_json_done",
        entries = summary.entries,
        package = %summary.package,
        out = ?summary.out_path,
    );

    if !quiet {
        let path = summary.out_path.display().to_string();
        if use_color {
            use owo_colors::OwoColorize;
            println!(
                "{} {}",
                "✔".green(),
                tr!(
                    "tojson-done",
                    path = path,
                    entries = (summary.entries as i64),
                    package = summary.package
                )
            );
        } else {
            ui_ok!(
                "tojson-done",
                path = path,
                entries = (summary.entries as i64),
                package = summary.package
            );
        }
    }
    Ok(())
}
