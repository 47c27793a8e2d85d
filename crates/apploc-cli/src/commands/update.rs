use apploc_config::ApplocConfig;
use apploc_core::ApplocError;
use std::path::Path;

pub fn run_update(
    app_dir: &Path,
    package: Option<String>,
    endpoint: Option<String>,
    use_color: bool,
    quiet: bool,
) -> color_eyre::Result<()> {
    tracing::debug!(event = "update_args", path = ?app_dir, package = ?package, endpoint = ?endpoint);

    let cfg = apploc_config::load_config().unwrap_or_default();
    let package = resolve_package(package, &cfg)?;
    let endpoint = endpoint
        .or_else(|| cfg.endpoint.clone())
        .unwrap_or_else(|| crate::DEFAULT_LOCALE_ENDPOINT.to_string());
    tracing::debug!(event = "update_resolved", package = %package, endpoint = %endpoint);

    if !quiet {
        ui_info!("update-fetching", package = package.as_str());
    }

    let summary = match apploc_services::update_from_remote(app_dir, &package, &endpoint) {
        Ok(summary) => summary,
        Err(err) => {
            if matches!(
                err.downcast_ref::<ApplocError>(),
                Some(ApplocError::Authentication)
            ) {
                if use_color {
                    use owo_colors::OwoColorize;
                    eprintln!("✖ {}", tr!("update-auth-failed").red());
                } else {
                    ui_err!("update-auth-failed");
                }
                color_eyre::eyre::bail!("update-auth");
            }
            return Err(err);
        }
    };

    for outcome in &summary.outcomes {
        match (&outcome.file, &outcome.error) {
            (Some(file), _) => {
                if !quiet {
                    ui_ok!(
                        "update-locale-written",
                        locale = outcome.locale.as_str(),
                        path = file.display().to_string()
                    );
                }
            }
            (None, Some(error)) => {
                ui_warn!(
                    "update-locale-failed",
                    locale = outcome.locale.as_str(),
                    error = error.as_str()
                );
            }
            _ => {}
        }
    }
    if !quiet {
        ui_out!(
            "update-summary",
            written = (summary.written as i64),
            failed = (summary.failed as i64)
        );
    }
    Ok(())
}

/// Explicit flag beats the config file; the prompt is the last resort and
/// keeps asking until the answer looks like a package name.
fn resolve_package(flag: Option<String>, cfg: &ApplocConfig) -> color_eyre::Result<String> {
    if let Some(package) = flag {
        return Ok(package);
    }
    if let Some(package) = cfg.update.as_ref().and_then(|update| update.package.clone()) {
        return Ok(package);
    }
    let stdin = std::io::stdin();
    let package = crate::prompt::prompt_value(
        &mut stdin.lock(),
        &mut std::io::stdout(),
        &tr!("prompt-package"),
        &tr!("prompt-package-retry"),
        apploc_keytree::is_valid_package,
    )?;
    Ok(package)
}
