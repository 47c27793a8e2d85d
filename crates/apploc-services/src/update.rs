use crate::{util, Result};
use apploc_core::ApplocError;
use apploc_domain::{LocaleEnvelope, LocaleListing, LocalePayload};
use color_eyre::eyre::eyre;
use std::path::{Path, PathBuf};
use std::thread;

#[derive(Debug, Clone)]
pub struct LocaleOutcome {
    pub locale: String,
    pub file: Option<PathBuf>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateSummary {
    pub written: usize,
    pub failed: usize,
    pub outcomes: Vec<LocaleOutcome>,
}

/// Download every published locale for `app_<package>` and rebuild the local
/// `translations/<locale>.json` files. Each locale is fetched on its own
/// thread; a failed locale is recorded in the summary instead of aborting the
/// run, unless nothing at all could be written.
pub fn update_from_remote(app_dir: &Path, package: &str, endpoint: &str) -> Result<UpdateSummary> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("AppLoc/cli")
        .build()?;

    let response = client.get(endpoint).send()?;
    let listing: LocaleListing = match response.status().as_u16() {
        200 => response.json()?,
        401 => return Err(ApplocError::Authentication.into()),
        status => return Err(eyre!("locale listing request failed with HTTP {status}")),
    };

    let mut workers = Vec::with_capacity(listing.locales.len());
    for remote in listing.locales {
        let client = client.clone();
        let package = package.to_string();
        workers.push((
            remote.locale.clone(),
            thread::spawn(move || fetch_locale(&client, &remote.url, &package)),
        ));
    }

    let prefix = apploc_keytree::package_prefix(package);
    let mut outcomes = Vec::with_capacity(workers.len());
    let (mut written, mut failed) = (0usize, 0usize);
    for (locale, worker) in workers {
        let fetched = match worker.join() {
            Ok(result) => result,
            Err(_) => Err(eyre!("locale worker panicked")),
        };
        match fetched.and_then(|payload| write_locale(app_dir, &prefix, &payload)) {
            Ok(out_path) => {
                written += 1;
                outcomes.push(LocaleOutcome {
                    locale,
                    file: Some(out_path),
                    error: None,
                });
            }
            Err(err) => {
                failed += 1;
                outcomes.push(LocaleOutcome {
                    locale,
                    file: None,
                    error: Some(format!("{err:#}")),
                });
            }
        }
    }

    if written == 0 && failed > 0 {
        return Err(eyre!("no locale could be downloaded"));
    }
    Ok(UpdateSummary {
        written,
        failed,
        outcomes,
    })
}

fn fetch_locale(
    client: &reqwest::blocking::Client,
    url: &str,
    package: &str,
) -> Result<LocalePayload> {
    let request_url = format!("{url}?include=translations&packages=app_{package}");
    let response = client.get(&request_url).send()?;
    if !response.status().is_success() {
        return Err(eyre!(
            "locale request failed with HTTP {}",
            response.status().as_u16()
        ));
    }
    let envelope: LocaleEnvelope = response.json()?;
    Ok(envelope.locale)
}

// The payload's own locale field names the output file, not the listing entry.
fn write_locale(app_dir: &Path, prefix: &str, payload: &LocalePayload) -> Result<PathBuf> {
    let tree = apploc_keytree::merge_locale(&payload.translations, prefix)?;
    let stem = util::locale_file_stem(&payload.locale);
    let out_path = app_dir.join("translations").join(format!("{stem}.json"));
    util::write_pretty_json(&out_path, &tree)?;
    Ok(out_path)
}
