use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use i18n_embed::fluent::{fluent_language_loader, FluentLanguageLoader};
use i18n_embed::DesktopLanguageRequester;
use once_cell::sync::OnceCell;
use rust_embed::RustEmbed;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use unic_langid::LanguageIdentifier;

#[macro_use]
mod ui;
mod commands;
mod prompt;

include!(concat!(env!("OUT_DIR"), "/supported_locales.rs"));

#[derive(RustEmbed)]
#[folder = "i18n"]
struct Localizations;

pub static LANG_LOADER: OnceCell<FluentLanguageLoader> = OnceCell::new();

/// Listing used when neither `--endpoint` nor the config file names one.
pub const DEFAULT_LOCALE_ENDPOINT: &str = "https://support.example.com/api/v2/locales/agent.json";

#[derive(Parser)]
#[command(name = "apploc", version, about = tr!("help-about"))]
struct Cli {
    /// App directory with manifest.json and translations/
    #[arg(long, global = true, default_value = "./")]
    path: PathBuf,

    /// UI language override, e.g. en or ru
    #[arg(long, global = true)]
    ui_lang: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Suppress per-command success output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = tr!("help-to-yml"))]
    ToYml,
    #[command(about = tr!("help-to-json"))]
    ToJson,
    #[command(about = tr!("help-update"))]
    Update {
        /// Package name without the app_ prefix
        #[arg(long)]
        package: Option<String>,
        /// Locale listing URL
        #[arg(long)]
        endpoint: Option<String>,
    },
    #[command(about = tr!("help-pseudotranslate"))]
    Pseudotranslate,
}

/// The UI language has to be known before clap renders `--help`, so the flag
/// is picked out of the raw arguments ahead of the real parse.
fn ui_lang_from_args() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--ui-lang" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--ui-lang=") {
            return Some(value.to_string());
        }
    }
    None
}

fn init_i18n(ui_lang: Option<&str>) -> Result<()> {
    let loader: FluentLanguageLoader = fluent_language_loader!();

    let requested: Vec<LanguageIdentifier> = match ui_lang {
        Some(tag) => vec![tag.parse()?],
        None => DesktopLanguageRequester::requested_languages(),
    };

    i18n_embed::select(&loader, &Localizations, &requested)?;
    LANG_LOADER
        .set(loader)
        .map_err(|_| eyre!("i18n already initialized"))?;
    Ok(())
}

/// Console gets INFO and up unless RUST_LOG says otherwise; the rolling file
/// under logs/ always records DEBUG. The returned guard must stay alive for
/// the whole run or buffered file output is lost.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let file_appender = rolling::daily("logs", "apploc.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // i18n приходит первым: загрузчик пишет выбор локали через `log`, и эта
    // строка не должна попасть на консольный слой трассировки.
    let ui_lang = ui_lang_from_args();
    init_i18n(ui_lang.as_deref())?;
    let _tracing_guard = init_tracing();
    if let Some(tag) = ui_lang.as_deref() {
        if !SUPPORTED_LOCALES
            .iter()
            .any(|loc| loc.eq_ignore_ascii_case(tag))
        {
            tracing::debug!(event = "ui_lang_unsupported", lang = %tag);
        }
    }

    let cli = Cli::parse();

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    match cli.cmd {
        Commands::ToYml => commands::to_yml::run_to_yml(&cli.path, use_color, cli.quiet),
        Commands::ToJson => commands::to_json::run_to_json(&cli.path, use_color, cli.quiet),
        Commands::Update { package, endpoint } => {
            commands::update::run_update(&cli.path, package, endpoint, use_color, cli.quiet)
        }
        Commands::Pseudotranslate => {
            commands::pseudotranslate::run_pseudotranslate(&cli.path, use_color, cli.quiet)
        }
    }
}
