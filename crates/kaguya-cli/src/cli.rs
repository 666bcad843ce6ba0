//! Argument parsing, settings loading and command dispatch.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use kaguya_telemetry::{LogFormat, LoggingConfig, init_logging, log_format_from_config};
use kaguya_ui::core::settings::BrowseSettings;
use kaguya_ui::features::browse::filters::FilterField;
use kaguya_ui::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use reqwest::Url;
use serde_json::Value;

use crate::client::{AppContext, CliError, CliResult, parse_url};
use crate::commands::browse::handle_browse;
use crate::commands::link::handle_link;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CLI_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command and reports errors.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    let (settings, file_format) = load_settings(cli.settings.as_deref())?;

    let format = cli
        .log_format
        .or(file_format)
        .unwrap_or_else(LogFormat::infer);
    if let Err(err) = init_logging(&LoggingConfig {
        level: &cli.log_level,
        format,
        ..LoggingConfig::default()
    }) {
        eprintln!("warning: {err:#}");
    }

    let base_url = match cli.api_url {
        Some(url) => url,
        None => parse_url(&settings.api_base_url).map_err(CliError::validation)?,
    };
    let locale = match cli.locale.as_deref() {
        Some(tag) => LocaleCode::from_lang_tag(tag)
            .ok_or_else(|| CliError::validation(format!("unsupported locale '{tag}'")))?,
        None => DEFAULT_LOCALE,
    };
    let ctx = AppContext::new(
        base_url,
        cli.web_url,
        cli.timeout,
        settings,
        TranslationBundle::new(locale),
    )?;

    match cli.command {
        Command::Browse(args) => handle_browse(&ctx, args, cli.output).await,
        Command::Link(args) => handle_link(&ctx, &args),
    }
}

#[derive(Parser)]
#[command(name = "kaguya", about = "Browse the Kaguya anime catalog from a terminal")]
pub(crate) struct Cli {
    #[arg(long, global = true, env = "KAGUYA_API_URL", value_parser = parse_url)]
    api_url: Option<Url>,
    #[arg(
        long,
        global = true,
        env = "KAGUYA_WEB_URL",
        value_parser = parse_url,
        help = "Origin prepended to share links"
    )]
    web_url: Option<Url>,
    #[arg(
        long,
        global = true,
        env = "KAGUYA_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long,
        global = true,
        env = "KAGUYA_SETTINGS_FILE",
        help = "JSON file with browse settings and an optional log_format"
    )]
    settings: Option<PathBuf>,
    #[arg(long, global = true, env = "KAGUYA_LOCALE", help = "Label language (en or vi)")]
    locale: Option<String>,
    #[arg(long, global = true, env = "KAGUYA_LOG_LEVEL", default_value = DEFAULT_CLI_LOG_LEVEL)]
    log_level: String,
    #[arg(long, global = true, env = "KAGUYA_LOG_FORMAT")]
    log_format: Option<LogFormat>,
    #[arg(
        long = "output",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch result pages for a filter and print them with the share link.
    Browse(BrowseArgs),
    /// Print the share link for a filter without fetching.
    Link(FilterArgs),
}

#[derive(Args, Debug)]
pub(crate) struct BrowseArgs {
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    #[arg(long, default_value_t = 1, help = "Number of pages to fetch")]
    pub(crate) pages: u32,
}

/// Filter flags; each one is applied as a user edit on top of `--from`.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterArgs {
    #[arg(long, help = "Start from an existing browse address or query string")]
    pub(crate) from: Option<String>,
    #[arg(long)]
    pub(crate) keyword: Option<String>,
    #[arg(long)]
    pub(crate) format: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub(crate) genres: Option<Vec<String>>,
    #[arg(long)]
    pub(crate) season: Option<String>,
    #[arg(long)]
    pub(crate) season_year: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub(crate) tags: Option<Vec<String>>,
    #[arg(long)]
    pub(crate) sort: Option<String>,
    #[arg(long = "type")]
    pub(crate) media_type: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub(crate) countries: Option<Vec<String>>,
}

impl FilterArgs {
    /// Control edits in field order. An empty value clears the field.
    pub(crate) fn edits(&self) -> Vec<(FilterField, Vec<String>)> {
        let single = |value: &Option<String>| value.clone().map(|value| vec![value]);
        [
            (FilterField::Type, single(&self.media_type)),
            (FilterField::Season, single(&self.season)),
            (FilterField::Sort, single(&self.sort)),
            (FilterField::Keyword, single(&self.keyword)),
            (FilterField::SeasonYear, single(&self.season_year)),
            (FilterField::Format, single(&self.format)),
            (FilterField::Genres, self.genres.clone()),
            (FilterField::Tags, self.tags.clone()),
            (FilterField::Countries, self.countries.clone()),
        ]
        .into_iter()
        .filter_map(|(field, tokens)| tokens.map(|tokens| (field, tokens)))
        .collect()
    }

    /// Raw query of `--from`, accepting full URLs, paths or bare query strings.
    pub(crate) fn from_query(&self) -> Option<&str> {
        let raw = self.from.as_deref()?.trim();
        Some(raw.split_once('?').map_or(raw, |(_, query)| query))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Read browse settings and the optional `log_format` from a JSON file.
pub(crate) fn load_settings(path: Option<&Path>) -> CliResult<(BrowseSettings, Option<LogFormat>)> {
    let Some(path) = path else {
        return Ok((BrowseSettings::default(), None));
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)?;
    let mut document: Value = serde_json::from_str(&raw)
        .map_err(|err| CliError::validation(format!("settings file is not valid JSON: {err}")))?;
    let format = log_format_from_config(Some(&document));
    let object = document
        .as_object_mut()
        .ok_or_else(|| CliError::validation("settings file must contain a JSON object"))?;
    object.remove("log_format");
    let settings = BrowseSettings::from_json(&document.to_string())
        .map_err(|err| CliError::validation(err.to_string()))?;
    Ok((settings, format))
}
