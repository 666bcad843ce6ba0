//! Output renderers for CLI commands.

use anyhow::anyhow;
use kaguya_api_models::MediaSummary;
use kaguya_ui::i18n::TranslationBundle;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Result of a `browse` run.
#[derive(Debug, Serialize)]
pub(crate) struct BrowseReport<'a> {
    pub(crate) link: String,
    pub(crate) pages: u32,
    pub(crate) has_next_page: bool,
    pub(crate) items: &'a [MediaSummary],
}

pub(crate) fn render_browse(
    report: &BrowseReport<'_>,
    format: OutputFormat,
    bundle: &TranslationBundle,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(report)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            println!("{text}");
        }
        OutputFormat::Table => {
            for line in table_lines(report, bundle) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn table_lines(report: &BrowseReport<'_>, bundle: &TranslationBundle) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>8} {:<10} {:<14} {:>5} TITLE",
        "ID", "FORMAT", "SEASON", "SCORE"
    )];
    for media in report.items {
        lines.push(format!(
            "{:>8} {:<10} {:<14} {:>5} {}",
            media.id,
            media.format.map_or("-", |format| format.as_str()),
            season_label(media),
            media
                .average_score
                .map_or_else(|| "-".to_string(), |score| score.to_string()),
            media.title.user_preferred
        ));
    }
    if report.items.is_empty() {
        lines.push(bundle.text("browse.no_results", "No results."));
    } else if !report.has_next_page {
        lines.push(bundle.text("browse.end_of_results", "That's all..."));
    }
    lines.push(format!("link: {}", report.link));
    lines
}

fn season_label(media: &MediaSummary) -> String {
    match (media.season, media.season_year) {
        (Some(season), Some(year)) => format!("{} {year}", season.as_str()),
        (Some(season), None) => season.as_str().to_string(),
        (None, Some(year)) => year.to_string(),
        (None, None) => "-".to_string(),
    }
}
