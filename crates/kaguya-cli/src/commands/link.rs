use tracing::info;

use crate::cli::FilterArgs;
use crate::client::{AppContext, CliResult};
use crate::commands::{prepare_session, share_link};

pub(crate) fn handle_link(ctx: &AppContext, filters: &FilterArgs) -> CliResult<()> {
    let (session, _) = prepare_session(ctx, filters)?;
    let link = share_link(ctx, &session)?;
    info!(%link, "share link built");
    println!("{link}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;

    #[test]
    fn link_rejects_unknown_formats() {
        let ctx = context("http://127.0.0.1:7070", None);
        let filters = FilterArgs {
            format: Some("VHS".into()),
            ..FilterArgs::default()
        };
        let err = handle_link(&ctx, &filters).expect_err("unknown format");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn link_prints_for_valid_filters() {
        let ctx = context("http://127.0.0.1:7070", None);
        let filters = FilterArgs {
            format: Some("MOVIE".into()),
            ..FilterArgs::default()
        };
        assert!(handle_link(&ctx, &filters).is_ok());
    }
}
