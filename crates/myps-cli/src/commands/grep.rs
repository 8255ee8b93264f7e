use std::io::Write;

use myps_core::{CompiledFilter, SessionTable};

use crate::cli::SessionArgs;
use crate::commands::{Outcome, compile_filter, open_table};
use crate::output::{IdLabel, LineFormatter, Palette};

/// Handle `myps grep`.
pub async fn handle(args: &SessionArgs, palette: Option<Palette>) -> anyhow::Result<Outcome> {
    let filter = compile_filter(args, "grep")?;
    let formatter = LineFormatter::new(args.display.full, palette);

    let mut table = open_table(&args.connection).await?;
    let result = run(&mut table, &filter, &formatter, &mut std::io::stdout()).await;
    table.close().await;
    result
}

/// List matching sessions and print one `ID` line each.
pub async fn run<T: SessionTable, W: Write>(
    table: &mut T,
    filter: &CompiledFilter,
    formatter: &LineFormatter,
    out: &mut W,
) -> anyhow::Result<Outcome> {
    let sessions = table.list(filter).await?;
    if sessions.is_empty() {
        return Ok(Outcome::NoMatches);
    }

    for session in &sessions {
        out.write_all(formatter.format(session, IdLabel::Id).as_bytes())?;
    }
    Ok(Outcome::Reported(sessions.len()))
}

#[cfg(test)]
mod tests {
    use myps_core::FilterCriteria;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::fake::{FakeError, FakeTable};

    fn filter() -> CompiledFilter {
        FilterCriteria {
            command: Some("Query".into()),
            ..Default::default()
        }
        .compile()
        .unwrap()
    }

    #[tokio::test]
    async fn empty_listing_is_no_matches() {
        let mut fake = FakeTable::default();
        let mut out = Vec::new();

        let outcome = run(&mut &mut fake, &filter(), &LineFormatter::default(), &mut out)
            .await
            .expect("no error");

        assert_eq!(outcome, Outcome::NoMatches);
        assert_eq!(outcome.exit_code(), 1);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn prints_one_line_per_session_in_server_order() {
        let mut fake = FakeTable::with_sessions([9, 3, 7]);
        let mut out = Vec::new();

        let outcome = run(&mut &mut fake, &filter(), &LineFormatter::default(), &mut out)
            .await
            .expect("no error");

        assert_eq!(outcome, Outcome::Reported(3));
        let text = String::from_utf8(out).unwrap();
        let ids = text
            .lines()
            .map(|line| line.split('\t').next().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["ID:9", "ID:3", "ID:7"]);
        assert_eq!(fake.listed, vec![filter()]);
        assert!(fake.terminate_calls.is_empty());
    }

    #[tokio::test]
    async fn listing_failure_propagates() {
        let mut fake = FakeTable {
            fail_list: true,
            ..Default::default()
        };
        let mut out = Vec::new();

        let error = run(&mut &mut fake, &filter(), &LineFormatter::default(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(error.downcast_ref::<FakeError>(), Some(FakeError::List)));
        assert!(out.is_empty());
    }
}
