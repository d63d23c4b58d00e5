use tracing::{info, instrument};

use crate::domain::header_action::{decide_header_action, HeaderAction};
use crate::domain::sheets::{
    a1_notation::ToA1Notation, cell_position::CellPosition, row::RowIndex,
};
use crate::domain::sync_mode::SyncMode;
use crate::domain::sync_report::SyncReport;
use crate::domain::table::Table;
use crate::ports::spreadsheet::{RemoteTab, SpreadsheetResult};

/// Converges `tab` with `table` using the strategy selected by `mode`.
pub async fn reconcile(
    tab: &dyn RemoteTab,
    table: &Table,
    mode: SyncMode,
) -> SpreadsheetResult<SyncReport> {
    match mode {
        SyncMode::Replace => replace(tab, table).await,
        SyncMode::Append => append(tab, table).await,
    }
}

/// Clears the tab and writes header plus data as one block from `A1`. Prior contents are never read.
#[instrument(skip_all, fields(tab = tab.title(), data_rows = table.data().len()))]
pub async fn replace(tab: &dyn RemoteTab, table: &Table) -> SpreadsheetResult<SyncReport> {
    tab.clear().await?;
    tab.write_block(CellPosition::origin(), &table.to_block())
        .await?;

    let report = SyncReport::replaced(tab.title(), table.data().len());
    info!("{}", report);
    Ok(report)
}

/// Reconciles the header against row 1 of the tab, then appends every data row.
///
/// Data rows are never compared with what the tab already holds, so running this twice with
/// the same table appends the data twice.
#[instrument(skip_all, fields(tab = tab.title(), data_rows = table.data().len()))]
pub async fn append(tab: &dyn RemoteTab, table: &Table) -> SpreadsheetResult<SyncReport> {
    let existing = tab.read_all_rows().await?;
    let header_action = decide_header_action(existing.first().map(Vec::as_slice), table.header());

    apply_header_action(tab, table, header_action).await?;

    if table.data().is_empty() {
        info!("No data rows to append.");
    } else {
        tab.append_rows(table.data()).await?;
        info!("Appended {} rows to '{}'.", table.data().len(), tab.title());
    }

    Ok(SyncReport::appended(
        tab.title(),
        header_action,
        table.data().len(),
    ))
}

async fn apply_header_action(
    tab: &dyn RemoteTab,
    table: &Table,
    header_action: HeaderAction,
) -> SpreadsheetResult<()> {
    let header = table.header();
    match header_action {
        HeaderAction::AppendHeaderRow => {
            tab.append_rows(&[header.to_vec()]).await?;
            info!("Wrote header to empty tab '{}'.", tab.title());
        }
        HeaderAction::NoOp => {
            tracing::debug!("Header already present in '{}'", tab.title());
        }
        HeaderAction::OverwriteRow1 => {
            let range = CellPosition::origin().to_a1_notation(Some(tab.title()));
            tab.set_range(&range, &[header.to_vec()]).await?;
            info!("Wrote header into A1 for tab '{}'.", tab.title());
        }
        HeaderAction::InsertRowAt1 => {
            tab.insert_row(header, RowIndex::FIRST).await?;
            info!("Inserted header row at top of tab '{}'.", tab.title());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::in_memory_spreadsheet::{InMemorySpreadsheet, RemoteCall};
    use crate::domain::table::Row;
    use crate::ports::spreadsheet::{SpreadsheetBackend, SpreadsheetError};

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn people() -> Table {
        Table::new(
            row(&["id", "name"]),
            vec![row(&["1", "alice"]), row(&["2", "bob"])],
        )
    }

    async fn open_tab(backend: &InMemorySpreadsheet) -> Box<dyn RemoteTab> {
        let tab = backend
            .open("sheet")
            .await
            .unwrap()
            .get_or_create_tab("People", 2)
            .await
            .unwrap();
        backend.clear_calls();
        tab
    }

    #[tokio::test]
    async fn test_replace_overwrites_everything() {
        let backend = InMemorySpreadsheet::new().with_tab(
            "People",
            vec![row(&["a", "b", "c"]), row(&["1", "2", "3"]), row(&["4", "5", "6"])],
        );
        let tab = open_tab(&backend).await;

        let report = replace(tab.as_ref(), &people()).await.unwrap();

        assert_eq!(report, SyncReport::replaced("People", 2));
        assert_eq!(
            backend.tab_rows("People").unwrap(),
            vec![row(&["id", "name"]), row(&["1", "alice"]), row(&["2", "bob"])]
        );
        assert_eq!(
            backend.calls(),
            vec![
                RemoteCall::Clear("People".to_string()),
                RemoteCall::WriteBlock {
                    range: "'People'!A1".to_string(),
                    rows: 3
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_replace_is_idempotent() {
        let backend = InMemorySpreadsheet::new();
        let tab = open_tab(&backend).await;

        replace(tab.as_ref(), &people()).await.unwrap();
        let once = backend.tab_rows("People").unwrap();
        replace(tab.as_ref(), &people()).await.unwrap();

        assert_eq!(backend.tab_rows("People").unwrap(), once);
    }

    #[tokio::test]
    async fn test_replace_never_reads() {
        let backend = InMemorySpreadsheet::new();
        let tab = open_tab(&backend).await;
        replace(tab.as_ref(), &people()).await.unwrap();
        assert!(!backend
            .calls()
            .iter()
            .any(|call| matches!(call, RemoteCall::ReadAllRows(_))));
    }

    #[tokio::test]
    async fn test_append_to_empty_tab_writes_header_then_data() {
        let backend = InMemorySpreadsheet::new();
        let tab = open_tab(&backend).await;

        let report = append(tab.as_ref(), &people()).await.unwrap();

        assert_eq!(
            report,
            SyncReport::appended("People", HeaderAction::AppendHeaderRow, 2)
        );
        assert_eq!(
            backend.tab_rows("People").unwrap(),
            vec![row(&["id", "name"]), row(&["1", "alice"]), row(&["2", "bob"])]
        );
    }

    #[tokio::test]
    async fn test_append_with_matching_header_only_appends_data() {
        let backend = InMemorySpreadsheet::new().with_tab(
            "People",
            vec![row(&["id", "name", ""]), row(&["0", "zed"])],
        );
        let tab = open_tab(&backend).await;

        let report = append(tab.as_ref(), &people()).await.unwrap();

        assert_eq!(report.header_action, Some(HeaderAction::NoOp));
        assert_eq!(
            backend.calls(),
            vec![
                RemoteCall::ReadAllRows("People".to_string()),
                RemoteCall::AppendRows {
                    tab: "People".to_string(),
                    rows: 2
                },
            ]
        );
        assert_eq!(
            backend.tab_rows("People").unwrap(),
            vec![
                row(&["id", "name", ""]),
                row(&["0", "zed"]),
                row(&["1", "alice"]),
                row(&["2", "bob"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_append_trailing_empty_header_cell_matches_existing() {
        let backend = InMemorySpreadsheet::new().with_tab("People", vec![row(&["a", "b"])]);
        let tab = open_tab(&backend).await;
        let table = Table::new(row(&["a", "b", ""]), vec![row(&["1", "2", ""])]);

        let report = append(tab.as_ref(), &table).await.unwrap();

        assert_eq!(report.header_action, Some(HeaderAction::NoOp));
        assert!(!backend.calls().iter().any(|call| matches!(
            call,
            RemoteCall::SetRange { .. } | RemoteCall::InsertRow { .. }
        )));
        assert_eq!(backend.tab_rows("People").unwrap()[0], row(&["a", "b"]));
    }

    #[tokio::test]
    async fn test_append_overwrites_blank_first_row_in_place() {
        let backend = InMemorySpreadsheet::new().with_tab(
            "People",
            vec![row(&["", "", ""]), row(&["9", "old"])],
        );
        let tab = open_tab(&backend).await;

        let report = append(tab.as_ref(), &Table::new(row(&["id", "name"]), vec![]))
            .await
            .unwrap();

        assert_eq!(report.header_action, Some(HeaderAction::OverwriteRow1));
        assert_eq!(report.rows_written, 0);
        assert_eq!(
            backend.tab_rows("People").unwrap(),
            vec![row(&["id", "name", ""]), row(&["9", "old"])]
        );
        assert!(backend.calls().contains(&RemoteCall::SetRange {
            range: "'People'!A1".to_string(),
            rows: 1
        }));
    }

    #[tokio::test]
    async fn test_append_inserts_header_above_different_first_row() {
        let backend =
            InMemorySpreadsheet::new().with_tab("People", vec![row(&["x", "y"]), row(&["1", "2"])]);
        let tab = open_tab(&backend).await;

        let report = append(tab.as_ref(), &Table::new(row(&["id", "name"]), vec![]))
            .await
            .unwrap();

        assert_eq!(report.header_action, Some(HeaderAction::InsertRowAt1));
        assert_eq!(
            backend.tab_rows("People").unwrap(),
            vec![row(&["id", "name"]), row(&["x", "y"]), row(&["1", "2"])]
        );
    }

    #[tokio::test]
    async fn test_append_twice_duplicates_data_rows() {
        let backend = InMemorySpreadsheet::new();
        let tab = open_tab(&backend).await;

        let first = append(tab.as_ref(), &people()).await.unwrap();
        let second = append(tab.as_ref(), &people()).await.unwrap();

        assert_eq!(first.header_action, Some(HeaderAction::AppendHeaderRow));
        assert_eq!(second.header_action, Some(HeaderAction::NoOp));
        assert_eq!(
            backend.tab_rows("People").unwrap(),
            vec![
                row(&["id", "name"]),
                row(&["1", "alice"]),
                row(&["2", "bob"]),
                row(&["1", "alice"]),
                row(&["2", "bob"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_append_without_data_skips_append_call() {
        let backend = InMemorySpreadsheet::new().with_tab("People", vec![row(&["id", "name"])]);
        let tab = open_tab(&backend).await;

        append(tab.as_ref(), &Table::new(row(&["id", "name"]), vec![]))
            .await
            .unwrap();

        assert_eq!(
            backend.calls(),
            vec![RemoteCall::ReadAllRows("People".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failure_after_header_insert_keeps_partial_write() {
        // open, get_or_create_tab, read, insert_row succeed; append_rows fails.
        let backend = InMemorySpreadsheet::new()
            .with_tab("People", vec![row(&["x", "y"])])
            .fail_on_call(5);
        let tab = backend
            .open("sheet")
            .await
            .unwrap()
            .get_or_create_tab("People", 2)
            .await
            .unwrap();

        let report = append(tab.as_ref(), &people()).await.unwrap_err();

        assert!(matches!(
            report.current_context(),
            SpreadsheetError::InjectedFailure(5)
        ));
        assert_eq!(
            backend.tab_rows("People").unwrap(),
            vec![row(&["id", "name"]), row(&["x", "y"])]
        );
    }

    #[tokio::test]
    async fn test_replace_failure_after_clear_leaves_tab_empty() {
        let backend = InMemorySpreadsheet::new()
            .with_tab("People", vec![row(&["old"])])
            .fail_on_call(4);
        let tab = backend
            .open("sheet")
            .await
            .unwrap()
            .get_or_create_tab("People", 2)
            .await
            .unwrap();

        assert!(replace(tab.as_ref(), &people()).await.is_err());
        assert_eq!(backend.tab_rows("People").unwrap(), Vec::<Row>::new());
    }
}
