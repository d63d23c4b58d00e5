use std::{fmt::Debug, sync::Arc};

use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{
        AddSheetRequest, BatchUpdateSpreadsheetRequest, GridProperties, Request, Scope,
        SheetProperties,
    },
    Sheets,
};
use tracing::instrument;

use crate::config::{credentials::ServiceAccountCredentials, sheets_config::SpreadsheetConfig};
use crate::ports::spreadsheet::{
    RemoteTab, Spreadsheet, SpreadsheetBackend, SpreadsheetError, SpreadsheetResult,
};

use super::{
    auth,
    http_client::{self, SheetsHub},
    sheet_tab::SheetTab,
};

/// Google Sheets backend authenticated with a service account.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Arc<SheetsHub>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new", skip(credentials))]
    pub async fn new(
        config: SpreadsheetConfig,
        credentials: &ServiceAccountCredentials,
    ) -> SpreadsheetResult<Self> {
        let client = http_client::http_client()?;
        let auth = auth::auth(credentials, client.clone()).await?;
        let hub: SheetsHub = Sheets::new(client, auth);

        Ok(SpreadsheetManager {
            config,
            hub: Arc::new(hub),
        })
    }
}

#[async_trait::async_trait]
impl SpreadsheetBackend for SpreadsheetManager {
    #[instrument]
    async fn open(&self, spreadsheet_id: &str) -> SpreadsheetResult<Box<dyn Spreadsheet>> {
        let response = self
            .hub
            .spreadsheets()
            .get(spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .add_scope(Scope::Drive)
            .doit()
            .await
            .change_context_lazy(|| SpreadsheetError::FetchSpreadsheet(spreadsheet_id.to_string()))?;

        let tabs = response
            .1
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| {
                let properties = sheet.properties?;
                Some((properties.title?, properties.sheet_id?))
            })
            .collect::<Vec<_>>();

        tracing::debug!(tabs = tabs.len(), "Opened spreadsheet");

        Ok(Box::new(GoogleSpreadsheet {
            hub: Arc::clone(&self.hub),
            config: self.config.clone(),
            spreadsheet_id: spreadsheet_id.to_string(),
            tabs,
        }))
    }
}

/// An opened spreadsheet together with the tab titles and ids it had when it was opened.
pub struct GoogleSpreadsheet {
    hub: Arc<SheetsHub>,
    config: SpreadsheetConfig,
    spreadsheet_id: String,
    tabs: Vec<(String, i32)>,
}

impl Debug for GoogleSpreadsheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSpreadsheet")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("tabs", &self.tabs)
            .finish()
    }
}

impl GoogleSpreadsheet {
    fn tab(&self, title: &str, sheet_id: i32) -> Box<dyn RemoteTab> {
        Box::new(SheetTab::new(
            Arc::clone(&self.hub),
            self.spreadsheet_id.clone(),
            sheet_id,
            title.to_string(),
        ))
    }

    #[instrument]
    async fn create_tab(&self, title: &str, columns_hint: usize) -> SpreadsheetResult<i32> {
        let row_count = self.config.new_tab_rows;
        let column_count = self.config.new_tab_columns(columns_hint);

        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![Request {
                add_sheet: Some(AddSheetRequest {
                    properties: Some(SheetProperties {
                        title: Some(title.to_string()),
                        grid_properties: Some(GridProperties {
                            row_count: Some(i32::try_from(row_count).unwrap_or(i32::MAX)),
                            column_count: Some(i32::try_from(column_count).unwrap_or(i32::MAX)),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }]),
            ..Default::default()
        };

        let response = self
            .hub
            .spreadsheets()
            .batch_update(request, &self.spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .add_scope(Scope::Drive)
            .doit()
            .await
            .change_context_lazy(|| SpreadsheetError::CreateTab(title.to_string()))?;

        let sheet_id = response
            .1
            .replies
            .unwrap_or_default()
            .into_iter()
            .find_map(|reply| reply.add_sheet?.properties?.sheet_id)
            .ok_or_else(|| report!(SpreadsheetError::CreateTab(title.to_string())))
            .attach_printable("Add sheet reply did not carry a sheet id")?;

        tracing::info!(
            rows = row_count,
            columns = column_count,
            "Created tab '{}'",
            title
        );
        Ok(sheet_id)
    }
}

#[async_trait::async_trait]
impl Spreadsheet for GoogleSpreadsheet {
    fn id(&self) -> &str {
        &self.spreadsheet_id
    }

    #[instrument]
    async fn get_or_create_tab(
        &self,
        title: &str,
        columns_hint: usize,
    ) -> SpreadsheetResult<Box<dyn RemoteTab>> {
        if let Some((_, sheet_id)) = self.tabs.iter().find(|(tab_title, _)| tab_title == title) {
            return Ok(self.tab(title, *sheet_id));
        }

        let sheet_id = self.create_tab(title, columns_hint).await?;
        Ok(self.tab(title, sheet_id))
    }
}
