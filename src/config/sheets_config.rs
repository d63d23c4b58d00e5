fn default_new_tab_rows() -> u32 {
    2000
}

fn default_min_new_tab_columns() -> u32 {
    26
}

fn default_credentials_env() -> String {
    "GOOGLE_SERVICE_ACCOUNT_JSON".to_string()
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetConfig {
    /// Row count of a tab created because it did not exist yet.
    #[serde(default = "default_new_tab_rows")]
    pub new_tab_rows: u32,
    /// Lower bound for the column count of a created tab; the header width wins when larger.
    #[serde(default = "default_min_new_tab_columns")]
    pub min_new_tab_columns: u32,
    /// Environment variable holding the service account key JSON.
    #[serde(default = "default_credentials_env")]
    pub credentials_env: String,
}

impl SpreadsheetConfig {
    pub fn new_tab_columns(&self, columns_hint: usize) -> u32 {
        let hint = u32::try_from(columns_hint).unwrap_or(u32::MAX);
        hint.max(self.min_new_tab_columns)
    }
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        SpreadsheetConfig {
            new_tab_rows: default_new_tab_rows(),
            min_new_tab_columns: default_min_new_tab_columns(),
            credentials_env: default_credentials_env(),
        }
    }
}
