/// How the CSV contents are pushed into the destination tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SyncMode {
    /// Clear the tab, then write header and data from `A1`.
    #[default]
    Replace,
    /// Keep existing rows, reconcile the header and append the data rows.
    Append,
}
