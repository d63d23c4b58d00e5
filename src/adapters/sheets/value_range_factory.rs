use google_sheets4::api::ValueRange;
use serde_json::Value;

use crate::domain::table::Row;

pub trait ValueRangeFactory {
    fn from_rows(rows: &[Row]) -> Self;
    fn from_row(row: &[String]) -> Self;
}

pub trait IntoRows {
    fn into_rows(self) -> Vec<Row>;
}

fn wrap_value(value: &str) -> Value {
    Value::String(value.to_owned())
}

fn unwrap_value(value: Value) -> String {
    match value {
        Value::String(value) => value,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: &[Row]) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(
                rows.iter()
                    .map(|row| row.iter().map(|cell| wrap_value(cell)).collect())
                    .collect(),
            ),
        }
    }

    fn from_row(row: &[String]) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![row.iter().map(|cell| wrap_value(cell)).collect()]),
        }
    }
}

impl IntoRows for ValueRange {
    /// The API omits trailing empty cells and rows; leading empty rows come back as `[]`.
    fn into_rows(self) -> Vec<Row> {
        self.values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(unwrap_value).collect())
            .collect()
    }
}
