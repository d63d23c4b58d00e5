use std::fmt::Formatter;

use error_stack::{report, ResultExt};
use thiserror::Error;

use super::{cell_position::CellPosition, column::Column, row::RowIndex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl A1Notation {
    /// Range covering a whole tab, e.g. `'My Tab'`.
    pub fn whole_sheet(sheet_title: &str) -> Self {
        A1Notation(quote_sheet_title(sheet_title))
    }

    /// Splits `'Sheet'!B2:C3` into its sheet title and the start cell.
    pub fn split(&self) -> A1NotationParts {
        let (sheet_title, local) = match self.0.rfind('!') {
            Some(index) => (
                Some(unquote_sheet_title(&self.0[..index])),
                &self.0[index + 1..],
            ),
            None => (None, self.0.as_str()),
        };

        let start = match local.split_once(':') {
            Some((start, _)) => start.to_owned(),
            None => local.to_owned(),
        };

        A1NotationParts { sheet_title, start }
    }
}

pub struct A1NotationParts {
    pub sheet_title: Option<String>,
    pub start: String,
}

/// Quotes a sheet title for use in a range. Embedded single quotes are doubled.
pub fn quote_sheet_title(sheet_title: &str) -> String {
    format!("'{}'", sheet_title.replace('\'', "''"))
}

fn unquote_sheet_title(quoted: &str) -> String {
    match quoted
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        Some(inner) => inner.replace("''", "'"),
        None => quoted.to_owned(),
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        match sheet_name {
            Some(sheet_name) => A1Notation(format!(
                "{}!{}{}",
                quote_sheet_title(sheet_name),
                self.col,
                self.row
            )),
            None => A1Notation(format!("{}{}", self.col, self.row)),
        }
    }
}

#[derive(Debug, Error)]
pub enum A1NotationParseError {
    #[error("Error parsing column")]
    ColumnParseError,
    #[error("Error parsing row")]
    RowParseError,
}

pub trait FromA1Notation: Sized {
    type Err;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err>;
}

impl FromA1Notation for CellPosition {
    type Err = A1NotationParseError;

    /// Parses the first cell of a range; a bare sheet title resolves to `A1`.
    fn from_a1_notation(
        a1_notation: &A1Notation,
    ) -> error_stack::Result<Self, A1NotationParseError> {
        if !a1_notation.0.contains('!') && a1_notation.0.starts_with('\'') {
            return Ok(CellPosition::origin());
        }

        let start = a1_notation.split().start;
        let digits_at = start
            .find(|c: char| c.is_ascii_digit())
            .ok_or(report!(A1NotationParseError::RowParseError))
            .attach_printable_lazy(|| format!("No row number in '{}'", a1_notation))?;
        let (letters, digits) = start.split_at(digits_at);

        let col = letters
            .parse::<Column>()
            .change_context(A1NotationParseError::ColumnParseError)
            .attach_printable_lazy(|| format!("Invalid column in '{}'", a1_notation))?;
        let row = digits
            .parse::<RowIndex>()
            .change_context(A1NotationParseError::RowParseError)
            .attach_printable_lazy(|| format!("Invalid row in '{}'", a1_notation))?;

        Ok(CellPosition::new(col, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_position_to_a1_notation() {
        let position = CellPosition::new(Column::from_index(1), RowIndex::from_row(3));
        assert_eq!(position.to_a1_notation(None).as_ref(), "B3");
        assert_eq!(
            position.to_a1_notation(Some("Data")).as_ref(),
            "'Data'!B3"
        );
    }

    #[test]
    fn test_sheet_title_quotes_are_doubled() {
        let position = CellPosition::origin();
        assert_eq!(
            position.to_a1_notation(Some("Bob's tab")).as_ref(),
            "'Bob''s tab'!A1"
        );
        assert_eq!(A1Notation::whole_sheet("it's").as_ref(), "'it''s'");
    }

    #[test]
    fn test_split_range_with_sheet() {
        let parts = A1Notation::from("'My tab'!B2:D9".to_string()).split();
        assert_eq!(parts.sheet_title.as_deref(), Some("My tab"));
        assert_eq!(parts.start, "B2");
    }

    #[test]
    fn test_split_single_cell() {
        let parts = A1Notation::from("C7".to_string()).split();
        assert_eq!(parts.sheet_title, None);
        assert_eq!(parts.start, "C7");
    }

    #[test]
    fn test_parse_cell_position() {
        let a1 = A1Notation::from("'Bob''s tab'!AB12".to_string());
        let position = CellPosition::from_a1_notation(&a1).unwrap();
        assert_eq!(
            position,
            CellPosition::new(Column::from_index(27), RowIndex::from_row(12))
        );
    }

    #[test]
    fn test_parse_whole_sheet_is_origin() {
        let position = CellPosition::from_a1_notation(&A1Notation::whole_sheet("Data")).unwrap();
        assert_eq!(position, CellPosition::origin());
    }

    #[test]
    fn test_parse_missing_row_fails() {
        let a1 = A1Notation::from("'Data'!B".to_string());
        assert!(CellPosition::from_a1_notation(&a1).is_err());
    }
}
