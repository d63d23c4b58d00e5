use std::{fmt::Formatter, str::FromStr};

use thiserror::Error;

/// Spreadsheet column, stored as a zero-based index and displayed as letters (`A`, `B`, ..., `AA`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column {
    index: u32,
}

impl Column {
    pub fn from_index(index: u32) -> Self {
        Column { index }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn letters(&self) -> String {
        let mut number = self.index.saturating_add(1);
        let mut letters = Vec::new();
        while number > 0 {
            let remainder = (number - 1) % 26;
            letters.push((remainder as u8 + b'A') as char);
            number = (number - remainder - 1) / 26;
        }
        letters.into_iter().rev().collect()
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters())
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column(index: {}, letters: {})", self.index, self.letters())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnParseError {
    #[error("Column letters are empty")]
    Empty,
    #[error("Non-alphabetic character in column")]
    NonAlphabeticCharacter,
}

impl FromStr for Column {
    type Err = ColumnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ColumnParseError::Empty);
        }
        if s.chars().any(|c| !c.is_ascii_alphabetic()) {
            return Err(ColumnParseError::NonAlphabeticCharacter);
        }

        let number = s
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .fold(0u32, |acc, c| {
                acc.saturating_mul(26)
                    .saturating_add(c as u32 - 'A' as u32 + 1)
            });

        Ok(Column::from_index(number - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters_single() {
        assert_eq!(Column::from_index(0).to_string(), "A");
        assert_eq!(Column::from_index(25).to_string(), "Z");
    }

    #[test]
    fn test_column_letters_double() {
        assert_eq!(Column::from_index(26).to_string(), "AA");
        assert_eq!(Column::from_index(27).to_string(), "AB");
        assert_eq!(Column::from_index(51).to_string(), "AZ");
        assert_eq!(Column::from_index(52).to_string(), "BA");
        assert_eq!(Column::from_index(26 * 26 + 25).to_string(), "ZZ");
    }

    #[test]
    fn test_column_letters_triple() {
        assert_eq!(Column::from_index(26 * 26 + 26).to_string(), "AAA");
    }

    #[test]
    fn test_column_from_str() {
        assert_eq!("A".parse::<Column>().unwrap(), Column::from_index(0));
        assert_eq!("z".parse::<Column>().unwrap(), Column::from_index(25));
        assert_eq!("AA".parse::<Column>().unwrap(), Column::from_index(26));
        assert_eq!("zz".parse::<Column>().unwrap(), Column::from_index(701));
    }

    #[test]
    fn test_column_from_str_error() {
        assert_eq!(
            "5".parse::<Column>(),
            Err(ColumnParseError::NonAlphabeticCharacter)
        );
        assert_eq!("".parse::<Column>(), Err(ColumnParseError::Empty));
    }

    #[test]
    fn test_column_debug() {
        let col = Column::from_index(27);
        assert_eq!(format!("{:?}", col), "Column(index: 27, letters: AB)");
    }
}
