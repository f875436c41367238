//! Parser trait for chat exports.
//!
//! A parser turns an export into a [`MessageTable`]. Reading the file is
//! shared: [`Parser::parse`] maps a missing file to
//! [`ChatheatError::InputNotFound`] and hands the content to
//! [`Parser::parse_str`].
//!
//! # Example
//!
//! ```rust,no_run
//! use chatheat::parser::Parser;
//! use chatheat::parsers::SkypeParser;
//! use std::path::Path;
//!
//! # fn main() -> chatheat::Result<()> {
//! let parser = SkypeParser::new();
//! let table = parser.parse(Path::new("messages.json"))?;
//! println!("{} rows, {} from groups", table.len(), table.group_len());
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use crate::core::MessageTable;
use crate::error::ChatheatError;

/// Trait for parsing chat exports into the unified table.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl Parser for MyParser {
///     fn name(&self) -> &'static str { "MyParser" }
///
///     fn parse_str(&self, content: &str) -> Result<MessageTable, ChatheatError> {
///         // Parse logic here
///         Ok(MessageTable::default())
///     }
/// }
/// ```
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses an export file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatheatError`] if:
    /// - The file does not exist ([`ChatheatError::InputNotFound`])
    /// - The file cannot be read ([`ChatheatError::Io`])
    /// - The content cannot be parsed (see [`parse_str`](Parser::parse_str))
    fn parse(&self, path: &Path) -> Result<MessageTable, ChatheatError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ChatheatError::input_not_found(path),
            _ => ChatheatError::Io(e),
        })?;
        self.parse_str(&content).map_err(|e| e.with_path(path))
    }

    /// Parses export content already in memory.
    fn parse_str(&self, content: &str) -> Result<MessageTable, ChatheatError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Parser for Fixed {
        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn parse_str(&self, content: &str) -> Result<MessageTable, ChatheatError> {
            if content.is_empty() {
                return Err(ChatheatError::malformed("empty input"));
            }
            Ok(MessageTable::default())
        }
    }

    #[test]
    fn test_parse_missing_file() {
        let err = Fixed.parse(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.is_input_not_found());
    }

    #[test]
    fn test_parse_attaches_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = Fixed.parse(file.path()).unwrap_err();
        assert!(err.is_malformed());
        let display = err.to_string();
        assert!(display.contains(&file.path().display().to_string()));
    }
}
