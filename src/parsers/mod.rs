//! Chat export parsers.
//!
//! Each parser implements the [`Parser`](crate::parser::Parser) trait.
//!
//! # Available Parsers
//!
//! - [`SkypeParser`] - Parses Skype `messages.json` exports
//!
//! # Example
//!
//! ```rust
//! use chatheat::config::SkypeConfig;
//! use chatheat::parser::Parser;
//! use chatheat::parsers::SkypeParser;
//!
//! let parser = SkypeParser::with_config(SkypeConfig::new());
//! assert_eq!(parser.name(), "Skype");
//! ```

mod skype;

pub use skype::SkypeParser;
