//! Purchase-order extraction module.

mod parser;
pub mod rules;

pub use parser::ArezzoOrderParser;

use std::io::BufRead;

use crate::error::ParseError;
use crate::models::order::OutputRow;

/// Result type for document parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Trait for purchase-order document parsers.
pub trait OrderParser {
    /// Parse one XML document into its sorted item rows.
    ///
    /// An empty vector means the document has no header or no item
    /// section; only malformed XML is an error.
    fn parse_document<R: BufRead>(&self, input: R) -> Result<Vec<OutputRow>>;

    /// Parse a document held in memory.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<OutputRow>> {
        self.parse_document(bytes)
    }
}
