//! Core library for Arezzo purchase-order conversion.
//!
//! This crate provides:
//! - XML reading into a small owned element tree
//! - Purchase-order extraction (header + items merged into flat rows)
//! - Field rules (TO_DATE decoding, status labels, color, quantity)
//! - Consolidated tables across documents, row filtering and merging

pub mod error;
pub mod models;
pub mod xml;
pub mod order;
pub mod table;

pub use error::{ArezzoError, ParseError, Result};
pub use models::order::{HeaderRecord, ItemRecord, OutputRow, COLUMNS};
pub use models::config::ArezzoConfig;
pub use order::{ArezzoOrderParser, OrderParser};
pub use order::rules::dates::{decode_date, decode_date_str, DateDecode};
pub use table::{
    convert_documents, merge_rows, ConsolidatedTable, DocumentReport, DocumentStatus,
    MergeOutcome, RowFilter,
};
