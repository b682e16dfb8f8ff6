//! Regex patterns for Oracle-style date constants embedded in exports.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Marker telling a value is a date constructor call at all
    pub static ref TO_DATE_MARKER: Regex = Regex::new(
        r"(?i)\bTO_DATE\s*\("
    ).unwrap();

    // TO_DATE('03102025','DDMMYYYY') with exactly two quoted arguments
    pub static ref TO_DATE_EXPR: Regex = Regex::new(
        r"(?i)\bTO_DATE\s*\(\s*'([^']*)'\s*,\s*'([^']*)'\s*\)"
    ).unwrap();
}
