//! Decoding of `TO_DATE('DDMMYYYY','<format>')` expressions.
//!
//! Arezzo exports write dates as the SQL expression that produced them.
//! The first argument is always read as day, month, year; the format tag is
//! not consulted, so a value exported with another digit order comes out
//! scrambled rather than rejected.

use tracing::trace;

use super::patterns::{TO_DATE_EXPR, TO_DATE_MARKER};

/// Outcome of decoding one raw date value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateDecode {
    /// Recognized expression, rendered as `DD/MM/YYYY`.
    Decoded(String),
    /// Not a recognized expression; the raw value unchanged.
    Passthrough(String),
}

impl DateDecode {
    pub fn is_decoded(&self) -> bool {
        matches!(self, DateDecode::Decoded(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            DateDecode::Decoded(s) | DateDecode::Passthrough(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            DateDecode::Decoded(s) | DateDecode::Passthrough(s) => s,
        }
    }
}

/// Decode a raw date value. Never fails: anything unrecognized passes through.
pub fn decode_date(raw: &str) -> DateDecode {
    if !TO_DATE_MARKER.is_match(raw) {
        return DateDecode::Passthrough(raw.to_string());
    }

    let Some(caps) = TO_DATE_EXPR.captures(raw) else {
        trace!("TO_DATE expression without two quoted arguments: {}", raw);
        return DateDecode::Passthrough(raw.to_string());
    };

    let digits = &caps[1];
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        trace!("TO_DATE argument is not eight digits: {}", raw);
        return DateDecode::Passthrough(raw.to_string());
    }

    DateDecode::Decoded(format!("{}/{}/{}", &digits[0..2], &digits[2..4], &digits[4..8]))
}

/// [`decode_date`] flattened to the resulting string.
pub fn decode_date_str(raw: &str) -> String {
    decode_date(raw).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_to_date() {
        let decoded = decode_date("TO_DATE('03102025','DDMMYYYY')");
        assert_eq!(decoded, DateDecode::Decoded("03/10/2025".to_string()));
        assert!(decoded.is_decoded());
    }

    #[test]
    fn test_decode_tolerates_spacing_and_case() {
        assert_eq!(
            decode_date_str("to_date( '15012024' , 'DDMMYYYY' )"),
            "15/01/2024"
        );
    }

    #[test]
    fn test_passthrough_without_marker() {
        assert_eq!(
            decode_date("2025-10-03"),
            DateDecode::Passthrough("2025-10-03".to_string())
        );
        assert_eq!(decode_date_str(""), "");
    }

    #[test]
    fn test_decoding_is_idempotent() {
        let once = decode_date_str("TO_DATE('03102025','DDMMYYYY')");
        let twice = decode_date_str(&once);
        assert_eq!(once, twice);

        let raw = "2025-10-03";
        assert_eq!(decode_date_str(&decode_date_str(raw)), raw);
    }

    #[test]
    fn test_malformed_expressions_pass_through() {
        let cases = [
            "TO_DATE('0310202','DDMMYYYY')",
            "TO_DATE('031020251','DDMMYYYY')",
            "TO_DATE('0310A025','DDMMYYYY')",
            "TO_DATE('03102025')",
            "TO_DATE(03102025,'DDMMYYYY')",
            "TO_DATE('03102025','DDMMYYYY'",
            "TO_DATE('03102025','DDMMYYYY','X')",
        ];

        for raw in cases {
            assert_eq!(decode_date(raw), DateDecode::Passthrough(raw.to_string()), "{}", raw);
        }
    }

    #[test]
    fn test_format_tag_is_not_consulted() {
        // Digits are always read as DDMMYYYY.
        assert_eq!(
            decode_date_str("TO_DATE('20251003','YYYYMMDD')"),
            "20/25/1003"
        );
    }
}
