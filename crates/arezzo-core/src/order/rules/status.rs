//! Item status codes.

/// Known `STATUS_ITEM_PEDD` codes and their labels.
pub const STATUS_LABELS: [(&str, &str); 3] = [
    ("0", "Cadastrado"),
    ("1", "Alterado"),
    ("2", "Cancelado"),
];

/// Label for a status code; unknown codes are returned as-is.
pub fn status_label(code: &str) -> String {
    STATUS_LABELS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(status_label("0"), "Cadastrado");
        assert_eq!(status_label("1"), "Alterado");
        assert_eq!(status_label("2"), "Cancelado");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(status_label("9"), "9");
        assert_eq!(status_label(""), "");
        assert_eq!(status_label("01"), "01");
    }
}
