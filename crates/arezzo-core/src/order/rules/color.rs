//! Color derived from the product description.

/// Text after the last `|` of `description`, trimmed. Empty without a `|`.
pub fn extract_color(description: &str) -> String {
    description
        .rsplit_once('|')
        .map(|(_, color)| color.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_color() {
        assert_eq!(extract_color("Tênis Casual | Preto"), "Preto");
        assert_eq!(extract_color("Sandália | Couro | Off White "), "Off White");
    }

    #[test]
    fn test_no_delimiter() {
        assert_eq!(extract_color("Bolsa Tote"), "");
        assert_eq!(extract_color(""), "");
    }

    #[test]
    fn test_trailing_delimiter() {
        assert_eq!(extract_color("Bota |"), "");
    }
}
