//! Row lookup by order number, brand and supplier.

use crate::models::order::OutputRow;

/// Criteria for selecting rows; every criterion given must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    /// Exact order numbers; empty means any.
    pedidos: Vec<String>,
    /// Lowercased brand substring.
    marca: Option<String>,
    /// Lowercased supplier substring.
    fornecedor: Option<String>,
}

impl RowFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add order numbers from free text separated by commas, semicolons or
    /// whitespace, e.g. `"4501644489, 4501765866"`.
    pub fn with_pedidos_text(mut self, text: &str) -> Self {
        self.pedidos.extend(
            text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Keep rows whose brand contains `marca`, ignoring case.
    pub fn with_marca(mut self, marca: &str) -> Self {
        self.marca = normalize(marca);
        self
    }

    /// Keep rows whose supplier contains `fornecedor`, ignoring case.
    pub fn with_fornecedor(mut self, fornecedor: &str) -> Self {
        self.fornecedor = normalize(fornecedor);
        self
    }

    pub fn pedidos(&self) -> &[String] {
        &self.pedidos
    }

    pub fn is_empty(&self) -> bool {
        self.pedidos.is_empty() && self.marca.is_none() && self.fornecedor.is_none()
    }

    pub fn matches(&self, row: &OutputRow) -> bool {
        if !self.pedidos.is_empty() && !self.pedidos.iter().any(|p| *p == row.pedido) {
            return false;
        }
        if let Some(marca) = &self.marca {
            if !row.marca_ido.to_lowercase().contains(marca.as_str()) {
                return false;
            }
        }
        if let Some(fornecedor) = &self.fornecedor {
            if !row.fornecedor.to_lowercase().contains(fornecedor.as_str()) {
                return false;
            }
        }
        true
    }

    /// Matching rows, in their original order.
    pub fn apply<'a>(&self, rows: &'a [OutputRow]) -> Vec<&'a OutputRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

fn normalize(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(pedido: &str, marca: &str, fornecedor: &str) -> OutputRow {
        OutputRow {
            pedido: pedido.to_string(),
            marca_ido: marca.to_string(),
            fornecedor: fornecedor.to_string(),
            ..OutputRow::default()
        }
    }

    #[test]
    fn test_pedidos_text_separators() {
        let filter = RowFilter::new().with_pedidos_text(" 1, 2;3  4,,");
        assert_eq!(filter.pedidos(), &["1", "2", "3", "4"]);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RowFilter::new().with_marca("  ").with_pedidos_text("");
        assert!(filter.is_empty());
        assert!(filter.matches(&row("1", "", "")));
    }

    #[test]
    fn test_all_criteria_must_match() {
        let rows = vec![
            row("4501644489", "RESERVA GO", "5023016 - Cook Street"),
            row("4501765866", "AREZZO", "5023016 - Cook Street"),
            row("4501644489", "Arezzo", "1025 - AREZZO"),
        ];

        let filter = RowFilter::new()
            .with_pedidos_text("4501644489")
            .with_marca("arezzo");
        let found = filter.apply(&rows);
        assert_eq!(found, vec![&rows[2]]);

        let filter = RowFilter::new().with_fornecedor("COOK");
        assert_eq!(filter.apply(&rows).len(), 2);
    }
}
