//! Consolidated tables built from many documents.

mod filter;
mod merge;

pub use filter::RowFilter;
pub use merge::{merge_rows, MergeOutcome};

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::order::OutputRow;
use crate::order::OrderParser;

/// What happened to one supplied document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Rows were produced.
    Converted { rows: usize },
    /// Well-formed, but no header or no items were found.
    Empty,
    /// The document could not be read.
    Failed { error: String },
}

/// Outcome of one document, in supply order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// File name or other label given by the caller.
    pub source: String,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

/// Rows of every document, concatenated in the order documents were supplied.
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedTable {
    rows: Vec<OutputRow>,
    reports: Vec<DocumentReport>,
}

impl ConsolidatedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from per-document results, keeping their order.
    pub fn from_results<S, E, I>(results: I) -> Self
    where
        S: Into<String>,
        E: fmt::Display,
        I: IntoIterator<Item = (S, Result<Vec<OutputRow>, E>)>,
    {
        let mut table = Self::new();
        for (source, result) in results {
            table.push_document(source, result);
        }
        table
    }

    /// Append the outcome of the next document.
    pub fn push_document<E: fmt::Display>(
        &mut self,
        source: impl Into<String>,
        result: Result<Vec<OutputRow>, E>,
    ) -> &DocumentStatus {
        let source = source.into();

        let status = match result {
            Ok(rows) if rows.is_empty() => {
                debug!("{}: no items found", source);
                DocumentStatus::Empty
            }
            Ok(rows) => {
                debug!("{}: {} rows", source, rows.len());
                let count = rows.len();
                self.rows.extend(rows);
                DocumentStatus::Converted { rows: count }
            }
            Err(e) => {
                warn!("{}: {}", source, e);
                DocumentStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        self.reports.push(DocumentReport { source, status });
        &self.reports[self.reports.len() - 1].status
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<OutputRow> {
        self.rows
    }

    pub fn reports(&self) -> &[DocumentReport] {
        &self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reports of documents that produced rows.
    pub fn converted(&self) -> impl Iterator<Item = &DocumentReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, DocumentStatus::Converted { .. }))
    }

    /// Reports of documents with no header or no items.
    pub fn empty(&self) -> impl Iterator<Item = &DocumentReport> {
        self.reports
            .iter()
            .filter(|r| r.status == DocumentStatus::Empty)
    }

    /// Reports of documents that failed to parse.
    pub fn failed(&self) -> impl Iterator<Item = &DocumentReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.status, DocumentStatus::Failed { .. }))
    }
}

/// Parse in-memory documents one after another, skipping failures.
pub fn convert_documents<P, S, D, I>(parser: &P, documents: I) -> ConsolidatedTable
where
    P: OrderParser,
    S: Into<String>,
    D: AsRef<[u8]>,
    I: IntoIterator<Item = (S, D)>,
{
    let mut table = ConsolidatedTable::new();
    for (source, data) in documents {
        table.push_document(source, parser.parse_bytes(data.as_ref()));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::order::ArezzoOrderParser;
    use pretty_assertions::assert_eq;

    fn document(order: &str, items: &[&str]) -> String {
        let items: String = items
            .iter()
            .map(|code| format!("<access><CD_ITEM_COMPRA>{}</CD_ITEM_COMPRA></access>", code))
            .collect();
        format!(
            "<root>\
               <STATEMENT_PEDIDO_COMPRA><Pedido_Compra><access>\
                 <NUM_PEDD_COMPRA>{}</NUM_PEDD_COMPRA>\
               </access></Pedido_Compra></STATEMENT_PEDIDO_COMPRA>\
               <STATEMENT_ITEM_PEDIDO_COMPRA><Item_Pedido_Compra>{}</Item_Pedido_Compra></STATEMENT_ITEM_PEDIDO_COMPRA>\
             </root>",
            order, items
        )
    }

    fn keys(table: &ConsolidatedTable) -> Vec<(String, String)> {
        table
            .rows()
            .iter()
            .map(|r| (r.pedido.clone(), r.item_compra.clone()))
            .collect()
    }

    #[test]
    fn test_documents_keep_supply_order() {
        let parser = ArezzoOrderParser::new();
        let documents = vec![
            ("b.xml", document("900", &["2", "1"])),
            ("empty.xml", "<root/>".to_string()),
            ("bad.xml", "<root><x></root>".to_string()),
            ("a.xml", document("100", &["5"])),
        ];

        let table = convert_documents(&parser, documents);

        assert_eq!(
            keys(&table),
            vec![
                ("900".to_string(), "1".to_string()),
                ("900".to_string(), "2".to_string()),
                ("100".to_string(), "5".to_string()),
            ]
        );

        let statuses: Vec<&DocumentStatus> = table.reports().iter().map(|r| &r.status).collect();
        assert_eq!(statuses[0], &DocumentStatus::Converted { rows: 2 });
        assert_eq!(statuses[1], &DocumentStatus::Empty);
        assert!(matches!(statuses[2], DocumentStatus::Failed { .. }));
        assert_eq!(statuses[3], &DocumentStatus::Converted { rows: 1 });

        assert_eq!(table.converted().count(), 2);
        assert_eq!(table.empty().next().unwrap().source, "empty.xml");
        assert_eq!(table.failed().next().unwrap().source, "bad.xml");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_parsing_keeps_supply_order() {
        let parser = ArezzoOrderParser::new();
        let sources: Vec<(String, String)> = (0..16)
            .map(|i| {
                let order = format!("{:03}", 100 - i);
                (format!("doc{}.xml", i), document(&order, &["1", "2"]))
            })
            .collect();

        let handles: Vec<_> = sources
            .iter()
            .cloned()
            .map(|(name, xml)| {
                tokio::task::spawn_blocking(move || (name, parser.parse_bytes(xml.as_bytes())))
            })
            .collect();

        let mut results: Vec<(String, Result<Vec<OutputRow>, ParseError>)> = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        let table = ConsolidatedTable::from_results(results);

        let orders: Vec<String> = table
            .rows()
            .iter()
            .step_by(2)
            .map(|r| r.pedido.clone())
            .collect();
        let expected: Vec<String> = (0..16).map(|i| format!("{:03}", 100 - i)).collect();
        assert_eq!(orders, expected);
        assert_eq!(table.reports()[0].source, "doc0.xml");
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = DocumentReport {
            source: "a.xml".to_string(),
            status: DocumentStatus::Converted { rows: 3 },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"source": "a.xml", "status": "converted", "rows": 3})
        );
    }
}
