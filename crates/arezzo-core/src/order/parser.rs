//! Arezzo purchase-order parser: header and items merged into flat rows.

use std::io::BufRead;
use std::time::Instant;

use tracing::debug;

use crate::models::order::{HeaderRecord, ItemRecord, OutputRow};
use crate::xml::{parse_tree, XmlElement};

use super::rules::{decode_date_str, extract_color, parse_quantity, status_label};
use super::{OrderParser, Result};

const HEADER_PATH: [&str; 3] = ["STATEMENT_PEDIDO_COMPRA", "Pedido_Compra", "access"];
const ITEMS_PATH: [&str; 2] = ["STATEMENT_ITEM_PEDIDO_COMPRA", "Item_Pedido_Compra"];
const ITEM_TAG: &str = "access";

/// Parser for the Arezzo `STATEMENT_*` export layout.
///
/// Stateless; one value can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArezzoOrderParser;

impl ArezzoOrderParser {
    pub fn new() -> Self {
        Self
    }

    /// Rows of an already parsed document, sorted by `(pedido, item_compra)`.
    pub fn rows_from_tree(&self, root: &XmlElement) -> Vec<OutputRow> {
        let Some(header_node) = root.find_path(&HEADER_PATH) else {
            debug!("No header record under <{}>", root.name);
            return Vec::new();
        };
        let header = HeaderRecord::from_element(header_node);
        let issue_date = decode_date_str(&header.dt_emissao);

        let Some(items_node) = root.find_path(&ITEMS_PATH) else {
            debug!("No item section for order {}", header.num_pedd_compra);
            return Vec::new();
        };

        let mut rows: Vec<OutputRow> = items_node
            .children_named(ITEM_TAG)
            .map(ItemRecord::from_element)
            .map(|item| build_row(&header, &issue_date, item))
            .collect();

        rows.sort_by(|a, b| a.key().cmp(&b.key()));
        rows
    }
}

fn build_row(header: &HeaderRecord, issue_date: &str, item: ItemRecord) -> OutputRow {
    OutputRow {
        pedido: header.num_pedd_compra.clone(),
        fornecedor: header.pessoa_fornecedor.clone(),
        marca_ido: header.marca_ido.clone(),
        item_compra: item.cd_item_compra,
        material: item.cd_item_material,
        cor: extract_color(&item.desc_produto),
        descricao_produto: item.desc_produto,
        linha_id: item.id_linha,
        linha_desc: item.desc_linha,
        modelo_id: item.id_modelo,
        modelo_desc: item.desc_modelo,
        colecao: item.cd_colecao,
        estacao: item.cd_estacao,
        grade: item.grade,
        quantidade: parse_quantity(&item.tl_requ),
        status: status_label(&item.status_item_pedd),
        dt_emissao: issue_date.to_string(),
        dt_prog_entr: decode_date_str(&item.dt_prog_entr),
        dt_plan_entr_de: decode_date_str(&item.dt_plan_entr_de),
        dt_plan_entr_ate: decode_date_str(&item.dt_plan_entr_ate),
    }
}

impl OrderParser for ArezzoOrderParser {
    fn parse_document<R: BufRead>(&self, input: R) -> Result<Vec<OutputRow>> {
        let start = Instant::now();

        let root = parse_tree(input)?;
        let rows = self.rows_from_tree(&root);

        debug!(
            "Extracted {} rows in {}ms",
            rows.len(),
            start.elapsed().as_millis()
        );

        Ok(rows)
    }
}
