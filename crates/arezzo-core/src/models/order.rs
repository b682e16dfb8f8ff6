//! Purchase-order records as found in Arezzo XML exports, and the flat row
//! produced from them.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::xml::XmlElement;

/// Output columns, in export order.
pub const COLUMNS: [&str; 20] = [
    "pedido",
    "fornecedor",
    "marca_ido",
    "item_compra",
    "material",
    "descricao_produto",
    "cor",
    "linha_id",
    "linha_desc",
    "modelo_id",
    "modelo_desc",
    "colecao",
    "estacao",
    "grade",
    "quantidade",
    "status",
    "dt_emissao",
    "dt_prog_entr",
    "dt_plan_entr_de",
    "dt_plan_entr_ate",
];

/// Order-level fields read from `Pedido_Compra/access`.
///
/// Absent tags stay as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRecord {
    /// `NUM_PEDD_COMPRA`
    pub num_pedd_compra: String,
    /// `PESSOA_FORNECEDOR`
    pub pessoa_fornecedor: String,
    /// `MARCA_IDO`
    pub marca_ido: String,
    /// `DT_EMISSAO`, still encoded.
    pub dt_emissao: String,
}

impl HeaderRecord {
    /// Build from the direct children of the header-record element.
    pub fn from_element(element: &XmlElement) -> Self {
        let mut header = Self::default();

        for (tag, text) in element.fields() {
            let slot = match tag {
                "NUM_PEDD_COMPRA" => &mut header.num_pedd_compra,
                "PESSOA_FORNECEDOR" => &mut header.pessoa_fornecedor,
                "MARCA_IDO" => &mut header.marca_ido,
                "DT_EMISSAO" => &mut header.dt_emissao,
                _ => {
                    trace!("Ignoring header tag {}", tag);
                    continue;
                }
            };
            *slot = text.to_string();
        }

        header
    }
}

/// Item-level fields read from one `Item_Pedido_Compra/access` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRecord {
    pub cd_item_compra: String,
    pub cd_item_material: String,
    pub desc_produto: String,
    pub id_linha: String,
    pub desc_linha: String,
    pub id_modelo: String,
    pub desc_modelo: String,
    pub cd_colecao: String,
    pub cd_estacao: String,
    pub grade: String,
    /// Requested quantity, unparsed.
    pub tl_requ: String,
    /// Numeric status code, unmapped.
    pub status_item_pedd: String,
    pub dt_prog_entr: String,
    pub dt_plan_entr_de: String,
    pub dt_plan_entr_ate: String,
}

impl ItemRecord {
    /// Build from the direct children of an item element.
    pub fn from_element(element: &XmlElement) -> Self {
        let mut item = Self::default();

        for (tag, text) in element.fields() {
            let slot = match tag {
                "CD_ITEM_COMPRA" => &mut item.cd_item_compra,
                "CD_ITEM_MATERIAL" => &mut item.cd_item_material,
                "DESC_PRODUTO" => &mut item.desc_produto,
                "ID_LINHA" => &mut item.id_linha,
                "DESC_LINHA" => &mut item.desc_linha,
                "ID_MODELO" => &mut item.id_modelo,
                "DESC_MODELO" => &mut item.desc_modelo,
                "CD_COLECAO" => &mut item.cd_colecao,
                "CD_ESTACAO" => &mut item.cd_estacao,
                "GRADE" => &mut item.grade,
                "TL_REQU" => &mut item.tl_requ,
                "STATUS_ITEM_PEDD" => &mut item.status_item_pedd,
                "DT_PROG_ENTR" => &mut item.dt_prog_entr,
                "DT_PLAN_ENTR_DE" => &mut item.dt_plan_entr_de,
                "DT_PLAN_ENTR_ATE" => &mut item.dt_plan_entr_ate,
                _ => {
                    trace!("Ignoring item tag {}", tag);
                    continue;
                }
            };
            *slot = text.to_string();
        }

        item
    }
}

/// One exported line: header fields repeated on every item of the order.
///
/// Field order matches [`COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub pedido: String,
    pub fornecedor: String,
    pub marca_ido: String,
    pub item_compra: String,
    pub material: String,
    pub descricao_produto: String,
    /// Text after the last `|` of the description.
    pub cor: String,
    pub linha_id: String,
    pub linha_desc: String,
    pub modelo_id: String,
    pub modelo_desc: String,
    pub colecao: String,
    pub estacao: String,
    pub grade: String,
    /// `None` when the raw quantity is not an integer.
    pub quantidade: Option<i64>,
    /// Status label, or the raw code when unknown.
    pub status: String,
    pub dt_emissao: String,
    pub dt_prog_entr: String,
    pub dt_plan_entr_de: String,
    pub dt_plan_entr_ate: String,
}

impl OutputRow {
    /// Key rows are sorted and merged by.
    pub fn key(&self) -> (&str, &str) {
        (self.pedido.as_str(), self.item_compra.as_str())
    }

    /// Values as strings, in [`COLUMNS`] order.
    pub fn values(&self) -> [String; 20] {
        [
            self.pedido.clone(),
            self.fornecedor.clone(),
            self.marca_ido.clone(),
            self.item_compra.clone(),
            self.material.clone(),
            self.descricao_produto.clone(),
            self.cor.clone(),
            self.linha_id.clone(),
            self.linha_desc.clone(),
            self.modelo_id.clone(),
            self.modelo_desc.clone(),
            self.colecao.clone(),
            self.estacao.clone(),
            self.grade.clone(),
            self.quantidade.map(|q| q.to_string()).unwrap_or_default(),
            self.status.clone(),
            self.dt_emissao.clone(),
            self.dt_prog_entr.clone(),
            self.dt_plan_entr_de.clone(),
            self.dt_plan_entr_ate.clone(),
        ]
    }
}
