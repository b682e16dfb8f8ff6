//! CSV and text rendering of output rows.

use std::fs;
use std::io::Write;
use std::path::Path;

use arezzo_core::models::config::OutputConfig;
use arezzo_core::{OutputRow, COLUMNS};

/// UTF-8 byte-order mark expected by spreadsheet tools.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the header row and every row as delimited text.
pub fn write_rows<W: Write>(
    mut writer: W,
    rows: &[OutputRow],
    output: &OutputConfig,
) -> anyhow::Result<()> {
    if output.write_bom {
        writer.write_all(BOM)?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(output.delimiter_byte()?)
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(COLUMNS)?;
    for row in rows {
        wtr.write_record(row.values())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write rows to `path`, replacing any previous content.
pub fn write_file(path: &Path, rows: &[OutputRow], output: &OutputConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = fs::File::create(path)?;
    write_rows(std::io::BufWriter::new(file), rows, output)
}

/// Render rows to a string.
pub fn rows_to_string(rows: &[OutputRow], output: &OutputConfig) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_rows(&mut buf, rows, output)?;
    Ok(String::from_utf8(buf)?)
}

/// Read rows previously written by [`write_file`].
pub fn read_rows(path: &Path, delimiter: u8) -> anyhow::Result<Vec<OutputRow>> {
    let data = fs::read(path)?;
    let data = data.strip_prefix(BOM).unwrap_or(&data[..]);

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(data);

    let rows = rdr
        .deserialize()
        .collect::<Result<Vec<OutputRow>, csv::Error>>()?;
    Ok(rows)
}

/// Human-readable listing grouped by order.
pub fn format_text(rows: &[OutputRow]) -> String {
    let mut output = String::new();
    let mut current_order: Option<&str> = None;

    for row in rows {
        if current_order != Some(row.pedido.as_str()) {
            if current_order.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("Pedido: {}\n", row.pedido));
            output.push_str(&format!("Fornecedor: {}\n", row.fornecedor));
            output.push_str(&format!("Marca: {}\n", row.marca_ido));
            output.push_str(&format!("Emissao: {}\n", row.dt_emissao));
            current_order = Some(row.pedido.as_str());
        }

        let quantity = row
            .quantidade
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {} {} | cor: {} | grade: {} | qtd: {} | {} | entrega: {}\n",
            row.item_compra,
            row.descricao_produto,
            if row.cor.is_empty() { "-" } else { row.cor.as_str() },
            row.grade,
            quantity,
            row.status,
            row.dt_prog_entr,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_rows() -> Vec<OutputRow> {
        vec![
            OutputRow {
                pedido: "4501644489".to_string(),
                item_compra: "10".to_string(),
                descricao_produto: "Tênis Casual | Preto".to_string(),
                cor: "Preto".to_string(),
                quantidade: Some(12),
                status: "Alterado".to_string(),
                dt_emissao: "04/07/2025".to_string(),
                ..OutputRow::default()
            },
            OutputRow {
                pedido: "4501644489".to_string(),
                item_compra: "20".to_string(),
                descricao_produto: "Bolsa, Tote".to_string(),
                quantidade: None,
                status: "9".to_string(),
                ..OutputRow::default()
            },
        ]
    }

    #[test]
    fn test_csv_starts_with_bom_and_header() {
        let text = rows_to_string(&sample_rows(), &OutputConfig::default()).unwrap();

        assert!(text.starts_with('\u{feff}'));
        let mut lines = text.trim_start_matches('\u{feff}').lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_csv_without_bom_and_custom_delimiter() {
        let output = OutputConfig {
            delimiter: ';',
            write_bom: false,
            ..OutputConfig::default()
        };

        let text = rows_to_string(&[], &output).unwrap();
        assert_eq!(text, format!("{}\n", COLUMNS.join(";")));
    }

    #[test]
    fn test_written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("pedidos.csv");
        let rows = sample_rows();

        write_file(&path, &rows, &OutputConfig::default()).unwrap();
        let read = read_rows(&path, b',').unwrap();

        assert_eq!(read, rows);
        assert_eq!(read[1].quantidade, None);
    }

    #[test]
    fn test_format_text_groups_by_order() {
        let text = format_text(&sample_rows());

        assert_eq!(text.matches("Pedido: 4501644489").count(), 1);
        assert!(text.contains("  10 Tênis Casual | Preto | cor: Preto | grade:  | qtd: 12 | Alterado"));
        assert!(text.contains("qtd: - | 9"));
    }
}
