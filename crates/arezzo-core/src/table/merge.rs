//! Upsert of freshly converted rows into a previously exported table.

use std::collections::HashMap;

use crate::models::order::OutputRow;

/// Result of [`merge_rows`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub rows: Vec<OutputRow>,
    /// Incoming rows whose key was not present.
    pub inserted: usize,
    /// Incoming rows that replaced existing ones.
    pub updated: usize,
}

/// Replace rows of `existing` sharing a `(pedido, item_compra)` key with the
/// incoming row, in place; append the rest in incoming order.
pub fn merge_rows(existing: Vec<OutputRow>, incoming: Vec<OutputRow>) -> MergeOutcome {
    let mut rows = existing;
    let mut positions: HashMap<(String, String), Vec<usize>> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        positions
            .entry(owned_key(row))
            .or_default()
            .push(i);
    }

    let mut inserted = 0;
    let mut updated = 0;

    for row in incoming {
        let key = owned_key(&row);
        match positions.get(&key) {
            Some(slots) => {
                for &slot in slots {
                    rows[slot] = row.clone();
                }
                updated += 1;
            }
            None => {
                positions.insert(key, vec![rows.len()]);
                rows.push(row);
                inserted += 1;
            }
        }
    }

    MergeOutcome {
        rows,
        inserted,
        updated,
    }
}

fn owned_key(row: &OutputRow) -> (String, String) {
    (row.pedido.clone(), row.item_compra.clone())
}
