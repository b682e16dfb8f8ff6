//! Requested-quantity coercion.

use tracing::trace;

/// Integer value of `raw`, or `None` when it is not an integer.
pub fn parse_quantity(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(quantity) => Some(quantity),
        Err(e) => {
            trace!("Quantity {:?} is not an integer: {}", raw, e);
            None
        }
    }
}
