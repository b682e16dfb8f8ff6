//! Field rules applied to Arezzo item records.

pub mod color;
pub mod dates;
pub mod patterns;
pub mod quantity;
pub mod status;

pub use color::extract_color;
pub use dates::{decode_date, decode_date_str, DateDecode};
pub use quantity::parse_quantity;
pub use status::{status_label, STATUS_LABELS};
