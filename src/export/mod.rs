//! Export surface: flat delimited text and structured JSON snapshots.
//! Pure formatting; effective returns are re-derived from the domain model.

pub mod csv;
pub mod json;

pub use csv::{to_csv_string, write_csv};
pub use json::{to_json_string, Snapshot};
