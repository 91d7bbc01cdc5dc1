//! Pure presentation shaping: number formatting and table derivation.
//! No rendering happens here; the output is strings and plain rows.
pub mod format;
pub mod table;

pub use format::{beautify_value, format_signed_percent, Locale};
pub use table::{build_table, DataTable, SeriesKind, TableRow};
