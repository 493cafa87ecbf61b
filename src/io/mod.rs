pub mod csv;
pub mod json;

// Re-export commonly used functions
pub use self::csv::{read_csv, read_csv_from_reader};
pub use self::json::{read_shift_map, results_to_json, write_results_json};
