mod parse;
mod schema;
mod types;

pub use parse::{parse_csv, parse_csv_bytes};
pub use schema::*;
pub use types::Dataset;
