pub mod export;
pub mod formatter;

pub use export::{
    read_shortlist, shortlist_entries, to_csv_bytes, write_shortlist, ShortlistEntry,
    SHORTLIST_FILE_NAME, SHORTLIST_MIME,
};
pub use formatter::{
    format_breakdown, format_dataset_table, format_json, format_ranked_table, format_score,
    format_tsv, should_use_colors, truncate,
};
