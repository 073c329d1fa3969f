pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;

pub use error::{RankError, NO_FILE_PROMPT};
pub use pipeline::{process_upload, read_upload, Upload};
