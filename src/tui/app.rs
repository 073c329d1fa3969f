use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Config;
use crate::error::NO_FILE_PROMPT;
use crate::output::write_shortlist;
use crate::pipeline::{process_upload, read_upload, Upload};
use crate::scoring::RankedApplicant;
use crate::tui::theme::ThemeColors;

/// Seconds a flash message stays in the status bar
const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Uploaded,
    Ranked,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    PathInput,
    Help,
    ScoreBreakdown,
}

/// What the body shows instead of a table
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct App {
    pub upload: Option<Upload>,
    pub source_path: Option<PathBuf>,
    pub load_error: Option<String>,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub input_mode: InputMode,
    pub path_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub config: Config,
    pub colors: ThemeColors,
}

impl App {
    pub fn new(config: Config, colors: ThemeColors) -> Self {
        Self {
            upload: None,
            source_path: None,
            load_error: None,
            table_state: ratatui::widgets::TableState::default(),
            current_view: View::Uploaded,
            input_mode: InputMode::Normal,
            path_input: String::new(),
            flash_message: None,
            should_quit: false,
            config,
            colors,
        }
    }

    /// Replace the current upload with the file at `path`.
    ///
    /// The previous upload is discarded even when the new one fails to load.
    pub fn load_path(&mut self, path: PathBuf) {
        self.source_path = Some(path.clone());
        match read_upload(&path) {
            Ok(bytes) => self.load_bytes(&bytes),
            Err(e) => {
                self.upload = None;
                self.load_error = Some(format!("{:#}", e));
                self.reset_selection();
                self.show_flash(format!("Failed to load {}", path.display()));
            }
        }
    }

    /// Replace the current upload with raw CSV bytes
    pub fn load_bytes(&mut self, bytes: &[u8]) {
        match process_upload(bytes) {
            Ok(upload) => {
                let msg = match (upload.ranked(), upload.error()) {
                    (Some(ranked), _) => format!("Loaded: {} applicants ranked", ranked.len()),
                    (None, Some(e)) => format!("Error: {}", e),
                    (None, None) => "Loaded".to_string(),
                };
                self.current_view = if upload.ranked().is_some() {
                    View::Ranked
                } else {
                    View::Uploaded
                };
                self.upload = Some(upload);
                self.load_error = None;
                self.show_flash(msg);
            }
            Err(e) => {
                self.upload = None;
                self.load_error = Some(e.to_string());
                self.show_flash(format!("Error: {}", e));
            }
        }
        self.reset_selection();
    }

    /// Message to show in place of the current view's table, if any
    pub fn notice(&self) -> Option<Notice> {
        if let Some(err) = &self.load_error {
            return Some(Notice::Error(err.clone()));
        }

        let upload = match &self.upload {
            Some(u) => u,
            None => return Some(Notice::Info(NO_FILE_PROMPT.to_string())),
        };

        match self.current_view {
            View::Uploaded => None,
            View::Ranked => upload.error().map(|e| {
                if e.is_informational() {
                    Notice::Info(e.to_string())
                } else {
                    Notice::Error(e.to_string())
                }
            }),
        }
    }

    pub fn ranked_applicants(&self) -> &[RankedApplicant] {
        self.upload
            .as_ref()
            .and_then(|u| u.ranked())
            .map(|r| r.applicants())
            .unwrap_or(&[])
    }

    /// Rows in the table of the current view
    pub fn row_count(&self) -> usize {
        match self.current_view {
            View::Uploaded => self.upload.as_ref().map(|u| u.dataset.len()).unwrap_or(0),
            View::Ranked => self.ranked_applicants().len(),
        }
    }

    fn reset_selection(&mut self) {
        if self.row_count() == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
    }

    pub fn next_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < count => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let count = self.row_count();
        if count == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_applicant(&self) -> Option<&RankedApplicant> {
        if self.current_view != View::Ranked {
            return None;
        }
        self.table_state
            .selected()
            .and_then(|i| self.ranked_applicants().get(i))
    }

    /// Toggle between Uploaded and Ranked views
    pub fn toggle_view(&mut self) {
        self.current_view = match self.current_view {
            View::Uploaded => View::Ranked,
            View::Ranked => View::Uploaded,
        };
        self.reset_selection();
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Start the upload prompt, prefilled with the current file
    pub fn start_path_input(&mut self) {
        self.input_mode = InputMode::PathInput;
        self.path_input = self
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
    }

    pub fn confirm_path_input(&mut self) {
        let input = self.path_input.trim().to_string();
        self.input_mode = InputMode::Normal;
        self.path_input.clear();

        if input.is_empty() {
            self.show_flash("No file given".to_string());
            return;
        }
        self.load_path(expand_home(&input));
    }

    pub fn cancel_path_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.path_input.clear();
    }

    /// Write the full ranking to the configured export path
    pub fn download_shortlist(&mut self) {
        if self.upload.as_ref().and_then(|u| u.ranked()).is_none() {
            self.show_flash("Error: nothing ranked to download".to_string());
            return;
        }

        let applicants = self.ranked_applicants();
        let path = Path::new(&self.config.export_path);
        let msg = match write_shortlist(path, applicants) {
            Ok(()) => format!("Saved: {} ({} applicants)", path.display(), applicants.len()),
            Err(e) => format!("Failed to save shortlist: {:#}", e),
        };
        self.show_flash(msg);
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Show score breakdown overlay for the selected applicant
    pub fn show_score_breakdown(&mut self) {
        if self.selected_applicant().is_some() {
            self.input_mode = InputMode::ScoreBreakdown;
        }
    }

    pub fn dismiss_score_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

fn expand_home(input: &str) -> PathBuf {
    match input.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(input)),
        None => PathBuf::from(input),
    }
}
