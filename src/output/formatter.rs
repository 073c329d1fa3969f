use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use super::export::shortlist_entries;
use crate::dataset::{Dataset, SHORTLIST_COLUMNS};
use crate::scoring::RankedApplicant;

/// Widest a cell is allowed to grow before it is truncated
const MAX_CELL_WIDTH: usize = 32;

const COLUMN_SEPARATOR: &str = "  ";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a final score with a fixed number of decimals
pub fn format_score(score: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{:>width$}", text, width = width)
    } else {
        format!("{:<width$}", text, width = width)
    }
}

/// Column widths: widest of header and cells, capped at `MAX_CELL_WIDTH`
fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect()
}

/// Render the uploaded data as an aligned table with a header row.
///
/// Every column is shown, including ones the scorer ignores.
pub fn format_dataset_table(dataset: &Dataset, use_colors: bool) -> String {
    if dataset.headers().is_empty() {
        return "No data uploaded.".to_string();
    }

    let headers = dataset.headers();
    let widths = column_widths(headers, dataset.rows());

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(&truncate(h, *w), *w, false))
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);

    let mut lines = vec![if use_colors {
        header_line.bold().to_string()
    } else {
        header_line
    }];

    for row in dataset.rows() {
        lines.push(
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| pad(&truncate(cell, *w), *w, false))
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR),
        );
    }

    if dataset.is_empty() {
        lines.push("(no rows)".to_string());
    }

    lines.join("\n")
}

/// Render ranked applicants as a table: index, Name, Education, Experience,
/// Skills, Final_Score.
///
/// The index column is 1-based and right-aligned with a trailing dot. The
/// Name column shrinks to fit the terminal when stdout is one.
pub fn format_ranked_table(
    applicants: &[RankedApplicant],
    decimals: usize,
    use_colors: bool,
) -> String {
    if applicants.is_empty() {
        return "No applicants to rank.".to_string();
    }

    let headers: Vec<String> = SHORTLIST_COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows: Vec<Vec<String>> = applicants
        .iter()
        .map(|a| {
            vec![
                a.record.name.clone(),
                a.record.education.raw.clone(),
                a.record.experience.raw.clone(),
                a.record.skills.raw.clone(),
                format_score(a.final_score, decimals),
            ]
        })
        .collect();

    let mut widths = column_widths(&headers, &rows);
    let index_width = format!("{}.", applicants.len()).len();

    if let Some(term_width) = get_terminal_width() {
        let fixed: usize = index_width
            + widths[1..].iter().sum::<usize>()
            + COLUMN_SEPARATOR.len() * widths.len();
        if term_width > fixed + 10 {
            widths[0] = widths[0].min(term_width - fixed);
        } else {
            // Very narrow terminal
            widths[0] = widths[0].min(10);
        }
    }

    let header_line = std::iter::once(pad("#", index_width, true))
        .chain(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| pad(h, widths[i], i > 0)),
        )
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR);

    let mut lines = vec![if use_colors {
        header_line.bold().to_string()
    } else {
        header_line
    }];

    let max_score = applicants[0].final_score;
    for (idx, (applicant, row)) in applicants.iter().zip(&rows).enumerate() {
        let index_str = pad(&format!("{}.", idx + 1), index_width, true);
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(&truncate(cell, widths[i]), widths[i], i > 0))
            .collect();

        let line = if use_colors {
            let score = color_score(&cells[4], applicant.final_score, max_score);
            format!(
                "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
                index_str.dimmed(),
                cells[0],
                cells[1],
                cells[2],
                cells[3],
                score,
                sep = COLUMN_SEPARATOR
            )
        } else {
            std::iter::once(index_str)
                .chain(cells)
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR)
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Traffic-light coloring relative to the top score
fn color_score(text: &str, score: f64, max_score: f64) -> String {
    let percentage = if max_score > 0.0 {
        score / max_score * 100.0
    } else {
        0.0
    };

    if percentage >= 70.0 {
        text.green().bold().to_string()
    } else if percentage >= 40.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format ranked applicants as tab-separated values for scripting.
/// Header row included, no colors. Scores use the same shortest round-trip
/// form as the shortlist CSV.
pub fn format_tsv(applicants: &[RankedApplicant]) -> String {
    let mut lines = vec![SHORTLIST_COLUMNS.join("\t")];
    lines.extend(applicants.iter().map(|a| {
        format!(
            "{}\t{}\t{}\t{}\t{:?}",
            a.record.name,
            a.record.education.raw,
            a.record.experience.raw,
            a.record.skills.raw,
            a.final_score
        )
    }));
    lines.join("\n")
}

/// Format ranked applicants as a JSON array of shortlist objects
pub fn format_json(applicants: &[RankedApplicant]) -> Result<String> {
    serde_json::to_string_pretty(&shortlist_entries(applicants))
        .context("Failed to serialize ranking as JSON")
}

/// Multi-line score breakdown for one applicant (for verbose mode)
pub fn format_breakdown(applicant: &RankedApplicant, decimals: usize) -> String {
    let mut lines = vec![format!(
        "{}: {}",
        applicant.name(),
        format_score(applicant.final_score, decimals)
    )];
    for part in applicant.breakdown() {
        lines.push(format!(
            "  {:<10} {:>8}  pct {:>6.3} x {:>2} = {}",
            part.label,
            truncate(&part.raw, 8),
            part.percentile,
            part.weight,
            format_score(part.points, decimals)
        ));
    }
    lines.join("\n")
}
