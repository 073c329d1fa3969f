use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};

use crate::output::{format_score, truncate};
use crate::tui::app::{App, InputMode, Notice, View};
use crate::tui::theme::ThemeColors;

const TITLE: &str = "SelectAI";

/// Widest an uploaded-data column is drawn
const MAX_COLUMN_WIDTH: u16 = 24;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Table or notice
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);

    match app.notice() {
        Some(notice) => render_notice(frame, chunks[2], &app.colors, &notice),
        None => match app.current_view {
            View::Uploaded => render_uploaded_table(frame, chunks[2], app),
            View::Ranked => render_ranked_table(frame, chunks[2], app),
        },
    }

    render_status_bar(frame, chunks[3], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::PathInput => render_path_popup(frame, app),
        InputMode::Help => render_help_popup(frame, &app.colors),
        InputMode::ScoreBreakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        TITLE,
        Style::default().fg(app.colors.title_color).bold(),
    )];

    // Current file on the right
    if let Some(path) = &app.source_path {
        let file_text = path.display().to_string();
        let available = (area.width as usize).saturating_sub(TITLE.len() + 1);
        let file_text = truncate(&file_text, available);
        let padding_len = available.saturating_sub(file_text.chars().count()) + 1;

        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(file_text, Style::default().fg(app.colors.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = vec!["Uploaded", "Ranked"];
    let selected = match app.current_view {
        View::Uploaded => 0,
        View::Ranked => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.colors.tab_inactive_style)
        .highlight_style(app.colors.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_notice(frame: &mut Frame, area: Rect, colors: &ThemeColors, notice: &Notice) {
    let (text, color) = match notice {
        Notice::Info(msg) => (msg.as_str(), colors.muted),
        Notice::Error(msg) => (msg.as_str(), colors.flash_error),
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default());
    frame.render_widget(paragraph, area);
}

fn render_uploaded_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(upload) = &app.upload else {
        return;
    };
    let dataset = &upload.dataset;
    let colors = app.colors.clone();

    if dataset.is_empty() {
        render_notice(
            frame,
            area,
            &colors,
            &Notice::Info("The uploaded file has no rows".to_string()),
        );
        return;
    }

    let widths: Vec<Constraint> = dataset
        .headers()
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let widest = dataset
                .rows()
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(1);
            Constraint::Length((widest as u16).min(MAX_COLUMN_WIDTH))
        })
        .collect();

    let rows: Vec<Row> = dataset
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };
            Row::new(row.iter().map(|cell| Cell::from(cell.clone()))).style(row_style)
        })
        .collect();

    let header = Row::new(dataset.headers().iter().map(|h| Cell::from(h.clone())))
        .style(colors.header_style)
        .bottom_margin(1);

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_ranked_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = app.colors.clone();
    let decimals = app.config.decimals;
    let applicants = app.ranked_applicants();

    if applicants.is_empty() {
        render_notice(
            frame,
            area,
            &colors,
            &Notice::Info("No applicants to rank".to_string()),
        );
        return;
    }

    let max_score = applicants[0].final_score;

    let rows: Vec<Row> = applicants
        .iter()
        .enumerate()
        .map(|(idx, applicant)| {
            let index = format!("{}.", idx + 1);
            let score_str = format_score(applicant.final_score, decimals);
            let score_color = colors.score_color(applicant.final_score, max_score);

            let mut score_spans = vec![Span::styled(
                format!("{:>7} ", score_str),
                Style::default().fg(score_color),
            )];
            score_spans.extend(score_bar(applicant.final_score, 10, &colors, score_color).spans);

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(colors.index_color)),
                Cell::from(truncate(&applicant.record.name, 40)),
                Cell::from(applicant.record.education.raw.clone()),
                Cell::from(applicant.record.experience.raw.clone()),
                Cell::from(applicant.record.skills.raw.clone()),
                Cell::from(Line::from(score_spans)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),  // Index: "999."
        Constraint::Fill(1),    // Name
        Constraint::Length(10), // Education
        Constraint::Length(10), // Experience
        Constraint::Length(8),  // Skills
        Constraint::Length(19), // Score + bar: " 90.00 ████████░░"
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Name", "Education", "Experience", "Skills", "Final_Score"])
                .style(colors.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Bar scaled against the 100-point maximum
fn score_bar(score: f64, width: usize, colors: &ThemeColors, color: Color) -> Line<'static> {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(color)));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(colors.bar_empty),
        ));
    }

    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;

    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            colors.flash_error
        } else if msg.starts_with("Loaded") || msg.starts_with("Saved:") {
            colors.flash_success
        } else {
            Color::White
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = match app.current_view {
            View::Uploaded => format!("{} rows", app.row_count()),
            View::Ranked => format!("{} ranked", app.row_count()),
        };

        let hints = [
            ("j/k", ":nav "),
            ("Tab", ":view "),
            ("u", ":upload "),
            ("d", ":download "),
            ("b", ":breakdown "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(count, Style::default().fg(colors.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Render the upload (file path) input popup
fn render_path_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(60, 5, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Upload CSV ", app.colors.popup_title))
        .border_style(Style::default().fg(app.colors.popup_border));
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::vertical([
        Constraint::Length(1), // Input line
        Constraint::Length(1), // Help text
    ])
    .split(inner);

    // Keep the end of long paths visible
    let width = chunks[0].width.saturating_sub(1) as usize;
    let chars: Vec<char> = app.path_input.chars().collect();
    let visible: String = chars[chars.len().saturating_sub(width)..].iter().collect();
    frame.render_widget(Paragraph::new(format!("{}|", visible)), chunks[0]);

    let help = Paragraph::new("Enter: load | Esc: cancel")
        .style(Style::default().fg(app.colors.muted));
    frame.render_widget(help, chunks[1]);
}

/// Render the score breakdown popup for the selected applicant
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(applicant) = app.selected_applicant() else {
        return;
    };
    let colors = &app.colors;
    let decimals = app.config.decimals;

    let popup_area = centered_rect_fixed(56, 10, frame.area());
    frame.render_widget(Clear, popup_area);

    let title = format!(" {} ", truncate(applicant.name(), 40));
    let block = Block::bordered()
        .title(Span::styled(title, colors.popup_title))
        .border_style(Style::default().fg(colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![Line::from(Span::styled(
        format!("{:<11}{:>8}{:>11}{:>6}{:>10}", "Criterion", "Value", "Percentile", "x", "Points"),
        colors.header_style,
    ))];
    for part in applicant.breakdown() {
        lines.push(Line::from(format!(
            "{:<11}{:>8}{:>11.3}{:>6}{:>10}",
            part.label,
            truncate(&part.raw, 8),
            part.percentile,
            part.weight,
            format_score(part.points, decimals)
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Final_Score ", colors.header_style),
        Span::styled(
            format_score(applicant.final_score, decimals),
            Style::default().fg(colors.score_high).bold(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "Esc/b: close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 14, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", colors.popup_title))
        .border_style(Style::default().fg(colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(colors.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("Tab           ", "Toggle Uploaded/Ranked"),
        ("u             ", "Upload a CSV file"),
        ("d             ", "Download shortlist CSV"),
        ("b             ", "Score breakdown"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
