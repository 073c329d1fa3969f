pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

/// UI tick; drives flash message expiry
const TICK_RATE_MS: u64 = 250;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Tab switching
                KeyCode::Tab => app.toggle_view(),

                // Upload
                KeyCode::Char('u') | KeyCode::Char('o') => app.start_path_input(),

                // Download shortlist
                KeyCode::Char('d') => app.download_shortlist(),

                // Score breakdown
                KeyCode::Char('b') | KeyCode::Enter => app.show_score_breakdown(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::PathInput => {
            match key.code {
                KeyCode::Enter => app.confirm_path_input(),
                KeyCode::Esc => app.cancel_path_input(),
                KeyCode::Backspace => {
                    app.path_input.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.path_input.push(c);
                }
                // Ignore all other keys (don't propagate to Normal mode)
                _ => {}
            }
        }
        app::InputMode::ScoreBreakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.dismiss_score_breakdown(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use app::{InputMode, View};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app() -> App {
        let mut app = App::new(Config::default(), ThemeColors::dark());
        app.load_bytes(b"Name,Education,Experience,Skills\nA,3,5,2\nB,1,2,9\n");
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = loaded_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_switches_view() {
        let mut app = loaded_app();
        assert_eq!(app.current_view, View::Ranked);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Uploaded);
    }

    #[test]
    fn test_path_input_typing() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('u')));
        assert_eq!(app.input_mode, InputMode::PathInput);

        app.path_input.clear();
        for c in "a/q.csv".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        // 'q' is text here, not quit
        assert!(!app.should_quit);
        handle_key_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.path_input, "a/q.cs");

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.ranked_applicants().len(), 2);
    }

    #[test]
    fn test_breakdown_navigation() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('b')));
        assert_eq!(app.input_mode, InputMode::ScoreBreakdown);

        handle_key_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.selected_applicant().unwrap().name(), "B");

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = loaded_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.input_mode, InputMode::Help);
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.should_quit);
    }
}
