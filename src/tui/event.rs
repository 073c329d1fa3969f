use std::time::Duration;

use crossterm::event::{Event as TermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{interval, Interval, MissedTickBehavior};

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Terminal input merged with a fixed UI tick
pub struct EventHandler {
    terminal: EventStream,
    tick: Interval,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let mut tick = interval(Duration::from_millis(tick_rate_ms));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        EventHandler {
            terminal: EventStream::new(),
            tick,
        }
    }

    /// Wait for the next key press or tick.
    ///
    /// A closed or failing input stream degrades to ticks only.
    pub async fn next(&mut self) -> Event {
        loop {
            tokio::select! {
                maybe_event = self.terminal.next() => match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(event) = key_press(event) {
                            return event;
                        }
                    }
                    Some(Err(e)) => {
                        tracing::debug!("terminal input error: {}", e);
                        self.tick.tick().await;
                        return Event::Tick;
                    }
                    None => {
                        self.tick.tick().await;
                        return Event::Tick;
                    }
                },
                _ = self.tick.tick() => return Event::Tick,
            }
        }
    }
}

/// Keep key presses only; releases and repeats arrive on some platforms
fn key_press(event: TermEvent) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        _ => None,
    }
}
