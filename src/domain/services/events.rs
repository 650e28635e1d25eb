#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK_INTERVAL: time::Duration = time::Duration::from_millis(500);

fn key_event(input: Input) -> Event {
    return match input {
        Input { key: Key::Up, .. } => Event::UIScrollUp(),
        Input { key: Key::Down, .. } => Event::UIScrollDown(),
        Input {
            key: Key::PageUp, ..
        }
        | Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => Event::UIScrollPageUp(),
        Input {
            key: Key::PageDown,
            ..
        }
        | Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => Event::UIScrollPageDown(),
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => Event::KeyboardCTRLC(),
        Input { key: Key::Esc, .. } => Event::KeyboardEsc(),
        Input {
            key: Key::Enter, ..
        } => Event::KeyboardEnter(),
        input => Event::KeyboardCharInput(input),
    };
}

fn terminal_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(keyevent) if keyevent.kind != KeyEventKind::Release => {
            return Some(key_event(keyevent.into()));
        }
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        CrosstermEvent::Resize(_, _) => return Some(Event::UIResize()),
        _ => return None,
    }
}

/// Merges terminal input, worker events and a render tick into one stream.
pub struct EventsService {
    terminal: EventStream,
    worker: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(worker: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            terminal: EventStream::new(),
            worker,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let event = tokio::select! {
                event = self.worker.recv() => event,
                event = self.terminal.next() => match event {
                    Some(Ok(event)) => terminal_event(event),
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "Failed to read terminal event");
                        None
                    }
                    None => None,
                },
                _ = time::sleep(TICK_INTERVAL) => Some(Event::UITick()),
            };

            if let Some(event) = event {
                return Ok(event);
            }
        }
    }
}
