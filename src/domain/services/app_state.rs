#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Entry;
use crate::domain::models::SlashCommand;
use crate::domain::models::TurnReport;

/// What the chat window shows. Mirrors the session held by the worker, but
/// also carries notices and errors that never become part of the history.
pub struct AppState {
    pub bubble_list: BubbleList,
    pub entries: Vec<Entry>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub model: String,
    pub scroll: Scroll,
    pub waiting_for_backend: bool,
    reply_index: Option<usize>,
}

impl AppState {
    pub fn new(model: &str, entries: Vec<Entry>) -> AppState {
        return AppState {
            bubble_list: BubbleList::default(),
            entries,
            last_known_height: 0,
            last_known_width: 0,
            model: model.to_string(),
            scroll: Scroll::default(),
            waiting_for_backend: false,
            reply_index: None,
        };
    }

    /// True once the first fragment of a streamed reply arrived.
    pub fn is_streaming(&self) -> bool {
        return self.waiting_for_backend && self.reply_index.is_some();
    }

    /// Returns `(should_break, should_continue)`. Only quitting is handled
    /// here, every other command is answered by the worker.
    pub fn handle_slash_commands(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        if let Some(command) = SlashCommand::parse(input_str) {
            if command.is_quit() {
                return Ok((true, false));
            }

            self.waiting_for_backend = true;
            tx.send(Action::BackendRequest(input_str.to_string()))?;
            return Ok((false, true));
        }

        return Ok((false, false));
    }

    /// Sends the prompt box content off. Returns true if the app should exit.
    pub fn submit(&mut self, input_str: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        if input_str.trim().is_empty() {
            return Ok(false);
        }

        self.add_entry(Entry::new(Author::User, input_str));

        let (should_break, should_continue) = self.handle_slash_commands(input_str, tx)?;
        if should_break {
            return Ok(true);
        }
        if should_continue {
            return Ok(false);
        }

        self.waiting_for_backend = true;
        self.reply_index = None;
        tx.send(Action::BackendRequest(input_str.to_string()))?;

        return Ok(false);
    }

    pub fn handle_turn_partial(&mut self, text: &str) {
        match self.reply_index {
            Some(idx) if idx < self.entries.len() => {
                self.entries[idx].replace(text);
            }
            _ => {
                self.entries
                    .push(Entry::new(Author::Model(self.model.to_string()), text));
                self.reply_index = Some(self.entries.len() - 1);
            }
        }

        self.sync_dependants();
    }

    pub fn handle_turn_completed(&mut self, report: TurnReport) {
        self.handle_turn_partial(&report.text);

        let notices = report.notices();
        if !notices.is_empty() {
            self.entries.push(Entry::info(&notices.join("\n")));
        }

        self.finish_turn();
    }

    /// A failed turn never commits the partial reply, so it is removed from
    /// the window as well.
    pub fn handle_turn_failed(&mut self, error: &str) {
        if let Some(idx) = self.reply_index {
            if idx < self.entries.len() {
                self.entries.remove(idx);
                // Cached bubbles are keyed by index, so the error would reuse the reply's.
                self.bubble_list.clear();
            }
        }

        self.entries.push(Entry::error(error));
        self.finish_turn();
    }

    pub fn handle_history_cleared(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.bubble_list.clear();
        self.finish_turn();
    }

    pub fn handle_model_changed(&mut self, model: &str) {
        self.model = model.to_string();
    }

    pub fn handle_backend_message(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.finish_turn();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.sync_dependants();
        self.scroll.last();
    }

    fn finish_turn(&mut self) {
        self.waiting_for_backend = false;
        self.reply_index = None;
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_entries(&self.entries, self.last_known_width as usize);

        let list_length = u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX);
        self.scroll.set_state(list_length, self.last_known_height);

        if self.waiting_for_backend {
            self.scroll.last();
        }
    }
}
