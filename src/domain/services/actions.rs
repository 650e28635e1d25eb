#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::path::Path;

use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::format_images;
use super::MediaService;
use super::PromptPresets;
use super::SessionController;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::ChatError;
use crate::domain::models::ChatSettings;
use crate::domain::models::Entry;
use crate::domain::models::Event;
use crate::domain::models::SlashCommand;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /clear (/cl) - Clears the chat history, keeping the current system prompt.
- /models (/ml) - Lists the configured models. The active model is marked with a *.
- /model (/m) [MODEL_NAME,MODEL_INDEX] - Switches to another configured model. You can pass either the model name, or the index from /models.
- /prompts (/pl) - Lists the prompt presets for the configured prompt language.
- /prompt (/p) [NAME] - Uses a prompt preset as the system prompt and clears the history.
- /system (/s) [TEXT] - Sets the system prompt and clears the history.
- /params - Shows the active decoding parameters.
- /set [KEY] [VALUE] - Sets a decoding parameter. KEY is one of max-tokens, temperature, top-p or stream.
- /draw (/d) [DESCRIPTION] - Generates an image from a description.
- /transcribe (/t) [PATH] - Transcribes a wav, mp3 or m4a file of up to 25MB.
- /quit /exit (/q) - Exit Palaver.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U / Page up - Page up
- CTRL+D / Page down - Page down
- ESC - Stop a response while it streams in.
- CTRL+C - Stop a response if one is in progress, otherwise exit.
        "#;

    return text.trim().to_string();
}

/// Worker side of the chat. Owns the session and answers every action the UI
/// sends, one at a time.
pub struct ActionsService {
    controller: SessionController,
    media: MediaService,
    presets: PromptPresets,
    settings: ChatSettings,
    tx: mpsc::UnboundedSender<Event>,
}

impl ActionsService {
    pub fn new(
        controller: SessionController,
        media: MediaService,
        presets: PromptPresets,
        settings: ChatSettings,
        tx: mpsc::UnboundedSender<Event>,
    ) -> ActionsService {
        return ActionsService {
            controller,
            media,
            presets,
            settings,
            tx,
        };
    }

    pub async fn start(mut self, rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<()> {
        while let Some(action) = rx.recv().await {
            match action {
                // Nothing is in flight.
                Action::BackendAbort() => {}
                Action::BackendRequest(text) => {
                    if let Some(command) = SlashCommand::parse(&text) {
                        let event = match self.handle_command(&command).await {
                            Ok(event) => event,
                            Err(err) => Event::BackendMessage(Entry::error(&err.to_string())),
                        };
                        self.tx.send(event)?;
                        continue;
                    }

                    self.run_turn(&text, rx).await?;
                }
            }
        }

        return Ok(());
    }

    async fn run_turn(
        &mut self,
        input: &str,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let cancel = CancellationToken::new();
        let tx = self.tx.clone();
        let turn = self.controller.submit(input, &cancel, |text| {
            if let Err(err) = tx.send(Event::TurnPartial(text.to_string())) {
                tracing::warn!(error = %err, "UI is gone, dropping partial reply");
            }
        });
        tokio::pin!(turn);

        let mut rx_closed = false;
        let res = loop {
            tokio::select! {
                res = &mut turn => break res,
                action = rx.recv(), if !rx_closed => match action {
                    Some(Action::BackendAbort()) => {
                        tracing::debug!("Cancelling turn");
                        cancel.cancel();
                    }
                    Some(Action::BackendRequest(_)) => {
                        tx.send(Event::BackendMessage(Entry::error(
                            &ChatError::TurnInProgress.to_string(),
                        )))?;
                    }
                    None => {
                        rx_closed = true;
                        cancel.cancel();
                    }
                },
            }
        };

        match res {
            Ok(report) => tx.send(Event::TurnCompleted(report))?,
            Err(err) => tx.send(Event::TurnFailed(err.to_string()))?,
        }

        return Ok(());
    }

    async fn handle_command(&mut self, command: &SlashCommand) -> Result<Event> {
        if command.is_clear() {
            self.controller.reset();
            return Ok(Event::HistoryCleared(vec![Entry::info("History cleared.")]));
        }
        if command.is_model_list() {
            return Ok(self.model_list().await);
        }
        if command.is_model_set() {
            return self.model_set(command);
        }
        if command.is_prompt_list() {
            return self.prompt_list();
        }
        if command.is_prompt_set() {
            return self.prompt_set(command);
        }
        if command.is_system_prompt() {
            let text = command.text();
            if text.is_empty() {
                bail!("You must specify the system prompt with `/system` or `/s`. Run `/help` for more details.");
            }
            self.controller.session_mut().set_system_prompt(&text);
            return Ok(Event::HistoryCleared(vec![Entry::info(
                "System prompt updated. History cleared.",
            )]));
        }
        if command.is_params() {
            let session = self.controller.session();
            return Ok(Event::BackendMessage(Entry::info(&format!(
                "- model: {}\n{}",
                session.model,
                session.params.format()
            ))));
        }
        if command.is_param_set() {
            if command.args.len() != 2 {
                bail!("Usage: /set KEY VALUE, where KEY is one of max-tokens, temperature, top-p or stream.");
            }
            let (key, value) = (&command.args[0], &command.args[1]);
            self.controller.session_mut().params.set(key, value)?;
            return Ok(Event::BackendMessage(Entry::info(&format!(
                "Set {key} to {value}."
            ))));
        }
        if command.is_draw() {
            let images = self.media.draw(&command.text()).await?;
            return Ok(Event::BackendMessage(Entry::new(
                Author::Model(self.settings.image.model.to_string()),
                &format_images(&images),
            )));
        }
        if command.is_transcribe() {
            let path = command.text();
            if path.is_empty() {
                bail!("You must specify a file with `/transcribe` or `/t`. Run `/help` for more details.");
            }
            let transcript = self.media.transcribe_file(Path::new(&path)).await?;
            return Ok(Event::BackendMessage(Entry::new(
                Author::Model(self.settings.speech.model.to_string()),
                &transcript,
            )));
        }

        return Ok(Event::BackendMessage(Entry::info(&help_text())));
    }

    async fn model_list(&self) -> Event {
        let available = match self.controller.backend().list_models().await {
            Ok(models) => Some(models),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to list models from the service");
                None
            }
        };

        let active = &self.controller.session().model;
        let res = self
            .settings
            .models
            .iter()
            .enumerate()
            .map(|(idx, model)| {
                let n = idx + 1;
                let mut line = format!("- ({n}) {model}");
                if model == active {
                    line += " *";
                }
                if let Some(available) = &available {
                    if !available.contains(model) {
                        line += " (not offered by the service)";
                    }
                }
                return line;
            })
            .collect::<Vec<String>>();

        return Event::BackendMessage(Entry::info(&res.join("\n")));
    }

    fn model_set(&mut self, command: &SlashCommand) -> Result<Event> {
        let mut model_name = command.text();
        if model_name.is_empty() {
            bail!("You must specify a model name with `/model` or `/m`. Run `/help` for more details.");
        }

        let models = &self.settings.models;
        if let Ok(idx) = model_name.parse::<usize>() {
            if idx < 1 || idx > models.len() {
                bail!(format!("{idx} is not a valid index from the model list."));
            }
            model_name = models[idx - 1].to_string();
        }

        if !models.contains(&model_name) {
            bail!(format!(
                "No model named {model_name} is configured. Possible values are: {}",
                models.join(", ")
            ));
        }

        self.controller.session_mut().model = model_name.to_string();
        self.tx.send(Event::ModelChanged(model_name.to_string()))?;

        return Ok(Event::BackendMessage(Entry::new(
            Author::Model(model_name.to_string()),
            &format!("{model_name} has entered the chat."),
        )));
    }

    fn prompt_list(&self) -> Result<Event> {
        let language = &self.settings.prompt_language;
        let names = self.presets.names(language);
        if names.is_empty() {
            bail!(format!(
                "No prompts are configured for language {language}. Set prompts-file in your config."
            ));
        }

        let res = names
            .iter()
            .map(|name| return format!("- {name}"))
            .collect::<Vec<String>>();

        return Ok(Event::BackendMessage(Entry::info(&res.join("\n"))));
    }

    fn prompt_set(&mut self, command: &SlashCommand) -> Result<Event> {
        let name = command.text();
        if name.is_empty() {
            bail!("You must specify a prompt name with `/prompt` or `/p`. Run `/prompts` to list them.");
        }

        let preset = self.presets.get(&self.settings.prompt_language, &name)?;
        self.controller
            .session_mut()
            .set_system_prompt(&preset.context);

        return Ok(Event::HistoryCleared(vec![Entry::info(&format!(
            "Using prompt {name}. History cleared."
        ))]));
    }
}
