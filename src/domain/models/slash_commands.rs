#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
    rest: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let trimmed = text.trim();
        let rest = match trimmed.split_once(char::is_whitespace) {
            Some((_, rest)) => rest.trim_start().to_string(),
            None => "".to_string(),
        };

        let mut args = trimmed
            .split_whitespace()
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
            rest,
        };
        if cmd.is_quit()
            || cmd.is_clear()
            || cmd.is_model_list()
            || cmd.is_model_set()
            || cmd.is_prompt_list()
            || cmd.is_prompt_set()
            || cmd.is_system_prompt()
            || cmd.is_params()
            || cmd.is_param_set()
            || cmd.is_draw()
            || cmd.is_transcribe()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Everything after the command token as typed, for commands that take
    /// free text.
    pub fn text(&self) -> String {
        return self.rest.to_string();
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/cl", "/clear"].contains(&self.command.as_str());
    }

    pub fn is_model_list(&self) -> bool {
        return ["/ml", "/models", "/modellist"].contains(&self.command.as_str());
    }

    pub fn is_model_set(&self) -> bool {
        return ["/m", "/model"].contains(&self.command.as_str());
    }

    pub fn is_prompt_list(&self) -> bool {
        return ["/pl", "/prompts"].contains(&self.command.as_str());
    }

    pub fn is_prompt_set(&self) -> bool {
        return ["/p", "/prompt"].contains(&self.command.as_str());
    }

    pub fn is_system_prompt(&self) -> bool {
        return ["/s", "/system"].contains(&self.command.as_str());
    }

    pub fn is_params(&self) -> bool {
        return self.command == "/params";
    }

    pub fn is_param_set(&self) -> bool {
        return self.command == "/set";
    }

    pub fn is_draw(&self) -> bool {
        return ["/d", "/draw"].contains(&self.command.as_str());
    }

    pub fn is_transcribe(&self) -> bool {
        return ["/t", "/transcribe"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }
}
