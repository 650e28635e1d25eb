#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::ChatSettings;
use crate::domain::models::DecodingParams;
use crate::domain::models::ImageOptions;
use crate::domain::models::ImageQuality;
use crate::domain::models::ImageSize;
use crate::domain::models::ReportOptions;
use crate::domain::models::Session;
use crate::domain::models::SpeechOptions;
use crate::domain::services::PromptPresets;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    #[strum(serialize = "openai-url")]
    OpenAiURL,
    #[strum(serialize = "openai-token")]
    OpenAiToken,
    Model,
    Models,
    SystemPrompt,
    PromptsFile,
    Prompt,
    PromptLanguage,
    MaxTokens,
    Temperature,
    TopP,
    Stream,
    NumTokens,
    UseTime,
    ImageModel,
    ImageSize,
    ImageQuality,
    ImageCount,
    SpeechModel,
    SpeechLanguage,
}

/// Resolved configuration. Built once by [`Config::load`] and handed to
/// whatever needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    values: HashMap<ConfigKey, String>,
}

impl Config {
    pub fn with_defaults() -> Config {
        let values = ConfigKey::iter()
            .map(|key| return (key, Config::default(key)))
            .collect();

        return Config { values };
    }

    pub fn get(&self, key: ConfigKey) -> String {
        if let Some(val) = self.values.get(&key) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(&mut self, key: ConfigKey, value: &str) {
        self.values.insert(key, value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let config_path = dirs::config_dir()
            .unwrap_or_default()
            .join("palaver/config.toml");

        let res = match key {
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
            ConfigKey::OpenAiURL => "https://api.openai.com/v1",
            ConfigKey::OpenAiToken => "",
            ConfigKey::Model => "",
            ConfigKey::Models => "gpt-4o-mini,gpt-4o,gpt-4,gpt-3.5-turbo",
            ConfigKey::SystemPrompt => "You are a helpful assistant.",
            ConfigKey::PromptsFile => "",
            ConfigKey::Prompt => "",
            ConfigKey::PromptLanguage => "zh",
            ConfigKey::MaxTokens => "4096",
            ConfigKey::Temperature => "0.7",
            ConfigKey::TopP => "1.0",
            ConfigKey::Stream => "true",
            ConfigKey::NumTokens => "true",
            ConfigKey::UseTime => "true",
            ConfigKey::ImageModel => "dall-e-3",
            ConfigKey::ImageSize => "1024x1024",
            ConfigKey::ImageQuality => "standard",
            ConfigKey::ImageCount => "1",
            ConfigKey::SpeechModel => "whisper-1",
            ConfigKey::SpeechLanguage => "zh",
        };

        return res.to_string();
    }

    /// Defaults, then the TOML config file, then environment variables and
    /// flags as parsed by clap.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<Config> {
        let mut config = Config::with_defaults();

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path)
                .await
                .with_context(|| return format!("Failed to read config file {config_file}"))?;
            config.merge_toml(&cmd, &toml_str)?;
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    config.set(key, val)
                }
            }
        }

        tracing::debug!(
            config_file = %config_file,
            openai_url = %config.get(ConfigKey::OpenAiURL),
            model = %config.model(),
            prompt = %config.get(ConfigKey::Prompt),
            stream = %config.get(ConfigKey::Stream),
            "config"
        );

        return Ok(config);
    }

    fn merge_toml(&mut self, cmd: &Command, toml_str: &str) -> Result<()> {
        let doc = toml_str.parse::<toml_edit::Document>()?;

        for key in ConfigKey::iter() {
            let val = match doc.get(&key.to_string()) {
                Some(val) => val,
                None => continue,
            };

            // Use clap value parsers to do validation.
            let mut possible_values = vec![];
            if let Some(arg) = cmd
                .get_arguments()
                .find(|e| return e.get_long() == Some(key.to_string().as_str()))
            {
                possible_values = arg
                    .get_possible_values()
                    .iter()
                    .map(|e| return e.get_name().to_string())
                    .collect::<Vec<String>>();
            }

            let val_str = if let Some(val_int) = val.as_integer() {
                val_int.to_string()
            } else if let Some(val_float) = val.as_float() {
                val_float.to_string()
            } else if let Some(val_bool) = val.as_bool() {
                val_bool.to_string()
            } else if let Some(val_str) = val.as_str() {
                val_str.to_string()
            } else if let Some(val_arr) = val.as_array() {
                val_arr
                    .iter()
                    .filter_map(|e| return e.as_str())
                    .collect::<Vec<&str>>()
                    .join(",")
            } else {
                bail!(format!("config.toml has an unsupported value type for key '{key}'"));
            };

            if val_str.is_empty() {
                continue;
            }
            if !possible_values.is_empty() && !possible_values.contains(&val_str) {
                bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
            }

            self.set(key, &val_str);
        }

        return Ok(());
    }

    fn get_bool(&self, key: ConfigKey) -> Result<bool> {
        return self
            .get(key)
            .parse::<bool>()
            .with_context(|| return format!("{key} must be true or false"));
    }

    pub fn models(&self) -> Vec<String> {
        return self
            .get(ConfigKey::Models)
            .split(',')
            .map(|e| return e.trim().to_string())
            .filter(|e| return !e.is_empty())
            .collect();
    }

    /// The configured model, or the first of `models` when unset.
    pub fn model(&self) -> String {
        let model = self.get(ConfigKey::Model);
        if !model.is_empty() {
            return model;
        }

        return self.models().into_iter().next().unwrap_or_default();
    }

    pub fn decoding_params(&self) -> Result<DecodingParams> {
        let params = DecodingParams {
            max_tokens: self
                .get(ConfigKey::MaxTokens)
                .parse::<u32>()
                .context("max-tokens must be a whole number")?,
            temperature: self
                .get(ConfigKey::Temperature)
                .parse::<f32>()
                .context("temperature must be a number")?,
            top_p: self
                .get(ConfigKey::TopP)
                .parse::<f32>()
                .context("top-p must be a number")?,
            stream: self.get_bool(ConfigKey::Stream)?,
        };
        params.validate()?;

        return Ok(params);
    }

    pub fn image_options(&self) -> Result<ImageOptions> {
        let size_str = self.get(ConfigKey::ImageSize);
        let size = match ImageSize::parse(&size_str) {
            Some(size) => size,
            None => bail!(format!("{size_str} is not a supported image size")),
        };
        let quality_str = self.get(ConfigKey::ImageQuality);
        let quality = match ImageQuality::parse(&quality_str) {
            Some(quality) => quality,
            None => bail!(format!("{quality_str} is not a supported image quality")),
        };

        return Ok(ImageOptions {
            model: self.get(ConfigKey::ImageModel),
            size,
            quality,
            n: self
                .get(ConfigKey::ImageCount)
                .parse::<u8>()
                .context("image-count must be a number between 1 and 10")?,
        });
    }

    pub fn speech_options(&self) -> SpeechOptions {
        return SpeechOptions {
            model: self.get(ConfigKey::SpeechModel),
            language: self.get(ConfigKey::SpeechLanguage),
            ..SpeechOptions::default()
        };
    }

    pub fn chat_settings(&self) -> Result<ChatSettings> {
        return Ok(ChatSettings {
            models: self.models(),
            prompt_language: self.get(ConfigKey::PromptLanguage),
            reporting: ReportOptions {
                num_tokens: self.get_bool(ConfigKey::NumTokens)?,
                use_time: self.get_bool(ConfigKey::UseTime)?,
            },
            image: self.image_options()?,
            speech: self.speech_options(),
        });
    }

    pub async fn prompt_presets(&self) -> Result<PromptPresets> {
        let prompts_file = self.get(ConfigKey::PromptsFile);
        if prompts_file.is_empty() {
            return Ok(PromptPresets::default());
        }

        return PromptPresets::load(path::Path::new(&prompts_file)).await;
    }

    /// Builds the initial session. A named `prompt` takes precedence over the
    /// manual `system-prompt`.
    pub fn session(&self, presets: &PromptPresets) -> Result<Session> {
        let mut system_prompt = self.get(ConfigKey::SystemPrompt);
        let prompt = self.get(ConfigKey::Prompt);
        if !prompt.is_empty() {
            system_prompt = presets
                .get(&self.get(ConfigKey::PromptLanguage), &prompt)?
                .context
                .to_string();
        }

        return Ok(Session::new(
            &self.model(),
            self.decoding_params()?,
            &system_prompt,
        ));
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok()
                    || val.parse::<f64>().is_ok()
                    || val.parse::<bool>().is_ok()
                {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
