#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ImageQuality;
use crate::domain::models::ImageSize;
use crate::domain::services::actions::help_text;

const BOOL_VALUES: [&str; 2] = ["true", "false"];

/// What `main` should do once the command line is parsed.
#[derive(Debug, PartialEq)]
pub enum Launch {
    Chat(Config),
    Draw(Config, String),
    Transcribe(Config, path::PathBuf),
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path)
        .await
        .with_context(|| return format!("Failed to create {config_file_path_str}"))?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_draw() -> Command {
    return Command::new("draw")
        .about("Generates images from a description and prints their URLs.")
        .arg(
            Arg::new("description")
                .short('d')
                .long("description")
                .help("Description of the image to generate.")
                .num_args(1)
                .required(true),
        );
}

fn subcommand_transcribe() -> Command {
    return Command::new("transcribe")
        .about("Transcribes a wav, mp3 or m4a audio file of up to 25MB.")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Path to the audio file.")
                .num_args(1)
                .required(true),
        );
}

fn arg_config(key: ConfigKey, env: &'static str, help: &str) -> Arg {
    let mut help = help.to_string();
    let default = Config::default(key);
    if !default.is_empty() {
        help = format!("{help} [default: {default}]");
    }

    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env)
        .num_args(1)
        .help(help)
        .global(true);
}

fn arg_bool(key: ConfigKey, env: &'static str, help: &str) -> Arg {
    return arg_config(key, env, help).value_parser(PossibleValuesParser::new(BOOL_VALUES));
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("palaver")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start a new chat session."))
        .subcommand(subcommand_draw())
        .subcommand(subcommand_transcribe())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PALAVER_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(arg_config(
            ConfigKey::OpenAiURL,
            "OPENAI_BASE_URL",
            "OpenAI compatible API URL, including the version path.",
        ))
        .arg(arg_config(
            ConfigKey::OpenAiToken,
            "OPENAI_API_KEY",
            "OpenAI API token.",
        ))
        .arg(
            arg_config(
                ConfigKey::Model,
                "PALAVER_MODEL",
                "The initial model to chat with. Defaults to the first of the configured models.",
            )
            .short('m'),
        )
        .arg(arg_config(
            ConfigKey::Models,
            "PALAVER_MODELS",
            "Comma separated list of models that can be switched between with /model.",
        ))
        .arg(arg_config(
            ConfigKey::SystemPrompt,
            "PALAVER_SYSTEM_PROMPT",
            "System prompt used when no prompt preset is selected.",
        ))
        .arg(arg_config(
            ConfigKey::PromptsFile,
            "PALAVER_PROMPTS_FILE",
            "Path to a JSON file of prompt presets, grouped by language.",
        ))
        .arg(arg_config(
            ConfigKey::Prompt,
            "PALAVER_PROMPT",
            "Name of the prompt preset to use as the system prompt.",
        ))
        .arg(arg_config(
            ConfigKey::PromptLanguage,
            "PALAVER_PROMPT_LANGUAGE",
            "Which language's prompt presets to use.",
        ))
        .arg(arg_config(
            ConfigKey::MaxTokens,
            "PALAVER_MAX_TOKENS",
            "Maximum number of tokens in a reply, between 1 and 200000.",
        ))
        .arg(
            arg_config(
                ConfigKey::Temperature,
                "PALAVER_TEMPERATURE",
                "Sampling temperature, between 0 and 1.",
            )
            .short('t'),
        )
        .arg(arg_config(
            ConfigKey::TopP,
            "PALAVER_TOP_P",
            "Nucleus sampling probability mass, between 0 and 1.",
        ))
        .arg(arg_bool(
            ConfigKey::Stream,
            "PALAVER_STREAM",
            "Stream replies as they are generated.",
        ))
        .arg(arg_bool(
            ConfigKey::NumTokens,
            "PALAVER_NUM_TOKENS",
            "Report the token count of each reply.",
        ))
        .arg(arg_bool(
            ConfigKey::UseTime,
            "PALAVER_USE_TIME",
            "Report how long each reply took.",
        ))
        .arg(arg_config(
            ConfigKey::ImageModel,
            "PALAVER_IMAGE_MODEL",
            "Model used by /draw and the draw subcommand.",
        ))
        .arg(
            arg_config(
                ConfigKey::ImageSize,
                "PALAVER_IMAGE_SIZE",
                "Size of generated images.",
            )
            .value_parser(PossibleValuesParser::new(ImageSize::VARIANTS)),
        )
        .arg(
            arg_config(
                ConfigKey::ImageQuality,
                "PALAVER_IMAGE_QUALITY",
                "Quality of generated images.",
            )
            .value_parser(PossibleValuesParser::new(ImageQuality::VARIANTS)),
        )
        .arg(
            arg_config(
                ConfigKey::ImageCount,
                "PALAVER_IMAGE_COUNT",
                "Number of images to generate. dall-e-3 only supports 1.",
            )
            .short('n'),
        )
        .arg(arg_config(
            ConfigKey::SpeechModel,
            "PALAVER_SPEECH_MODEL",
            "Model used for audio transcription.",
        ))
        .arg(arg_config(
            ConfigKey::SpeechLanguage,
            "PALAVER_SPEECH_LANGUAGE",
            "Language spoken in transcribed audio, as an ISO-639-1 code.",
        ));
}

fn required_string(matches: &ArgMatches, id: &str) -> Result<String> {
    return match matches.get_one::<String>(id) {
        Some(val) => Ok(val.to_string()),
        None => bail!(format!("--{id} is required")),
    };
}

/// Parses the command line. `None` means the subcommand already did all its
/// work and the process should exit.
pub async fn parse() -> Result<Option<Launch>> {
    return parse_from(build().get_matches()).await;
}

pub async fn parse_from(matches: ArgMatches) -> Result<Option<Launch>> {
    match matches.subcommand() {
        Some(("chat", subcmd_matches)) => {
            let config = Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(Launch::Chat(config)));
        }
        Some(("draw", subcmd_matches)) => {
            let config = Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let prompt = required_string(subcmd_matches, "description")?;
            return Ok(Some(Launch::Draw(config, prompt)));
        }
        Some(("transcribe", subcmd_matches)) => {
            let config = Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let file = required_string(subcmd_matches, "file")?;
            return Ok(Some(Launch::Transcribe(config, path::PathBuf::from(file))));
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        _ => {
            let config = Config::load(build(), vec![&matches]).await?;
            return Ok(Some(Launch::Chat(config)));
        }
    }
}
