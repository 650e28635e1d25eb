#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::cli::Launch;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::Entry;
use crate::domain::models::Event;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::format_images;
use crate::domain::services::AppState;
use crate::domain::services::MediaService;
use crate::domain::services::SessionController;
use crate::infrastructure::backends::ClientFactory;

fn handle_error(err: Error) {
    eprintln!(
            "{}",
            Paint::red(format!(
                "Oh no! Palaver has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
                env!("CARGO_PKG_VERSION"),
                env!("VERGEN_GIT_DESCRIBE"),
                err
            ))
        );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

fn connect(factory: &ClientFactory, config: &Config) -> Result<BackendBox> {
    let backend = factory.get(
        &config.get(ConfigKey::OpenAiURL),
        &config.get(ConfigKey::OpenAiToken),
    )?;

    return Ok(backend);
}

async fn run_draw(factory: &ClientFactory, config: Config, prompt: &str) -> Result<()> {
    let media = MediaService::new(
        connect(factory, &config)?,
        config.image_options()?,
        config.speech_options(),
    );

    let images = media.draw(prompt).await?;
    println!("{}", format_images(&images));

    return Ok(());
}

async fn run_transcribe(
    factory: &ClientFactory,
    config: Config,
    file: &std::path::Path,
) -> Result<()> {
    let media = MediaService::new(
        connect(factory, &config)?,
        config.image_options()?,
        config.speech_options(),
    );

    let text = media.transcribe_file(file).await?;
    println!("{text}");

    return Ok(());
}

async fn run_chat(factory: &ClientFactory, config: Config) -> Result<()> {
    let backend = connect(factory, &config)?;
    let presets = config.prompt_presets().await?;
    let session = config.session(&presets)?;
    let settings = config.chat_settings()?;

    let mut entries = vec![Entry::new(
        Author::Palaver,
        &format!(
            "Hey, it looks like {} is here to chat! Type /help to see what I can do.",
            session.model
        ),
    )];
    if let Err(err) = backend.health_check().await {
        tracing::warn!(error = %err, "Health check failed");
        entries.push(Entry::error(&err.to_string()));
    }

    let app_state = AppState::new(&session.model, entries);
    let media = MediaService::new(
        backend.clone(),
        settings.image.clone(),
        settings.speech.clone(),
    );
    let controller = SessionController::new(backend, session, settings.reporting);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::new(controller, media, presets, settings, event_tx)
            .start(&mut action_rx)
            .await;
    });

    let ui_future = ui::start(action_tx, event_rx, app_state);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(join_err)) => Err(join_err.into()),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    if res.is_err() {
        ui::destruct_terminal_for_panic();
    }

    return res;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("PALAVER_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_default()
            .join("palaver")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("palaver")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let launch = match cli::parse().await {
        Ok(Some(launch)) => launch,
        Ok(None) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    let factory = ClientFactory::default();
    let res = match launch {
        Launch::Chat(config) => run_chat(&factory, config).await,
        Launch::Draw(config, prompt) => run_draw(&factory, config, &prompt).await,
        Launch::Transcribe(config, file) => run_transcribe(&factory, config, &file).await,
    };

    if let Err(err) = res {
        handle_error(err);
    }

    process::exit(0);
}
