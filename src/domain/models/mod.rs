mod action;
mod author;
mod backend;
mod conversation;
mod entry;
mod error;
mod event;
mod image;
mod loading;
mod message;
mod prompt;
#[cfg(test)]
mod scripted_backend;
mod session;
mod settings;
mod slash_commands;
mod speech;
mod stream;
mod textarea;
mod turn;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use conversation::*;
pub use entry::*;
pub use error::*;
pub use event::*;
pub use image::*;
pub use loading::*;
pub use message::*;
pub use prompt::*;
#[cfg(test)]
pub use scripted_backend::*;
pub use session::*;
pub use settings::*;
pub use slash_commands::*;
pub use speech::*;
pub use stream::*;
pub use textarea::*;
pub use turn::*;
