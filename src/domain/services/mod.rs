pub mod actions;
mod accumulator;
mod app_state;
mod bubble;
mod bubble_list;
pub mod events;
mod media;
mod prompts;
mod request_builder;
mod scroll;
mod session_controller;
mod token_counter;

pub use accumulator::*;
pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use media::*;
pub use prompts::*;
pub use request_builder::*;
pub use scroll::*;
pub use session_controller::*;
pub use token_counter::*;
