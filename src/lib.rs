// Interactive caption viewer core: subtitle parsing, active-caption
// resolution and playback synchronization for an embedded video player

pub mod commands;
pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

pub use errors::{AppError, AppResult};
pub use session::CaptionSession;
