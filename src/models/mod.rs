// Domain models module
// Contains core data structures used throughout the application

pub mod caption;
pub mod command;
pub mod player;
pub mod video;

pub use caption::{Caption, CaptionSet};
pub use command::Command;
pub use player::PlayerState;
pub use video::VideoInfo;
