// Caption services
// Parsing, fetching, uploading and resolving captions

pub mod fetch;
pub mod parser;
pub mod resolver;
pub mod upload;

pub use fetch::{CaptionSource, HttpCaptionClient};
pub use parser::{parse_subtitles, SubtitleFormat};
pub use resolver::{active_index, next_index, previous_index, resolve};
