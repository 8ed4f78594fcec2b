pub mod youtube;

pub use youtube::{extract_video_id, validate_url};
