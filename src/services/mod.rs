// Services module
// Business logic separated by domain areas

pub mod captions; // Subtitle parsing, resolution, fetch and upload
pub mod player;   // Playback widget boundary
pub mod storage;  // Key-value persistence and recent URLs
pub mod sync;     // Playback synchronization controller
pub mod video;    // Video URL handling
