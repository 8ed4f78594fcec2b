use serde::{Deserialize, Serialize};

/// User-facing playback commands, bound to the keyboard and mirrored by the
/// on-screen controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    TogglePlayPause,
    PreviousCaption,
    NextCaption,
}

impl Command {
    /// Maps a key name (as delivered by the UI layer) to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Space" | "k" => Some(Command::TogglePlayPause),
            "ArrowLeft" | "j" => Some(Command::PreviousCaption),
            "ArrowRight" | "l" => Some(Command::NextCaption),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Command::from_key(" "), Some(Command::TogglePlayPause));
        assert_eq!(Command::from_key("Space"), Some(Command::TogglePlayPause));
        assert_eq!(Command::from_key("ArrowLeft"), Some(Command::PreviousCaption));
        assert_eq!(Command::from_key("l"), Some(Command::NextCaption));
        assert_eq!(Command::from_key("Enter"), None);
    }
}
