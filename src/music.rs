// Background music toggle: what to do on click and how the button looks after.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicAction {
    Play,
    Pause,
}

impl MusicAction {
    /// Action for a click given whether the audio is currently paused.
    pub fn for_click(is_paused: bool) -> Self {
        if is_paused {
            MusicAction::Play
        } else {
            MusicAction::Pause
        }
    }

    /// Button label once the action has been applied.
    pub fn label(self) -> &'static str {
        match self {
            MusicAction::Play => "⏸️ Pause Song",
            MusicAction::Pause => "🎵 Play Our Song",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            MusicAction::Play => "var(--soft-pink)",
            MusicAction::Pause => "transparent",
        }
    }
}
