use super::{Key, KeyState, ProcessorError};
use crate::screen::Screen;

/// Notifications for the display, audio and input collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorEvent {
    /// The screen changed, `new_screen` is a snapshot of it.
    ScreenUpdate { new_screen: Screen },
    /// The screen was cleared.
    ScreenCleared,
    /// The sound timer became non-zero.
    StartPlayingSound,
    /// The sound timer reached zero.
    StopPlayingSound,
    /// Execution is halted until a key is pressed.
    WaitForKeyPress,
    /// Execution stopped with a fatal error.
    ErrorEncountered { error: ProcessorError },
}

/// Requests from the outside to a running processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    KeyStateChange { key: Key, new_state: KeyState },
    /// Discard all state and start over with `program`.
    Reset { program: Vec<u8> },
}
