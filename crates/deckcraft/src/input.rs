//! Keyboard routing. Raw key events resolve into closed action enums,
//! one table per mode, so the editor and playback never share or
//! duplicate key-handling logic.

use eframe::egui::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    AddSlide,
    DeleteSlide,
    PrevSlide,
    NextSlide,
    StartPlayback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    Next,
    Prev,
    JumpFirst,
    JumpLast,
    ToggleAutoplay,
    Exit,
}

/// Key table for the editor. Text editing has priority; the caller only
/// consults this table when no text field wants the keyboard.
pub fn editor_action(key: Key, modifiers: Modifiers) -> Option<EditorAction> {
    match key {
        Key::N if modifiers.command => Some(EditorAction::AddSlide),
        Key::Delete => Some(EditorAction::DeleteSlide),
        Key::ArrowLeft | Key::ArrowUp => Some(EditorAction::PrevSlide),
        Key::ArrowRight | Key::ArrowDown => Some(EditorAction::NextSlide),
        Key::F5 => Some(EditorAction::StartPlayback),
        _ => None,
    }
}

/// Key table for playback.
pub fn playback_action(key: Key) -> Option<PlaybackAction> {
    match key {
        Key::ArrowRight | Key::ArrowDown | Key::Space | Key::Enter => Some(PlaybackAction::Next),
        Key::ArrowLeft | Key::ArrowUp => Some(PlaybackAction::Prev),
        Key::Home => Some(PlaybackAction::JumpFirst),
        Key::End => Some(PlaybackAction::JumpLast),
        Key::Escape => Some(PlaybackAction::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_next_keys() {
        for key in [Key::ArrowRight, Key::ArrowDown, Key::Space, Key::Enter] {
            assert_eq!(playback_action(key), Some(PlaybackAction::Next));
        }
    }

    #[test]
    fn test_playback_prev_keys() {
        for key in [Key::ArrowLeft, Key::ArrowUp] {
            assert_eq!(playback_action(key), Some(PlaybackAction::Prev));
        }
    }

    #[test]
    fn test_playback_jump_and_exit() {
        assert_eq!(playback_action(Key::Home), Some(PlaybackAction::JumpFirst));
        assert_eq!(playback_action(Key::End), Some(PlaybackAction::JumpLast));
        assert_eq!(playback_action(Key::Escape), Some(PlaybackAction::Exit));
        assert_eq!(playback_action(Key::Q), None);
    }

    #[test]
    fn test_editor_table() {
        assert_eq!(
            editor_action(Key::N, Modifiers::COMMAND),
            Some(EditorAction::AddSlide)
        );
        assert_eq!(editor_action(Key::N, Modifiers::NONE), None);
        assert_eq!(
            editor_action(Key::Delete, Modifiers::NONE),
            Some(EditorAction::DeleteSlide)
        );
        assert_eq!(
            editor_action(Key::ArrowRight, Modifiers::NONE),
            Some(EditorAction::NextSlide)
        );
        assert_eq!(
            editor_action(Key::ArrowLeft, Modifiers::NONE),
            Some(EditorAction::PrevSlide)
        );
        assert_eq!(
            editor_action(Key::F5, Modifiers::NONE),
            Some(EditorAction::StartPlayback)
        );
        assert_eq!(editor_action(Key::Escape, Modifiers::NONE), None);
    }
}
