//! Keyboard input mapping
//!
//! Translates raw GLFW key events into the handful of commands the render
//! loop understands.

use glfw::{Action, Key, WindowEvent};

/// Commands the application reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Set the window close flag and leave the render loop
    Close,
    /// Switch between filled and wireframe polygons
    ToggleWireframe,
}

/// Map a key transition to a command
///
/// Only presses count; releases and auto-repeats are ignored so a held key
/// toggles exactly once.
pub fn command_for_key(key: Key, action: Action) -> Option<InputCommand> {
    if action != Action::Press {
        return None;
    }

    match key {
        Key::Escape => Some(InputCommand::Close),
        Key::W => Some(InputCommand::ToggleWireframe),
        _ => None,
    }
}

/// Map any window event to a command
pub fn command_for_event(event: &WindowEvent) -> Option<InputCommand> {
    match *event {
        WindowEvent::Key(key, _, action, _) => command_for_key(key, action),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glfw::Modifiers;

    #[test]
    fn test_escape_press_closes() {
        assert_eq!(command_for_key(Key::Escape, Action::Press), Some(InputCommand::Close));
    }

    #[test]
    fn test_release_and_repeat_are_ignored() {
        assert_eq!(command_for_key(Key::Escape, Action::Release), None);
        assert_eq!(command_for_key(Key::Escape, Action::Repeat), None);
        assert_eq!(command_for_key(Key::W, Action::Repeat), None);
    }

    #[test]
    fn test_wireframe_toggle() {
        assert_eq!(command_for_key(Key::W, Action::Press), Some(InputCommand::ToggleWireframe));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(command_for_key(Key::Space, Action::Press), None);
        assert_eq!(command_for_key(Key::Enter, Action::Press), None);
    }

    #[test]
    fn test_events() {
        let escape = WindowEvent::Key(Key::Escape, 9, Action::Press, Modifiers::empty());
        assert_eq!(command_for_event(&escape), Some(InputCommand::Close));

        let resize = WindowEvent::FramebufferSize(640, 480);
        assert_eq!(command_for_event(&resize), None);
    }
}
