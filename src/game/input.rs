use super::item::ItemId;

/// Player input routed into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Click(ItemId),
    Restart,
    TogglePause,
}

/// Maps a `KeyboardEvent.key` value to a control signal.
pub fn key_binding(key: &str) -> Option<InputEvent> {
    match key {
        "Enter" => Some(InputEvent::Restart),
        "Escape" => Some(InputEvent::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_restarts_escape_pauses() {
        assert_eq!(key_binding("Enter"), Some(InputEvent::Restart));
        assert_eq!(key_binding("Escape"), Some(InputEvent::TogglePause));
        assert_eq!(key_binding("a"), None);
    }
}
