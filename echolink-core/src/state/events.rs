//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Mode button pressed (debounced)
    ModeButton,
    /// Preset button pressed (debounced)
    PresetButton,
    /// A complete frame was taken from the receiver
    FrameReceived,
}

impl Event {
    /// Check if this event comes from a push-button
    pub fn is_button_event(&self) -> bool {
        matches!(self, Event::ModeButton | Event::PresetButton)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_events() {
        assert!(Event::ModeButton.is_button_event());
        assert!(Event::PresetButton.is_button_event());
        assert!(!Event::FrameReceived.is_button_event());
    }
}
