//! Node state definition
//!
//! Sampling and rendering behaviour is a function of the current state.

use super::events::Event;
use super::mode::{Mode, Role};

/// Node states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeState {
    /// Sensor node measuring distance
    SensorRanging,
    /// Sensor node measuring tilt
    SensorTilt,
    /// Display node, no frame shown yet
    DisplayWaiting,
    /// Display node showing the latest frame
    DisplayRendering,
}

impl NodeState {
    /// State a node boots into
    pub fn initial(role: Role, mode: Mode) -> Self {
        match (role, mode) {
            (Role::Sensor, Mode::Ranging) => NodeState::SensorRanging,
            (Role::Sensor, Mode::Tilt) => NodeState::SensorTilt,
            (Role::Display, _) => NodeState::DisplayWaiting,
        }
    }

    /// Role this state belongs to
    pub fn role(&self) -> Role {
        match self {
            NodeState::SensorRanging | NodeState::SensorTilt => Role::Sensor,
            NodeState::DisplayWaiting | NodeState::DisplayRendering => Role::Display,
        }
    }

    /// Measurement mode, for sensor states
    pub fn mode(&self) -> Option<Mode> {
        match self {
            NodeState::SensorRanging => Some(Mode::Ranging),
            NodeState::SensorTilt => Some(Mode::Tilt),
            _ => None,
        }
    }

    /// Check if the speaker may sound in this state
    pub fn alarm_allowed(&self) -> bool {
        self.role() == Role::Sensor
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use NodeState::*;

        match (self, event) {
            (SensorRanging, ModeButton) => SensorTilt,
            (SensorTilt, ModeButton) => SensorRanging,

            (DisplayWaiting, FrameReceived) => DisplayRendering,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_states() {
        assert_eq!(
            NodeState::initial(Role::Sensor, Mode::Ranging),
            NodeState::SensorRanging
        );
        assert_eq!(
            NodeState::initial(Role::Sensor, Mode::Tilt),
            NodeState::SensorTilt
        );
        assert_eq!(
            NodeState::initial(Role::Display, Mode::Tilt),
            NodeState::DisplayWaiting
        );
    }

    #[test]
    fn test_mode_button_toggles_sensor() {
        let state = NodeState::SensorRanging;
        let tilt = state.transition(Event::ModeButton);
        assert_eq!(tilt, NodeState::SensorTilt);
        assert_eq!(tilt.transition(Event::ModeButton), NodeState::SensorRanging);
    }

    #[test]
    fn test_preset_button_keeps_state() {
        assert_eq!(
            NodeState::SensorRanging.transition(Event::PresetButton),
            NodeState::SensorRanging
        );
    }

    #[test]
    fn test_display_ignores_mode_events() {
        for state in [NodeState::DisplayWaiting, NodeState::DisplayRendering] {
            assert_eq!(state.transition(Event::ModeButton), state);
            assert_eq!(state.transition(Event::PresetButton), state);
        }
    }

    #[test]
    fn test_display_flow() {
        let rendering = NodeState::DisplayWaiting.transition(Event::FrameReceived);
        assert_eq!(rendering, NodeState::DisplayRendering);
        assert_eq!(rendering.transition(Event::FrameReceived), rendering);
    }

    #[test]
    fn test_sensor_ignores_frames() {
        assert_eq!(
            NodeState::SensorTilt.transition(Event::FrameReceived),
            NodeState::SensorTilt
        );
    }

    #[test]
    fn test_alarm_allowed() {
        assert!(NodeState::SensorRanging.alarm_allowed());
        assert!(NodeState::SensorTilt.alarm_allowed());
        assert!(!NodeState::DisplayRendering.alarm_allowed());
    }
}
