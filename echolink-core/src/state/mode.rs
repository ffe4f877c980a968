//! Boot-time role and runtime mode

use echolink_protocol::{TAG_RANGING, TAG_TILT};

use super::events::Event;
use super::machine::NodeState;

/// Which half of the link this board is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Ranges, sounds the alarm and transmits
    Sensor,
    /// Receives and drives the 7-segment display
    Display,
}

impl Role {
    /// Strap low selects the sensor, high the display
    pub fn from_strap(high: bool) -> Self {
        if high {
            Role::Display
        } else {
            Role::Sensor
        }
    }
}

/// What the sensor node is measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Ranging,
    Tilt,
}

impl Mode {
    /// Mode tag byte carried in the frame
    pub const fn tag(&self) -> u8 {
        match self {
            Mode::Ranging => TAG_RANGING,
            Mode::Tilt => TAG_TILT,
        }
    }

    /// Mode for a received tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TAG_RANGING => Some(Mode::Ranging),
            TAG_TILT => Some(Mode::Tilt),
            _ => None,
        }
    }
}

/// Owner of the node state; the mode changes only through [`toggle`](Self::toggle)
#[derive(Debug, Clone)]
pub struct ModeMachine {
    state: NodeState,
}

impl ModeMachine {
    pub fn new(role: Role, mode: Mode) -> Self {
        Self {
            state: NodeState::initial(role, mode),
        }
    }

    /// Toggle between ranging and tilt; no effect on a display node
    pub fn toggle(&mut self) -> Option<Mode> {
        self.apply(Event::ModeButton).mode()
    }

    /// A frame reached the display; no effect on a sensor node
    pub fn frame_received(&mut self) -> NodeState {
        self.apply(Event::FrameReceived)
    }

    fn apply(&mut self, event: Event) -> NodeState {
        self.state = self.state.transition(event);
        self.state
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn role(&self) -> Role {
        self.state.role()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.state.mode()
    }
}
