//! Node role and mode state machine
//!
//! The role is fixed at boot from a strap pin. The sensor role switches
//! between ranging and tilt on the mode button; the display role only tracks
//! whether it has shown a frame yet.

pub mod events;
pub mod machine;
pub mod mode;

pub use events::Event;
pub use machine::NodeState;
pub use mode::{Mode, ModeMachine, Role};
