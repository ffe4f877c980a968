//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod display;
pub mod echo;
pub mod health;
pub mod link;
pub mod sensor;

pub use buttons::button_task;
pub use display::display_task;
pub use echo::echo_task;
pub use health::health_task;
pub use link::{link_rx_task, link_tx_task};
pub use sensor::sensor_task;
