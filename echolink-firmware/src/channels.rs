//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use echolink_core::capture::{EchoOutcome, EchoPolicy, PulseCapture, TimerWidth};
use echolink_core::state::Event;
use echolink_core::sync::IsrCell;
use echolink_core::telemetry::Defect;
use echolink_protocol::{Frame, RawFrame};

/// Channel capacity for button events
const BUTTON_CHANNEL_SIZE: usize = 4;

/// Channel capacity for health reports
const HEALTH_CHANNEL_SIZE: usize = 16;

/// Echo pulse state written by the edge task, polled by the ranger.
/// Reconfigured from `node.toml` at boot.
pub static ECHO_CAPTURE: IsrCell<PulseCapture> =
    IsrCell::new(PulseCapture::new(TimerWidth::Bits16, EchoPolicy::RetainStale));

/// Debounced button presses for the sensor loop
pub static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, Event, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Latest encoded frame waiting to go out (a newer frame replaces it)
pub static FRAME_OUT: Signal<CriticalSectionRawMutex, Frame> = Signal::new();

/// Latest frame taken from the receiver
pub static FRAME_IN: Signal<CriticalSectionRawMutex, RawFrame> = Signal::new();

/// Input to the health task
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthReport {
    /// Outcome of one capture cycle
    Echo(EchoOutcome),
    /// Any other recoverable defect
    Defect(Defect),
}

/// Defects and echo outcomes from every task
pub static HEALTH: Channel<CriticalSectionRawMutex, HealthReport, HEALTH_CHANNEL_SIZE> =
    Channel::new();

/// Queue a health report, dropping it if the health task is behind
pub fn report(item: HealthReport) {
    let _ = HEALTH.try_send(item);
}
