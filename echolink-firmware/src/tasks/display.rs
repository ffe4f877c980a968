//! Display node render loop
//!
//! Between scan passes the latest received frame, if any, is decoded and
//! replaces what is shown. An unrecognised count blanks the display.

use defmt::*;
use embassy_time::Delay;

use echolink_core::config::NodeConfig;
use echolink_core::display::DisplayState;
use echolink_core::state::{Mode, ModeMachine, Role};
use echolink_core::telemetry::Defect;
use echolink_drivers::MultiplexedDisplay;
use echolink_hal_rp2040::{RpOutput, RpSegmentPort};
use echolink_protocol::{FrameError, FrameLayout, IntegrityPolicy, RawFrame};

use crate::channels::{report, HealthReport, FRAME_IN};

/// Number of digit-select lines wired
pub const PLACES: usize = 4;

pub type Display = MultiplexedDisplay<RpSegmentPort<'static>, RpOutput<'static>, Delay, PLACES>;

/// Display node main loop
#[embassy_executor::task]
pub async fn display_task(mut display: Display, config: NodeConfig) {
    info!("Display task started");

    let layout = config.link.layout.frame_layout();
    let policy = config.link.integrity();
    let mut machine = ModeMachine::new(Role::Display, Mode::default());
    let mut state = DisplayState::BLANK;

    loop {
        if let Some(raw) = FRAME_IN.try_take() {
            let previous = machine.state();
            if machine.frame_received() != previous {
                info!("First frame received");
            }
            state = match render(&raw, layout, policy) {
                Ok(next) => next,
                Err(e) => {
                    debug!("Frame rejected: {:?}", e);
                    report(HealthReport::Defect(Defect::from(e)));
                    state
                }
            };
        }

        display.scan_pass(&state).await;
    }
}

/// Decode a received frame into the next display state
fn render(
    raw: &RawFrame,
    layout: FrameLayout,
    policy: IntegrityPolicy,
) -> Result<DisplayState, FrameError> {
    let decoded = raw.decode(layout, policy)?;
    if decoded.digit_count.is_none() {
        report(HealthReport::Defect(Defect::UnknownTag));
    }
    trace!("Frame: {:?}", decoded);
    Ok(DisplayState::from_frame(&decoded))
}
