//! Echo edge capture task
//!
//! Stands in for the timer capture interrupt: every edge of the echo line
//! latches the microsecond clock into the shared capture cell.

use defmt::*;
use embassy_rp::gpio::Input;

use echolink_hal_rp2040::capture_edges;

use crate::channels::ECHO_CAPTURE;

#[embassy_executor::task]
pub async fn echo_task(mut echo: Input<'static>) {
    info!("Echo capture task started");
    capture_edges(&mut echo, &ECHO_CAPTURE).await
}
