//! Echo edge capture
//!
//! The RP2040 has no timer input-capture unit, so a dedicated task waits on
//! both edges of the echo pin and latches the microsecond timer into a shared
//! [`PulseCapture`]. The ranger polls the same cell through [`SharedCapture`].

use embassy_rp::gpio::Input;
use embassy_time::Instant;
use echolink_core::capture::PulseCapture;
use echolink_core::sync::IsrCell;
use echolink_hal::{CaptureStatus, EdgeCapture};

/// Latch every echo edge into `cell`. Runs forever.
pub async fn capture_edges(echo: &mut Input<'_>, cell: &'static IsrCell<PulseCapture>) {
    loop {
        echo.wait_for_any_edge().await;
        let count = Instant::now().as_micros() as u32;
        cell.with(|capture| capture.on_edge(count));
    }
}

/// Polling side of the shared capture
pub struct SharedCapture {
    cell: &'static IsrCell<PulseCapture>,
}

impl SharedCapture {
    pub fn new(cell: &'static IsrCell<PulseCapture>) -> Self {
        Self { cell }
    }
}

impl EdgeCapture for SharedCapture {
    fn arm(&mut self) {
        self.cell.with(|capture| capture.arm());
    }

    fn status(&mut self) -> CaptureStatus {
        self.cell.with(|capture| {
            if capture.is_complete() {
                CaptureStatus::Complete(capture.travel_time())
            } else {
                CaptureStatus::Pending
            }
        })
    }

    fn last_travel_ticks(&self) -> u32 {
        self.cell.with(|capture| capture.travel_time())
    }
}
