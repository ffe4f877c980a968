//! Telemetry link tasks
//!
//! TX paces one byte per character time, the way a TX-ready interrupt would,
//! so a frame produced mid-transmission restarts the pump. RX feeds every
//! byte through the assembler and hands complete frames to the display.

use defmt::*;
use embassy_time::{Duration, Timer};

use echolink_core::telemetry::Defect;
use echolink_hal::UartTx;
use echolink_hal_rp2040::{LinkRx, LinkTx};
use echolink_protocol::{FrameLayout, RxAssembler, RxEvent, TxPump};

use crate::channels::{report, HealthReport, FRAME_IN, FRAME_OUT};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Bits on the wire per byte at 8N1
const BITS_PER_BYTE: u64 = 10;

/// Time to shift one byte out at `baudrate`
pub fn byte_time(baudrate: u32) -> Duration {
    Duration::from_micros(BITS_PER_BYTE * 1_000_000 / baudrate.max(1) as u64)
}

/// Link TX task - sends the latest frame byte by byte
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: LinkTx, baudrate: u32) {
    info!("Link TX task started");

    let mut pump = TxPump::new();
    let pace = byte_time(baudrate);

    loop {
        let frame = FRAME_OUT.wait().await;
        if let Some(defect) = Defect::from_arm(pump.arm(&frame)) {
            report(HealthReport::Defect(defect));
        }

        while let Some(byte) = pump.next_byte() {
            if let Err(e) = tx.write_byte(byte) {
                warn!("UART write error: {:?}", e);
                break;
            }
            Timer::after(pace).await;

            if let Some(newer) = FRAME_OUT.try_take() {
                if let Some(defect) = Defect::from_arm(pump.arm(&newer)) {
                    report(HealthReport::Defect(defect));
                }
            }
        }
        trace!("Frame sent");
    }
}

/// Link RX task - reassembles frames from the byte stream
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: LinkRx, layout: FrameLayout) {
    info!("Link RX task started");

    let mut assembler = RxAssembler::new(layout);
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read_available(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            match assembler.on_byte(byte) {
                RxEvent::FrameReady => {
                    if let Some(frame) = assembler.take_frame() {
                        FRAME_IN.signal(frame);
                    }
                }
                RxEvent::Overrun => {
                    if let Some(defect) = Defect::from_rx(RxEvent::Overrun) {
                        report(HealthReport::Defect(defect));
                    }
                }
                RxEvent::Stored | RxEvent::Ignored => {}
            }
        }
    }
}
