//! Defect monitoring task
//!
//! Logs each recoverable defect as it happens and prints a per-period
//! summary. Nothing here ever stops the node.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use echolink_core::telemetry::{DefectMonitor, HealthStatus};

use crate::channels::{HealthReport, HEALTH};

/// Summary interval in seconds
pub const SUMMARY_INTERVAL_S: u64 = 30;

#[embassy_executor::task]
pub async fn health_task() {
    info!("Health task started");

    let mut monitor = DefectMonitor::new();
    let mut ticker = Ticker::every(Duration::from_secs(SUMMARY_INTERVAL_S));
    let mut last_status = HealthStatus::Ok;

    loop {
        match select(HEALTH.receive(), ticker.next()).await {
            Either::First(HealthReport::Echo(outcome)) => {
                if let Some(defect) = monitor.record_echo(outcome) {
                    warn!("Echo defect: {:?}", defect);
                }
            }
            Either::First(HealthReport::Defect(defect)) => {
                monitor.record(defect);
                warn!("Defect: {:?}", defect);
            }
            Either::Second(()) => {
                let summary = monitor.take_report();
                if summary.is_clean() {
                    trace!("No defects in the last {} s", SUMMARY_INTERVAL_S);
                } else {
                    info!(
                        "{} defects in the last {} s",
                        summary.total(),
                        SUMMARY_INTERVAL_S
                    );
                    for (defect, count) in summary.iter() {
                        info!("  {:?}: {}", defect, count);
                    }
                }
            }
        }

        let status = monitor.check();
        if status != last_status {
            match status {
                HealthStatus::Ok => info!("Health restored"),
                HealthStatus::Degraded(defect) => warn!("Health degraded: {:?}", defect),
            }
            last_status = status;
        }
    }
}
