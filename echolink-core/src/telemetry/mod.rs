//! Link and sensor health tracking
//!
//! Nothing on either node halts on a fault. Recoverable defects are counted
//! here so the firmware can log and summarise them.

pub mod monitor;

pub use monitor::{Defect, DefectMonitor, DefectReport, HealthStatus};
