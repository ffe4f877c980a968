//! Defect monitor implementation
//!
//! Counts missing echoes, receive overruns and malformed frames.

use echolink_protocol::{ArmOutcome, FrameError, RxEvent};

use crate::capture::EchoOutcome;

/// Consecutive missing echoes before the sensor is reported degraded
pub const MAX_CONSECUTIVE_LOST: u8 = 3;

/// Number of [`Defect`] kinds
pub const DEFECT_KINDS: usize = 7;

/// Recoverable fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Defect {
    /// No falling edge and the strict echo policy is active
    LostEcho,
    /// No falling edge; previous travel time reused
    StaleEcho,
    /// Receive buffer filled without a sentinel
    RxOverrun,
    /// Count or mode tag not recognised
    UnknownTag,
    /// Strict decode rejected a frame
    FrameRejected,
    /// New frame armed before the previous one finished
    TxPreempted,
    /// Measurement did not fit the frame layout
    ValueTooWide,
}

impl Defect {
    const ALL: [Defect; DEFECT_KINDS] = [
        Defect::LostEcho,
        Defect::StaleEcho,
        Defect::RxOverrun,
        Defect::UnknownTag,
        Defect::FrameRejected,
        Defect::TxPreempted,
        Defect::ValueTooWide,
    ];

    const fn index(&self) -> usize {
        *self as usize
    }

    /// Defect implied by a capture outcome
    pub fn from_echo(outcome: EchoOutcome) -> Option<Self> {
        match outcome {
            EchoOutcome::Fresh(_) => None,
            EchoOutcome::Stale(_) => Some(Defect::StaleEcho),
            EchoOutcome::Lost => Some(Defect::LostEcho),
        }
    }

    /// Defect implied by a receiver event
    pub fn from_rx(event: RxEvent) -> Option<Self> {
        match event {
            RxEvent::Overrun => Some(Defect::RxOverrun),
            _ => None,
        }
    }

    /// Defect implied by arming the transmitter
    pub fn from_arm(outcome: ArmOutcome) -> Option<Self> {
        match outcome {
            ArmOutcome::Preempted => Some(Defect::TxPreempted),
            ArmOutcome::Started => None,
        }
    }
}

impl From<FrameError> for Defect {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::ValueTooWide | FrameError::DigitCountOutOfRange => Defect::ValueTooWide,
            FrameError::InvalidDigitCount | FrameError::UnknownModeTag => Defect::UnknownTag,
            _ => Defect::FrameRejected,
        }
    }
}

/// Overall health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthStatus {
    /// No persistent fault
    Ok,
    /// A fault keeps recurring
    Degraded(Defect),
}

/// Defect counts since the previous report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DefectReport {
    counts: [u32; DEFECT_KINDS],
}

impl DefectReport {
    pub fn count(&self, defect: Defect) -> u32 {
        self.counts[defect.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero entries
    pub fn iter(&self) -> impl Iterator<Item = (Defect, u32)> + '_ {
        Defect::ALL
            .into_iter()
            .map(move |d| (d, self.counts[d.index()]))
            .filter(|&(_, n)| n > 0)
    }
}

/// Defect monitor
///
/// Tracks lifetime and per-report counts plus the run of consecutive
/// missing echoes and the defect that most recently extended it.
#[derive(Debug, Clone, Default)]
pub struct DefectMonitor {
    lifetime: [u32; DEFECT_KINDS],
    pending: DefectReport,
    consecutive_lost: u8,
    last_echo_defect: Option<Defect>,
}

impl DefectMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence
    pub fn record(&mut self, defect: Defect) {
        let i = defect.index();
        self.lifetime[i] = self.lifetime[i].saturating_add(1);
        self.pending.counts[i] = self.pending.counts[i].saturating_add(1);

        if matches!(defect, Defect::LostEcho | Defect::StaleEcho) {
            self.consecutive_lost = self.consecutive_lost.saturating_add(1);
            self.last_echo_defect = Some(defect);
        }
    }

    /// Record the outcome of a capture cycle; returns the defect, if any
    pub fn record_echo(&mut self, outcome: EchoOutcome) -> Option<Defect> {
        match Defect::from_echo(outcome) {
            Some(defect) => {
                self.record(defect);
                Some(defect)
            }
            None => {
                self.consecutive_lost = 0;
                self.last_echo_defect = None;
                None
            }
        }
    }

    /// Lifetime count for a defect
    pub fn count(&self, defect: Defect) -> u32 {
        self.lifetime[defect.index()]
    }

    /// Check for persistent faults
    pub fn check(&self) -> HealthStatus {
        match self.last_echo_defect {
            Some(defect) if self.consecutive_lost >= MAX_CONSECUTIVE_LOST => {
                HealthStatus::Degraded(defect)
            }
            _ => HealthStatus::Ok,
        }
    }

    /// Hand out counts since the previous call and start a new period
    pub fn take_report(&mut self) -> DefectReport {
        core::mem::take(&mut self.pending)
    }
}
