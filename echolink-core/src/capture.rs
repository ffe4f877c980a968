//! Dual-edge echo pulse capture
//!
//! The capture handler sees every edge of the echo line together with the
//! free-running timer count at that instant. A one-bit "last edge" flag tells
//! rising from falling; the pulse width is the wrapped difference between the
//! two latched counts.

/// Width of the free-running capture timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimerWidth {
    /// 16-bit counter, wraps at 65536
    #[default]
    Bits16,
    /// 32-bit counter
    Bits32,
}

impl TimerWidth {
    /// Mask that reduces a difference modulo the timer period
    pub const fn mask(&self) -> u32 {
        match self {
            TimerWidth::Bits16 => 0xFFFF,
            TimerWidth::Bits32 => 0xFFFF_FFFF,
        }
    }
}

/// What to report when a cycle ends without a falling edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EchoPolicy {
    /// Reuse the last completed travel time
    #[default]
    RetainStale,
    /// Report the echo as lost
    Strict,
}

/// Result of one capture cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoOutcome {
    /// Both edges seen this cycle
    Fresh(u32),
    /// No falling edge; previous travel time reused
    Stale(u32),
    /// No falling edge and stale values are not accepted
    Lost,
}

impl EchoOutcome {
    /// Travel time in ticks, if any is available
    pub fn ticks(&self) -> Option<u32> {
        match self {
            EchoOutcome::Fresh(t) | EchoOutcome::Stale(t) => Some(*t),
            EchoOutcome::Lost => None,
        }
    }
}

/// Capture state shared between the edge handler and the sampling loop
#[derive(Debug, Clone)]
pub struct PulseCapture {
    width: TimerWidth,
    policy: EchoPolicy,
    start: u32,
    high_seen: bool,
    complete: bool,
    travel_time: u32,
}

impl PulseCapture {
    /// Create an idle capture
    pub const fn new(width: TimerWidth, policy: EchoPolicy) -> Self {
        Self {
            width,
            policy,
            start: 0,
            high_seen: false,
            complete: false,
            travel_time: 0,
        }
    }

    /// Reset for a new cycle. The last travel time survives.
    pub fn arm(&mut self) {
        self.start = 0;
        self.high_seen = false;
        self.complete = false;
    }

    /// Edge handler entry with the timer count latched at the edge
    pub fn on_edge(&mut self, count: u32) {
        if !self.high_seen {
            self.start = count;
            self.high_seen = true;
        } else {
            self.travel_time = count.wrapping_sub(self.start) & self.width.mask();
            self.high_seen = false;
            self.complete = true;
        }
    }

    /// Whether the falling edge has been seen since the last `arm`
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Last completed travel time in ticks
    pub fn travel_time(&self) -> u32 {
        self.travel_time
    }

    /// Outcome of the current cycle under the configured policy
    pub fn outcome(&self) -> EchoOutcome {
        if self.complete {
            return EchoOutcome::Fresh(self.travel_time);
        }
        match self.policy {
            EchoPolicy::RetainStale => EchoOutcome::Stale(self.travel_time),
            EchoPolicy::Strict => EchoOutcome::Lost,
        }
    }

    /// Active echo policy
    pub fn policy(&self) -> EchoPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rising_then_falling() {
        let mut cap = PulseCapture::new(TimerWidth::Bits16, EchoPolicy::RetainStale);
        cap.arm();
        cap.on_edge(1000);
        assert!(!cap.is_complete());
        cap.on_edge(1580);
        assert!(cap.is_complete());
        assert_eq!(cap.outcome(), EchoOutcome::Fresh(580));
    }

    #[test]
    fn test_wraparound_16bit() {
        let mut cap = PulseCapture::new(TimerWidth::Bits16, EchoPolicy::RetainStale);
        cap.arm();
        cap.on_edge(65_000);
        cap.on_edge(464);
        assert_eq!(cap.travel_time(), 1000);
    }

    #[test]
    fn test_wraparound_32bit() {
        let mut cap = PulseCapture::new(TimerWidth::Bits32, EchoPolicy::RetainStale);
        cap.arm();
        cap.on_edge(u32::MAX - 9);
        cap.on_edge(10);
        assert_eq!(cap.travel_time(), 20);
    }

    #[test]
    fn test_arm_keeps_last_travel_time() {
        let mut cap = PulseCapture::new(TimerWidth::Bits16, EchoPolicy::RetainStale);
        cap.arm();
        cap.on_edge(0);
        cap.on_edge(2900);

        cap.arm();
        assert!(!cap.is_complete());
        assert_eq!(cap.travel_time(), 2900);
        assert_eq!(cap.outcome(), EchoOutcome::Stale(2900));
    }

    #[test]
    fn test_arm_discards_half_cycle() {
        let mut cap = PulseCapture::new(TimerWidth::Bits16, EchoPolicy::RetainStale);
        cap.arm();
        cap.on_edge(500);

        // Rising edge from the aborted cycle must not pair with the next one
        cap.arm();
        cap.on_edge(1000);
        cap.on_edge(1116);
        assert_eq!(cap.outcome(), EchoOutcome::Fresh(116));
    }

    #[test]
    fn test_strict_reports_lost() {
        let mut cap = PulseCapture::new(TimerWidth::Bits16, EchoPolicy::Strict);
        cap.arm();
        cap.on_edge(100);
        assert_eq!(cap.outcome(), EchoOutcome::Lost);
        assert_eq!(cap.outcome().ticks(), None);
    }
}
