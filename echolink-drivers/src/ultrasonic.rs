//! Ultrasonic ranger (HC-SR04 style)
//!
//! A trigger pulse of at least 10 µs starts a ping; the sensor answers with
//! an echo pulse whose width is the round-trip time. The capture channel
//! latches both edges; this driver arms it, fires the trigger and polls for
//! completion from the sampling context.

use echolink_core::capture::{EchoOutcome, EchoPolicy};
use echolink_core::config::SensorConfig;
use echolink_hal::{CaptureStatus, EdgeCapture, OutputPin};
use embedded_hal_async::delay::DelayNs;

/// Interval between completion polls
pub const POLL_STEP_US: u32 = 100;

/// Trigger pin + echo capture
pub struct EchoRanger<T, C, D> {
    trigger: T,
    capture: C,
    delay: D,
    trigger_pulse_us: u32,
    echo_timeout_us: u32,
    policy: EchoPolicy,
}

impl<T: OutputPin, C: EdgeCapture, D: DelayNs> EchoRanger<T, C, D> {
    /// Create a ranger; the trigger line is driven low
    pub fn new(mut trigger: T, capture: C, delay: D, config: &SensorConfig) -> Self {
        trigger.set_low();
        Self {
            trigger,
            capture,
            delay,
            trigger_pulse_us: config.trigger_pulse_us.max(10),
            echo_timeout_us: config.echo_timeout_us,
            policy: config.echo_policy,
        }
    }

    /// Fire one ping and wait for the echo.
    ///
    /// Polls the capture until the falling edge is latched or
    /// `echo_timeout_us` passes; a timeout is reported per the echo policy.
    pub async fn measure(&mut self) -> EchoOutcome {
        self.capture.arm();

        self.trigger.set_high();
        self.delay.delay_us(self.trigger_pulse_us).await;
        self.trigger.set_low();

        let mut waited_us = 0;
        loop {
            if let CaptureStatus::Complete(ticks) = self.capture.status() {
                return EchoOutcome::Fresh(ticks);
            }
            if waited_us >= self.echo_timeout_us {
                break;
            }
            self.delay.delay_us(POLL_STEP_US).await;
            waited_us += POLL_STEP_US;
        }

        match self.policy {
            EchoPolicy::RetainStale => EchoOutcome::Stale(self.capture.last_travel_ticks()),
            EchoPolicy::Strict => EchoOutcome::Lost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockPin};
    use embassy_futures::block_on;

    /// Capture that completes after a number of polls
    struct MockCapture {
        polls_until_done: Option<u32>,
        polls: u32,
        travel: u32,
        last: u32,
        armed: u32,
    }

    impl MockCapture {
        fn completing_after(polls: u32, travel: u32) -> Self {
            Self {
                polls_until_done: Some(polls),
                polls: 0,
                travel,
                last: 0,
                armed: 0,
            }
        }

        fn never(last: u32) -> Self {
            Self {
                polls_until_done: None,
                polls: 0,
                travel: 0,
                last,
                armed: 0,
            }
        }
    }

    impl EdgeCapture for MockCapture {
        fn arm(&mut self) {
            self.armed += 1;
            self.polls = 0;
        }

        fn status(&mut self) -> CaptureStatus {
            self.polls += 1;
            match self.polls_until_done {
                Some(n) if self.polls > n => {
                    self.last = self.travel;
                    CaptureStatus::Complete(self.travel)
                }
                _ => CaptureStatus::Pending,
            }
        }

        fn last_travel_ticks(&self) -> u32 {
            self.last
        }
    }

    #[test]
    fn test_measure_fresh() {
        let config = SensorConfig::default();
        let mut ranger = EchoRanger::new(
            MockPin::default(),
            MockCapture::completing_after(3, 5800),
            MockDelay::default(),
            &config,
        );

        assert_eq!(block_on(ranger.measure()), EchoOutcome::Fresh(5800));
        assert_eq!(ranger.capture.armed, 1);
        assert_eq!(ranger.trigger.rises, 1);
        assert!(!ranger.trigger.is_set_high());
        // Trigger pulse plus three poll steps
        assert_eq!(ranger.delay.total_ns, (10 + 3 * POLL_STEP_US as u64) * 1000);
    }

    #[test]
    fn test_timeout_retains_stale() {
        let config = SensorConfig {
            echo_timeout_us: 1000,
            ..SensorConfig::default()
        };
        let mut ranger = EchoRanger::new(
            MockPin::default(),
            MockCapture::never(2900),
            MockDelay::default(),
            &config,
        );

        assert_eq!(block_on(ranger.measure()), EchoOutcome::Stale(2900));
        assert_eq!(ranger.capture.polls, 1000 / POLL_STEP_US + 1);
    }

    #[test]
    fn test_timeout_strict_is_lost() {
        let config = SensorConfig {
            echo_timeout_us: 500,
            echo_policy: EchoPolicy::Strict,
            ..SensorConfig::default()
        };
        let mut ranger = EchoRanger::new(
            MockPin::default(),
            MockCapture::never(2900),
            MockDelay::default(),
            &config,
        );

        assert_eq!(block_on(ranger.measure()), EchoOutcome::Lost);
    }

    #[test]
    fn test_trigger_pulse_minimum() {
        let config = SensorConfig {
            trigger_pulse_us: 2,
            ..SensorConfig::default()
        };
        let mut ranger = EchoRanger::new(
            MockPin::default(),
            MockCapture::completing_after(0, 58),
            MockDelay::default(),
            &config,
        );

        block_on(ranger.measure());
        assert_eq!(ranger.delay.total_ns, 10_000);
    }
}
