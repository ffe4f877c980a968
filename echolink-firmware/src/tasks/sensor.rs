//! Sensor node sampling loop
//!
//! One pass per sample period: apply pending button events, measure in the
//! current mode, drive the speaker, encode a frame for the link. On a raw
//! link the loop reports the burst-averaged X channel instead.

use defmt::*;
use embassy_time::{Delay, Duration, Ticker};

use echolink_core::alarm::AlarmMapper;
use echolink_core::config::{LinkLayout, NodeConfig};
use echolink_core::estimator::{DistanceEstimator, RawAdcEstimator, TiltEstimator, RAW_BURST};
use echolink_core::state::{Event, Mode, ModeMachine, Role};
use echolink_core::telemetry::Defect;
use echolink_drivers::{Accelerometer, EchoRanger, Speaker};
use echolink_hal_rp2040::{RpAdc, RpOutput, RpTone, SharedCapture};
use echolink_protocol::{digit_count, Frame, FrameLayout};

use crate::channels::{report, HealthReport, BUTTON_EVENTS, FRAME_OUT};

pub type Ranger = EchoRanger<RpOutput<'static>, SharedCapture, Delay>;
pub type Tilt = Accelerometer<RpAdc<'static>>;
pub type Alarm = Speaker<RpTone<'static>>;

/// Sensor node main loop
#[embassy_executor::task]
pub async fn sensor_task(mut ranger: Ranger, mut tilt: Tilt, mut alarm: Alarm, config: NodeConfig) {
    info!("Sensor task started");

    let layout = config.link.layout.frame_layout();
    let mut machine = ModeMachine::new(Role::Sensor, Mode::default());
    let mut distance = DistanceEstimator::new(&config.sensor);
    let mut angles = TiltEstimator::new(&config.tilt);
    let mut raw = RawAdcEstimator::new();
    let mut burst = [0u16; RAW_BURST];
    let raw_link = config.link.layout == LinkLayout::Raw;
    let mut mapper = AlarmMapper::new(
        config.alarm.presets,
        config.alarm.selected,
        config.alarm.gate,
    );

    let period = Duration::from_millis(config.sensor.sample_period_ms as u64);
    let mut ticker = Ticker::every(period);

    loop {
        ticker.next().await;

        while let Ok(event) = BUTTON_EVENTS.try_receive() {
            match event {
                Event::ModeButton => {
                    if let Some(mode) = machine.toggle() {
                        info!("Mode -> {:?}", mode);
                        distance.reset();
                        angles.reset();
                        raw.reset();
                    }
                }
                Event::PresetButton => {
                    let index = mapper.cycle_preset();
                    info!(
                        "Preset {} selected ({} cm)",
                        index,
                        mapper.selected_distance()
                    );
                }
                Event::FrameReceived => {}
            }
        }

        let Some(mode) = machine.mode() else {
            continue;
        };

        if raw_link {
            alarm.silence();
            match tilt.read_raw_burst(&mut burst) {
                Ok(()) => {
                    let value = raw.push_burst(&burst) as u32;
                    trace!("ADC: {}", value);
                    send_frame(layout, value, digit_count(value), mode);
                }
                Err(e) => warn!("ADC burst failed: {:?}", e),
            }
            continue;
        }

        let sample = match mode {
            Mode::Ranging => {
                let outcome = ranger.measure().await;
                report(HealthReport::Echo(outcome));
                outcome.ticks().map(|ticks| {
                    let cm = distance.push_ticks(ticks);
                    trace!("Distance: {} cm", cm);
                    (cm as u32, digit_count(cm as u32), mapper.level(cm))
                })
            }
            Mode::Tilt => match tilt.read_axes() {
                Ok(axes) => {
                    let reading = angles.push_axes(axes.x, axes.y, axes.z);
                    trace!("Tilt: {:?}", reading);
                    let combined = reading.combined();
                    Some((
                        combined as u32,
                        layout.digit_slots(),
                        mapper.tilt_level(combined),
                    ))
                }
                Err(e) => {
                    warn!("Accelerometer read failed: {:?}", e);
                    None
                }
            },
        };

        let Some((value, digits, level)) = sample else {
            alarm.silence();
            continue;
        };

        if machine.state().alarm_allowed() {
            alarm.set_level(level);
        }

        send_frame(layout, value, digits, mode);
    }
}

/// Encode and hand a frame to the link task
fn send_frame(layout: FrameLayout, value: u32, digits: u8, mode: Mode) {
    let tag = layout.has_mode_tag().then(|| mode.tag());
    match Frame::encode(layout, value, digits, tag) {
        Ok(frame) => FRAME_OUT.signal(frame),
        Err(e) => {
            debug!("Frame encode failed: {:?}", e);
            report(HealthReport::Defect(Defect::from(e)));
        }
    }
}
