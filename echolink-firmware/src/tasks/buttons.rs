//! Push-button tasks
//!
//! One task instance per button. Each debounced press is forwarded to the
//! sensor loop as a state-machine event.

use defmt::*;
use embassy_time::Delay;

use echolink_core::state::Event;
use echolink_drivers::DebouncedButton;
use echolink_hal_rp2040::RpInput;

use crate::channels::BUTTON_EVENTS;

pub type Button = DebouncedButton<RpInput<'static>, Delay>;

#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut button: Button, event: Event) {
    info!("Button task started for {:?}", event);

    loop {
        if button.wait_for_press().await.is_err() {
            continue;
        }
        debug!("Button: {:?}", event);
        if BUTTON_EVENTS.try_send(event).is_err() {
            warn!("Button channel full, dropping {:?}", event);
        }
    }
}
