//! Proximity sensor task
//!
//! Watches the sensor's digital output and raises the proximity signal on
//! each rising edge. Whether that becomes an alarm is up to the lock task.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_time::Timer;

use crate::channels::PROXIMITY;

#[embassy_executor::task]
pub async fn proximity_task(mut sensor: ExtiInput<'static>, holdoff_ms: u64) {
    info!("Proximity task started");

    loop {
        sensor.wait_for_rising_edge().await;
        debug!("Proximity detected");
        PROXIMITY.signal(());

        // Ignore chatter while the object stays in range
        Timer::after_millis(holdoff_ms).await;
    }
}
