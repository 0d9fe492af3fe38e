//! Morse signal task
//!
//! Owns the PWM channel and the sequence scheduler. Commands from the lock
//! task and scheduler ticks are handled in the same loop, so a start or
//! stop can never interleave with a transition.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_stm32::peripherals::TIM2;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_time::{Duration, Instant, Ticker};

use lockbox_core::config::MorseTiming;
use lockbox_core::SequenceScheduler;
use lockbox_drivers::PwmSignal;

use crate::channels::MORSE_CMD;

/// Signal task configuration
pub struct SignalConfig {
    pub timing: MorseTiming,
    pub on_duty: u32,
    pub tick_interval_ms: u64,
}

#[embassy_executor::task]
pub async fn signal_task(channel: SimplePwmChannel<'static, TIM2>, config: SignalConfig) {
    info!("Signal task started");

    let mut output = PwmSignal::new(channel);
    let mut scheduler = SequenceScheduler::new(config.timing, config.on_duty);
    let mut ticker = Ticker::every(Duration::from_millis(config.tick_interval_ms));
    let mut reported_errors = 0;

    loop {
        match select(MORSE_CMD.receive(), ticker.next()).await {
            Either::First(command) => {
                debug!("Signal command: {}", command);
                scheduler.apply(command, Instant::now().as_millis(), &mut output);
            }
            Either::Second(()) => {
                if let Some(phase) = scheduler.tick(Instant::now().as_millis(), &mut output) {
                    trace!("Signal phase: {}", phase);
                }
            }
        }

        if output.errors() != reported_errors {
            reported_errors = output.errors();
            warn!("PWM write failed ({} total)", reported_errors);
        }
    }
}
