//! Lock task
//!
//! Owns the input multiplexer, the lock controller and the status display.
//! Polls both input sources, feeds keys to the controller and forwards the
//! resulting signal requests to the signal task. Between polls it sleeps,
//! waking early for a proximity alert.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::usart::{BufferedUartRx, BufferedUartTx};
use embassy_time::Timer;

use lockbox_core::{InputMultiplexer, LockController, LockEvent};
use lockbox_drivers::{MatrixKeypad, SerialSource, SerialStatusDisplay};

use crate::channels::{MORSE_CMD, PROXIMITY};
use crate::config::QUEUE_MAX;

/// 4x4 keypad on GPIO rows and columns
pub type LockKeypad = MatrixKeypad<Output<'static>, Input<'static>, 4, 4>;

/// Keypad plus serial link
pub type LockInput = InputMultiplexer<LockKeypad, SerialSource<BufferedUartRx<'static>>, QUEUE_MAX>;

/// Status text on the serial link
pub type LockDisplay = SerialStatusDisplay<BufferedUartTx<'static>>;

#[embassy_executor::task]
pub async fn lock_task(
    mut input: LockInput,
    mut display: LockDisplay,
    mut lock: LockController,
    poll_interval_ms: u64,
) {
    info!("Lock task started");

    lock.boot(&mut display);
    let mut reported_drops = 0;
    let mut reported_keypad_errors = 0;
    let mut reported_serial_errors = 0;
    let mut reported_display_errors = 0;

    loop {
        // Drain everything that is ready before sleeping again
        while let Some(key) = input.poll_raw() {
            trace!("Key: {=u8:#x}", key);
            if let Some(event) = lock.handle_key(key, &mut display) {
                if event == LockEvent::EnrollmentStarted {
                    // New password starts from a clean slate
                    input.reset();
                }
                dispatch(event).await;
            }
        }

        if input.dropped() != reported_drops {
            warn!(
                "Input queue full, {} bytes dropped",
                input.dropped().wrapping_sub(reported_drops)
            );
            reported_drops = input.dropped();
        }

        report_errors("Keypad pin", input.keypad().errors(), &mut reported_keypad_errors);
        report_errors("UART read", input.source().errors(), &mut reported_serial_errors);
        report_errors("Display write", display.errors(), &mut reported_display_errors);

        match select(Timer::after_millis(poll_interval_ms), PROXIMITY.wait()).await {
            Either::First(()) => {}
            Either::Second(()) => match lock.proximity_alert() {
                Some(event) => dispatch(event).await,
                None => debug!("Proximity ignored (alarm off or unlocked)"),
            },
        }
    }
}

/// Log an event and hand its signal request to the signal task
async fn dispatch(event: LockEvent) {
    info!("Lock event: {}", event);
    if let Some(command) = event.morse_command() {
        MORSE_CMD.send(command).await;
    }
}

/// Warn when a driver's failure count moved since the last report
fn report_errors(what: &str, errors: u32, reported: &mut u32) {
    if errors != *reported {
        *reported = errors;
        warn!("{} failed ({} total)", what, errors);
    }
}
