//! Lockbox - Keypad Lock Controller Firmware
//!
//! Main firmware binary for STM32L476 boards (NUCLEO-L476RG pinout).
//!
//! - 4x4 keypad: rows PB0, PB1, PB2, PB10 (outputs), columns PC0-PC3 (pull-up inputs)
//! - USART1 (PA9 TX, PA10 RX): serial keys in, status text out
//! - TIM2 CH1 on PA0: Morse signal (LED or buzzer)
//! - PA1: proximity sensor digital output (EXTI)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::peripherals::USART1;
use embassy_stm32::time::khz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::usart::{self, BufferedUart, Config as UartConfig};
use embassy_stm32::{bind_interrupts, interrupt};
use heapless::String;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use lockbox_core::morse::encode_text;
use lockbox_core::{InputMultiplexer, LockController, Message, MorseCommand};
use lockbox_drivers::{MatrixKeypad, SerialSource, SerialStatusDisplay, KEYMAP_4X4};

mod channels;
mod config;
mod tasks;

use crate::channels::MORSE_CMD;

bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<USART1>;
    EXTI1 => exti::InterruptHandler<interrupt::typelevel::EXTI1>;
});

/// Room for the encoded boot greeting
const GREETING_PATTERN_LEN: usize = 160;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

static GREETING: StaticCell<String<GREETING_PATTERN_LEN>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Lockbox firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let lock_config = config::lock_config();
    info!(
        "Config: queue {} bytes, dot {}ms, dash {}ms, gap {}ms",
        lock_config.queue_capacity,
        lock_config.timing.dot_ms,
        lock_config.timing.dash_ms,
        lock_config.timing.element_gap_ms
    );

    // Serial link: keys in, status text out
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = BufferedUart::new(
        p.USART1,
        p.PA10, // RX
        p.PA9,  // TX
        tx_buf,
        rx_buf,
        Irqs,
        uart_config,
    )
    .unwrap();
    let (tx, rx) = uart.split();

    info!("UART initialized");

    // Morse signal output
    let signal_pin = PwmPin::new(p.PA0, OutputType::PushPull);
    let pwm = SimplePwm::new(
        p.TIM2,
        Some(signal_pin),
        None,
        None,
        None,
        khz(2),
        Default::default(),
    );
    let mut signal_channel = pwm.split().ch1;
    signal_channel.enable();

    info!("PWM initialized");

    // Keypad matrix, rows idle high
    let rows = [
        Output::new(p.PB0, Level::High, Speed::Low),
        Output::new(p.PB1, Level::High, Speed::Low),
        Output::new(p.PB2, Level::High, Speed::Low),
        Output::new(p.PB10, Level::High, Speed::Low),
    ];
    let cols = [
        Input::new(p.PC0, Pull::Up),
        Input::new(p.PC1, Pull::Up),
        Input::new(p.PC2, Pull::Up),
        Input::new(p.PC3, Pull::Up),
    ];
    let keypad = unwrap!(MatrixKeypad::new(rows, cols, KEYMAP_4X4));

    let input = unwrap!(InputMultiplexer::new(
        keypad,
        SerialSource::new(rx),
        lock_config.queue_capacity
    ));
    let display = SerialStatusDisplay::new(tx);
    let lock = LockController::new(lock_config.password.clone());

    info!("Keypad initialized");

    let proximity = ExtiInput::new(p.PA1, p.EXTI1, Pull::Down, Irqs);

    if let Some(pattern) = greeting_pattern() {
        MORSE_CMD.send(MorseCommand::Send(Message::Custom(pattern))).await;
    }

    let signal_config = tasks::SignalConfig {
        timing: lock_config.timing,
        on_duty: lock_config.on_duty,
        tick_interval_ms: config::TICK_INTERVAL_MS,
    };

    // Spawn tasks
    spawner
        .spawn(tasks::signal_task(signal_channel, signal_config))
        .unwrap();
    spawner
        .spawn(tasks::lock_task(input, display, lock, config::POLL_INTERVAL_MS))
        .unwrap();
    spawner
        .spawn(tasks::proximity_task(proximity, config::PROXIMITY_HOLDOFF_MS))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Encode the configured greeting, if any, into a pattern that lives forever
fn greeting_pattern() -> Option<&'static str> {
    if config::GREETING.is_empty() {
        return None;
    }

    let mut pattern = String::new();
    match encode_text(config::GREETING, &mut pattern) {
        Ok(()) => {
            let stored: &'static String<GREETING_PATTERN_LEN> = GREETING.init(pattern);
            debug!("Greeting pattern: {}", stored.as_str());
            Some(stored.as_str())
        }
        Err(e) => {
            warn!("Greeting not sent: {}", e);
            None
        }
    }
}
