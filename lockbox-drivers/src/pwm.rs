//! PWM signal output
//!
//! Drives the Morse LED or buzzer from any `embedded-hal` PWM channel.

use embedded_hal::pwm::SetDutyCycle;
use lockbox_core::traits::DutyCycleOutput;

/// Duty-cycle output over a PWM channel
pub struct PwmSignal<P> {
    channel: P,
    /// Duty last accepted by the channel
    duty: u16,
    /// Writes the channel rejected
    errors: u32,
}

impl<P: SetDutyCycle> PwmSignal<P> {
    /// Wrap a channel and switch it off
    pub fn new(channel: P) -> Self {
        let mut signal = Self {
            channel,
            duty: 0,
            errors: 0,
        };
        signal.set_duty(0);
        signal
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }

    pub fn is_on(&self) -> bool {
        self.duty != 0
    }

    /// Number of rejected duty writes
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl<P: SetDutyCycle> DutyCycleOutput for PwmSignal<P> {
    fn max_duty(&self) -> u16 {
        self.channel.max_duty_cycle()
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.channel.max_duty_cycle());
        match self.channel.set_duty_cycle(duty) {
            Ok(()) => self.duty = duty,
            Err(_) => self.errors = self.errors.wrapping_add(1),
        }
    }
}
