//! Duty-cycle output trait for the Morse signal (LED, buzzer, etc.)

/// Output actuator driven by a duty cycle
///
/// A duty of `0` means the signal is off. Any non-zero duty means on; the
/// value notionally sets brightness or volume.
pub trait DutyCycleOutput {
    /// Largest duty value the output can represent
    fn max_duty(&self) -> u16;

    /// Apply a duty cycle
    ///
    /// Callers clamp to [`max_duty`](Self::max_duty) before calling.
    fn set_duty(&mut self, duty: u16);
}
