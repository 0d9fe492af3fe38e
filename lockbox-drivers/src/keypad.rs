//! Matrix keypad driver
//!
//! Rows are outputs, columns are inputs with pull-ups. One row at a time is
//! driven low; a column reading low means the key at that crossing is
//! pressed.
//!
//! Only the press edge is reported: holding a key yields it once, and it
//! can be reported again after release.

use embedded_hal::digital::{InputPin, OutputPin};
use lockbox_core::traits::Keypad;

/// Standard 4x4 membrane keypad layout
pub const KEYMAP_4X4: [[u8; 4]; 4] = [
    [b'1', b'2', b'3', b'A'],
    [b'4', b'5', b'6', b'B'],
    [b'7', b'8', b'9', b'C'],
    [b'*', b'0', b'#', b'D'],
];

/// Keypad scan failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeypadError {
    /// A row or column pin reported an error
    Pin,
}

/// Row/column scanned keypad
pub struct MatrixKeypad<R, C, const ROWS: usize, const COLS: usize> {
    rows: [R; ROWS],
    cols: [C; COLS],
    keymap: [[u8; COLS]; ROWS],
    /// Key seen on the previous scan
    held: Option<u8>,
    /// Failed scans, for diagnostics
    errors: u32,
}

impl<R, C, const ROWS: usize, const COLS: usize> MatrixKeypad<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    /// Create a keypad and park every row high (idle)
    pub fn new(
        rows: [R; ROWS],
        cols: [C; COLS],
        keymap: [[u8; COLS]; ROWS],
    ) -> Result<Self, KeypadError> {
        let mut keypad = Self {
            rows,
            cols,
            keymap,
            held: None,
            errors: 0,
        };
        for row in keypad.rows.iter_mut() {
            row.set_high().map_err(|_| KeypadError::Pin)?;
        }
        Ok(keypad)
    }

    /// Scan once, reporting a key only on its press edge
    pub fn try_scan(&mut self) -> Result<Option<u8>, KeypadError> {
        let pressed = self.read_matrix()?;
        let fresh = match pressed {
            Some(key) if self.held != Some(key) => Some(key),
            _ => None,
        };
        self.held = pressed;
        Ok(fresh)
    }

    /// Number of scans that failed on a pin error
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// First pressed key in row-major order
    fn read_matrix(&mut self) -> Result<Option<u8>, KeypadError> {
        for r in 0..ROWS {
            self.rows[r].set_low().map_err(|_| KeypadError::Pin)?;

            let mut found = None;
            for c in 0..COLS {
                let low = self.cols[c].is_low().map_err(|_| KeypadError::Pin);
                match low {
                    Ok(true) => {
                        found = Some(self.keymap[r][c]);
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        // Leave the row idle before bailing out
                        let _ = self.rows[r].set_high();
                        return Err(e);
                    }
                }
            }

            self.rows[r].set_high().map_err(|_| KeypadError::Pin)?;
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }
}

impl<R, C, const ROWS: usize, const COLS: usize> Keypad for MatrixKeypad<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    fn scan(&mut self) -> Option<u8> {
        match self.try_scan() {
            Ok(key) => key,
            Err(_) => {
                self.errors = self.errors.wrapping_add(1);
                None
            }
        }
    }
}
