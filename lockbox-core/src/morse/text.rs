//! Plain text to Morse pattern conversion

use heapless::String;

/// Text that cannot be turned into a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextError {
    /// Character has no International Morse code in the table
    UnsupportedChar(char),
    /// Pattern does not fit the output buffer
    Overflow,
}

const LETTERS: [&str; 26] = [
    ".-", "-...", "-.-.", "-..", ".", "..-.", "--.", "....", "..", ".---", "-.-", ".-..", "--",
    "-.", "---", ".--.", "--.-", ".-.", "...", "-", "..-", "...-", ".--", "-..-", "-.--", "--..",
];

const DIGITS: [&str; 10] = [
    "-----", ".----", "..---", "...--", "....-", ".....", "-....", "--...", "---..", "----.",
];

/// Code for a single letter or digit
pub fn code_for(c: char) -> Option<&'static str> {
    match c.to_ascii_uppercase() {
        upper @ 'A'..='Z' => Some(LETTERS[(upper as u8 - b'A') as usize]),
        digit @ '0'..='9' => Some(DIGITS[(digit as u8 - b'0') as usize]),
        _ => None,
    }
}

/// Encode `text` into `out` as a pattern string
///
/// Letters are separated by `' '`, words by `" / "`. Letters are
/// case-insensitive; any run of whitespace separates words. `out` is
/// cleared first and left with a partial pattern on error.
pub fn encode_text<const N: usize>(text: &str, out: &mut String<N>) -> Result<(), TextError> {
    out.clear();

    for (w, word) in text.split_whitespace().enumerate() {
        if w > 0 {
            out.push_str(" / ").map_err(|_| TextError::Overflow)?;
        }

        for (i, c) in word.chars().enumerate() {
            let code = code_for(c).ok_or(TextError::UnsupportedChar(c))?;
            if i > 0 {
                out.push(' ').map_err(|_| TextError::Overflow)?;
            }
            out.push_str(code).map_err(|_| TextError::Overflow)?;
        }
    }

    Ok(())
}
