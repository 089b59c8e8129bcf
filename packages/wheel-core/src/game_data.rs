//! Field management system game data.
//!
//! Once position control is enabled for an alliance, the field management system sends a
//! game-specific message whose first character names the color the field's own sensor must
//! see. The field sensor is mounted at a different angle from the robot's sensor, so the
//! color the robot spins to is offset from the requested one by a number of wedges.

use alloc::string::String;

use snafu::Snafu;

use crate::color::WheelColor;

/// Number of wedges between the field's sensor and a robot sensor mounted opposite to it.
pub const DEFAULT_SENSOR_OFFSET_WEDGES: usize = 2;

/// Parser for the field management system's game-specific message.
pub struct GameData;

impl GameData {
    /// Parses a game-specific message into the requested panel color.
    ///
    /// Leading whitespace is ignored. An empty message means the field has not picked a color
    /// yet and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - A [`GameDataError::UnknownColor`] error is returned if the first character of the
    ///   message is not one of `B`, `G`, `R`, or `Y`.
    ///
    /// ```
    /// use wheel_core::{GameData, WheelColor};
    ///
    /// assert_eq!(GameData::parse("B").unwrap(), Some(WheelColor::Blue));
    /// assert_eq!(GameData::parse("").unwrap(), None);
    /// assert!(GameData::parse("Q").is_err());
    /// ```
    pub fn parse(message: &str) -> Result<Option<WheelColor>, GameDataError> {
        let Some(code) = message.trim_start().chars().next() else {
            return Ok(None);
        };

        WheelColor::from_code(code)
            .map(Some)
            .ok_or(GameDataError::UnknownColor { code })
    }

    /// Returns the color the robot's sensor must see so that the field's sensor sees
    /// `field_target`.
    #[must_use]
    pub const fn sensor_target(field_target: WheelColor, offset_wedges: usize) -> WheelColor {
        field_target.offset(offset_wedges)
    }
}

/// Assembles game-specific messages from a byte stream.
///
/// Messages are terminated by a line feed or carriage return. Other control characters and
/// non-ASCII bytes are dropped, and an overlong message is cut off at
/// [`GameMessageBuffer::MAX_LEN`] characters.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct GameMessageBuffer {
    partial: String,
    latest: String,
}

impl GameMessageBuffer {
    /// Longest message kept, in characters.
    pub const MAX_LEN: usize = 64;

    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            partial: String::new(),
            latest: String::new(),
        }
    }

    /// Feeds one received byte. Returns `true` if the byte completed a message.
    ///
    /// Empty lines are ignored so that `\r\n` line endings do not erase the message that
    /// was just received.
    pub fn push(&mut self, byte: u8) -> bool {
        match byte {
            b'\n' | b'\r' => {
                if self.partial.is_empty() {
                    return false;
                }

                self.latest = core::mem::take(&mut self.partial);
                true
            }
            byte if byte.is_ascii_graphic() || byte == b' ' => {
                if self.partial.len() < Self::MAX_LEN {
                    self.partial.push(char::from(byte));
                }
                false
            }
            _ => false,
        }
    }

    /// Feeds a run of received bytes. Returns `true` if any of them completed a message.
    pub fn extend(&mut self, bytes: &[u8]) -> bool {
        bytes
            .iter()
            .fold(false, |completed, &byte| self.push(byte) || completed)
    }

    /// The last complete message, or an empty string if none has been received.
    #[must_use]
    pub fn latest(&self) -> &str {
        &self.latest
    }

    /// Forgets every received message.
    pub fn clear(&mut self) {
        self.partial.clear();
        self.latest.clear();
    }
}

/// Errors that can occur when parsing game data.
#[derive(Debug, Snafu, Clone, Copy, Eq, PartialEq)]
pub enum GameDataError {
    /// The message named a color that is not on the panel.
    #[snafu(display("game data code {code:?} does not name a panel color"))]
    UnknownColor {
        /// The offending character.
        code: char,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_code() {
        assert_eq!(GameData::parse("B"), Ok(Some(WheelColor::Blue)));
        assert_eq!(GameData::parse("G"), Ok(Some(WheelColor::Green)));
        assert_eq!(GameData::parse("R"), Ok(Some(WheelColor::Red)));
        assert_eq!(GameData::parse("Y"), Ok(Some(WheelColor::Yellow)));
    }

    #[test]
    fn only_the_first_character_counts() {
        assert_eq!(GameData::parse("  Rxyz\n"), Ok(Some(WheelColor::Red)));
        assert_eq!(GameData::parse("g"), Ok(Some(WheelColor::Green)));
    }

    #[test]
    fn empty_means_no_target_yet() {
        assert_eq!(GameData::parse(""), Ok(None));
        assert_eq!(GameData::parse(" \r\n"), Ok(None));
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(
            GameData::parse("W"),
            Err(GameDataError::UnknownColor { code: 'W' })
        );
    }

    #[test]
    fn buffers_until_a_line_ends() {
        let mut buffer = GameMessageBuffer::new();

        assert!(!buffer.extend(b"R"));
        assert_eq!(buffer.latest(), "");
        assert!(buffer.extend(b"\r\n"));
        assert_eq!(buffer.latest(), "R");

        assert!(buffer.extend(b"B\nG"));
        assert_eq!(buffer.latest(), "B");
        assert!(buffer.extend(b"\n"));
        assert_eq!(buffer.latest(), "G");
    }

    #[test]
    fn drops_noise_and_caps_length() {
        let mut buffer = GameMessageBuffer::new();

        buffer.extend(&[0x00, 0xFF, b'Y', 0x07, b'\n']);
        assert_eq!(buffer.latest(), "Y");

        let long = [b'x'; GameMessageBuffer::MAX_LEN * 2];
        buffer.extend(&long);
        buffer.push(b'\n');
        assert_eq!(buffer.latest().len(), GameMessageBuffer::MAX_LEN);

        buffer.clear();
        assert_eq!(buffer.latest(), "");
    }

    #[test]
    fn opposite_sensor_sees_the_complementary_wedge() {
        let offset = DEFAULT_SENSOR_OFFSET_WEDGES;

        assert_eq!(GameData::sensor_target(WheelColor::Red, offset), WheelColor::Blue);
        assert_eq!(GameData::sensor_target(WheelColor::Blue, offset), WheelColor::Red);
        assert_eq!(GameData::sensor_target(WheelColor::Green, offset), WheelColor::Yellow);
        assert_eq!(GameData::sensor_target(WheelColor::Yellow, offset), WheelColor::Green);
        assert_eq!(GameData::sensor_target(WheelColor::Yellow, 0), WheelColor::Yellow);
    }
}
