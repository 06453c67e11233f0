use crate::error::{HarmonyError, Result};
use crate::note::pitch_name;
use crate::scale::scale_degree_to_pitch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Octave used when a key name carries no octave digit
pub const DEFAULT_OCTAVE: i32 = 3;

/// The seven natural note letters and their pitch classes
const NATURAL_NOTES: [(char, i32); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

/// A major key, identified by the absolute pitch of scale degree 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    tonic: i32,
}

impl Key {
    pub const fn new(tonic: i32) -> Self {
        Key { tonic }
    }

    pub fn tonic(&self) -> i32 {
        self.tonic
    }

    /// Absolute pitch of a scale degree in this key
    pub fn pitch(&self, degree: i32) -> i32 {
        scale_degree_to_pitch(degree, self.tonic)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} major", pitch_name(self.tonic))
    }
}

/// Parse a key name: letter, optional accidental, optional octave digit
///
/// `C` is C3 (MIDI 48), `D#` is 51, `Fb4` is 64. The letter is
/// case-insensitive; `#` raises and `b` lowers by a semitone.
impl FromStr for Key {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let invalid = || HarmonyError::invalid(format!("Invalid note name: {}", text));

        let mut chars = text.chars();
        let letter = chars
            .next()
            .ok_or_else(|| HarmonyError::invalid("Key name is empty"))?
            .to_ascii_uppercase();
        let pitch_class = NATURAL_NOTES
            .iter()
            .find(|(name, _)| *name == letter)
            .map(|&(_, pc)| pc)
            .ok_or_else(invalid)?;

        let rest = chars.as_str();
        let (accidental, rest) = match rest.chars().next() {
            Some('#') => (1, &rest[1..]),
            Some('b') | Some('B') => (-1, &rest[1..]),
            _ => (0, rest),
        };

        let octave = match rest.chars().collect::<Vec<_>>().as_slice() {
            [] => DEFAULT_OCTAVE,
            [digit] => digit.to_digit(10).map(|d| d as i32).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        Ok(Key::new(12 * (octave + 1) + pitch_class + accidental))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> i32 {
        name.parse::<Key>().unwrap().tonic()
    }

    #[test]
    fn test_natural_keys_default_to_octave_three() {
        assert_eq!(key("C"), 48);
        assert_eq!(key("D"), 50);
        assert_eq!(key("B"), 59);
        assert_eq!(key("a"), 57);
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(key("D#"), 51);
        assert_eq!(key("Eb"), 51);
        assert_eq!(key("EB"), 51);
        assert_eq!(key("Cb"), 47);
        assert_eq!(key("Bb"), 58);
    }

    #[test]
    fn test_octave_digit() {
        assert_eq!(key("C4"), 60);
        assert_eq!(key("Fb4"), 64);
        assert_eq!(key("G#0"), 20);
        assert_eq!(key(" a4 "), 69);
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "H", "X#", "C##", "C10", "Cx", "4C"] {
            match name.parse::<Key>() {
                Err(HarmonyError::InvalidArgument(_)) => {}
                other => panic!("expected InvalidArgument for '{}', got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_pitch_and_display() {
        let key = Key::new(60);
        assert_eq!(key.pitch(1), 60);
        assert_eq!(key.pitch(5), 67);
        assert_eq!(key.to_string(), "C4 major");
    }
}
