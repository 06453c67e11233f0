use crate::error::{HarmonyError, Result};
use crate::key::Key;
use crate::note::pitch_name;
use crate::scale::DEGREES_PER_OCTAVE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root, third and fifth of a diatonic triad, as scale degrees
///
/// Third and fifth wrap into `1..=7`, so octave information is lost here and
/// only restored when the triad is resolved against a previous chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbstractTriad {
    degrees: [i32; 3],
}

impl AbstractTriad {
    pub fn on_root(root: i32) -> Self {
        // Offsets are applied in i64 so that any root wraps without overflow.
        let wrap = |offset: i64| {
            let degree = (i64::from(root) + offset - 1).rem_euclid(i64::from(DEGREES_PER_OCTAVE)) + 1;
            degree as i32
        };
        AbstractTriad {
            degrees: [root, wrap(2), wrap(4)],
        }
    }

    pub fn degrees(&self) -> [i32; 3] {
        self.degrees
    }

    /// Place every degree without transposition
    pub fn resolve_in(&self, key: &Key) -> Triad {
        Triad(self.degrees.map(|degree| key.pitch(degree)))
    }
}

/// Three absolute pitches forming one chord
///
/// After voice leading the order is the order the pitches were assigned in,
/// not root/third/fifth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Triad([i32; 3]);

impl Triad {
    pub fn new(pitches: [i32; 3]) -> Self {
        Triad(pitches)
    }

    pub fn pitches(&self) -> [i32; 3] {
        self.0
    }

    pub fn contains(&self, pitch: i32) -> bool {
        self.0.contains(&pitch)
    }
}

impl TryFrom<&[i32]> for Triad {
    type Error = HarmonyError;

    fn try_from(pitches: &[i32]) -> Result<Self> {
        <[i32; 3]>::try_from(pitches).map(Triad).map_err(|_| {
            HarmonyError::invalid(format!(
                "a triad needs exactly 3 pitches, got {}",
                pitches.len()
            ))
        })
    }
}

impl fmt::Display for Triad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|&p| pitch_name(p)).collect();
        write!(f, "[{}]", names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abstract_triads_wrap_within_the_octave() {
        assert_eq!(AbstractTriad::on_root(1).degrees(), [1, 3, 5]);
        assert_eq!(AbstractTriad::on_root(4).degrees(), [4, 6, 1]);
        assert_eq!(AbstractTriad::on_root(6).degrees(), [6, 1, 3]);
        assert_eq!(AbstractTriad::on_root(7).degrees(), [7, 2, 4]);
        assert_eq!(AbstractTriad::on_root(0).degrees(), [0, 2, 4]);
        assert_eq!(AbstractTriad::on_root(10).degrees(), [10, 5, 7]);
        assert_eq!(AbstractTriad::on_root(i32::MAX).degrees(), [i32::MAX, 3, 5]);
    }

    #[test]
    fn test_resolve_in_key() {
        let key = Key::new(60);
        assert_eq!(AbstractTriad::on_root(1).resolve_in(&key).pitches(), [60, 64, 67]);
        assert_eq!(AbstractTriad::on_root(6).resolve_in(&key).pitches(), [69, 60, 64]);
    }

    #[test]
    fn test_triad_from_slice() {
        let triad = Triad::try_from(&[60, 64, 67][..]).unwrap();
        assert_eq!(triad, Triad::new([60, 64, 67]));
        assert!(triad.contains(64));
        assert!(!triad.contains(65));

        assert!(Triad::try_from(&[60, 64][..]).is_err());
        assert!(Triad::try_from(&[60, 64, 67, 72][..]).is_err());
    }

    #[test]
    fn test_display_and_json() {
        let triad = Triad::new([60, 65, 69]);
        assert_eq!(triad.to_string(), "[C4 F4 A4]");
        assert_eq!(serde_json::to_string(&triad).unwrap(), "[60,65,69]");
    }
}
