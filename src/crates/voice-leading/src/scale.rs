/// Semitones above the tonic for degrees 1 through 7 of the major scale
pub const MAJOR_SCALE_STEPS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Degrees per octave
pub const DEGREES_PER_OCTAVE: i32 = 7;

/// Absolute pitch of a 1-indexed major-scale degree above `tonic`
///
/// Degree 1 is the tonic, 8 the tonic an octave up, 0 the leading tone
/// below. Octave and step are split with floor division, so every integer
/// degree is valid. Pitches beyond the `i32` range saturate at its bounds.
pub fn scale_degree_to_pitch(degree: i32, tonic: i32) -> i32 {
    let offset = i64::from(degree) - 1;
    let octave = offset.div_euclid(i64::from(DEGREES_PER_OCTAVE));
    let step = offset.rem_euclid(i64::from(DEGREES_PER_OCTAVE));
    // Whole steps up to the third, then a half step and whole steps again.
    let semitones = if step <= 2 { step * 2 } else { 5 + (step - 3) * 2 };
    let pitch = i64::from(tonic) + 12 * octave + semitones;
    pitch.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_octave_matches_major_scale() {
        for (idx, &steps) in MAJOR_SCALE_STEPS.iter().enumerate() {
            assert_eq!(scale_degree_to_pitch(idx as i32 + 1, 60), 60 + steps);
        }
    }

    #[test]
    fn test_tonic_and_octave() {
        assert_eq!(scale_degree_to_pitch(1, 48), 48);
        assert_eq!(scale_degree_to_pitch(8, 48), 60);
        assert_eq!(scale_degree_to_pitch(15, 48), 72);
    }

    #[test]
    fn test_degrees_below_the_tonic() {
        assert_eq!(scale_degree_to_pitch(0, 60), 59); // leading tone
        assert_eq!(scale_degree_to_pitch(-1, 60), 57);
        assert_eq!(scale_degree_to_pitch(-3, 60), 53);
        assert_eq!(scale_degree_to_pitch(-6, 60), 48);
        assert_eq!(scale_degree_to_pitch(-10, 60), 41);
    }

    #[test]
    fn test_extreme_degrees_saturate() {
        assert_eq!(scale_degree_to_pitch(i32::MAX, 60), i32::MAX);
        assert_eq!(scale_degree_to_pitch(i32::MIN, 60), i32::MIN);
        assert_eq!(scale_degree_to_pitch(1, i32::MAX), i32::MAX);
        // Well inside the range the octave relation still holds.
        let degree = 1_000_000_000;
        assert_eq!(
            scale_degree_to_pitch(degree + 7, 0),
            scale_degree_to_pitch(degree, 0) + 12
        );
    }

    proptest! {
        #[test]
        fn prop_seven_degrees_make_an_octave(degree in -200i32..200, tonic in 0i32..128) {
            prop_assert_eq!(
                scale_degree_to_pitch(degree + 7, tonic),
                scale_degree_to_pitch(degree, tonic) + 12
            );
        }

        #[test]
        fn prop_mapping_is_strictly_increasing(degree in -200i32..200, tonic in 0i32..128) {
            let step = scale_degree_to_pitch(degree + 1, tonic) - scale_degree_to_pitch(degree, tonic);
            prop_assert!(step == 1 || step == 2);
        }

        #[test]
        fn prop_tonic_shifts_every_pitch(degree in -50i32..50, tonic in 0i32..100, shift in 0i32..28) {
            prop_assert_eq!(
                scale_degree_to_pitch(degree, tonic + shift),
                scale_degree_to_pitch(degree, tonic) + shift
            );
        }
    }
}
