// Known-good voicings for the first twelve base-7 digits of pi in C

#[cfg(test)]
mod tests {
    use crate::key::Key;
    use crate::leader::{progression, resolve_triad};
    use crate::scale::scale_degree_to_pitch;
    use crate::triad::Triad;

    const PI_BASE_SEVEN: &str = "066365143203";

    fn degrees(digits: &str) -> Vec<i32> {
        digits
            .chars()
            .map(|ch| ch.to_digit(7).unwrap() as i32 + 1)
            .collect()
    }

    #[test]
    fn test_pi_progression_in_c3() {
        let key: Key = "C".parse().unwrap();
        let chords = progression(degrees(PI_BASE_SEVEN), &key);

        let expected: [[i32; 3]; 12] = [
            [48, 52, 55],
            [47, 53, 50],
            [47, 50, 53],
            [53, 48, 45],
            [53, 47, 50],
            [48, 52, 45],
            [45, 53, 50],
            [50, 43, 47],
            [48, 41, 45],
            [40, 47, 43],
            [40, 43, 48],
            [48, 41, 45],
        ];
        let actual: Vec<[i32; 3]> = chords.iter().map(Triad::pitches).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_pi_melody_opening() {
        let tonic = 48;
        let first = degrees(PI_BASE_SEVEN)[0];
        let melody: Vec<i32> = (0..4).map(|i| scale_degree_to_pitch(first + i, tonic)).collect();
        assert_eq!(melody, vec![48, 50, 52, 53]);
    }

    #[test]
    fn test_isolated_resolutions() {
        let c4 = Key::new(60);
        assert_eq!(
            resolve_triad(5, Some(&Triad::new([60, 64, 67])), &c4).pitches(),
            [67, 59, 62]
        );
        assert_eq!(
            resolve_triad(2, Some(&Triad::new([65, 69, 72])), &c4).pitches(),
            [65, 69, 74]
        );

        let c3 = Key::new(48);
        assert_eq!(
            resolve_triad(7, Some(&Triad::new([48, 52, 55])), &c3).pitches(),
            [47, 53, 50]
        );
    }

    #[test]
    fn test_repeated_chord_holds_still() {
        let key = Key::new(48);
        let chords = progression([1, 1, 1], &key);
        assert!(chords.windows(2).all(|pair| {
            let mut a = pair[0].pitches();
            let mut b = pair[1].pitches();
            a.sort_unstable();
            b.sort_unstable();
            a == b
        }));
    }
}
