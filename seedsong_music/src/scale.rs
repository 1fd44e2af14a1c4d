// Musical scales for the tone walk.
//
// The tone walk tracks an integer scale degree, not a frequency: '+' and
// '-' symbols move the degree up and down, and runs of step symbols sound
// whatever note the degree currently points at. A `Scale` turns that
// unbounded degree into a frequency by stacking its interval pattern in
// both directions from a base frequency.
//
// This module provides:
// - Scale definitions with their semitone step patterns
// - Degree-to-semitone-offset mapping (floor division, so negative
//   degrees land in lower octaves rather than clamping)
// - Degree-to-frequency conversion in equal temperament
//
// Used by tone_walk.rs when turning symbol runs into note events, and by
// midi.rs when mapping frequencies back onto keys.

use serde::{Deserialize, Serialize};

/// The scales a tone walk can sound, each defined by the semitone steps
/// between successive degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    /// Major pentatonic: C D E G A  (no half steps, so no wandering
    /// degree ever clashes; the default for grammar-driven melodies)
    #[default]
    Pentatonic,
    /// Major: C D E F G A B
    Major,
    /// Natural minor: A B C D E F G
    NaturalMinor,
    /// Dorian: D E F G A B C  (natural minor with raised 6th)
    Dorian,
    /// Whole tone: C D E F# G# A#  (six equal steps)
    WholeTone,
    /// Chromatic: every semitone
    Chromatic,
}

impl Scale {
    /// Every scale, in the order the command line lists them.
    pub const ALL: [Scale; 6] = [
        Scale::Pentatonic,
        Scale::Major,
        Scale::NaturalMinor,
        Scale::Dorian,
        Scale::WholeTone,
        Scale::Chromatic,
    ];

    /// Semitone steps between successive degrees. Always sums to a full
    /// octave, so `degree + steps().len()` sounds the same pitch class.
    pub fn steps(self) -> &'static [u8] {
        match self {
            Scale::Pentatonic => &[2, 2, 3, 2, 3],
            Scale::Major => &[2, 2, 1, 2, 2, 2, 1],
            Scale::NaturalMinor => &[2, 1, 2, 2, 1, 2, 2],
            Scale::Dorian => &[2, 1, 2, 2, 2, 1, 2],
            Scale::WholeTone => &[2, 2, 2, 2, 2, 2],
            Scale::Chromatic => &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        }
    }

    /// Semitones spanned by one full cycle of the step pattern.
    pub fn octave_semitones(self) -> i32 {
        self.steps().iter().map(|&s| i32::from(s)).sum()
    }

    /// Semitone offset of `degree` from degree 0. Degrees beyond the step
    /// pattern wrap with floor division: degree -1 of the pentatonic is
    /// the top degree of the octave below (offset -3), not a clamp to 0.
    pub fn semitone_offset(self, degree: i32) -> i32 {
        let steps = self.steps();
        let n = steps.len() as i32;
        let octave = degree.div_euclid(n);
        let index = degree.rem_euclid(n) as usize;
        let within: i32 = steps[..index].iter().map(|&s| i32::from(s)).sum();
        octave * self.octave_semitones() + within
    }

    /// Equal-temperament frequency of `degree` relative to `base_frequency`
    /// (the frequency of degree 0).
    pub fn frequency(self, degree: i32, base_frequency: f64) -> f64 {
        base_frequency * 2f64.powf(f64::from(self.semitone_offset(degree)) / 12.0)
    }

    /// The name the command line uses for this scale.
    pub fn name(self) -> &'static str {
        match self {
            Scale::Pentatonic => "pentatonic",
            Scale::Major => "major",
            Scale::NaturalMinor => "minor",
            Scale::Dorian => "dorian",
            Scale::WholeTone => "whole-tone",
            Scale::Chromatic => "chromatic",
        }
    }

    /// Parse a command-line scale name. Accepts the names `name()` prints
    /// plus a few obvious spellings.
    pub fn from_name(name: &str) -> Option<Scale> {
        match name {
            "pentatonic" => Some(Scale::Pentatonic),
            "major" => Some(Scale::Major),
            "minor" | "natural-minor" => Some(Scale::NaturalMinor),
            "dorian" => Some(Scale::Dorian),
            "whole-tone" | "wholetone" => Some(Scale::WholeTone),
            "chromatic" => Some(Scale::Chromatic),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pentatonic_offsets() {
        let s = Scale::Pentatonic;
        // C D E G A C: 0, 2, 4, 7, 9, then the octave
        assert_eq!(s.semitone_offset(0), 0);
        assert_eq!(s.semitone_offset(1), 2);
        assert_eq!(s.semitone_offset(2), 4);
        assert_eq!(s.semitone_offset(3), 7);
        assert_eq!(s.semitone_offset(4), 9);
        assert_eq!(s.semitone_offset(5), 12);
    }

    #[test]
    fn test_negative_degrees_use_floor_division() {
        let s = Scale::Pentatonic;
        // Degree -1 is the top degree of the octave below (A below C)
        assert_eq!(s.semitone_offset(-1), -3);
        assert_eq!(s.semitone_offset(-5), -12);
        assert_eq!(s.semitone_offset(-6), -15);

        let m = Scale::Major;
        assert_eq!(m.semitone_offset(-1), -1); // B below C
        assert_eq!(m.semitone_offset(-7), -12);
    }

    #[test]
    fn test_every_scale_spans_an_octave() {
        for scale in Scale::ALL {
            assert_eq!(scale.octave_semitones(), 12, "{}", scale.name());
        }
    }

    #[test]
    fn test_octave_periodicity() {
        for scale in Scale::ALL {
            let n = scale.steps().len() as i32;
            for degree in [-7, -1, 0, 3, 11] {
                let low = scale.frequency(degree, 220.0);
                let high = scale.frequency(degree + n, 220.0);
                assert!(
                    (high - 2.0 * low).abs() < 1e-9,
                    "{} degree {degree}: {low} vs {high}",
                    scale.name()
                );
            }
        }
    }

    #[test]
    fn test_degree_zero_is_the_base_frequency() {
        for scale in Scale::ALL {
            assert_eq!(scale.frequency(0, 220.0), 220.0);
        }
    }

    #[test]
    fn test_chromatic_counts_semitones() {
        let c = Scale::Chromatic;
        assert_eq!(c.semitone_offset(1), 1);
        assert_eq!(c.semitone_offset(13), 13);
        assert_eq!(c.semitone_offset(-1), -1);
        // A above A220 at 12 semitones
        assert!((c.frequency(12, 220.0) - 440.0).abs() < 1e-9);
    }

    #[test]
    fn test_names_round_trip() {
        for scale in Scale::ALL {
            assert_eq!(Scale::from_name(scale.name()), Some(scale));
        }
        assert_eq!(Scale::from_name("wholetone"), Some(Scale::WholeTone));
        assert_eq!(Scale::from_name("phrygian"), None);
    }
}
