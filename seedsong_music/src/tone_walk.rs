// The tone walk: the musical reading of an expanded path string.
//
// The same string the draw walk renders as branches is scanned a second
// time as a melody. Consecutive step symbols ('F'/'G') form a *run*; each
// run becomes one `NoteEvent` whose pitch is the scale degree in effect
// while the run accumulated, whose duration is proportional to the run
// length, and whose `source_span` points back at exactly those symbols so
// playback can highlight the part of the figure currently sounding.
//
// '+' and '-' move the scale degree up and down. This is the mirror image
// of the draw walk, where '+' turns by the negative angle: one symbol
// leans the figure one way and leans the melody the other. Both walks keep
// that pairing; the cross-crate tests pin it.
//
// **Critical constraint: determinism.** Like the draw walk, this is a
// single sequential pass with no clocks and no I/O. The same path and
// params always produce the same events.
//
// See also: scale.rs for degree-to-frequency, playback.rs for scheduling
// the produced events.

use seedsong_grammar::{SourceSpan, symbol::is_step};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::scale::Scale;

/// Tuning knobs for the tone walk and its playback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneParams {
    /// Scale that maps degrees to frequencies.
    pub scale: Scale,
    /// Seconds of sound per step symbol in a run.
    pub note_duration: f64,
    /// Frequency of degree 0, in Hz.
    pub base_frequency: f64,
    /// Playback volume, 0.0 to 1.0.
    pub volume: f64,
}

impl Default for ToneParams {
    fn default() -> Self {
        ToneParams {
            scale: Scale::default(),
            note_duration: 0.2,
            base_frequency: 220.0,
            volume: 0.8,
        }
    }
}

impl ToneParams {
    /// Check the params are usable. Returns a human-readable complaint for
    /// the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if !self.note_duration.is_finite() || self.note_duration <= 0.0 {
            return Err(format!(
                "note_duration must be a positive number of seconds, got {}",
                self.note_duration
            ));
        }
        if !self.base_frequency.is_finite() || self.base_frequency <= 0.0 {
            return Err(format!(
                "base_frequency must be a positive frequency in Hz, got {}",
                self.base_frequency
            ));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(format!("volume must be within 0.0..=1.0, got {}", self.volume));
        }
        Ok(())
    }
}

/// One note of the melody, tied back to the symbols that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Pitch in Hz.
    pub frequency: f64,
    /// Length in seconds (run length times `note_duration`).
    pub duration: f64,
    /// The run of step symbols this note came from, as indices into the
    /// expanded path.
    pub source_span: SourceSpan,
}

/// Scan a path string into its melody.
///
/// Runs of step symbols become notes; any other symbol first closes the
/// pending run, then applies its own effect: '+'/'-' move the scale
/// degree, '[' saves it, ']' restores it (a stray ']' with nothing saved
/// is ignored), and everything else does nothing further. A run still
/// pending at the end of the path is closed there.
pub fn interpret_for_tone(path: &str, params: &ToneParams) -> Vec<NoteEvent> {
    let mut events = Vec::new();
    let mut tone_index: i32 = 0;
    let mut saved: SmallVec<[i32; 8]> = SmallVec::new();
    // Pending run of step symbols as (start index, length).
    let mut run: Option<(usize, usize)> = None;

    for (index, symbol) in path.chars().enumerate() {
        if is_step(symbol) {
            match run.as_mut() {
                Some((_, len)) => *len += 1,
                None => run = Some((index, 1)),
            }
            continue;
        }
        // The run sounds at the degree that was in effect while it
        // accumulated, so close it before applying this symbol.
        close_run(&mut run, tone_index, params, &mut events);
        match symbol {
            '+' => tone_index += 1,
            '-' => tone_index -= 1,
            '[' => saved.push(tone_index),
            ']' => {
                if let Some(previous) = saved.pop() {
                    tone_index = previous;
                }
            }
            // '$' and unknown symbols only break the run.
            _ => {}
        }
    }
    close_run(&mut run, tone_index, params, &mut events);
    events
}

fn close_run(
    run: &mut Option<(usize, usize)>,
    tone_index: i32,
    params: &ToneParams,
    events: &mut Vec<NoteEvent>,
) {
    if let Some((start, len)) = run.take() {
        events.push(NoteEvent {
            frequency: params.scale.frequency(tone_index, params.base_frequency),
            duration: len as f64 * params.note_duration,
            source_span: SourceSpan::new(start, start + len),
        });
    }
}
