// Playback scheduling without an audio device.
//
// `ToneSink` is the audio-side capability boundary, the counterpart of the
// turtle's `RenderSink`: the walks produce events, a sink owns the notion
// of "now playing". `SchedulePlayer` is the concrete sink used here. It is
// pure and cooperative: instead of an audio callback it has a clock the
// caller advances, and instead of killing voices it bumps an epoch so a
// superseded melody simply stops being consulted.
//
// Starting a new melody always cancels the old one first. There is no
// queue: at most one melody is scheduled, and cancellation is a normal
// termination path, not an error.
//
// The animation driver advances the clock once per frame and asks
// `currently_playing_span` to decide which symbols to highlight.

use seedsong_grammar::SourceSpan;

use crate::tone_walk::NoteEvent;

/// Capability interface for sounding a melody.
pub trait ToneSink {
    /// Replace whatever is playing with `events`, restarted from time zero.
    fn play(&mut self, events: Vec<NoteEvent>);

    /// Cancel playback. Idempotent.
    fn stop(&mut self);

    /// Set the playback volume, clamped to 0.0..=1.0.
    fn set_volume(&mut self, level: f64);

    /// The source span of the note sounding right now, if any.
    fn currently_playing_span(&self) -> Option<SourceSpan>;
}

/// A note placed on the playback timeline.
#[derive(Debug, Clone, Copy)]
struct ScheduledNote {
    /// Seconds from the start of the melody.
    start: f64,
    event: NoteEvent,
}

/// A pure playback schedule with a caller-driven clock.
#[derive(Debug)]
pub struct SchedulePlayer {
    schedule: Vec<ScheduledNote>,
    /// Seconds since the current melody started.
    clock: f64,
    volume: f64,
    /// Bumped on every `play` and `stop`; a melody scheduled under an
    /// older epoch is gone for good.
    epoch: u64,
}

impl Default for SchedulePlayer {
    fn default() -> Self {
        SchedulePlayer::new()
    }
}

impl SchedulePlayer {
    pub fn new() -> Self {
        SchedulePlayer {
            schedule: Vec::new(),
            clock: 0.0,
            volume: 1.0,
            epoch: 0,
        }
    }

    /// Move the clock to `seconds` since the melody started.
    pub fn advance_to(&mut self, seconds: f64) {
        self.clock = seconds;
    }

    /// Seconds from the start of the melody to the end of its last note.
    pub fn total_duration(&self) -> f64 {
        self.schedule
            .last()
            .map_or(0.0, |note| note.start + note.event.duration)
    }

    /// Number of notes in the scheduled melody.
    pub fn note_count(&self) -> usize {
        self.schedule.len()
    }

    /// Which melody generation is scheduled. Bumps on `play` and `stop`.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

impl ToneSink for SchedulePlayer {
    fn play(&mut self, events: Vec<NoteEvent>) {
        self.epoch += 1;
        self.clock = 0.0;
        self.schedule.clear();
        self.schedule.reserve(events.len());
        // Notes play back to back: each starts where the previous ended.
        let mut start = 0.0;
        for event in events {
            self.schedule.push(ScheduledNote { start, event });
            start += event.duration;
        }
    }

    fn stop(&mut self) {
        self.epoch += 1;
        self.clock = 0.0;
        self.schedule.clear();
    }

    fn set_volume(&mut self, level: f64) {
        self.volume = level.clamp(0.0, 1.0);
    }

    fn currently_playing_span(&self) -> Option<SourceSpan> {
        // Starts are sorted, so the candidate is the last note that has
        // started; it counts only while the clock is inside [start, end).
        let started = self
            .schedule
            .partition_point(|note| note.start <= self.clock);
        let note = self.schedule[..started].last()?;
        if self.clock < note.start + note.event.duration {
            Some(note.event.source_span)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tone_walk::{ToneParams, interpret_for_tone};

    fn two_note_melody() -> Vec<NoteEvent> {
        // 0.4 s at [0,2), then 0.4 s at [3,5).
        interpret_for_tone("FF+FF", &ToneParams::default())
    }

    #[test]
    fn test_span_follows_the_clock() {
        let mut player = SchedulePlayer::new();
        player.play(two_note_melody());

        player.advance_to(0.0);
        assert_eq!(player.currently_playing_span(), Some(SourceSpan::new(0, 2)));
        player.advance_to(0.39);
        assert_eq!(player.currently_playing_span(), Some(SourceSpan::new(0, 2)));
        // Boundaries are half-open: the instant one note ends, the next owns it.
        player.advance_to(0.4);
        assert_eq!(player.currently_playing_span(), Some(SourceSpan::new(3, 5)));
        player.advance_to(0.8);
        assert_eq!(player.currently_playing_span(), None);
    }

    #[test]
    fn test_total_duration_sums_the_notes() {
        let mut player = SchedulePlayer::new();
        assert_eq!(player.total_duration(), 0.0);
        player.play(two_note_melody());
        assert!((player.total_duration() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_play_cancels_the_previous_melody() {
        let mut player = SchedulePlayer::new();
        player.play(two_note_melody());
        player.advance_to(0.5);
        let first_epoch = player.epoch();

        // Restart with a different melody: clock resets, epoch moves on.
        player.play(interpret_for_tone("F", &ToneParams::default()));
        assert!(player.epoch() > first_epoch);
        assert_eq!(player.currently_playing_span(), Some(SourceSpan::new(0, 1)));
    }

    #[test]
    fn test_stop_is_quiet_not_an_error() {
        let mut player = SchedulePlayer::new();
        player.play(two_note_melody());
        player.advance_to(0.1);
        assert!(player.currently_playing_span().is_some());

        player.stop();
        assert_eq!(player.currently_playing_span(), None);
        player.stop(); // stopping again is fine
        assert_eq!(player.currently_playing_span(), None);
    }

    #[test]
    fn test_empty_melody_never_plays() {
        let mut player = SchedulePlayer::new();
        player.play(Vec::new());
        player.advance_to(0.0);
        assert_eq!(player.currently_playing_span(), None);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut player = SchedulePlayer::new();
        player.set_volume(1.5);
        assert_eq!(player.volume(), 1.0);
        player.set_volume(-0.2);
        assert_eq!(player.volume(), 0.0);
        player.set_volume(0.3);
        assert_eq!(player.volume(), 0.3);
    }
}
