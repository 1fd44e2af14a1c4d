// MIDI output from tone-walk melodies.
//
// Converts a list of `NoteEvent`s into a Standard MIDI File (SMF): a tempo
// track pinned at 60 BPM (so one quarter note of ticks is exactly one
// second) and one melody track with the notes laid back to back, the same
// schedule `SchedulePlayer` plays. Frequencies snap to the nearest
// equal-tempered key.
//
// Uses the `midly` crate for MIDI writing. Output is SMF Format 1
// (multi-track).

use midly::{
    Format, Header, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

use crate::tone_walk::NoteEvent;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Fixed tempo. At 60 BPM a quarter note lasts one second, so event
/// seconds convert to ticks with a single multiply.
const TEMPO_BPM: u32 = 60;

/// Convert a melody to MIDI and write to a file.
pub fn write_midi(
    events: &[NoteEvent],
    volume: f64,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let smf = events_to_smf(events, volume);
    let mut buf = Vec::new();
    smf.write(&mut buf)?;
    std::fs::write(path, &buf)?;
    Ok(())
}

/// Convert a melody to an in-memory SMF.
pub fn events_to_smf(events: &[NoteEvent], volume: f64) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track
    let mut tempo_track: Track<'static> = Vec::new();
    let tempo_microseconds = 60_000_000 / TEMPO_BPM;
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });
    tempo_track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(tempo_track);

    // Track 1: the melody
    let channel = u4::new(0);
    let velocity = u7::new((volume.clamp(0.0, 1.0) * 127.0).round() as u8);
    let mut track: Track<'static> = Vec::new();

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::TrackName(b"Melody")),
    });

    // Music box (program 10) suits the chime-like melodies
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(10),
            },
        },
    });

    // Notes are back to back, so each on-event lands exactly where the
    // previous off-event did. Ticks are rounded from the cumulative clock
    // rather than per-duration so rounding never drifts.
    let mut clock_seconds = 0.0;
    let mut last_event_tick: u32 = 0;
    for event in events {
        let key = u7::new(frequency_to_key(event.frequency));
        let on_tick = seconds_to_ticks(clock_seconds);
        track.push(TrackEvent {
            delta: u28::new(on_tick - last_event_tick),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn { key, vel: velocity },
            },
        });
        clock_seconds += event.duration;
        let off_tick = seconds_to_ticks(clock_seconds);
        track.push(TrackEvent {
            delta: u28::new(off_tick - on_tick),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key,
                    vel: u7::new(0),
                },
            },
        });
        last_event_tick = off_tick;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}

fn seconds_to_ticks(seconds: f64) -> u32 {
    (seconds * f64::from(TICKS_PER_QUARTER)).round() as u32
}

/// Nearest equal-tempered MIDI key for a frequency, clamped to the key
/// range. A440 is key 69.
fn frequency_to_key(frequency: f64) -> u8 {
    (69.0 + 12.0 * (frequency / 440.0).log2())
        .round()
        .clamp(0.0, 127.0) as u8
}
