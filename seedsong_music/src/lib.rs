// Musical interpretation of expanded path strings.
//
// Module overview:
// - scale: named scales and degree-to-frequency mapping in equal
//   temperament.
// - tone_walk: the tone walk, scanning a path string into `NoteEvent`s.
// - playback: the `ToneSink` capability trait and `SchedulePlayer`, a
//   pure schedule with a caller-driven clock.
// - midi: Standard MIDI File export of a melody.
//
// The tone walk is the audible twin of the draw walk in seedsong_turtle:
// both scan the same expanded path, and `NoteEvent::source_span` is what
// ties a sounding note back to the symbols being drawn.
//
// **Critical constraint: determinism.** Walks and schedules are pure
// functions of their inputs. Nothing here touches a real clock or an
// audio device; time only moves when the caller advances it.

pub mod midi;
pub mod playback;
pub mod scale;
pub mod tone_walk;

pub use playback::{SchedulePlayer, ToneSink};
pub use scale::Scale;
pub use tone_walk::{NoteEvent, ToneParams, interpret_for_tone};
