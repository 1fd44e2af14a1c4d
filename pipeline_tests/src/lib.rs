// Test-only pipeline harness for the end-to-end tests.
//
// `PipelineRun` wires one full pass of the seedsong pipeline the same way
// `AnimationDriver::restart` does: expand the grammar, walk the path into
// note events, hand the melody to a scheduled player. Unlike the driver it
// keeps every intermediate stage (expanded path, note events, player) open
// for inspection, so tests can check each hand-off between the crates.
//
// All expansion, walking, and scheduling goes through the same code paths
// as the real CLI. The only test-specific code is this bundling.
//
// See also: `tests/end_to_end.rs` for the integration test scenarios.

use seedsong_music::{NoteEvent, SchedulePlayer, ToneSink, interpret_for_tone};
use seedsong_scene::SceneConfig;
use seedsong_turtle::{DrawOp, interpret_for_drawing};

/// One full run of the pipeline with every stage exposed.
pub struct PipelineRun {
    pub config: SceneConfig,
    /// The expanded path both walks consume.
    pub path: String,
    /// The melody the tone walk produced, in path order.
    pub notes: Vec<NoteEvent>,
    /// Player holding the scheduled melody, clock at zero.
    pub player: SchedulePlayer,
}

impl PipelineRun {
    /// Expand `config` and schedule its melody.
    pub fn start(config: SceneConfig) -> Self {
        let path = config.grammar.expand();
        let notes = interpret_for_tone(&path, &config.tone);
        let mut player = SchedulePlayer::new();
        player.set_volume(config.tone.volume);
        player.play(notes.clone());
        Self {
            config,
            path,
            notes,
            player,
        }
    }

    /// Drawing ops for one instant: growth at `elapsed_ms`, highlighting
    /// whatever note is sounding at `clock_seconds` on the playback clock.
    pub fn frame_at(&mut self, elapsed_ms: f64, clock_seconds: f64) -> Vec<DrawOp> {
        self.player.advance_to(clock_seconds);
        let active = self.player.currently_playing_span();
        interpret_for_drawing(&self.path, &self.config.draw, elapsed_ms, active)
    }

    /// Highlight flags of the segment ops at one playback instant, in path
    /// order. The walk is run fully grown so every step yields a segment.
    pub fn segment_highlights_at(&mut self, clock_seconds: f64) -> Vec<bool> {
        self.frame_at(f64::INFINITY, clock_seconds)
            .iter()
            .filter_map(|op| match op {
                DrawOp::Segment { highlighted, .. } => Some(*highlighted),
                _ => None,
            })
            .collect()
    }
}
