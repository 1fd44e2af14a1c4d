// The growth animation driver.
//
// `AnimationDriver` owns everything a running scene needs: the expanded
// path, the draw parameters, and the playback schedule. `restart` swaps in
// a new scene by bumping a generation counter, re-expanding the grammar,
// and restarting playback from zero; the `Timeline` it hands back is only
// honored while its generation matches the driver's. A timeline from
// before a restart renders nothing and the frame loop exits quietly.
// Cancel then restart, never queue.
//
// Per frame the driver advances the playback clock, asks which note is
// sounding, runs the draw walk with that note's span as the highlight, and
// renders the ops to SVG. There is one frame where everything meets; this
// module is that frame.
//
// See also: playback in seedsong_music for the clock the driver advances,
// svg.rs for the rendering passes.

use std::path::{Path, PathBuf};

use seedsong_music::{SchedulePlayer, ToneSink, interpret_for_tone};
use seedsong_turtle::interpret_for_drawing;

use crate::config::SceneConfig;
use crate::svg::render_svg;

/// A handle to one run of the animation: how many frames, how fast, and
/// which driver generation it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    generation: u64,
    frame_count: u32,
    fps: f64,
}

impl Timeline {
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Milliseconds of growth time at `frame`. Frame 0 is time zero.
    pub fn elapsed_ms(&self, frame: u32) -> f64 {
        f64::from(frame) / self.fps * 1000.0
    }

    /// Seconds of playback time at `frame`.
    pub fn elapsed_seconds(&self, frame: u32) -> f64 {
        f64::from(frame) / self.fps
    }

    /// The elapsed time that renders the fully grown figure.
    pub fn final_frame_ms() -> f64 {
        f64::INFINITY
    }
}

/// Owns the scene state shared by the draw and tone sides of a frame.
pub struct AnimationDriver {
    generation: u64,
    path: String,
    config: SceneConfig,
    player: SchedulePlayer,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        AnimationDriver::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        AnimationDriver {
            generation: 0,
            path: String::new(),
            config: SceneConfig::default(),
            player: SchedulePlayer::new(),
        }
    }

    /// Replace the current scene. The old timeline (if any) is superseded
    /// immediately: playback restarts from zero and the grammar is
    /// re-expanded. Returns the timeline for the new run.
    pub fn restart(&mut self, config: &SceneConfig, frame_count: u32, fps: f64) -> Timeline {
        self.generation += 1;
        self.config = config.clone();
        self.path = config.grammar.expand();
        self.player.set_volume(config.tone.volume);
        self.player.play(interpret_for_tone(&self.path, &config.tone));
        Timeline {
            generation: self.generation,
            frame_count,
            fps,
        }
    }

    /// Cancel the current run without starting another.
    pub fn stop(&mut self) {
        self.generation += 1;
        self.player.stop();
    }

    /// Whether `timeline` still belongs to the current run.
    pub fn is_live(&self, timeline: &Timeline) -> bool {
        timeline.generation == self.generation
    }

    /// The expanded path the current scene draws and plays.
    pub fn expanded_path(&self) -> &str {
        &self.path
    }

    /// Seconds until the melody finishes.
    pub fn melody_seconds(&self) -> f64 {
        self.player.total_duration()
    }

    /// Notes in the current melody.
    pub fn note_count(&self) -> usize {
        self.player.note_count()
    }

    /// Render one frame of a run as an SVG document, or `None` if the
    /// timeline has been superseded.
    pub fn render_frame(&mut self, timeline: &Timeline, frame: u32) -> Option<String> {
        if !self.is_live(timeline) {
            return None;
        }
        self.player.advance_to(timeline.elapsed_seconds(frame));
        let playing = self.player.currently_playing_span();
        let ops = interpret_for_drawing(
            &self.path,
            &self.config.draw,
            timeline.elapsed_ms(frame),
            playing,
        );
        Some(render_svg(&ops))
    }

    /// Render the fully grown, silent figure. Used for still output.
    pub fn render_final(&mut self) -> String {
        self.player.advance_to(f64::INFINITY);
        let ops = interpret_for_drawing(
            &self.path,
            &self.config.draw,
            Timeline::final_frame_ms(),
            None,
        );
        render_svg(&ops)
    }
}

/// Drive a whole run to disk as `frame_NNNN.svg` files. Returns the paths
/// written. Stops early (without error) if the timeline goes stale.
pub fn write_frames(
    driver: &mut AnimationDriver,
    timeline: &Timeline,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(timeline.frame_count() as usize);
    for frame in 0..timeline.frame_count() {
        let Some(svg) = driver.render_frame(timeline, frame) else {
            break;
        };
        let file = out_dir.join(format!("frame_{frame:04}.svg"));
        std::fs::write(&file, svg)?;
        written.push(file);
    }
    Ok(written)
}
