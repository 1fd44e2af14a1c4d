// The draw walk: one pass over an expanded path, producing drawing ops.
//
// The walk is a stack machine. It carries a pen state (the current segment
// length and the number of forward steps taken so far) and a stack of saved
// pen states for the bracket symbols. Heading and position are not tracked
// here: they live in the op stream itself (`Rotate`, `Segment`, `PushState`,
// `PopState`), which the render sink replays against its own transform
// stack. Keeping a single stack on this side and emitting push/pop ops only
// when they actually happen is what keeps the two sides synchronized.
//
// Time scaling: every segment "grows in" from zero over elapsed animation
// time, deeper segments later, saturating at its true length. Passing
// `f64::INFINITY` for the elapsed time therefore renders the finished
// picture: the saturation point is reached by construction, not by a
// special case.
//
// See also: `sink.rs` for the capability interface the ops feed,
// `seedsong_grammar::symbol` for the shared step-symbol classification.

use seedsong_grammar::symbol::{SourceSpan, is_step};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Growth rate of the time-scaling cap, per millisecond of elapsed time.
/// A step at depth `d` reaches its full length at `(d + 1) / GROWTH_RATE`
/// milliseconds: 200 ms for the first segment, 400 ms at depth 1, and so on.
const GROWTH_RATE: f64 = 0.005;

/// Tunable drawing parameters, read (never written) by the draw walk.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawParams {
    /// Base segment length in canvas units, before falloff.
    pub segment_length: f64,
    /// Turn angle in radians applied by `+` / `-` (and the ornament fan).
    pub turn_angle: f64,
    /// Per-step multiplicative length decay, in (0, 1]. 1.0 keeps every
    /// segment the same length (self-similar); smaller values make the
    /// figure visually converge.
    pub falloff: f64,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            segment_length: 50.0,
            turn_angle: std::f64::consts::FRAC_PI_6,
            falloff: 0.9,
        }
    }
}

impl DrawParams {
    /// Check the ranges the walk relies on. Called by the configuration
    /// surface before a config replaces the previous one.
    pub fn validate(&self) -> Result<(), String> {
        if !self.segment_length.is_finite() || self.segment_length <= 0.0 {
            return Err(format!(
                "segment_length must be finite and positive, got {}",
                self.segment_length
            ));
        }
        if !self.turn_angle.is_finite() {
            return Err(format!("turn_angle must be finite, got {}", self.turn_angle));
        }
        if !(self.falloff > 0.0 && self.falloff <= 1.0) {
            return Err(format!("falloff must be in (0, 1], got {}", self.falloff));
        }
        Ok(())
    }
}

/// One drawing command emitted by the draw walk, in pen-relative terms.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    /// Draw a line of `length` along the heading and advance the pen to its
    /// end. `highlighted` is advisory styling: the segment belongs to the
    /// currently-sounding note.
    Segment { length: f64, highlighted: bool },
    /// Fill a wedge fanning `half_angle` either side of the heading from
    /// the pen, reaching `radius` out. The pen does not move.
    Ornament { radius: f64, half_angle: f64 },
    /// Turn the heading by `angle` radians (canvas clockwise-positive).
    Rotate { angle: f64 },
    /// Save the transform. Pairs with a later `PopState`.
    PushState,
    /// Restore the most recently saved transform. Never emitted unmatched.
    PopState,
}

/// Pen state saved and restored by the bracket symbols.
#[derive(Clone, Copy, Debug)]
struct PenState {
    segment_length: f64,
    steps_taken: u32,
}

/// Effective length of a feature that is still growing in: the full length
/// capped by a factor that rises with elapsed time and falls with depth.
/// Monotonically non-decreasing in `elapsed_ms`, never above `full_length`.
/// Negative elapsed time is treated as zero.
fn grown_length(full_length: f64, steps_taken: u32, elapsed_ms: f64) -> f64 {
    let t = elapsed_ms.max(0.0);
    let scale = (GROWTH_RATE * t / (f64::from(steps_taken) + 1.0)).sqrt();
    full_length.min(scale * full_length)
}

/// Walk `path` once and emit the drawing ops for one frame.
///
/// `active` is the source span of the currently-sounding note, if any; step
/// symbols inside it get `highlighted` segments. The walk is deterministic
/// for fixed inputs and never mutates `params`.
pub fn interpret_for_drawing(
    path: &str,
    params: &DrawParams,
    elapsed_ms: f64,
    active: Option<SourceSpan>,
) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    let mut pen = PenState {
        segment_length: params.segment_length,
        steps_taken: 0,
    };
    let mut saved: SmallVec<[PenState; 8]> = SmallVec::new();

    for (index, symbol) in path.chars().enumerate() {
        match symbol {
            s if is_step(s) => {
                let length = grown_length(pen.segment_length, pen.steps_taken, elapsed_ms);
                let highlighted = active.is_some_and(|span| span.contains(index));
                ops.push(DrawOp::Segment { length, highlighted });
                pen.segment_length *= params.falloff;
                pen.steps_taken += 1;
            }
            '$' => {
                let radius = grown_length(pen.segment_length * 0.5, pen.steps_taken, elapsed_ms);
                ops.push(DrawOp::Ornament {
                    radius,
                    half_angle: params.turn_angle,
                });
            }
            // The two walks keep mirrored signs: `+` turns against the
            // angle here while raising the tone index in the tone walk.
            '+' => ops.push(DrawOp::Rotate {
                angle: -params.turn_angle,
            }),
            '-' => ops.push(DrawOp::Rotate {
                angle: params.turn_angle,
            }),
            '[' => {
                saved.push(pen);
                ops.push(DrawOp::PushState);
            }
            ']' => {
                // Pop of an empty stack is a silent no-op. No op is emitted,
                // so the sink's transform stack stays balanced.
                if let Some(restored) = saved.pop() {
                    pen = restored;
                    ops.push(DrawOp::PopState);
                }
            }
            _ => {}
        }
    }
    ops
}
