// Turtle interpretation of expanded grammar strings.
//
// Module overview:
// - draw: the draw walk. Scans a path string with a pen (segment length,
//   step depth) and a bracket stack, and emits a flat list of `DrawOp`s
//   for one frame of the growth animation.
// - sink: the `RenderSink` trait that replays `DrawOp`s onto an actual
//   surface, plus `apply_draw_ops`.
//
// The walk is pure: no clocks, no I/O, no randomness. Animation comes from
// the caller passing a different `elapsed_ms` per frame and re-running the
// walk over the same path string.
//
// **Critical constraint: determinism.** The same (path, params, elapsed_ms,
// active span) must produce the same ops on every platform and every run.
// Everything here is sequential f64 arithmetic in path order; there is no
// iteration over unordered containers and no internal parallelism.
//
// See also: seedsong_grammar for how path strings are produced, and
// seedsong_scene::svg for the canvas-side `RenderSink` implementations.

pub mod draw;
pub mod sink;

pub use draw::{DrawOp, DrawParams, interpret_for_drawing};
pub use sink::{RenderSink, apply_draw_ops};
