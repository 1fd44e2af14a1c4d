// Scene assembly: configuration, rendering, and the animation loop.
//
// Module overview:
// - config: `SceneConfig` (grammar + draw + tone), named presets, JSON
//   loading, whole-config validation.
// - svg: the `RenderSink` implementations. A measuring pass sizes the
//   viewBox, a drawing pass writes the SVG text.
// - animation: `AnimationDriver` and `Timeline`, the per-frame glue that
//   keeps the picture and the melody pointing at the same symbols.
//
// The `seedsong` binary (main.rs) is the host: it parses arguments, loads
// or picks a config, and drives this library to SVG frames and a MIDI
// file. The library itself never prints and never reads the real clock.
//
// See also: seedsong_grammar, seedsong_turtle, and seedsong_music for the
// pure cores this crate puts on screen.

pub mod animation;
pub mod config;
pub mod svg;

pub use animation::{AnimationDriver, Timeline, write_frames};
pub use config::SceneConfig;
pub use svg::{MeasureSink, SvgCanvas, render_svg};
