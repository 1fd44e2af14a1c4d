// The render-sink capability boundary.
//
// The draw walk produces `DrawOp`s without knowing anything about canvases;
// a `RenderSink` turns them into real output (the SVG canvas in
// `seedsong_scene`, a measuring pass, a test recorder). The sink owns its
// own transform state and saves/restores it strictly on `PushState` /
// `PopState`. The walk guarantees every emitted `PopState` matches an
// earlier `PushState`, so a sink never needs its own underflow handling.
//
// This is the same boundary discipline as between the sim and its host
// adapter: the walk cannot depend on rendering, and the sink cannot second-
// guess the walk's stack.

use crate::draw::DrawOp;

/// Capability interface for drawing surfaces.
///
/// All lengths are in canvas units, all angles in radians with the canvas
/// convention (positive turns clockwise when y points down).
pub trait RenderSink {
    /// Draw a line of `length` from the pen along the heading, then move
    /// the pen to its end. `highlighted` is advisory: the sink chooses how
    /// (or whether) highlighted segments look different.
    fn move_and_draw_line(&mut self, length: f64, highlighted: bool);

    /// Fill a wedge fanning `half_angle` either side of the heading from
    /// the pen, reaching `radius` out. The pen does not move.
    fn draw_wedge(&mut self, radius: f64, half_angle: f64);

    /// Turn the heading by `angle` radians.
    fn rotate(&mut self, angle: f64);

    /// Save the current transform.
    fn push_transform(&mut self);

    /// Restore the most recently saved transform.
    fn pop_transform(&mut self);
}

/// Replay one frame's ops into a sink, in order.
pub fn apply_draw_ops<S: RenderSink + ?Sized>(ops: &[DrawOp], sink: &mut S) {
    for op in ops {
        match *op {
            DrawOp::Segment {
                length,
                highlighted,
            } => sink.move_and_draw_line(length, highlighted),
            DrawOp::Ornament { radius, half_angle } => sink.draw_wedge(radius, half_angle),
            DrawOp::Rotate { angle } => sink.rotate(angle),
            DrawOp::PushState => sink.push_transform(),
            DrawOp::PopState => sink.pop_transform(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawParams, interpret_for_drawing};

    /// Records every sink call for assertions.
    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
        depth: usize,
        max_depth: usize,
    }

    impl RenderSink for RecordingSink {
        fn move_and_draw_line(&mut self, length: f64, highlighted: bool) {
            self.calls.push(format!("line {length:.1} {highlighted}"));
        }
        fn draw_wedge(&mut self, radius: f64, half_angle: f64) {
            self.calls.push(format!("wedge {radius:.1} {half_angle:.2}"));
        }
        fn rotate(&mut self, angle: f64) {
            self.calls.push(format!("rotate {angle:.2}"));
        }
        fn push_transform(&mut self) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
            self.calls.push("push".to_string());
        }
        fn pop_transform(&mut self) {
            assert!(self.depth > 0, "unbalanced pop reached the sink");
            self.depth -= 1;
            self.calls.push("pop".to_string());
        }
    }

    #[test]
    fn replay_preserves_op_order() {
        let ops = vec![
            DrawOp::Segment {
                length: 10.0,
                highlighted: false,
            },
            DrawOp::Rotate { angle: 0.5 },
            DrawOp::PushState,
            DrawOp::Ornament {
                radius: 5.0,
                half_angle: 0.52,
            },
            DrawOp::PopState,
        ];
        let mut sink = RecordingSink::default();
        apply_draw_ops(&ops, &mut sink);
        assert_eq!(
            sink.calls,
            vec!["line 10.0 false", "rotate 0.50", "push", "wedge 5.0 0.52", "pop"]
        );
    }

    #[test]
    fn walk_output_never_underflows_a_sink_stack() {
        // Stray `]` symbols must not reach the sink as pops.
        let ops = interpret_for_drawing(
            "]F]]+[F]]]",
            &DrawParams::default(),
            f64::INFINITY,
            None,
        );
        let mut sink = RecordingSink::default();
        apply_draw_ops(&ops, &mut sink);
        assert_eq!(sink.depth, 0);
        assert_eq!(sink.max_depth, 1);
    }

    #[test]
    fn empty_ops_touch_nothing() {
        let mut sink = RecordingSink::default();
        apply_draw_ops(&[], &mut sink);
        assert!(sink.calls.is_empty());
    }
}
