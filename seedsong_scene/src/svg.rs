// SVG rendering of draw-op streams.
//
// Two `RenderSink` implementations share one turtle convention: the pen
// starts at the origin pointing up, `rotate` turns clockwise for positive
// angles (SVG y grows downward), and push/pop save whole pen frames.
// `MeasureSink` replays the ops once to find the bounding box, then
// `SvgCanvas` replays them again into document text fitted to that box.
// Two passes keep the canvas ignorant of layout, the same way the figure
// stays ignorant of the canvas.
//
// Output is hand-written SVG text, not a scene graph. Coordinates are
// fixed to two decimals so the same ops always produce byte-identical
// documents.
//
// See also: seedsong_turtle::sink for the `RenderSink` contract.

use std::fmt::Write;

use seedsong_turtle::{DrawOp, RenderSink, apply_draw_ops};

/// Branch stroke width, matching the source canvas look.
const STROKE_WIDTH: f64 = 3.0;
/// Stroke width for the segments being played right now.
const HIGHLIGHT_WIDTH: f64 = 4.5;
/// Branch stroke color.
const BRANCH_COLOR: &str = "black";
/// Stroke color for the segments being played right now.
const HIGHLIGHT_COLOR: &str = "#d62828";
/// Fill for ornament wedges.
const WEDGE_COLOR: &str = "#d98bb6";
/// Padding around the figure in the viewBox.
const MARGIN: f64 = 10.0;

/// Pen frame: position plus heading in radians, 0 = up.
#[derive(Debug, Clone, Copy)]
struct Pen {
    x: f64,
    y: f64,
    heading: f64,
}

impl Pen {
    fn origin() -> Self {
        Pen {
            x: 0.0,
            y: 0.0,
            heading: 0.0,
        }
    }

    /// Unit vector for the heading. Heading 0 points up, which is -y on
    /// an SVG canvas, and positive headings lean clockwise.
    fn direction(&self) -> (f64, f64) {
        (self.heading.sin(), -self.heading.cos())
    }

    /// The point `distance` ahead at `heading`, ignoring the pen's own
    /// heading. Used for wedge rims.
    fn ahead_at(&self, heading: f64, distance: f64) -> (f64, f64) {
        (
            self.x + heading.sin() * distance,
            self.y - heading.cos() * distance,
        )
    }
}

// ---------------------------------------------------------------------------
// Bounding box
// ---------------------------------------------------------------------------

/// Axis-aligned bounds of everything the pen touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// A box containing only the origin, where every walk starts.
    fn at_origin() -> Self {
        BoundingBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn with_margin(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

// ---------------------------------------------------------------------------
// Measuring pass
// ---------------------------------------------------------------------------

/// Replays ops to find how much room the figure needs.
pub struct MeasureSink {
    pen: Pen,
    stack: Vec<Pen>,
    bounds: BoundingBox,
}

impl MeasureSink {
    pub fn new() -> Self {
        MeasureSink {
            pen: Pen::origin(),
            stack: Vec::new(),
            bounds: BoundingBox::at_origin(),
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

impl Default for MeasureSink {
    fn default() -> Self {
        MeasureSink::new()
    }
}

impl RenderSink for MeasureSink {
    fn move_and_draw_line(&mut self, length: f64, _highlighted: bool) {
        let (dx, dy) = self.pen.direction();
        self.pen.x += dx * length;
        self.pen.y += dy * length;
        self.bounds.include(self.pen.x, self.pen.y);
    }

    fn draw_wedge(&mut self, radius: f64, half_angle: f64) {
        // The rim endpoints plus the tip of the arc are enough of an
        // estimate; the margin absorbs the rest.
        for heading in [
            self.pen.heading - half_angle,
            self.pen.heading,
            self.pen.heading + half_angle,
        ] {
            let (x, y) = self.pen.ahead_at(heading, radius);
            self.bounds.include(x, y);
        }
    }

    fn rotate(&mut self, angle: f64) {
        self.pen.heading += angle;
    }

    fn push_transform(&mut self) {
        self.stack.push(self.pen);
    }

    fn pop_transform(&mut self) {
        if let Some(pen) = self.stack.pop() {
            self.pen = pen;
        }
    }
}

// ---------------------------------------------------------------------------
// Drawing pass
// ---------------------------------------------------------------------------

/// Accumulates SVG elements as the ops replay.
pub struct SvgCanvas {
    pen: Pen,
    stack: Vec<Pen>,
    body: String,
}

impl SvgCanvas {
    pub fn new() -> Self {
        SvgCanvas {
            pen: Pen::origin(),
            stack: Vec::new(),
            body: String::new(),
        }
    }

    /// Wrap the accumulated elements in an `<svg>` document whose viewBox
    /// fits `view`.
    pub fn into_document(self, view: &BoundingBox) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\">",
            view.min_x,
            view.min_y,
            view.width(),
            view.height()
        );
        svg.push_str("  <g stroke-linecap=\"round\">\n");
        svg.push_str(&self.body);
        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}

impl Default for SvgCanvas {
    fn default() -> Self {
        SvgCanvas::new()
    }
}

impl RenderSink for SvgCanvas {
    fn move_and_draw_line(&mut self, length: f64, highlighted: bool) {
        let (dx, dy) = self.pen.direction();
        let x2 = self.pen.x + dx * length;
        let y2 = self.pen.y + dy * length;
        // Zero-length segments happen on every frame before a branch has
        // started growing; skip the stroke but still move the pen.
        if length > 0.0 {
            let (color, width) = if highlighted {
                (HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH)
            } else {
                (BRANCH_COLOR, STROKE_WIDTH)
            };
            let _ = writeln!(
                self.body,
                "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{color}\" stroke-width=\"{width:.1}\"/>",
                self.pen.x, self.pen.y
            );
        }
        self.pen.x = x2;
        self.pen.y = y2;
    }

    fn draw_wedge(&mut self, radius: f64, half_angle: f64) {
        if radius <= 0.0 || half_angle <= 0.0 {
            return;
        }
        let (x1, y1) = self.pen.ahead_at(self.pen.heading - half_angle, radius);
        let (x2, y2) = self.pen.ahead_at(self.pen.heading + half_angle, radius);
        let large_arc = if half_angle * 2.0 > std::f64::consts::PI {
            1
        } else {
            0
        };
        // Pie slice from the pen: out along one rim, arc across, close.
        let _ = writeln!(
            self.body,
            "    <path d=\"M {:.2} {:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z\" fill=\"{WEDGE_COLOR}\" stroke=\"none\"/>",
            self.pen.x, self.pen.y
        );
    }

    fn rotate(&mut self, angle: f64) {
        self.pen.heading += angle;
    }

    fn push_transform(&mut self) {
        self.stack.push(self.pen);
    }

    fn pop_transform(&mut self) {
        if let Some(pen) = self.stack.pop() {
            self.pen = pen;
        }
    }
}

/// Render one frame's ops as a complete SVG document: measure, then draw
/// into a viewBox fitted around the figure.
pub fn render_svg(ops: &[DrawOp]) -> String {
    let mut measure = MeasureSink::new();
    apply_draw_ops(ops, &mut measure);
    let view = measure.bounds().with_margin(MARGIN);

    let mut canvas = SvgCanvas::new();
    apply_draw_ops(ops, &mut canvas);
    canvas.into_document(&view)
}
