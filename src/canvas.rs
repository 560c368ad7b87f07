//! Vector path context bound to an RGBA pixel buffer.
//!
//! The renderer only needs four primitives from it: begin a path, move the
//! cursor, append a line, and commit the whole path with a combined fill and
//! stroke. Nothing touches the pixels until [`Canvas::fill_stroke`].

use glam::DVec2;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// One recorded path instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath at the point without drawing.
    MoveTo(DVec2),
    /// Extend the current subpath with a straight segment to the point.
    LineTo(DVec2),
}

/// How overlapping subpaths decide what is inside when filling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
}

/// Colours and stroke settings used when committing a path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    /// RGBA fill colour for the interior of closed subpaths.
    pub fill: [u8; 4],
    /// RGBA colour of the stroked segments.
    pub stroke: [u8; 4],
    /// Stroke width in pixels. Segment ends are round, so a zero-length
    /// segment paints a dot of this diameter.
    pub line_width: f64,
    pub fill_rule: FillRule,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: [255, 255, 255, 255],
            stroke: [0, 0, 0, 255],
            line_width: 1.0,
            fill_rule: FillRule::EvenOdd,
        }
    }
}

/// A pixel buffer together with the path being built on it.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
    path: Vec<PathCommand>,
}

impl Canvas {
    /// Allocates a `width` x `height` buffer. Without a background the buffer
    /// starts fully transparent.
    pub fn new(width: u32, height: u32, background: Option<[u8; 4]>) -> Self {
        let image = match background {
            Some(color) => RgbaImage::from_pixel(width, height, Rgba(color)),
            None => RgbaImage::new(width, height),
        };
        Self {
            image,
            path: Vec::new(),
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Discards the current path.
    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    /// Starts a new subpath at `point`.
    pub fn move_to(&mut self, point: DVec2) {
        self.path.push(PathCommand::MoveTo(point));
    }

    /// Adds a segment from the current point to `point`.
    pub fn line_to(&mut self, point: DVec2) {
        self.path.push(PathCommand::LineTo(point));
    }

    /// Commands recorded since the last [`begin_path`](Self::begin_path).
    pub fn path(&self) -> &[PathCommand] {
        &self.path
    }

    /// Number of drawn segments in the current path.
    pub fn segment_count(&self) -> usize {
        self.path
            .iter()
            .filter(|c| matches!(c, PathCommand::LineTo(_)))
            .count()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fills every subpath as an implicitly closed polygon, then strokes every
    /// segment on top with round caps. Subpaths without segments contribute
    /// nothing; a zero-length segment still strokes a dot.
    pub fn fill_stroke(&mut self, paint: &Paint) {
        let subpaths = self.subpaths();
        if subpaths.is_empty() {
            return;
        }

        let fill = self.fill_mask(&subpaths, paint.fill_rule);
        self.composite(&fill, paint.fill);

        let stroke = self.stroke_mask(&subpaths, paint.line_width);
        self.composite(&stroke, paint.stroke);
    }

    /// Splits the path into point lists, keeping only those with a segment.
    fn subpaths(&self) -> Vec<Vec<DVec2>> {
        let mut out: Vec<Vec<DVec2>> = Vec::new();
        let mut current: Vec<DVec2> = Vec::new();

        for cmd in &self.path {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if current.len() > 1 {
                        out.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                // A line with no open subpath starts one at its end point.
                PathCommand::LineTo(p) => current.push(p),
            }
        }
        if current.len() > 1 {
            out.push(current);
        }
        out
    }

    /// Scanline coverage of the closed subpaths, sampled at pixel centres.
    fn fill_mask(&self, subpaths: &[Vec<DVec2>], rule: FillRule) -> Vec<f32> {
        let (w, h) = (self.width() as usize, self.height() as usize);
        let mut mask = vec![0.0f32; w * h];
        let mut crossings: Vec<(f64, i32)> = Vec::new();

        for y in 0..h {
            let yc = y as f64 + 0.5;
            crossings.clear();

            for poly in subpaths {
                for (i, &a) in poly.iter().enumerate() {
                    let b = poly[(i + 1) % poly.len()];
                    let (upward, downward) = (a.y <= yc && yc < b.y, b.y <= yc && yc < a.y);
                    if upward || downward {
                        let t = (yc - a.y) / (b.y - a.y);
                        let x = a.x + t * (b.x - a.x);
                        crossings.push((x, if upward { 1 } else { -1 }));
                    }
                }
            }
            if crossings.is_empty() {
                continue;
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                let inside = match rule {
                    FillRule::NonZero => winding != 0,
                    FillRule::EvenOdd => winding % 2 != 0,
                };
                if !inside {
                    continue;
                }
                let start = (pair[0].0 - 0.5).ceil().max(0.0) as usize;
                let end = ((pair[1].0 - 0.5).ceil().max(0.0) as usize).min(w);
                for x in start..end {
                    mask[y * w + x] = 1.0;
                }
            }
        }
        mask
    }

    /// Anti-aliased coverage of every segment at `line_width`.
    fn stroke_mask(&self, subpaths: &[Vec<DVec2>], line_width: f64) -> Vec<f32> {
        let (w, h) = (self.width() as usize, self.height() as usize);
        let mut mask = vec![0.0f32; w * h];
        if w == 0 || h == 0 {
            return mask;
        }
        let half = (line_width / 2.0).max(0.0);
        let reach = half + 1.0;

        for poly in subpaths {
            for seg in poly.windows(2) {
                let (a, b) = (seg[0], seg[1]);
                let lo = a.min(b) - DVec2::splat(reach);
                let hi = a.max(b) + DVec2::splat(reach);
                if hi.x < 0.0 || hi.y < 0.0 || lo.x >= w as f64 || lo.y >= h as f64 {
                    continue;
                }
                let x0 = lo.x.floor().max(0.0) as usize;
                let y0 = lo.y.floor().max(0.0) as usize;
                let x1 = (hi.x.ceil().max(0.0) as usize).min(w - 1);
                let y1 = (hi.y.ceil().max(0.0) as usize).min(h - 1);

                for y in y0..=y1 {
                    for x in x0..=x1 {
                        let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                        let coverage = (half + 0.5 - distance_to_segment(p, a, b)).clamp(0.0, 1.0);
                        let cell = &mut mask[y * w + x];
                        *cell = cell.max(coverage as f32);
                    }
                }
            }
        }
        mask
    }

    fn composite(&mut self, mask: &[f32], color: [u8; 4]) {
        let w = self.width() as usize;
        for (i, &coverage) in mask.iter().enumerate() {
            if coverage > 0.0 {
                let px = self.image.get_pixel_mut((i % w) as u32, (i / w) as u32);
                blend(px, color, coverage);
            }
        }
    }
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Source-over compositing of `color` scaled by `coverage`.
fn blend(dst: &mut Rgba<u8>, color: [u8; 4], coverage: f32) {
    let sa = color[3] as f32 / 255.0 * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let oa = sa + da * (1.0 - sa);

    for c in 0..3 {
        let v = (color[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / oa;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (oa * 255.0).round().clamp(0.0, 255.0) as u8;
}
