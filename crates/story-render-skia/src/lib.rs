// File: crates/story-render-skia/src/lib.rs
// Summary: Headless PNG rendering of story scenes using Skia CPU raster surfaces.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use skia_safe as skia;
use story_core::geometry::{PathCmd, PathData};
use story_core::scene::{Attr, Node, Scene, Tag, Transform};
use story_core::theme::Rgba;
use tracing::debug;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Device pixels per scene unit.
    pub scale: f32,
    /// Text is skipped when false (keeps pixel tests independent of system fonts).
    pub draw_text: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { scale: 1.0, draw_text: true }
    }
}

/// Presentation state inherited down the scene tree, as SVG does.
#[derive(Clone)]
struct Style {
    fill: Option<Rgba>,
    stroke: Option<Rgba>,
    stroke_width: f32,
    stroke_opacity: f32,
    dash: Option<Vec<f32>>,
    round_caps: bool,
    opacity: f32,
    font_size: f32,
    anchor: Anchor,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle,
    End,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Rgba::rgb(0, 0, 0)),
            stroke: None,
            stroke_width: 1.0,
            stroke_opacity: 1.0,
            dash: None,
            round_caps: false,
            opacity: 1.0,
            font_size: 12.0,
            anchor: Anchor::Start,
        }
    }
}

impl Style {
    fn inherit(&self, node: &Node) -> Style {
        let mut s = self.clone();
        // group opacity is not composited; it multiplies into the children instead
        s.opacity = 1.0;
        for (name, value) in &node.attrs {
            match (*name, value) {
                ("fill", v) => s.fill = paint_color(v),
                ("stroke", v) => s.stroke = paint_color(v),
                ("stroke-width", Attr::Num(w)) => s.stroke_width = *w as f32,
                ("stroke-opacity", Attr::Num(o)) => s.stroke_opacity = *o as f32,
                ("stroke-dasharray", Attr::Text(d)) => s.dash = parse_dash(d),
                ("stroke-linecap", Attr::Text(c)) => s.round_caps = c == "round",
                ("opacity", Attr::Num(o)) => s.opacity = *o as f32,
                ("font-size", Attr::Num(f)) => s.font_size = *f as f32,
                ("text-anchor", Attr::Text(a)) => {
                    s.anchor = match a.as_str() {
                        "middle" => Anchor::Middle,
                        "end" => Anchor::End,
                        _ => Anchor::Start,
                    }
                }
                _ => {}
            }
        }
        s.opacity *= self.opacity;
        s
    }

    fn fill_paint(&self) -> Option<skia::Paint> {
        let c = self.fill?;
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(skia::Color::from_rgb(c.r, c.g, c.b));
        paint.set_alpha_f(c.alpha() as f32 * self.opacity);
        Some(paint)
    }

    fn stroke_paint(&self) -> Option<skia::Paint> {
        let c = self.stroke?;
        if self.stroke_width <= 0.0 {
            return None;
        }
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(self.stroke_width);
        paint.set_color(skia::Color::from_rgb(c.r, c.g, c.b));
        paint.set_alpha_f(c.alpha() as f32 * self.opacity * self.stroke_opacity);
        if self.round_caps {
            paint.set_stroke_cap(skia::paint::Cap::Round);
            paint.set_stroke_join(skia::paint::Join::Round);
        }
        if let Some(intervals) = &self.dash {
            paint.set_path_effect(skia::PathEffect::dash(intervals, 0.0));
        }
        Some(paint)
    }
}

fn paint_color(value: &Attr) -> Option<Rgba> {
    match value {
        Attr::Color(c) => Some(*c),
        Attr::Text(t) => Rgba::from_hex(t),
        _ => None,
    }
}

fn parse_dash(d: &str) -> Option<Vec<f32>> {
    let mut intervals: Vec<f32> = d
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    if intervals.is_empty() || intervals.iter().all(|v| *v <= 0.0) {
        return None;
    }
    if intervals.len() % 2 == 1 {
        intervals.extend_from_within(..);
    }
    Some(intervals)
}

fn to_skia_path(data: &PathData) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in data.commands() {
        match *cmd {
            PathCmd::MoveTo(p) => {
                path.move_to((p.x as f32, p.y as f32));
            }
            PathCmd::LineTo(p) => {
                path.line_to((p.x as f32, p.y as f32));
            }
            PathCmd::CubicTo(c1, c2, p) => {
                path.cubic_to((c1.x as f32, c1.y as f32), (c2.x as f32, c2.y as f32), (p.x as f32, p.y as f32));
            }
            PathCmd::Close => {
                path.close();
            }
        }
    }
    path
}

pub struct SkiaRenderer {
    opts: RenderOptions,
}

impl SkiaRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    /// Render `scene` to PNG bytes on a CPU raster surface.
    pub fn render_png_bytes(&self, scene: &Scene) -> Result<Vec<u8>> {
        let w = (scene.width as f32 * self.opts.scale).round() as i32;
        let h = (scene.height as f32 * self.opts.scale).round() as i32;
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        let canvas = surface.canvas();
        let bg = scene.background;
        canvas.clear(skia::Color::from_argb(bg.a, bg.r, bg.g, bg.b));
        canvas.scale((self.opts.scale, self.opts.scale));

        let mut font = skia::Font::default();
        self.draw_node(canvas, &mut font, &scene.root, &Style::default());

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        debug!(width = w, height = h, bytes = data.len(), "rasterized scene");
        Ok(data.as_bytes().to_vec())
    }

    /// Render `scene` and write the PNG to `path`, creating parent directories.
    pub fn render_to_png(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.render_png_bytes(scene)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn draw_node(&self, canvas: &skia::Canvas, font: &mut skia::Font, node: &Node, parent: &Style) {
        let style = parent.inherit(node);
        let saved = node.transform.map(|t| push_transform(canvas, t));

        match node.tag {
            Tag::Group => {}
            Tag::Path => {
                if let Some(d) = node.path_data() {
                    let path = to_skia_path(d);
                    if let Some(p) = style.fill_paint() {
                        canvas.draw_path(&path, &p);
                    }
                    if let Some(p) = style.stroke_paint() {
                        canvas.draw_path(&path, &p);
                    }
                }
            }
            Tag::Circle => {
                let center = (num(node, "cx"), num(node, "cy"));
                let r = num(node, "r");
                if let Some(p) = style.fill_paint() {
                    canvas.draw_circle(center, r, &p);
                }
                if let Some(p) = style.stroke_paint() {
                    canvas.draw_circle(center, r, &p);
                }
            }
            Tag::Rect => {
                let (x, y) = (num(node, "x"), num(node, "y"));
                let rect = skia::Rect::from_xywh(x, y, num(node, "width"), num(node, "height"));
                let (rx, ry) = (num(node, "rx"), num(node, "ry"));
                for paint in [style.fill_paint(), style.stroke_paint()].into_iter().flatten() {
                    if rx > 0.0 || ry > 0.0 {
                        canvas.draw_round_rect(rect, rx, ry, &paint);
                    } else {
                        canvas.draw_rect(rect, &paint);
                    }
                }
            }
            Tag::Line => {
                if let Some(p) = style.stroke_paint() {
                    canvas.draw_line((num(node, "x1"), num(node, "y1")), (num(node, "x2"), num(node, "y2")), &p);
                }
            }
            Tag::Text => {
                if let (true, Some(text), Some(paint)) = (self.opts.draw_text, node.text.as_deref(), style.fill_paint()) {
                    font.set_size(style.font_size);
                    let (width, _) = font.measure_str(text, Some(&paint));
                    let dx = match style.anchor {
                        Anchor::Start => 0.0,
                        Anchor::Middle => -width / 2.0,
                        Anchor::End => -width,
                    };
                    canvas.draw_str(text, (num(node, "x") + dx, num(node, "y")), font, &paint);
                }
            }
        }

        for child in &node.children {
            self.draw_node(canvas, font, child, &style);
        }
        if let Some(count) = saved {
            canvas.restore_to_count(count);
        }
    }
}

fn num(node: &Node, name: &str) -> f32 {
    node.num(name).unwrap_or(0.0) as f32
}

fn push_transform(canvas: &skia::Canvas, t: Transform) -> usize {
    let count = canvas.save();
    canvas.translate((t.tx as f32, t.ty as f32));
    if t.rotate != 0.0 {
        canvas.rotate(t.rotate as f32, None);
    }
    count
}

/// One-shot form of [`SkiaRenderer::render_png_bytes`].
pub fn render_png_bytes(scene: &Scene, opts: &RenderOptions) -> Result<Vec<u8>> {
    SkiaRenderer::new(*opts).render_png_bytes(scene)
}
