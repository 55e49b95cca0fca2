// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless rendering pipeline (RGBA/PNG) using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::geometry::RectI32;
use crate::grid::{format_tick, nice_step, nice_ticks};
use crate::series::{Series, SeriesType};
use crate::types::{Insets, HEIGHT, LABEL_SIZE, TICK_SIZE, TITLE_SIZE, WIDTH};
use crate::{Axis, Theme, ViewState};

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Text (title, ticks, axis titles, legend). Off for pixel-stable tests.
    pub draw_labels: bool,
    /// Optional crosshair position in surface pixels.
    pub crosshair: Option<(f32, f32)>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            crosshair: None,
        }
    }
}

impl RenderOptions {
    pub fn plot_rect(&self) -> RectI32 {
        self.insets.plot_rect(self.width, self.height)
    }
}

#[derive(Clone, Debug)]
pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub show_legend: bool,
}

impl Chart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: Vec::new(),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            show_legend: true,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axis ranges to the data, keeping the axis titles.
    pub fn autoscale_axes(&mut self) {
        ViewState::from_chart(self).apply_to_chart(self);
    }

    /// Render to a tightly packed, unpremultiplied RGBA8 buffer.
    /// Returns `(pixels, width, height, row_bytes)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let (w, h) = (opts.width.max(1), opts.height.max(1));
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;

        self.draw(surface.canvas(), opts);

        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            anyhow::bail!("failed to read back {w}x{h} surface");
        }
        Ok((pixels, w, h, row_bytes))
    }

    /// Render and encode as PNG in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (pixels, w, h, _) = self.render_to_rgba8(opts)?;
        let img = image::RgbaImage::from_raw(w as u32, h as u32, pixels)
            .ok_or_else(|| anyhow::anyhow!("pixel buffer does not match {w}x{h}"))?;
        let mut out = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encode PNG failed")?;
        Ok(out)
    }

    /// Render the chart to a PNG at `output_png_path`, creating parent directories.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let plot = opts.plot_rect();
        let x_ticks = Ticks::new(self.x_axis.min, self.x_axis.max, 10);
        let y_ticks = Ticks::new(self.y_axis.min, self.y_axis.max, 6);

        draw_grid(canvas, theme, &plot, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks);

        // Clip lines to the plot area so zoomed views do not bleed into the margins
        canvas.save();
        canvas.clip_rect(skia::Rect::from_ltrb(plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32), skia::ClipOp::Intersect, true);
        for (i, s) in self.series.iter().enumerate() {
            match s.series_type {
                SeriesType::Line => draw_line_series(canvas, &plot, &self.x_axis, &self.y_axis, s, theme.series_color(i)),
            }
        }
        canvas.restore();

        draw_axes(canvas, theme, &plot);

        if opts.draw_labels {
            let fonts = Fonts::new();
            draw_tick_labels(canvas, theme, &fonts, &plot, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks);
            draw_titles(canvas, theme, &fonts, &plot, opts, &self.title, &self.x_axis, &self.y_axis);
            if self.show_legend && !self.series.is_empty() {
                draw_legend(canvas, theme, &fonts, &plot, &self.series);
            }
        }

        if let Some((cx, cy)) = opts.crosshair {
            if plot.contains(cx as f64, cy as f64) {
                let mut paint = stroke_paint(theme.crosshair, 1.0);
                paint.set_alpha(160);
                canvas.draw_line((plot.left as f32, cy), (plot.right as f32, cy), &paint);
                canvas.draw_line((cx, plot.top as f32), (cx, plot.bottom as f32), &paint);
            }
        }
    }
}

// ---- helpers ----------------------------------------------------------------

struct Ticks {
    values: Vec<f64>,
    step: f64,
}

impl Ticks {
    fn new(min: f64, max: f64, target: usize) -> Self {
        Self { values: nice_ticks(min, max, target), step: nice_step(max - min, target) }
    }
}

struct Fonts {
    title: skia::Font,
    label: skia::Font,
    tick: skia::Font,
}

impl Fonts {
    fn new() -> Self {
        let typeface = skia::FontMgr::default().legacy_make_typeface(None, skia::FontStyle::default());
        let make = |size: f32| match &typeface {
            Some(tf) => skia::Font::from_typeface(tf.clone(), size),
            None => {
                let mut f = skia::Font::default();
                f.set_size(size);
                f
            }
        };
        Self { title: make(TITLE_SIZE), label: make(LABEL_SIZE), tick: make(TICK_SIZE) }
    }
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint
}

fn text_width(font: &skia::Font, text: &str) -> f32 {
    font.measure_str(text, None).0
}

fn to_px_x(plot: &RectI32, axis: &Axis, x: f64) -> f32 {
    plot.left as f32 + ((x - axis.min) / axis.span()) as f32 * plot.width() as f32
}

fn to_px_y(plot: &RectI32, axis: &Axis, y: f64) -> f32 {
    plot.bottom as f32 - ((y - axis.min) / axis.span()) as f32 * plot.height() as f32
}

fn draw_grid(canvas: &skia::Canvas, theme: &Theme, plot: &RectI32, x_axis: &Axis, y_axis: &Axis, x_ticks: &Ticks, y_ticks: &Ticks) {
    let paint = stroke_paint(theme.grid, 1.0);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);

    for &x in &x_ticks.values {
        let px = to_px_x(plot, x_axis, x);
        canvas.draw_line((px, t), (px, b), &paint);
    }
    for &y in &y_ticks.values {
        let py = to_px_y(plot, y_axis, y);
        canvas.draw_line((l, py), (r, py), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, theme: &Theme, plot: &RectI32) {
    let paint = stroke_paint(theme.axis_line, 1.5);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);
    canvas.draw_line((l, b), (r, b), &paint);
    canvas.draw_line((l, t), (l, b), &paint);
}

#[allow(clippy::too_many_arguments)]
fn draw_tick_labels(
    canvas: &skia::Canvas,
    theme: &Theme,
    fonts: &Fonts,
    plot: &RectI32,
    x_axis: &Axis,
    y_axis: &Axis,
    x_ticks: &Ticks,
    y_ticks: &Ticks,
) {
    let text = fill_paint(theme.tick);
    let mark = stroke_paint(theme.axis_line, 1.0);
    let (l, b) = (plot.left as f32, plot.bottom as f32);

    for &x in &x_ticks.values {
        let px = to_px_x(plot, x_axis, x);
        let label = format_tick(x, x_ticks.step);
        canvas.draw_line((px, b), (px, b + 4.0), &mark);
        let w = text_width(&fonts.tick, &label);
        canvas.draw_str(&label, (px - w * 0.5, b + 6.0 + TICK_SIZE), &fonts.tick, &text);
    }
    for &y in &y_ticks.values {
        let py = to_px_y(plot, y_axis, y);
        let label = format_tick(y, y_ticks.step);
        canvas.draw_line((l - 4.0, py), (l, py), &mark);
        let w = text_width(&fonts.tick, &label);
        canvas.draw_str(&label, (l - 8.0 - w, py + TICK_SIZE * 0.35), &fonts.tick, &text);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_titles(
    canvas: &skia::Canvas,
    theme: &Theme,
    fonts: &Fonts,
    plot: &RectI32,
    opts: &RenderOptions,
    title: &str,
    x_axis: &Axis,
    y_axis: &Axis,
) {
    let paint = fill_paint(theme.axis_label);

    if !title.is_empty() {
        let w = text_width(&fonts.title, title);
        let x = (plot.left as f32 + (plot.width() as f32 - w) * 0.5).max(4.0);
        canvas.draw_str(title, (x, opts.insets.top as f32 * 0.5 + TITLE_SIZE * 0.4), &fonts.title, &paint);
    }

    if !x_axis.label.is_empty() {
        let w = text_width(&fonts.label, &x_axis.label);
        let x = plot.left as f32 + (plot.width() as f32 - w) * 0.5;
        canvas.draw_str(&x_axis.label, (x, opts.height as f32 - 12.0), &fonts.label, &paint);
    }

    if !y_axis.label.is_empty() {
        // Rotated reading bottom-to-top, centered on the plot height
        let w = text_width(&fonts.label, &y_axis.label);
        let cx = 4.0 + LABEL_SIZE;
        let cy = plot.top as f32 + plot.height() as f32 * 0.5;
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(-90.0, None);
        canvas.draw_str(&y_axis.label, (-w * 0.5, 0.0), &fonts.label, &paint);
        canvas.restore();
    }
}

fn draw_legend(canvas: &skia::Canvas, theme: &Theme, fonts: &Fonts, plot: &RectI32, series: &[Series]) {
    let row_h = LABEL_SIZE + 6.0;
    let swatch = 18.0;
    let pad = 8.0;
    let label_w = series.iter().map(|s| text_width(&fonts.label, &s.label)).fold(0.0f32, f32::max);
    let box_w = pad * 3.0 + swatch + label_w;
    let box_h = pad * 2.0 + row_h * series.len() as f32;
    let right = plot.right as f32 - 8.0;
    let top = plot.top as f32 + 8.0;
    let rect = skia::Rect::from_ltrb(right - box_w, top, right, top + box_h);

    canvas.draw_rect(rect, &fill_paint(theme.legend_fill));
    canvas.draw_rect(rect, &stroke_paint(theme.grid, 1.0));

    let text = fill_paint(theme.axis_label);
    for (i, s) in series.iter().enumerate() {
        let baseline = rect.top + pad + row_h * (i as f32 + 1.0) - 5.0;
        let mid = baseline - LABEL_SIZE * 0.35;
        let line = stroke_paint(theme.series_color(i), 2.0);
        canvas.draw_line((rect.left + pad, mid), (rect.left + pad + swatch, mid), &line);
        canvas.draw_str(&s.label, (rect.left + pad * 2.0 + swatch, baseline), &fonts.label, &text);
    }
}

fn draw_line_series(canvas: &skia::Canvas, plot: &RectI32, x_axis: &Axis, y_axis: &Axis, series: &Series, color: skia::Color) {
    let mut path = skia::Path::new();
    let mut pen_down = false;
    let mut segments = 0usize;

    for &(x, y) in &series.data_xy {
        if !x.is_finite() || !y.is_finite() {
            // missing value: break the line
            pen_down = false;
            continue;
        }
        let p = (to_px_x(plot, x_axis, x), to_px_y(plot, y_axis, y));
        if pen_down {
            path.line_to(p);
            segments += 1;
        } else {
            path.move_to(p);
            pen_down = true;
        }
    }

    if segments > 0 {
        canvas.draw_path(&path, &stroke_paint(color, 2.0));
    } else if let Some((x, y)) = series.finite_points().next() {
        // A single point has no segment to stroke; mark it
        canvas.draw_circle((to_px_x(plot, x_axis, x), to_px_y(plot, y_axis, y)), 2.5, &fill_paint(color));
    }
}
