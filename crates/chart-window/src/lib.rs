// File: crates/chart-window/src/lib.rs
// Summary: Interactive viewer that renders chart-core charts to a window via RGBA blit (CPU) using winit + softbuffer.
// Controls: wheel zooms at the cursor, left-drag pans, Left/Right/Space switch charts,
// R resets the view, A autoscales Y over the visible X range, Escape closes.

use std::num::NonZeroU32;

use anyhow::{anyhow, Result};
use chart_core::types::Insets;
use chart_core::{Chart, RenderOptions, ViewState};
use tracing::{debug, error, info};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

/// Everything the viewer tracks between events, independent of the windowing backend.
pub struct ViewerState {
    charts: Vec<Chart>,
    index: usize,
    view: ViewState,
    cursor: Option<(f64, f64)>,
    dragging: bool,
}

impl ViewerState {
    pub fn new(mut charts: Vec<Chart>) -> Result<Self> {
        if charts.is_empty() {
            anyhow::bail!("no charts to show");
        }
        for chart in &mut charts {
            chart.autoscale_axes();
        }
        let view = ViewState::from_axes(&charts[0]);
        Ok(Self { charts, index: 0, view, cursor: None, dragging: false })
    }

    pub fn current(&self) -> &Chart {
        &self.charts[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn window_title(&self) -> String {
        if self.charts.len() == 1 {
            self.current().title.clone()
        } else {
            format!("{} ({}/{})", self.current().title, self.index + 1, self.charts.len())
        }
    }

    pub fn next_chart(&mut self) {
        self.index = (self.index + 1) % self.charts.len();
        self.reset_view();
    }

    pub fn prev_chart(&mut self) {
        self.index = (self.index + self.charts.len() - 1) % self.charts.len();
        self.reset_view();
    }

    pub fn reset_view(&mut self) {
        self.view = ViewState::from_axes(self.current());
    }

    pub fn autoscale_y(&mut self) -> bool {
        let chart = &self.charts[self.index];
        self.view.autoscale_y_visible(chart)
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Track the cursor; pans the view while dragging.
    pub fn cursor_moved(&mut self, x: f64, y: f64, width: i32, height: i32, insets: &Insets) {
        if self.dragging {
            if let Some((px, py)) = self.cursor {
                self.view.pan_by_pixels(x - px, y - py, width, height, insets);
            }
        }
        self.cursor = Some((x, y));
    }

    pub fn cursor_left(&mut self) {
        self.cursor = None;
        self.dragging = false;
    }

    /// Zoom at the cursor (or the surface center when the cursor is outside).
    pub fn scroll(&mut self, amount: f64, width: i32, height: i32, insets: &Insets) {
        let (cx, cy) = self.cursor.unwrap_or((width as f64 * 0.5, height as f64 * 0.5));
        self.view.zoom_at_pixel(amount, cx, cy, width, height, insets);
    }

    /// Render the current chart under the current view as 0RGB pixels for softbuffer.
    pub fn frame(&self, opts: &RenderOptions) -> Result<Vec<u32>> {
        let mut chart = self.current().clone();
        self.view.apply_to_chart(&mut chart);
        let mut opts = *opts;
        opts.crosshair = self.cursor.map(|(x, y)| (x as f32, y as f32));
        let (rgba, _, _, _) = chart.render_to_rgba8(&opts)?;
        Ok(rgba
            .chunks_exact(4)
            .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32)
            .collect())
    }
}

/// Open a window and show `charts` until it is closed. Does not return on success:
/// the process exits when the event loop ends.
pub fn show(charts: Vec<Chart>, opts: RenderOptions) -> Result<()> {
    let mut viewer = ViewerState::new(charts)?;

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(viewer.window_title())
        .with_inner_size(LogicalSize::new(opts.width as f64, opts.height as f64))
        .build(&event_loop)
        .map_err(|e| anyhow!("failed to open window: {e}"))?;

    // SAFETY: the window outlives the context and surface; all three move into the event loop closure.
    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    info!(charts = viewer.charts.len(), "viewer open; Left/Right switch charts, R resets, A autoscales Y, Esc closes");

    event_loop.run(move |event, _, control_flow| {
        let _ = &context;
        control_flow.set_wait();
        let size = window.inner_size();
        let (w, h) = (size.width as i32, size.height as i32);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => control_flow.set_exit(),
                WindowEvent::Resized(_) => window.request_redraw(),
                WindowEvent::CursorMoved { position, .. } => {
                    viewer.cursor_moved(position.x, position.y, w, h, &opts.insets);
                    window.request_redraw();
                }
                WindowEvent::CursorLeft { .. } => {
                    viewer.cursor_left();
                    window.request_redraw();
                }
                WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                    viewer.set_dragging(state == ElementState::Pressed);
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let amount = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y as f64 * 0.1,
                        MouseScrollDelta::PixelDelta(p) => p.y / 240.0,
                    };
                    viewer.scroll(amount, w, h, &opts.insets);
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => {
                    match key {
                        VirtualKeyCode::Escape => control_flow.set_exit(),
                        VirtualKeyCode::Right | VirtualKeyCode::Space => viewer.next_chart(),
                        VirtualKeyCode::Left => viewer.prev_chart(),
                        VirtualKeyCode::R => viewer.reset_view(),
                        VirtualKeyCode::A => {
                            if !viewer.autoscale_y() {
                                debug!("autoscale: no points in the visible range");
                            }
                        }
                        _ => return,
                    }
                    window.set_title(&viewer.window_title());
                    window.request_redraw();
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Err(e) = redraw(&mut surface, &window, &viewer, &opts) {
                    error!("redraw failed: {e:#}");
                    control_flow.set_exit();
                }
            }
            _ => {}
        }
    })
}

fn redraw(surface: &mut softbuffer::Surface, window: &Window, viewer: &ViewerState, base: &RenderOptions) -> Result<()> {
    let size = window.inner_size();
    // minimized windows report a zero size
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow!("resize surface: {e}"))?;

    let mut opts = *base;
    opts.width = size.width as i32;
    opts.height = size.height as i32;
    let pixels = viewer.frame(&opts)?;

    let mut buffer = surface.buffer_mut().map_err(|e| anyhow!("surface buffer: {e}"))?;
    let n = buffer.len().min(pixels.len());
    buffer[..n].copy_from_slice(&pixels[..n]);
    buffer.present().map_err(|e| anyhow!("present frame: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::Series;

    fn charts() -> Vec<Chart> {
        let t = [0.0, 1.0, 2.0, 3.0];
        let mut a = Chart::new("G-A");
        a.add_series(Series::line("a", &t, &[1.0, 2.0, 3.0, 4.0]));
        let mut b = Chart::new("G-B");
        b.add_series(Series::line("b", &t, &[10.0, 20.0, 30.0, 40.0]));
        vec![a, b]
    }

    #[test]
    fn rejects_empty() {
        assert!(ViewerState::new(Vec::new()).is_err());
    }

    #[test]
    fn cycles_charts_and_resets_view() {
        let mut v = ViewerState::new(charts()).unwrap();
        assert_eq!(v.window_title(), "G-A (1/2)");
        v.next_chart();
        assert_eq!(v.index(), 1);
        assert!(v.view().y_max > 40.0);
        v.next_chart();
        assert_eq!(v.index(), 0);
        v.prev_chart();
        assert_eq!(v.window_title(), "G-B (2/2)");
    }

    #[test]
    fn drag_pans_and_reset_restores() {
        let insets = Insets::default();
        let mut v = ViewerState::new(charts()).unwrap();
        let before = v.view();
        v.cursor_moved(400.0, 300.0, 1024, 640, &insets);
        v.set_dragging(true);
        v.cursor_moved(450.0, 300.0, 1024, 640, &insets);
        assert!(v.view().x_min < before.x_min);
        v.reset_view();
        assert_eq!(v.view(), before);
    }

    #[test]
    fn frame_matches_surface_size() {
        let v = ViewerState::new(charts()).unwrap();
        let mut opts = RenderOptions::default();
        opts.width = 200;
        opts.height = 120;
        opts.draw_labels = false;
        let px = v.frame(&opts).unwrap();
        assert_eq!(px.len(), 200 * 120);
        assert_eq!(px[0] >> 24, 0);
    }
}
