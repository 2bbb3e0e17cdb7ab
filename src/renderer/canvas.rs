//! Browser sand canvas
//!
//! Draws the table with the canvas 2D API. Grooves and highlights accumulate
//! on two offscreen canvases that survive between frames; each frame the
//! visible canvas is rebuilt from them following [`frame_ops`]. Every canvas
//! except the texture is backed at the device pixel ratio and drawn in CSS
//! pixels through the context transform.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

use super::frame::{DrawOp, LayerId, frame_ops};
use super::pixel::as_bytes;
use super::shapes::{Circle, Ring, groove_marks, highlight_mark};
use super::texture::generate_sand_texture;
use super::{Compositor, FrameView};
use crate::error::RenderError;
use crate::sim::TableGeometry;

type Result<T> = std::result::Result<T, RenderError>;

/// A canvas element and its 2D context
struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface {
    fn wrap(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(RenderError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    fn offscreen(document: &Document) -> Result<Self> {
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RenderError::NoContext)?;
        Self::wrap(canvas)
    }

    /// Reallocate the backing store (which also clears it) and map CSS
    /// pixels onto it
    fn resize(&self, size: f64, pixel_ratio: f64) -> Result<()> {
        let backing = (size * pixel_ratio).round().max(1.0) as u32;
        self.canvas.set_width(backing);
        self.canvas.set_height(backing);
        self.ctx
            .set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0)?;
        Ok(())
    }

    fn clear(&self, size: f64) {
        self.ctx.clear_rect(0.0, 0.0, size, size);
    }

    fn fill_circle(&self, circle: &Circle) -> Result<()> {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&circle.color.css());
        self.ctx
            .arc(circle.center.x, circle.center.y, circle.diameter / 2.0, 0.0, TAU)?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_ring(&self, ring: &Ring) -> Result<()> {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&ring.color.css());
        self.ctx.set_line_width(ring.width);
        self.ctx
            .arc(ring.center.x, ring.center.y, ring.diameter / 2.0, 0.0, TAU)?;
        self.ctx.stroke();
        Ok(())
    }
}

/// Device pixel ratio, at least 1
fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|r| r.is_finite())
        .unwrap_or(1.0)
        .max(1.0)
}

pub struct SandCanvas {
    screen: Surface,
    texture: Surface,
    groove: Surface,
    highlight: Surface,
    rng: Pcg32,
    ball_radius: f64,
    /// Set once the surfaces have been sized
    geometry: Option<TableGeometry>,
}

impl SandCanvas {
    /// Draw into `canvas`; the layer canvases are created offscreen
    pub fn new(canvas: HtmlCanvasElement, seed: u64, ball_radius: f64) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(RenderError::NoDocument)?;
        Ok(Self {
            screen: Surface::wrap(canvas)?,
            texture: Surface::offscreen(&document)?,
            groove: Surface::offscreen(&document)?,
            highlight: Surface::offscreen(&document)?,
            rng: Pcg32::seed_from_u64(seed),
            ball_radius,
            geometry: None,
        })
    }

    fn layer(&self, id: LayerId) -> &Surface {
        match id {
            LayerId::Texture => &self.texture,
            LayerId::Groove => &self.groove,
            LayerId::Highlight => &self.highlight,
        }
    }

    fn try_init(&mut self, geometry: &TableGeometry) -> Result<()> {
        let ratio = device_pixel_ratio();
        let size = geometry.size;

        self.screen.resize(size, ratio)?;
        let style = self.screen.canvas.style();
        style.set_property("width", &format!("{}px", size))?;
        style.set_property("height", &format!("{}px", size))?;

        self.groove.resize(size, ratio)?;
        self.highlight.resize(size, ratio)?;

        // Grain is one texel per CSS pixel and scaled up when drawn
        let texels = size.round().max(1.0) as u32;
        self.texture.resize(texels as f64, 1.0)?;
        let pixels = generate_sand_texture(texels, &mut self.rng);
        let image =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(as_bytes(&pixels)), texels, texels)?;
        self.texture.ctx.put_image_data(&image, 0.0, 0.0)?;

        self.geometry = Some(*geometry);
        log::debug!("Sand canvas initialized at {}px (pixel ratio {})", size, ratio);
        Ok(())
    }

    fn try_draw_mark(&self, pos: DVec2) -> Result<()> {
        for circle in groove_marks(pos, self.ball_radius) {
            self.groove.fill_circle(&circle)?;
        }
        self.highlight
            .fill_circle(&highlight_mark(pos, self.ball_radius))
    }

    fn try_compose(&self, view: &FrameView, geometry: &TableGeometry) -> Result<()> {
        let size = geometry.size;
        let ctx = &self.screen.ctx;
        for op in frame_ops(view, geometry, self.ball_radius) {
            match op {
                DrawOp::SetBlend(blend) => ctx.set_global_composite_operation(blend.as_css())?,
                DrawOp::Fill(color) => {
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill_rect(0.0, 0.0, size, size);
                }
                DrawOp::Layer(id) => ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
                    &self.layer(id).canvas,
                    0.0,
                    0.0,
                    size,
                    size,
                )?,
                DrawOp::Ring(ring) => self.screen.stroke_ring(&ring)?,
                DrawOp::Circle(circle) => self.screen.fill_circle(&circle)?,
            }
        }
        Ok(())
    }
}

impl Compositor for SandCanvas {
    fn init_surface(&mut self, geometry: &TableGeometry) {
        if let Err(e) = self.try_init(geometry) {
            log::error!("Sand canvas init failed: {}", e);
            self.geometry = None;
        }
    }

    fn draw_mark(&mut self, pos: DVec2) {
        if self.geometry.is_none() {
            return;
        }
        if let Err(e) = self.try_draw_mark(pos) {
            log::warn!("Mark draw error: {}", e);
        }
    }

    fn clear_marks(&mut self) {
        if let Some(geometry) = self.geometry {
            self.groove.clear(geometry.size);
            self.highlight.clear(geometry.size);
        }
    }

    fn compose(&mut self, view: &FrameView) {
        let Some(geometry) = self.geometry else {
            return;
        };
        if let Err(e) = self.try_compose(view, &geometry) {
            log::warn!("Render error: {}", e);
        }
    }
}
