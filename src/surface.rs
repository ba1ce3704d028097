// Drawing backends for the particle field. The field only needs filled
// rectangles, glowing discs and thin lines, so anything immediate-mode fits.

use crate::color::Color;
use std::f64::consts::PI;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait RenderSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, alpha: f64);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64, blur: f64);

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64);

    /// Restore global alpha to 1 and blur to 0.
    fn reset(&mut self);
}

// Draws straight into a browser 2d context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        CanvasSurface { context }
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.context
    }
}

impl RenderSurface for CanvasSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, alpha: f64) {
        let ctx = &self.context;
        ctx.set_global_alpha(alpha);
        ctx.set_shadow_blur(0.0);
        ctx.set_fill_style(&JsValue::from_str(&color.to_css()));
        ctx.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64, blur: f64) {
        let ctx = &self.context;
        let css = JsValue::from_str(&color.to_css());
        ctx.begin_path();
        // Only fails for a negative radius
        if ctx.arc(x, y, radius, 0.0, PI * 2.0).is_err() {
            return;
        }
        ctx.set_fill_style(&css);
        ctx.set_global_alpha(alpha);
        ctx.set_shadow_blur(blur);
        ctx.set_shadow_color(&color.to_css());
        ctx.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64) {
        let ctx = &self.context;
        ctx.begin_path();
        ctx.move_to(from[0], from[1]);
        ctx.line_to(to[0], to[1]);
        ctx.set_stroke_style(&JsValue::from_str(&color.to_css()));
        ctx.set_shadow_blur(0.0);
        ctx.set_global_alpha(alpha);
        ctx.set_line_width(width);
        ctx.stroke();
    }

    fn reset(&mut self) {
        self.context.set_global_alpha(1.0);
        self.context.set_shadow_blur(0.0);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        alpha: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
        alpha: f64,
        blur: f64,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        width: f64,
    },
    Reset,
}

// Display list of everything drawn, cleared by the owner between frames
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl RenderSurface for RecordingSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color, alpha: f64) {
        self.commands.push(DrawCommand::Rect { x, y, width, height, color, alpha });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64, blur: f64) {
        self.commands.push(DrawCommand::Circle { x, y, radius, color, alpha, blur });
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64) {
        self.commands.push(DrawCommand::Line { from, to, color, alpha, width });
    }

    fn reset(&mut self) {
        self.commands.push(DrawCommand::Reset);
    }
}
