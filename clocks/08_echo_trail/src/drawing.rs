//! Drawing module - nannou backend for the echo trail face
//!
//! Maps the integer display of the virtual watch onto a scaled viewport in
//! the window and strokes the lines the render module asks for.

use nannou::prelude::*;

use crate::geometry::{Bounds, Point};
use crate::render::Surface;
use crate::style::Color;

/// Color palette for the window around the watch display
pub mod colors {
    use nannou::prelude::*;

    /// Window background around the display
    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 14,
        green: 14,
        blue: 16,
        standard: std::marker::PhantomData,
    };

    /// The watch display itself
    pub const DISPLAY: Srgb<u8> = Srgb {
        red: 0,
        green: 0,
        blue: 0,
        standard: std::marker::PhantomData,
    };

    /// Thin bezel around the display
    pub const BEZEL: Srgb<u8> = Srgb {
        red: 60,
        green: 60,
        blue: 66,
        standard: std::marker::PhantomData,
    };

    /// Caption under the display
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 140,
        green: 140,
        blue: 150,
        standard: std::marker::PhantomData,
    };
}

/// Placement of the virtual display inside the canvas
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Screen rectangle covered by the display
    pub rect: Rect,
    /// Window units per display pixel
    pub scale: f32,
}

impl Viewport {
    /// Center `bounds` in `canvas`, using whole-pixel scaling when it fits
    pub fn fit(bounds: Bounds, canvas: Rect) -> Self {
        let w = bounds.width.max(1) as f32;
        let h = bounds.height.max(1) as f32;
        let fit = (canvas.w() / w).min(canvas.h() / h);
        let scale = if fit >= 1.0 { fit.floor() } else { fit.max(0.01) };
        let rect = Rect::from_x_y_w_h(canvas.x(), canvas.y(), w * scale, h * scale);
        Self { rect, scale }
    }

    /// Window position of the center of display pixel `p`
    pub fn to_screen(&self, p: Point) -> Point2 {
        pt2(
            self.rect.left() + (p.x as f32 + 0.5) * self.scale,
            self.rect.top() - (p.y as f32 + 0.5) * self.scale,
        )
    }
}

fn to_srgb(color: Color) -> Srgb<u8> {
    srgb(color.red, color.green, color.blue)
}

/// [`Surface`] that strokes lines into a nannou [`Draw`]
pub struct NannouSurface<'a> {
    draw: &'a Draw,
    viewport: Viewport,
    color_capable: bool,
    stroke_color: Srgb<u8>,
    stroke_width: u8,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, viewport: Viewport, color_capable: bool) -> Self {
        Self {
            draw,
            viewport,
            color_capable,
            stroke_color: to_srgb(crate::style::palette::WHITE),
            stroke_width: 1,
        }
    }
}

impl Surface for NannouSurface<'_> {
    fn supports_color(&self) -> bool {
        self.color_capable
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = to_srgb(color);
    }

    fn set_stroke_width(&mut self, width: u8) {
        self.stroke_width = width;
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        let weight = self.stroke_width as f32 * self.viewport.scale;
        let line = self
            .draw
            .line()
            .start(self.viewport.to_screen(from))
            .end(self.viewport.to_screen(to))
            .weight(weight)
            .color(self.stroke_color);
        if self.stroke_width > 1 {
            line.caps_round();
        }
    }
}

/// Fill the display area before the face is drawn
pub fn draw_display_background(draw: &Draw, viewport: &Viewport) {
    draw.rect()
        .xy(viewport.rect.xy())
        .wh(viewport.rect.wh())
        .color(colors::DISPLAY);
}

/// Hide everything drawn outside the display, then outline it
///
/// Echo chains reach well past the display edges; the watch clips them.
pub fn draw_display_mask(draw: &Draw, viewport: &Viewport, canvas: Rect) {
    let display = viewport.rect;
    // Generous margins so long strokes are covered at any window size
    let outer = canvas.pad(-canvas.w().max(canvas.h()));

    let bands = [
        Rect::from_corners(pt2(outer.left(), display.top()), pt2(outer.right(), outer.top())),
        Rect::from_corners(pt2(outer.left(), outer.bottom()), pt2(outer.right(), display.bottom())),
        Rect::from_corners(pt2(outer.left(), display.bottom()), pt2(display.left(), display.top())),
        Rect::from_corners(pt2(display.right(), display.bottom()), pt2(outer.right(), display.top())),
    ];
    for band in bands {
        draw.rect().xy(band.xy()).wh(band.wh()).color(colors::BACKGROUND);
    }

    draw.rect()
        .xy(display.xy())
        .wh(display.wh())
        .no_fill()
        .stroke(colors::BEZEL)
        .stroke_weight(2.0);
}

/// Caption under the display
pub fn draw_caption(draw: &Draw, viewport: &Viewport, text: &str) {
    draw.text(text)
        .xy(pt2(viewport.rect.x(), viewport.rect.bottom() - 18.0))
        .w_h(viewport.rect.w().max(240.0), 20.0)
        .font_size(12)
        .color(colors::TEXT_SECONDARY);
}
