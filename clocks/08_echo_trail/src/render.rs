//! Render sequencing - turns an echo set into ordered line draws
//!
//! The surface only knows how to stroke lines; this module decides the
//! order so the base chain always lands on top of its echoes.

use shared::TimeSnapshot;

use crate::echoes::EchoSet;
use crate::geometry::{build_chain, Bounds, Point};
use crate::style::{stroke, Color, Pass, Stroke};

/// A 2D target that can stroke straight lines
pub trait Surface {
    /// Whether the target shows color (queried once per frame)
    fn supports_color(&self) -> bool;
    fn set_stroke_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: u8);
    fn draw_line(&mut self, from: Point, to: Point);
}

fn apply(surface: &mut impl Surface, style: Stroke) {
    surface.set_stroke_color(style.color);
    surface.set_stroke_width(style.width);
}

/// Draw the echoes, then the outline pass, then the overlay pass
///
/// Only segments `1..point_count` are drawn.
pub fn render(surface: &mut impl Surface, echoes: &EchoSet, point_count: usize) {
    let color_capable = surface.supports_color();
    let base = echoes.base();

    for segment in 1..point_count {
        apply(surface, stroke(Pass::Echo, segment, color_capable));
        for (_, chain) in echoes.iter() {
            surface.draw_line(chain[segment - 1], chain[segment]);
        }
    }

    for segment in 1..point_count {
        apply(surface, stroke(Pass::Outline, segment, color_capable));
        surface.draw_line(base[segment - 1], base[segment]);
    }

    for segment in 1..point_count {
        apply(surface, stroke(Pass::Overlay, segment, color_capable));
        surface.draw_line(base[segment - 1], base[segment]);
    }
}

/// Build the chain for `time`, expand its echoes and render them
pub fn draw_frame(
    surface: &mut impl Surface,
    bounds: Bounds,
    time: &TimeSnapshot,
    point_count: usize,
) -> EchoSet {
    let base = build_chain(bounds, time);
    let echoes = EchoSet::generate(&base, point_count);
    render(surface, &echoes, point_count);
    echoes
}
