//! Cairo-based rendering functions for strokes, shapes and the eraser.

use super::color::Color;
use super::shape::{Outline, Point};

/// Fills the entire target with a solid color, replacing whatever was there.
pub fn render_background(ctx: &cairo::Context, color: Color) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let result = ctx.paint();
    ctx.restore()?;
    result
}

/// Strokes a single segment.
///
/// The brush tool calls this once per pointer move, so a stroke is a chain of
/// segments joined by their round caps.
pub fn render_segment(
    ctx: &cairo::Context,
    from: Point,
    to: Point,
    width: f64,
    color: Color,
    cap: cairo::LineCap,
    join: cairo::LineJoin,
) -> Result<(), cairo::Error> {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_cap(cap);
    ctx.set_line_join(join);

    ctx.new_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()
}

/// Strokes a shape outline with round caps and joins.
pub fn render_outline(
    ctx: &cairo::Context,
    outline: &Outline,
    width: f64,
    color: Color,
) -> Result<(), cairo::Error> {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.new_path();
    match *outline {
        Outline::Line { from, to } => {
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
        }
        Outline::Rect {
            x,
            y,
            width,
            height,
        } => {
            ctx.rectangle(x, y, width, height);
        }
        Outline::Circle { center, radius } => {
            ctx.arc(center.x, center.y, radius, 0.0, 2.0 * std::f64::consts::PI);
        }
    }
    ctx.stroke()
}

/// Erases a disc by replacing it with the opaque background color.
///
/// The clip replaces pixels instead of compositing over them, and the
/// background alpha is forced to 1.0, so erased pixels (including the
/// antialiased rim) never become transparent.
pub fn render_erase_disc(
    ctx: &cairo::Context,
    center: Point,
    diameter: f64,
    background: Color,
) -> Result<(), cairo::Error> {
    let radius = diameter / 2.0;
    if radius <= 0.0 {
        return Ok(());
    }

    ctx.save()?;
    ctx.new_path();
    ctx.arc(center.x, center.y, radius, 0.0, 2.0 * std::f64::consts::PI);
    ctx.clip();

    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(background.r, background.g, background.b, 1.0);
    let filled = ctx.paint();

    ctx.restore()?;
    filled
}
