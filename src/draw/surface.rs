//! Raster drawing surface backed by a Cairo image surface.
//!
//! All drawing goes through short-lived Cairo contexts so the pixel buffer is
//! never shared while it is being read or replaced.

use super::color::Color;
use super::render;
use super::shape::{Outline, Point, ShapeKind};
use super::snapshot::{EncodedSnapshot, Snapshot, SnapshotError, pixel_at};
use thiserror::Error;

/// Errors raised by the drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface pixels unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Fixed-size ARGB32 raster owned by one widget.
pub struct Surface {
    image: cairo::ImageSurface,
    background: Color,
}

impl Surface {
    /// Creates a surface of the given size filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, SurfaceError> {
        let mut surface = Self {
            image: create_image(width, height)?,
            background,
        };
        surface.clear(background)?;
        Ok(surface)
    }

    pub fn width(&self) -> u32 {
        self.image.width().max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.image.height().max(0) as u32
    }

    /// Background color revealed by the eraser and used for clears.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Underlying image, for hosts that blit the surface to screen.
    pub fn image(&self) -> &cairo::ImageSurface {
        &self.image
    }

    fn context(&self) -> Result<cairo::Context, SurfaceError> {
        Ok(cairo::Context::new(&self.image)?)
    }

    /// Replaces every pixel with `color`.
    pub fn clear(&mut self, color: Color) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        render::render_background(&ctx, color)?;
        Ok(())
    }

    /// Strokes one segment of a freehand stroke.
    pub fn stroke_segment(
        &mut self,
        from: Point,
        to: Point,
        width: f64,
        color: Color,
        cap: cairo::LineCap,
        join: cairo::LineJoin,
    ) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        render::render_segment(&ctx, from, to, width, color, cap, join)?;
        Ok(())
    }

    /// Strokes the shape `kind` spanned by `anchor` and `point`.
    pub fn stroke_shape(
        &mut self,
        kind: ShapeKind,
        anchor: Point,
        point: Point,
        width: f64,
        color: Color,
    ) -> Result<(), SurfaceError> {
        let outline = Outline::from_points(kind, anchor, point);
        let ctx = self.context()?;
        render::render_outline(&ctx, &outline, width, color)?;
        Ok(())
    }

    /// Paints an opaque background-colored disc centered on `center`.
    pub fn erase_disc(&mut self, center: Point, diameter: f64) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        render::render_erase_disc(&ctx, center, diameter, self.background)?;
        Ok(())
    }

    /// Encodes the current pixels as PNG at the surface's pixel size.
    pub fn export_png(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(self.encode()?.as_bytes().to_vec())
    }

    /// Changes the pixel size of the surface.
    ///
    /// Without `preserve_content` the new surface is cleared to the background.
    /// With it, the previous pixels are redrawn at the origin: anything outside
    /// the new bounds is clipped and newly exposed pixels stay transparent.
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
        preserve_content: bool,
    ) -> Result<(), SurfaceError> {
        let previous = if preserve_content {
            Some(self.capture()?)
        } else {
            None
        };

        self.image = create_image(width, height)?;

        match previous {
            Some(snapshot) => self.restore(&snapshot),
            None => self.clear(self.background),
        }
    }

    /// Copies the full pixel content.
    pub fn capture(&self) -> Result<Snapshot, SurfaceError> {
        self.image.flush();
        Snapshot::from_image_surface(&self.image)
    }

    /// Replaces the surface content with a raw snapshot anchored at the origin.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurfaceError> {
        let source = snapshot.to_image_surface()?;
        self.paint_replacing(&source)
    }

    /// Encodes the current pixels for the history.
    pub fn encode(&self) -> Result<EncodedSnapshot, SnapshotError> {
        self.image.flush();
        EncodedSnapshot::encode(&self.image)
    }

    /// Decodes an encoded snapshot and paints it over the whole surface.
    ///
    /// On decode failure the surface is left untouched.
    pub fn paint_encoded(&mut self, snapshot: &EncodedSnapshot) -> Result<(), SnapshotError> {
        let source = snapshot.decode()?;
        self.paint_replacing(&source)?;
        Ok(())
    }

    /// Returns the un-premultiplied `[r, g, b, a]` value of one pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.image.flush();
        let (width, height) = (self.image.width(), self.image.height());
        let stride = self.image.stride();
        let mut value = None;
        self.image
            .with_data(|data| value = pixel_at(data, width, height, stride, x, y))
            .ok()?;
        value
    }

    fn paint_replacing(&mut self, source: &cairo::ImageSurface) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(source, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }
}

fn create_image(width: u32, height: u32) -> Result<cairo::ImageSurface, SurfaceError> {
    let invalid = || SurfaceError::InvalidSize { width, height };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    let w = i32::try_from(width).map_err(|_| invalid())?;
    let h = i32::try_from(height).map_err(|_| invalid())?;
    Ok(cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?)
}
