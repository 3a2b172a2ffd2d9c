//! Captured copies of the surface pixels.
//!
//! A [`Snapshot`] is a raw copy used where restores must be synchronous
//! (shape previews, resizes). An [`EncodedSnapshot`] is the PNG form kept by
//! the history; turning it back into pixels is a decode step that can fail.

use super::surface::SurfaceError;
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced while encoding or decoding snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(cairo::IoError),

    #[error("Failed to decode snapshot: {0}")]
    Decode(cairo::IoError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("Paint job was dropped before it ran")]
    Dropped,
}

/// Raw ARGB32 copy of the full surface at one instant.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: i32,
    height: i32,
    stride: i32,
    data: Arc<[u8]>,
}

impl Snapshot {
    pub(crate) fn from_image_surface(surface: &cairo::ImageSurface) -> Result<Self, SurfaceError> {
        let mut bytes = Vec::new();
        surface.with_data(|data| bytes.extend_from_slice(data))?;
        Ok(Self {
            width: surface.width(),
            height: surface.height(),
            stride: surface.stride(),
            data: bytes.into(),
        })
    }

    /// Wraps a copy of the pixels in an image surface usable as a paint source.
    pub(crate) fn to_image_surface(&self) -> Result<cairo::ImageSurface, SurfaceError> {
        let surface = cairo::ImageSurface::create_for_data(
            self.data.to_vec(),
            cairo::Format::ARgb32,
            self.width,
            self.height,
            self.stride,
        )?;
        Ok(surface)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the un-premultiplied `[r, g, b, a]` value of a pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        pixel_at(&self.data, self.width, self.height, self.stride, x, y)
    }
}

/// Reads one pixel out of raw ARGB32 rows.
pub(crate) fn pixel_at(
    data: &[u8],
    width: i32,
    height: i32,
    stride: i32,
    x: i32,
    y: i32,
) -> Option<[u8; 4]> {
    if x < 0 || y < 0 || x >= width || y >= height || stride < 0 {
        return None;
    }
    let offset = (y as usize)
        .checked_mul(stride as usize)?
        .checked_add(x as usize * 4)?;
    let bytes: [u8; 4] = data.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
    Some(argb_to_rgba(u32::from_ne_bytes(bytes)))
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// PNG-encoded snapshot. Cloning shares the underlying bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedSnapshot {
    bytes: Arc<[u8]>,
}

impl EncodedSnapshot {
    /// Wraps already-encoded PNG bytes.
    pub fn from_png_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub(crate) fn encode(surface: &cairo::ImageSurface) -> Result<Self, SnapshotError> {
        let mut buffer = Vec::new();
        surface
            .write_to_png(&mut buffer)
            .map_err(SnapshotError::Encode)?;
        Ok(Self::from_png_bytes(buffer))
    }

    /// Decodes the PNG back into an image surface.
    pub(crate) fn decode(&self) -> Result<cairo::ImageSurface, SnapshotError> {
        let mut reader = Cursor::new(&self.bytes[..]);
        cairo::ImageSurface::create_from_png(&mut reader).map_err(SnapshotError::Decode)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for EncodedSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedSnapshot")
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

fn argb_to_rgba(pixel: u32) -> [u8; 4] {
    let a = (pixel >> 24) as u8;
    let unpremultiply = |channel: u32| -> u8 {
        let channel = (channel & 0xff) as u8;
        if a == 0 {
            0
        } else {
            ((channel as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8
        }
    };
    [
        unpremultiply(pixel >> 16),
        unpremultiply(pixel >> 8),
        unpremultiply(pixel),
        a,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_conversion_unpremultiplies() {
        assert_eq!(argb_to_rgba(0xffff0000), [255, 0, 0, 255]);
        assert_eq!(argb_to_rgba(0x00000000), [0, 0, 0, 0]);
        assert_eq!(argb_to_rgba(0x80800000), [255, 0, 0, 128]);
    }

    #[test]
    fn corrupt_png_fails_to_decode() {
        let snapshot = EncodedSnapshot::from_png_bytes(vec![1u8, 2, 3, 4]);
        assert!(matches!(snapshot.decode(), Err(SnapshotError::Decode(_))));
    }

    #[test]
    fn pixel_lookup_is_bounds_checked() {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 4, 4).unwrap();
        let snapshot = Snapshot::from_image_surface(&surface).unwrap();
        assert_eq!(snapshot.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(snapshot.pixel(4, 0), None);
        assert_eq!(snapshot.pixel(-1, 2), None);
    }

    #[test]
    fn pixel_offsets_past_i32_range_are_not_wrapped() {
        let data = [0xffu8; 16];
        // Row 4096 of a 1 MiB stride starts beyond 2^32 bytes
        assert_eq!(pixel_at(&data, 4, 8192, 1 << 20, 0, 4096), None);
        assert_eq!(pixel_at(&data, 4, 1, 16, 3, 0), Some([255, 255, 255, 255]));
    }
}
