//! Rendering primitives and the raster surface (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Point`], [`ShapeKind`], [`Outline`]: shape geometry from two points
//! - [`Surface`]: the raster bitmap every tool draws into
//! - [`Snapshot`] / [`EncodedSnapshot`]: captured copies of the surface
//! - [`DirtyTracker`]: damage regions for the host

pub mod color;
pub mod dirty;
pub mod render;
pub mod shape;
pub mod snapshot;
pub mod surface;

pub use color::Color;
pub use dirty::DirtyTracker;
pub use shape::{Outline, Point, ShapeKind};
pub use snapshot::{EncodedSnapshot, Snapshot, SnapshotError};
pub use surface::{Surface, SurfaceError};

pub use color::{BLACK, BLUE, GREEN, RED, TRANSPARENT, WHITE, YELLOW};
