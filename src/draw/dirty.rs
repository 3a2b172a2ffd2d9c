//! Damage tracking between host repaints.
//!
//! The widget records every rectangle it touches; the host drains them to
//! decide which parts of the surface to re-blit.

use crate::util::Rect;

/// Tracks dirty rectangles accumulated between repaints.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty, discarding accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle unless the whole surface is already dirty.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds a dirty rectangle when present, otherwise falls back to full damage.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        match rect {
            Some(rect) => self.mark_rect(rect),
            None => self.mark_full(),
        }
    }

    /// Returns true when nothing has been marked since the last drain.
    pub fn is_clean(&self) -> bool {
        !self.force_full && self.regions.is_empty()
    }

    /// Drains the regions gathered so far, clipped to the surface size.
    ///
    /// Full damage comes back as a single rectangle covering the surface.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if std::mem::take(&mut self.force_full) {
            self.regions.clear();
            return Rect::new(0, 0, width, height).into_iter().collect();
        }
        self.regions
            .drain(..)
            .filter_map(|rect| rect.clipped_to(width, height))
            .collect()
    }
}
