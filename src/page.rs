//! Host page model: the canvas elements a widget can attach to.

use std::collections::HashMap;

/// Pixel size of a canvas element as laid out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSize {
    pub width: u32,
    pub height: u32,
}

impl ElementSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Canvas elements known to the host, keyed by element id.
#[derive(Debug, Default)]
pub struct Page {
    canvases: HashMap<String, ElementSize>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-lays-out) a canvas element.
    pub fn insert_canvas(&mut self, id: impl Into<String>, size: ElementSize) {
        self.canvases.insert(id.into(), size);
    }

    pub fn canvas(&self, id: &str) -> Option<ElementSize> {
        self.canvases.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.canvases.contains_key(id)
    }

    /// Looks up the canvas `id`, creating it with `default_size` when the page
    /// has no such element.
    pub fn get_or_create_canvas(&mut self, id: &str, default_size: ElementSize) -> ElementSize {
        *self.canvases.entry(id.to_string()).or_insert_with(|| {
            log::debug!(
                "Creating canvas element '{}' at {}x{}",
                id,
                default_size.width,
                default_size.height
            );
            default_size
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_canvas_keeps_its_size() {
        let mut page = Page::new();
        page.insert_canvas("board", ElementSize::new(320, 200));
        let size = page.get_or_create_canvas("board", ElementSize::new(800, 600));
        assert_eq!(size, ElementSize::new(320, 200));
    }

    #[test]
    fn missing_canvas_is_created() {
        let mut page = Page::new();
        assert!(!page.contains("board"));
        let size = page.get_or_create_canvas("board", ElementSize::new(800, 600));
        assert_eq!(size, ElementSize::new(800, 600));
        assert_eq!(page.canvas("board"), Some(size));
    }
}
