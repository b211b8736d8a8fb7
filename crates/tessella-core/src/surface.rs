//! The narrow window onto the host environment.
//!
//! The core never touches the document directly. Stacking order and
//! viewport geometry come from a [`Surface`], which the browser crate
//! implements against the DOM and tests implement with fixed values.

/// Visible part of the page, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Horizontal scroll offset.
    pub left: f64,
    /// Vertical scroll offset.
    pub top: f64,
}

impl Viewport {
    /// Horizontal centre in page coordinates.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical centre in page coordinates.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Host services the lightbox needs.
pub trait Surface {
    /// A stacking layer above everything currently on the page. Each call
    /// returns a higher layer than the last.
    fn next_stack_layer(&mut self) -> u32;

    /// Current viewport geometry.
    fn viewport(&self) -> Viewport;

    /// Extra size the lightbox frame adds on each axis (padding plus
    /// border, both sides).
    fn frame_chrome(&self) -> f64;
}

/// Monotonic stacking-layer counter seeded from the highest layer found
/// on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackLayers {
    next: u32,
}

impl StackLayers {
    /// Start above `max_existing`.
    #[must_use]
    pub const fn above(max_existing: u32) -> Self {
        Self {
            next: max_existing.saturating_add(1),
        }
    }

    /// Take the next layer.
    pub const fn take(&mut self) -> u32 {
        let layer = self.next;
        self.next = self.next.saturating_add(1);
        layer
    }
}

/// Fixed-geometry surface for tests and headless tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticSurface {
    pub layers: StackLayers,
    pub viewport: Viewport,
    pub chrome: f64,
}

impl StaticSurface {
    #[must_use]
    pub const fn new(viewport: Viewport, chrome: f64) -> Self {
        Self {
            layers: StackLayers::above(0),
            viewport,
            chrome,
        }
    }
}

impl Surface for StaticSurface {
    fn next_stack_layer(&mut self) -> u32 {
        self.layers.take()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn frame_chrome(&self) -> f64 {
        self.chrome
    }
}
