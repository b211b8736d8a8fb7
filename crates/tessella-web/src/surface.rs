//! [`Surface`] backed by the live document.

use tessella_core::{StackLayers, Surface, Viewport};

use crate::dom::{self, DomError};

/// Padding plus border that `.tessella-frame` adds on each axis. Must
/// match `assets/tessella.css` in the app crate.
pub const FRAME_CHROME: f64 = 22.0;

/// Stacking layers seeded from the page's highest `z-index`, viewport
/// read from the window on demand.
#[derive(Debug, Clone, Copy)]
pub struct DomSurface {
    layers: StackLayers,
}

impl DomSurface {
    /// Scan the document once and start stacking above everything in it.
    #[must_use]
    pub fn new() -> Self {
        let highest = max_z_index().unwrap_or_else(|err| {
            tracing::warn!(%err, "could not scan z-index, stacking from 0");
            0
        });
        tracing::debug!(highest, "stacking layers seeded");
        Self {
            layers: StackLayers::above(highest),
        }
    }
}

impl Default for DomSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for DomSurface {
    fn next_stack_layer(&mut self) -> u32 {
        self.layers.take()
    }

    fn viewport(&self) -> Viewport {
        read_viewport().unwrap_or_else(|err| {
            tracing::warn!(%err, "viewport unavailable");
            Viewport::default()
        })
    }

    fn frame_chrome(&self) -> f64 {
        FRAME_CHROME
    }
}

/// Highest non-negative computed `z-index` under `<body>`. `auto` and
/// negative values are ignored.
fn max_z_index() -> Result<u32, DomError> {
    let window = dom::window()?;
    let body = dom::document()?.body().ok_or(DomError::NoBody)?;
    let elements = body.get_elements_by_tag_name("*");

    let mut highest = 0;
    for i in 0..elements.length() {
        let Some(element) = elements.item(i) else {
            continue;
        };
        let Some(style) = window.get_computed_style(&element)? else {
            continue;
        };
        if let Ok(z) = style.get_property_value("z-index")?.parse::<u32>() {
            highest = highest.max(z);
        }
    }
    Ok(highest)
}

fn read_viewport() -> Result<Viewport, DomError> {
    let window = dom::window()?;
    Ok(Viewport {
        width: window.inner_width()?.as_f64().unwrap_or(0.0),
        height: window.inner_height()?.as_f64().unwrap_or(0.0),
        left: window.scroll_x()?,
        top: window.scroll_y()?,
    })
}
