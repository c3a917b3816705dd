//! Pan and zoom state mapping screen pixels to world coordinates.
//!
//! `screen = world * zoom + pan`. Pan is kept in screen pixels, so dragging
//! moves content by exactly the pointer delta at any zoom level.

use crate::geometry::{Point, Size};
use crate::persist::{self, ViewportStore, PAN_OFFSET_KEY, ZOOM_LEVEL_KEY};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Multiplicative factor applied per wheel notch.
pub const ZOOM_SENSITIVITY: f64 = 1.1;

/// Additive step used by the zoom in/out controls.
pub const ZOOM_STEP: f64 = 0.1;

/// Distance in screen pixels moved by one arrow key press.
pub const KEYBOARD_PAN_STEP: f64 = 20.0;

/// Clamp `zoom` into `[MIN_ZOOM, MAX_ZOOM]`.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// The view transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pan: Point,
    zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan: Point::ORIGIN,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(pan: Point, zoom: f64) -> Self {
        let pan = if pan.x.is_finite() && pan.y.is_finite() {
            pan
        } else {
            Point::ORIGIN
        };
        Self {
            pan,
            zoom: clamp_zoom(zoom),
        }
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom as a whole percentage, e.g. `110` for 1.1.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.pan.x += dx;
        self.pan.y += dy;
    }

    /// Wheel zoom: one notch in the direction of `delta`, keeping `anchor` fixed.
    ///
    /// Positive `delta` zooms in. A zero delta is a no-op.
    pub fn zoom_by(&mut self, delta: f64, anchor: Point) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let factor = if delta > 0.0 {
            ZOOM_SENSITIVITY
        } else {
            1.0 / ZOOM_SENSITIVITY
        };
        self.set_zoom_at(self.zoom * factor, anchor);
    }

    /// Control-button zoom: add `step` to the zoom level, keeping `anchor` fixed.
    pub fn zoom_step(&mut self, step: f64, anchor: Point) {
        if !step.is_finite() {
            return;
        }
        self.set_zoom_at(self.zoom + step, anchor);
    }

    /// Set the zoom level so the world point under `anchor` stays under it.
    pub fn set_zoom_at(&mut self, zoom: f64, anchor: Point) {
        if !(anchor.x.is_finite() && anchor.y.is_finite()) {
            return;
        }
        let world = self.screen_to_world(anchor);
        self.zoom = clamp_zoom(zoom);
        self.pan = Point::new(anchor.x - world.x * self.zoom, anchor.y - world.y * self.zoom);
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.pan.x) / self.zoom,
            (screen.y - self.pan.y) / self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.pan.x,
            world.y * self.zoom + self.pan.y,
        )
    }

    /// Pan so `world` lands at the centre of a surface of `surface` size.
    pub fn center_on(&mut self, world: Point, surface: Size) {
        let center = surface.center();
        self.pan = Point::new(center.x - world.x * self.zoom, center.y - world.y * self.zoom);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Write pan and zoom to `store`. Failures are logged, not returned.
    pub fn persist<S: ViewportStore + ?Sized>(&self, store: &mut S) {
        persist::save_json(store, PAN_OFFSET_KEY, &self.pan);
        if let Err(err) = store.save(ZOOM_LEVEL_KEY, &self.zoom.to_string()) {
            tracing::warn!(error = %err, "failed to persist zoom level");
        }
    }

    /// Read pan and zoom from `store`, falling back to defaults per field.
    pub fn restore<S: ViewportStore + ?Sized>(store: &S) -> Self {
        let pan: Point = persist::load_json(store, PAN_OFFSET_KEY).unwrap_or_default();
        let zoom = match store.load(ZOOM_LEVEL_KEY) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(zoom) if zoom.is_finite() => zoom,
                _ => {
                    tracing::warn!(value = %raw, "ignoring malformed zoom level");
                    1.0
                }
            },
            None => 1.0,
        };
        Self::new(pan, zoom)
    }
}
