//! Camera controller owning pan, zoom, and bounds state.
//!
//! The camera is the only mutable navigation state in the scene. It is
//! mutated by drag, keyboard, and wheel input every tick, and reset
//! wholesale whenever a new data snapshot rebuilds the scene.

use glam::Vec2;

use crate::PanInput;

/// Lowest zoom factor the wheel can reach.
pub const MIN_ZOOM: f32 = 0.5;

/// Highest zoom factor the wheel can reach.
pub const MAX_ZOOM: f32 = 2.0;

/// Zoom change applied per unit of wheel movement.
pub const WHEEL_ZOOM_RATE: f32 = 0.001;

/// Scroll distance in pixels applied per tick for each held pan direction.
pub const KEYBOARD_PAN_STEP: f32 = 8.0;

/// Scroll offset and zoom factor of the viewport over the world.
///
/// `bounds` is the world's pixel extent with origin at (0, 0); panning is
/// clamped so the viewport never leaves it. An axis whose world extent is
/// smaller than the viewport stays centered on the world midpoint instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    center: Vec2,
    zoom: f32,
    bounds: Vec2,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: 1.0,
            bounds: Vec2::ZERO,
        }
    }
}

impl CameraState {
    /// Creates a camera at the default pose: origin center, 1.0 zoom, no
    /// bounds. It stays there until the first data push resets it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// World-pixel position currently centered in the viewport.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// World-pixel extent the camera is clamped to.
    #[must_use]
    pub const fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Resets bounds to the provided world extent, recenters on its
    /// midpoint, and restores 1.0 zoom.
    ///
    /// Runs on every full scene rebuild, which means a live data refresh
    /// silently discards the user's pan and zoom.
    pub fn reset(&mut self, world_extent: Vec2) {
        self.bounds = world_extent;
        self.center = world_extent * 0.5;
        self.zoom = 1.0;
    }

    /// Applies a pointer drag measured in screen pixels.
    ///
    /// The delta is scaled by inverse zoom so dragging feels constant-speed
    /// at every zoom level.
    pub fn drag_by(&mut self, screen_delta: Vec2) {
        self.center -= screen_delta / self.zoom;
    }

    /// Applies one tick of held-key panning at the fixed step, one step per
    /// held direction. The step is not zoom-compensated.
    pub fn pan_step(&mut self, pan: PanInput) {
        if pan.left {
            self.center.x -= KEYBOARD_PAN_STEP;
        }
        if pan.right {
            self.center.x += KEYBOARD_PAN_STEP;
        }
        if pan.up {
            self.center.y -= KEYBOARD_PAN_STEP;
        }
        if pan.down {
            self.center.y += KEYBOARD_PAN_STEP;
        }
    }

    /// Applies wheel movement to the zoom factor, clamped to
    /// [`MIN_ZOOM`]..=[`MAX_ZOOM`]. Zoom is about the camera's current
    /// center; there is no zoom-to-cursor anchoring.
    pub fn apply_wheel(&mut self, wheel_delta_y: f32) {
        self.zoom = (self.zoom - wheel_delta_y * WHEEL_ZOOM_RATE).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Clamps the center so the viewport stays inside the bounds.
    pub fn clamp_to_bounds(&mut self, viewport: Vec2) {
        if self.zoom <= f32::EPSILON {
            return;
        }

        let half_view = viewport / (2.0 * self.zoom);
        self.center.x = clamp_axis(self.center.x, half_view.x, self.bounds.x);
        self.center.y = clamp_axis(self.center.y, half_view.y, self.bounds.y);
    }
}

fn clamp_axis(center: f32, half_view: f32, extent: f32) -> f32 {
    if extent <= half_view * 2.0 {
        extent * 0.5
    } else {
        center.clamp(half_view, extent - half_view)
    }
}
