use bevy::prelude::*;

mod camera_view;

pub use camera_view::CameraView;

/// Camera collaborator able to convert between viewport space and world space.
///
/// Viewport space is `(x, y, depth)`: `x` and `y` are fractions across the view
/// (0,0 bottom-left, 1,1 top-right) and `depth` is the world-space distance along
/// the camera's forward axis.
pub trait ViewportCamera {
    /// Convert a viewport point `(x, y, depth)` into a world position.
    fn viewport_to_world(&self, viewport: Vec3) -> Vec3;

    /// Convert a world position into a viewport point `(x, y, depth)`.
    fn world_to_viewport(&self, world: Vec3) -> Vec3;
}

/// Anchor and depth recovered from a world position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportPoint {
    /// Fraction across the viewport.
    pub anchor: Vec2,
    /// Distance along the camera forward axis.
    pub depth: f32,
}

impl ViewportPoint {
    pub fn new(anchor: Vec2, depth: f32) -> Self {
        Self { anchor, depth }
    }

    /// Return a copy with the anchor clamped to the unit square; depth is kept.
    pub fn clamped(&self) -> Self {
        Self {
            anchor: self.anchor.clamp(Vec2::ZERO, Vec2::ONE),
            depth: self.depth,
        }
    }
}

impl From<Vec3> for ViewportPoint {
    fn from(viewport: Vec3) -> Self {
        Self::new(viewport.truncate(), viewport.z)
    }
}

/// Drop the Z component of a bounds extent; only X/Y shift the placement.
fn planar_extent(extent: Vec3) -> Vec3 {
    Vec3::new(extent.x, extent.y, 0.0)
}

/// World position whose bounds center (origin + `extent` in X/Y) projects onto `anchor` at `depth`.
pub fn to_world(camera: &impl ViewportCamera, anchor: Vec2, depth: f32, extent: Vec3) -> Vec3 {
    camera.viewport_to_world(anchor.extend(depth)) - planar_extent(extent)
}

/// Inverse of [`to_world`]: anchor and depth at which the bounds center of `world` projects.
pub fn to_viewport(camera: &impl ViewportCamera, world: Vec3, extent: Vec3) -> ViewportPoint {
    camera
        .world_to_viewport(world + planar_extent(extent))
        .into()
}
