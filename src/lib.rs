//! Place entities at a fixed point of a camera's viewport.
//!
//! A [`ViewportPositioner`] stores a normalized anchor and a depth. Each tick the
//! target entity is moved so that its bounds center (renderer `Aabb` or collider)
//! projects onto that anchor.

use bevy::prelude::*;

pub mod bounds;
pub mod placement;
pub mod projection;

pub use bounds::{BoundsCollider, BoundsSource, ColliderShape, resolve_extent};
pub use placement::{
    HandleDrag, PlaceOnce, PlacementError, PlacementSettings, ViewportHandleGizmos,
    ViewportPositioner, apply_placement, drag_handle, handle_position, placement_position,
    should_place, world_to_local,
};
pub use projection::{CameraView, ViewportCamera, ViewportPoint, to_viewport, to_world};

// Default distance from the camera along its forward axis.
pub const DEFAULT_DEPTH: f32 = 3.0;
// Default anchor: the center of the viewport.
pub const DEFAULT_ANCHOR: Vec2 = Vec2::new(0.5, 0.5);
// Default radius of the handle gizmo sphere.
pub const DEFAULT_HANDLE_RADIUS: f32 = 0.05;

/// Registers viewport placement, handle drags and handle gizmos.
pub struct ViewportPlacementPlugin;

impl Plugin for ViewportPlacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlacementSettings>()
            .init_gizmo_group::<ViewportHandleGizmos>()
            .add_systems(
                Update,
                (
                    placement::handle_drag_system,
                    placement::viewport_placement_system,
                )
                    .chain(),
            )
            .add_systems(PostUpdate, placement::handle_gizmo_system);
        debug!("viewport placement systems registered");
    }
}
