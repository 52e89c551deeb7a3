use bevy::math::Isometry3d;
use bevy::prelude::*;

use crate::bounds::{BoundsQuery, resolve_extent};
use crate::placement::{CameraQuery, PlacementSettings, ViewportPositioner, camera_view_for};
use crate::projection::{CameraView, ViewportCamera, ViewportPoint, to_viewport, to_world};

/// Gizmo group for positioner handles; toggle through `GizmoConfigStore`.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ViewportHandleGizmos;

/// World position the handle of a positioner was dragged to, set by an editing tool.
///
/// Consumed by [`handle_drag_system`].
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct HandleDrag(pub Vec3);

/// Handle location: the placed origin shifted back onto the bounds center.
pub fn handle_position(
    camera: &impl ViewportCamera,
    anchor: Vec2,
    depth: f32,
    extent: Vec3,
) -> Vec3 {
    to_world(camera, anchor, depth, extent) + extent
}

/// Anchor and depth for a handle dragged to `dragged`, with the anchor clamped to the viewport.
pub fn drag_handle(camera: &impl ViewportCamera, dragged: Vec3, extent: Vec3) -> ViewportPoint {
    to_viewport(camera, dragged - extent, extent).clamped()
}

impl ViewportPositioner {
    /// Store the anchor/depth recovered from a handle drag and return it.
    pub fn apply_handle_drag(
        &mut self,
        camera: &impl ViewportCamera,
        dragged: Vec3,
        extent: Vec3,
    ) -> ViewportPoint {
        let point = drag_handle(camera, dragged, extent);
        self.set_viewport_anchor(point.anchor, point.depth);
        point
    }
}

/// Resolve camera and extent for a positioner, or `None` without a camera.
fn handle_context(
    positioner: &ViewportPositioner,
    cameras: &CameraQuery,
    bounds: &BoundsQuery,
) -> Option<(CameraView, Vec3)> {
    let camera = camera_view_for(positioner.camera, cameras)?;
    let extent = resolve_extent(&positioner.bounds_source(bounds));
    Some((camera, extent))
}

/// Apply pending handle drags to positioner anchors.
pub fn handle_drag_system(
    mut commands: Commands,
    mut positioners: Query<(Entity, &mut ViewportPositioner, &HandleDrag)>,
    cameras: CameraQuery,
    bounds: BoundsQuery,
) {
    for (entity, mut positioner, drag) in &mut positioners {
        commands.entity(entity).remove::<HandleDrag>();
        let Some((camera, extent)) = handle_context(&positioner, &cameras, &bounds) else {
            continue;
        };
        let point = positioner.apply_handle_drag(&camera, drag.0, extent);
        debug!(
            "viewport anchor moved to ({:.3}, {:.3}) at depth {:.3}",
            point.anchor.x, point.anchor.y, point.depth
        );
    }
}

/// Draw each positioner's handle and a sight line from its camera.
pub fn handle_gizmo_system(
    settings: Res<PlacementSettings>,
    mut gizmos: Gizmos<ViewportHandleGizmos>,
    positioners: Query<&ViewportPositioner>,
    cameras: CameraQuery,
    bounds: BoundsQuery,
) {
    if !settings.draw_handles {
        return;
    }
    for positioner in &positioners {
        let Some((camera, extent)) = handle_context(positioner, &cameras, &bounds) else {
            continue;
        };
        let handle = handle_position(&camera, positioner.anchor(), positioner.depth(), extent);
        gizmos.sphere(
            Isometry3d::from_translation(handle),
            settings.handle_radius,
            settings.handle_color,
        );
        gizmos.line(camera.position(), handle, settings.sight_line_color);
    }
}
