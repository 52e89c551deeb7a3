use bevy::prelude::*;

use crate::bounds::{BoundsQuery, BoundsSource, bounds_source_for, resolve_extent};
use crate::projection::{CameraView, ViewportCamera, to_world};
use crate::{DEFAULT_ANCHOR, DEFAULT_DEPTH};

mod handle;
mod settings;
mod systems;
#[cfg(test)]
mod test_support;

pub use handle::{
    HandleDrag, ViewportHandleGizmos, drag_handle, handle_drag_system, handle_gizmo_system,
    handle_position,
};
pub use settings::PlacementSettings;
pub use systems::{PlaceOnce, viewport_placement_system};

/// Reasons a placement was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("ViewportPositioner: target transform is missing")]
    MissingTarget,
    #[error("ViewportPositioner: camera is missing")]
    MissingCamera,
}

/// Read-only camera data needed to build a [`CameraView`].
pub type CameraQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static GlobalTransform,
        &'static Projection,
        Option<&'static Camera>,
    ),
>;

/// Resolve a camera entity into a [`CameraView`]; missing entities yield `None`.
pub fn camera_view_for(camera: Option<Entity>, cameras: &CameraQuery) -> Option<CameraView> {
    let (transform, projection, live) = cameras.get(camera?).ok()?;
    CameraView::from_camera(transform, projection, live)
}

/// Return whether continuous placement should run this tick.
pub fn should_place(simulation_running: bool, live_edit: bool) -> bool {
    simulation_running || live_edit
}

/// World position for a target so its bounds center sits at `anchor`/`depth` in the camera's viewport.
///
/// Fails with the first missing collaborator, target before camera. Nothing is logged.
pub fn placement_position<C: ViewportCamera>(
    camera: Option<&C>,
    anchor: Vec2,
    depth: f32,
    has_target: bool,
    bounds: &BoundsSource,
) -> Result<Vec3, PlacementError> {
    if !has_target {
        return Err(PlacementError::MissingTarget);
    }
    let camera = camera.ok_or(PlacementError::MissingCamera)?;
    Ok(to_world(camera, anchor, depth, resolve_extent(bounds)))
}

/// Express a world position in the local space of `parent`, or keep it for root entities.
pub fn world_to_local(parent: Option<&GlobalTransform>, world: Vec3) -> Vec3 {
    match parent {
        Some(parent) => parent.affine().inverse().transform_point3(world),
        None => world,
    }
}

/// Place `target` so its bounds center sits at `anchor`/`depth` in the camera's viewport.
///
/// `parent` is the world transform of the target's parent, if it has one; the written
/// translation is converted so the target lands at the world position either way. A
/// missing target or camera logs one warning and leaves everything untouched. On
/// success the translation is written once and the world position is returned.
pub fn apply_placement<C: ViewportCamera>(
    camera: Option<&C>,
    anchor: Vec2,
    depth: f32,
    target: Option<&mut Transform>,
    parent: Option<&GlobalTransform>,
    bounds: &BoundsSource,
) -> Result<Vec3, PlacementError> {
    let world = placement_position(camera, anchor, depth, target.is_some(), bounds)
        .inspect_err(|err| warn!("{err}"))?;
    if let Some(target) = target {
        target.translation = world_to_local(parent, world);
    }
    Ok(world)
}

/// Keeps a target entity at a fixed viewport anchor and depth of a camera.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct ViewportPositioner {
    /// Camera whose viewport defines the placement.
    pub camera: Option<Entity>,
    /// Entity whose `Transform` is moved.
    pub target: Option<Entity>,
    /// Optional entity whose `Aabb` centers the target.
    pub reference_renderer: Option<Entity>,
    /// Optional entity whose collider centers the target; used only with `use_collider_bounds`.
    pub reference_collider: Option<Entity>,
    /// Prefer collider bounds over renderer bounds.
    pub use_collider_bounds: bool,
    /// Keep placing while the simulation is paused.
    pub live_edit: bool,
    anchor: Vec2,
    depth: f32,
}

impl Default for ViewportPositioner {
    fn default() -> Self {
        Self {
            camera: None,
            target: None,
            reference_renderer: None,
            reference_collider: None,
            use_collider_bounds: false,
            live_edit: false,
            anchor: DEFAULT_ANCHOR,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl ViewportPositioner {
    /// Build a positioner for `target` in `camera`'s viewport at the default anchor and depth.
    pub fn new(camera: Entity, target: Entity) -> Self {
        Self {
            camera: Some(camera),
            target: Some(target),
            ..default()
        }
    }

    pub fn with_renderer(mut self, renderer: Entity) -> Self {
        self.reference_renderer = Some(renderer);
        self
    }

    /// Center on `collider` and enable collider bounds.
    pub fn with_collider(mut self, collider: Entity) -> Self {
        self.reference_collider = Some(collider);
        self.use_collider_bounds = true;
        self
    }

    pub fn with_live_edit(mut self, live_edit: bool) -> Self {
        self.live_edit = live_edit;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2, depth: f32) -> Self {
        self.set_viewport_anchor(anchor, depth);
        self
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Store a new anchor and depth as given; no clamping is applied.
    pub fn set_viewport_anchor(&mut self, anchor: Vec2, depth: f32) {
        self.anchor = anchor;
        self.depth = depth;
    }

    /// Bounds source selected by this positioner's references.
    pub fn bounds_source(&self, bounds: &BoundsQuery) -> BoundsSource {
        let collider = self
            .reference_collider
            .filter(|_| self.use_collider_bounds);
        bounds_source_for(collider, self.reference_renderer, bounds)
    }
}
