use bevy::camera::primitives::Aabb;
use bevy::prelude::*;

use crate::bounds::{BoundsSource, ColliderShape};

/// Collider shape attached to an entity that can center a viewport placement.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct BoundsCollider(
    /// Shape and local center of the collider.
    pub ColliderShape,
);

/// Read-only view of everything a bounds entity can contribute.
pub type BoundsQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static GlobalTransform,
        Option<&'static Aabb>,
        Option<&'static BoundsCollider>,
    ),
>;

/// World-space center of an entity's `Aabb`, or its origin when it has none.
fn world_bounds_center(transform: &GlobalTransform, aabb: Option<&Aabb>) -> Vec3 {
    match aabb {
        Some(aabb) => transform.transform_point(Vec3::from(aabb.center)),
        None => transform.translation(),
    }
}

/// Build the bounds source for an entity used as a renderer reference.
pub(crate) fn renderer_source(transform: &GlobalTransform, aabb: Option<&Aabb>) -> BoundsSource {
    BoundsSource::Renderer {
        world_center: world_bounds_center(transform, aabb),
        origin: transform.translation(),
    }
}

/// Build the bounds source for an entity used as a collider reference.
pub(crate) fn collider_source(
    transform: &GlobalTransform,
    aabb: Option<&Aabb>,
    collider: Option<&BoundsCollider>,
) -> BoundsSource {
    BoundsSource::Collider {
        shape: collider.map_or(ColliderShape::Other, |collider| collider.0),
        transform: *transform,
        world_center: world_bounds_center(transform, aabb),
    }
}

/// Pick the bounds source for a placement: collider first, then renderer, then none.
///
/// `collider` should already be `None` when collider bounds are disabled. Entities that
/// no longer exist are treated as unset.
pub fn bounds_source_for(
    collider: Option<Entity>,
    renderer: Option<Entity>,
    query: &BoundsQuery,
) -> BoundsSource {
    if let Some((transform, aabb, shape)) = collider.and_then(|entity| query.get(entity).ok()) {
        return collider_source(transform, aabb, shape);
    }
    if let Some((transform, aabb, _)) = renderer.and_then(|entity| query.get(entity).ok()) {
        return renderer_source(transform, aabb);
    }
    BoundsSource::None
}
