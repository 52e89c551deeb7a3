use bevy::prelude::*;

mod source;

pub use source::{BoundsCollider, BoundsQuery, bounds_source_for};

/// Collider shapes understood by the extent resolver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    /// Box collider with a local-space center.
    Cuboid { center: Vec3 },
    /// Sphere collider with a local-space center.
    Sphere { center: Vec3 },
    /// Capsule collider with a local-space center.
    Capsule { center: Vec3 },
    /// Mesh collider; `local_bounds` is `(min, max)` of the mesh in local space, if a mesh is attached.
    Mesh { local_bounds: Option<(Vec3, Vec3)> },
    /// Any other shape; resolved from its world bounding box.
    Other,
}

impl ColliderShape {
    /// Local-space center declared by the shape, or `None` when only world bounds are known.
    pub fn local_center(&self) -> Option<Vec3> {
        match *self {
            Self::Cuboid { center } | Self::Sphere { center } | Self::Capsule { center } => {
                Some(center)
            }
            Self::Mesh {
                local_bounds: Some((min, max)),
            } => Some((min + max) * 0.5),
            Self::Mesh { local_bounds: None } | Self::Other => None,
        }
    }
}

/// Geometry used to center a placed object on its visual bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BoundsSource {
    /// Place the origin itself.
    #[default]
    None,
    /// Renderer bounding box: world-space center plus the renderer's origin.
    Renderer { world_center: Vec3, origin: Vec3 },
    /// Collider shape with its world transform and world bounding-box center.
    Collider {
        shape: ColliderShape,
        transform: GlobalTransform,
        world_center: Vec3,
    },
}

/// Offset from an object's origin to its bounds center, in world space.
pub fn resolve_extent(source: &BoundsSource) -> Vec3 {
    match source {
        BoundsSource::None => Vec3::ZERO,
        BoundsSource::Renderer {
            world_center,
            origin,
        } => *world_center - *origin,
        BoundsSource::Collider {
            shape,
            transform,
            world_center,
        } => {
            let origin = transform.translation();
            match shape.local_center() {
                Some(local) => transform.transform_point(local) - origin,
                None => *world_center - origin,
            }
        }
    }
}
