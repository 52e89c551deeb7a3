use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;

use crate::bounds::BoundsQuery;
use crate::placement::{
    CameraQuery, PlacementSettings, ViewportPositioner, camera_view_for, placement_position,
    should_place, world_to_local,
};

/// Request a single placement for a positioner regardless of the per-tick trigger.
///
/// Removed once the placement has been attempted.
#[derive(Component, Default)]
pub struct PlaceOnce;

/// Move every positioner's target to its viewport anchor when placement is due.
///
/// A positioner missing its camera or target is warned about once, then again only
/// after a successful placement. Targets are borrowed mutably only when written.
#[allow(clippy::too_many_arguments)]
pub fn viewport_placement_system(
    mut commands: Commands,
    mut warned: Local<EntityHashSet>,
    settings: Res<PlacementSettings>,
    positioners: Query<(Entity, &ViewportPositioner, Has<PlaceOnce>)>,
    cameras: CameraQuery,
    bounds: BoundsQuery,
    parents: Query<&ChildOf>,
    parent_globals: Query<&GlobalTransform>,
    mut targets: Query<&mut Transform>,
) {
    for (entity, positioner, place_once) in &positioners {
        if place_once {
            commands.entity(entity).remove::<PlaceOnce>();
        } else if !should_place(settings.simulation_running, positioner.live_edit) {
            continue;
        }

        let camera = camera_view_for(positioner.camera, &cameras);
        let source = positioner.bounds_source(&bounds);
        let target = positioner.target.filter(|target| targets.contains(*target));
        let world = match placement_position(
            camera.as_ref(),
            positioner.anchor(),
            positioner.depth(),
            target.is_some(),
            &source,
        ) {
            Ok(world) => world,
            Err(err) => {
                if warned.insert(entity) {
                    warn!("{err}");
                }
                continue;
            }
        };
        warned.remove(&entity);

        let Some(target) = target else {
            continue;
        };
        let parent = parents
            .get(target)
            .ok()
            .and_then(|child_of| parent_globals.get(child_of.parent()).ok());
        if let Ok(mut transform) = targets.get_mut(target) {
            transform.translation = world_to_local(parent, world);
        }
    }
}
