use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_viewport_anchor::{
    HandleDrag, PlacementSettings, ViewportPlacementPlugin, ViewportPositioner,
};

// Anchor change per second while an arrow key is held.
const ANCHOR_SPEED: f32 = 0.4;
// Depth change per second while W/S is held.
const DEPTH_SPEED: f32 = 2.0;

// App entry point and system registration.
fn main() {
    App::new()
        .add_plugins((DefaultPlugins, ViewportPlacementPlugin))
        .add_systems(Startup, setup_scene)
        .add_systems(Update, (anchor_keys_system, toggle_keys_system, cursor_drag_system))
        .run();
}

// Spawn a camera, a light, a floor and an off-center cube pinned to the viewport.
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let camera = commands
        .spawn((
            bevy::camera::Camera3d::default(),
            Transform::from_xyz(0.0, 1.5, 6.0).looking_at(Vec3::new(0.0, 0.5, 0.0), Vec3::Y),
        ))
        .id();

    commands.spawn((
        bevy::light::DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        bevy::mesh::Mesh3d(meshes.add(Plane3d::default().mesh().size(12.0, 12.0))),
        bevy::pbr::MeshMaterial3d(materials.add(Color::srgb(0.3, 0.35, 0.3))),
        Transform::IDENTITY,
    ));

    // Mesh offset from its origin so bounds centering is visible.
    let mesh = Mesh::from(Cuboid::new(0.6, 0.6, 0.6)).translated_by(Vec3::new(0.4, 0.3, 0.0));
    let cube = commands
        .spawn((
            bevy::mesh::Mesh3d(meshes.add(mesh)),
            bevy::pbr::MeshMaterial3d(materials.add(Color::srgb(0.8, 0.4, 0.2))),
            Transform::IDENTITY,
        ))
        .id();

    commands.spawn(
        ViewportPositioner::new(camera, cube)
            .with_renderer(cube)
            .with_anchor(Vec2::new(0.75, 0.7), 5.0),
    );
}

// Move the anchor with the arrow keys and the depth with W/S.
fn anchor_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut positioners: Query<&mut ViewportPositioner>,
) {
    let mut delta = Vec3::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        delta.x -= ANCHOR_SPEED;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        delta.x += ANCHOR_SPEED;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        delta.y -= ANCHOR_SPEED;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        delta.y += ANCHOR_SPEED;
    }
    if keys.pressed(KeyCode::KeyW) {
        delta.z += DEPTH_SPEED;
    }
    if keys.pressed(KeyCode::KeyS) {
        delta.z -= DEPTH_SPEED;
    }
    if delta == Vec3::ZERO {
        return;
    }
    let step = delta * time.delta_secs();
    for mut positioner in &mut positioners {
        let anchor = positioner.anchor() + step.truncate();
        let depth = positioner.depth() + step.z;
        positioner.set_viewport_anchor(anchor, depth);
    }
}

// Space pauses the simulation, L toggles live editing, G toggles handle gizmos.
fn toggle_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<PlacementSettings>,
    mut positioners: Query<&mut ViewportPositioner>,
) {
    if keys.just_pressed(KeyCode::Space) {
        settings.simulation_running = !settings.simulation_running;
        info!("simulation running: {}", settings.simulation_running);
    }
    if keys.just_pressed(KeyCode::KeyG) {
        settings.draw_handles = !settings.draw_handles;
    }
    if keys.just_pressed(KeyCode::KeyL) {
        for mut positioner in &mut positioners {
            positioner.live_edit = !positioner.live_edit;
            info!("live edit: {}", positioner.live_edit);
        }
    }
}

// While the left mouse button is held, drag the handle across the plane facing the camera.
fn cursor_drag_system(
    mut commands: Commands,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    positioners: Query<(Entity, &ViewportPositioner)>,
) {
    if !buttons.pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    for (entity, positioner) in &positioners {
        let Some(Ok((camera, camera_transform))) = positioner.camera.map(|c| cameras.get(c))
        else {
            continue;
        };
        let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
            continue;
        };
        // Keep the current depth: intersect with the plane at that distance.
        let forward = camera_transform.forward();
        let plane_origin = camera_transform.translation() + forward.as_vec3() * positioner.depth();
        let Some(distance) = ray.intersect_plane(plane_origin, InfinitePlane3d::new(forward))
        else {
            continue;
        };
        commands
            .entity(entity)
            .insert(HandleDrag(ray.get_point(distance)));
    }
}
