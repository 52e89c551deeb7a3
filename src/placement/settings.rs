use bevy::prelude::*;

use crate::DEFAULT_HANDLE_RADIUS;

#[derive(Resource, Clone, Debug)]
/// Global switches for viewport placement and its handle gizmos.
pub struct PlacementSettings {
    /// Whether the simulation is running; continuous placement is active while set.
    pub simulation_running: bool,
    /// Whether handle gizmos are drawn for positioners.
    pub draw_handles: bool,
    /// Radius of the handle sphere in world units.
    pub handle_radius: f32,
    /// Color of the handle sphere.
    pub handle_color: Color,
    /// Color of the line from the camera to the handle.
    pub sight_line_color: Color,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            simulation_running: true,
            draw_handles: true,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            handle_color: Color::srgb(1.0, 0.0, 0.0),
            sight_line_color: Color::srgb(1.0, 1.0, 0.0),
        }
    }
}
