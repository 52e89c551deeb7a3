use bevy::math::Affine3A;
use bevy::prelude::*;

use crate::projection::ViewportCamera;

/// Snapshot of a camera's placement and projection used for viewport conversions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// Camera-to-world transform.
    world_from_view: Affine3A,
    /// World-to-camera transform.
    view_from_world: Affine3A,
    /// Projection matrix (Bevy reverse-Z convention).
    clip_from_view: Mat4,
    /// Inverse projection matrix.
    view_from_clip: Mat4,
}

impl CameraView {
    /// NDC depth of the first unprojection sample (near plane under reverse-Z).
    const NEAR_SAMPLE_NDC_Z: f32 = 1.0;
    /// NDC depth of the second unprojection sample.
    const MID_SAMPLE_NDC_Z: f32 = 0.5;

    /// Build a view from a camera world transform and a `clip_from_view` matrix.
    pub fn new(transform: &GlobalTransform, clip_from_view: Mat4) -> Self {
        let world_from_view = transform.affine();
        Self {
            world_from_view,
            view_from_world: world_from_view.inverse(),
            clip_from_view,
            view_from_clip: clip_from_view.inverse(),
        }
    }

    /// Build a view from a Bevy `Projection`, or `None` for custom projections.
    pub fn from_projection(transform: &GlobalTransform, projection: &Projection) -> Option<Self> {
        Self::from_parts(transform, None, Self::clip_from_projection(projection))
    }

    /// Build a view from a live camera.
    ///
    /// Once the camera has been laid out against its render target, its own
    /// `clip_from_view` is used, so custom projections and any adjustments Bevy
    /// applied are honored. Before that the matrix is rebuilt from `projection`.
    pub fn from_camera(
        transform: &GlobalTransform,
        projection: &Projection,
        camera: Option<&Camera>,
    ) -> Option<Self> {
        let computed = camera
            .filter(|camera| camera.physical_target_size().is_some())
            .map(Camera::clip_from_view);
        Self::from_parts(transform, computed, Self::clip_from_projection(projection))
    }

    fn from_parts(
        transform: &GlobalTransform,
        computed: Option<Mat4>,
        rebuilt: Option<Mat4>,
    ) -> Option<Self> {
        computed
            .or(rebuilt)
            .map(|clip_from_view| Self::new(transform, clip_from_view))
    }

    /// `clip_from_view` as Bevy builds it for the stock projections.
    fn clip_from_projection(projection: &Projection) -> Option<Mat4> {
        match projection {
            Projection::Perspective(perspective) => Some(Mat4::perspective_infinite_reverse_rh(
                perspective.fov,
                perspective.aspect_ratio,
                perspective.near,
            )),
            Projection::Orthographic(ortho) => Some(Mat4::orthographic_rh(
                ortho.area.min.x,
                ortho.area.max.x,
                ortho.area.min.y,
                ortho.area.max.y,
                ortho.far,
                ortho.near,
            )),
            _ => None,
        }
    }

    /// World-space camera position.
    pub fn position(&self) -> Vec3 {
        self.world_from_view.translation.into()
    }

    /// Unproject an NDC point (x, y at a given NDC depth) into view space.
    fn unproject(&self, ndc_xy: Vec2, ndc_z: f32) -> Vec3 {
        self.view_from_clip
            .project_point3(ndc_xy.extend(ndc_z))
    }
}

impl ViewportCamera for CameraView {
    fn viewport_to_world(&self, viewport: Vec3) -> Vec3 {
        let ndc_xy = viewport.truncate() * 2.0 - Vec2::ONE;
        let near = self.unproject(ndc_xy, Self::NEAR_SAMPLE_NDC_Z);
        let mid = self.unproject(ndc_xy, Self::MID_SAMPLE_NDC_Z);
        // Walk the view ray until its forward distance (-z) equals the requested depth.
        let t = (-viewport.z - near.z) / (mid.z - near.z);
        let view_point = near + (mid - near) * t;
        self.world_from_view.transform_point3(view_point)
    }

    fn world_to_viewport(&self, world: Vec3) -> Vec3 {
        let view_point = self.view_from_world.transform_point3(world);
        let ndc = self.clip_from_view.project_point3(view_point);
        let viewport = (ndc.truncate() + Vec2::ONE) * 0.5;
        viewport.extend(-view_point.z)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    use bevy::prelude::*;

    use super::*;

    /// Camera at `position` looking down world `+Z` with a square 90 degree frustum.
    fn forward_z_camera(position: Vec3) -> CameraView {
        let transform = Transform::from_translation(position).looking_to(Vec3::Z, Vec3::Y);
        let projection = Projection::Perspective(PerspectiveProjection {
            fov: FRAC_PI_2,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 1000.0,
            ..default()
        });
        CameraView::from_projection(&GlobalTransform::from(transform), &projection)
            .expect("perspective projection")
    }

    /// Verify viewport center at a given depth lies on the camera forward axis.
    #[test]
    fn viewport_center_projects_along_forward_axis() {
        let camera = forward_z_camera(Vec3::ZERO);
        let world = camera.viewport_to_world(Vec3::new(0.5, 0.5, 3.0));
        assert!(world.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-4), "{world}");
    }

    /// Verify a 90 degree square frustum reaches one unit sideways per unit of depth at the edge.
    #[test]
    fn viewport_edges_follow_field_of_view() {
        let camera = CameraView::from_projection(
            &GlobalTransform::IDENTITY,
            &Projection::Perspective(PerspectiveProjection {
                fov: FRAC_PI_2,
                aspect_ratio: 1.0,
                near: 0.1,
                far: 1000.0,
                ..default()
            }),
        )
        .expect("perspective projection");

        // Identity camera looks down -Z with +X to the right and +Y up.
        let top_right = camera.viewport_to_world(Vec3::new(1.0, 1.0, 2.0));
        assert!(top_right.abs_diff_eq(Vec3::new(2.0, 2.0, -2.0), 1e-4), "{top_right}");

        let back = camera.world_to_viewport(top_right);
        assert!(back.abs_diff_eq(Vec3::new(1.0, 1.0, 2.0), 1e-4), "{back}");
    }

    /// Verify depth zero resolves to the camera position under perspective.
    #[test]
    fn zero_depth_lands_on_camera_origin() {
        let camera = forward_z_camera(Vec3::new(1.0, 2.0, 3.0));
        let world = camera.viewport_to_world(Vec3::new(0.2, 0.9, 0.0));
        assert!(world.abs_diff_eq(camera.position(), 1e-4), "{world}");
    }

    /// Verify orthographic views keep the same XY footprint at every depth.
    #[test]
    fn orthographic_view_ignores_depth_for_xy() {
        let mut ortho = OrthographicProjection::default_3d();
        ortho.area = Rect::new(-4.0, -2.0, 4.0, 2.0);
        let camera = CameraView::from_projection(
            &GlobalTransform::IDENTITY,
            &Projection::Orthographic(ortho),
        )
        .expect("orthographic projection");

        let near = camera.viewport_to_world(Vec3::new(1.0, 0.0, 1.0));
        let far = camera.viewport_to_world(Vec3::new(1.0, 0.0, 50.0));
        assert!(near.abs_diff_eq(Vec3::new(4.0, -2.0, -1.0), 1e-3), "{near}");
        assert!(far.abs_diff_eq(Vec3::new(4.0, -2.0, -50.0), 1e-3), "{far}");

        let back = camera.world_to_viewport(far);
        assert!(back.abs_diff_eq(Vec3::new(1.0, 0.0, 50.0), 1e-3), "{back}");
    }

    /// Verify a camera's computed matrix wins over the one rebuilt from its projection.
    #[test]
    fn computed_matrix_takes_precedence() {
        let transform = GlobalTransform::from_xyz(0.0, 1.0, 0.0);
        let computed = Mat4::perspective_infinite_reverse_rh(FRAC_PI_3, 2.0, 0.1);
        let rebuilt = Mat4::perspective_infinite_reverse_rh(FRAC_PI_2, 1.0, 0.1);

        let view = CameraView::from_parts(&transform, Some(computed), Some(rebuilt));
        assert_eq!(view, Some(CameraView::new(&transform, computed)));
    }

    /// Verify a custom projection resolves only through the camera's computed matrix.
    #[test]
    fn custom_projection_needs_computed_matrix() {
        let transform = GlobalTransform::IDENTITY;
        let computed = Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, 50.0, 0.0);

        let view = CameraView::from_parts(&transform, Some(computed), None)
            .expect("computed projection");
        let world = view.viewport_to_world(Vec3::new(1.0, 1.0, 5.0));
        assert!(world.abs_diff_eq(Vec3::new(1.0, 1.0, -5.0), 1e-3), "{world}");

        assert_eq!(CameraView::from_parts(&transform, None, None), None);
    }

    /// Verify a camera not yet laid out against a target falls back to its projection.
    #[test]
    fn unlaid_camera_rebuilds_from_projection() {
        let transform = GlobalTransform::from_xyz(2.0, 0.0, -1.0);
        let projection = Projection::Perspective(PerspectiveProjection {
            fov: FRAC_PI_3,
            aspect_ratio: 1.5,
            ..default()
        });
        let camera = Camera::default();
        assert!(camera.physical_target_size().is_none());

        let view = CameraView::from_camera(&transform, &projection, Some(&camera));
        assert_eq!(view, CameraView::from_projection(&transform, &projection));
        assert!(view.is_some());
    }
}
