use crate::core::geometry::Ray;
use crate::core::glam::{Mat4, Vec3, Vec3A};

use std::f32::consts::FRAC_PI_2;

const FOCAL_LENGTH: f32 = 1.0;
const VIEWPORT_HEIGHT: f32 = 2.0;

/// A pinhole camera that generates one ray per pixel through a viewport one unit in front of it.
///
/// With the identity pose, the camera sits at the origin looking down -Z with +Y up. The viewport spans a 90 degree
/// vertical field of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    pub center: Vec3A,
    /// World position of the center of pixel (0, 0), jitter included.
    pub first_pixel_world_pos: Vec3A,
    pub pixel_delta_u: Vec3A,
    pub pixel_delta_v: Vec3A,
    pub max_bounce_depth: u32,
    view_projection: Mat4,
}

impl Camera {
    /// `jitter` shifts every pixel by `jitter / image_height` world units along both viewport axes (at unit focal
    /// length). The projection returned by [`Camera::view_projection`] is shifted by the same amount.
    pub fn new(
        image_width: u32,
        image_height: u32,
        jitter: f32,
        camera_to_world: Mat4,
        max_bounce_depth: u32,
        clip_planes: [f32; 2],
    ) -> Self {
        let width = image_width.max(1) as f32;
        let height = image_height.max(1) as f32;
        let aspect = width / height;
        let viewport_width = VIEWPORT_HEIGHT * aspect;

        // Camera space.
        let viewport_u = Vec3::new(viewport_width, 0.0, 0.0);
        let viewport_v = Vec3::new(0.0, -VIEWPORT_HEIGHT, 0.0);
        let pixel_delta_u = viewport_u / width;
        let pixel_delta_v = viewport_v / height;
        let upper_left = Vec3::new(0.0, 0.0, -FOCAL_LENGTH) - 0.5 * (viewport_u + viewport_v);
        let j = jitter / height;
        let first_pixel = upper_left + 0.5 * (pixel_delta_u + pixel_delta_v) + Vec3::new(j, j, 0.0);

        let [near, far] = clip_planes;
        let jitter_offset = Mat4::from_translation(Vec3::new(-j / aspect, -j, 0.0));
        let projection = Mat4::perspective_rh(FRAC_PI_2, aspect, near, far);
        let view_projection = jitter_offset * projection * camera_to_world.inverse();

        Self {
            image_width,
            image_height,
            center: camera_to_world.transform_point3(Vec3::ZERO).into(),
            first_pixel_world_pos: camera_to_world.transform_point3(first_pixel).into(),
            pixel_delta_u: camera_to_world.transform_vector3(pixel_delta_u).into(),
            pixel_delta_v: camera_to_world.transform_vector3(pixel_delta_v).into(),
            max_bounce_depth,
            view_projection,
        }
    }

    /// Transforms world space to clip space, matching the jitter of the generated rays.
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// The (unnormalized) ray through the center of pixel `(x, y)`.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let pixel_center = self.first_pixel_world_pos
            + x as f32 * self.pixel_delta_u
            + y as f32 * self.pixel_delta_v;

        Ray::new(self.center, pixel_center - self.center)
    }
}

/// A camera orbiting `target` at `radius`, `angle` radians around the Y axis from +Z, looking at `target`.
pub fn orbit_camera_to_world(target: Vec3A, radius: f32, height: f32, angle: f32) -> Mat4 {
    let target = Vec3::from(target);
    let eye = target + Vec3::new(radius * angle.sin(), height, radius * angle.cos());

    Mat4::look_at_rh(eye, target, Vec3::Y).inverse()
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
