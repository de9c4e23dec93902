use crate::transform::FrameTransform;
use crate::core::geometry::HitRecord;
use crate::core::glam::{Mat4, Vec2, Vec3A, Vec4};

/// Screen UV of world point `p`: (0, 0) is the upper left corner of the image and (1, 1) the lower right.
///
/// Returns `None` for points behind the camera.
pub fn screen_uv(view_projection: &Mat4, p: Vec3A) -> Option<Vec2> {
    let clip = *view_projection * Vec4::new(p.x, p.y, p.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);

    Some(Vec2::new(0.5 * ndc.x + 0.5, 0.5 - 0.5 * ndc.y))
}

/// How far the primary hit moved in screen UV since the previous frame.
///
/// Pixels without a hit, hits behind either camera, and hits so close to a camera plane that the motion overflows,
/// have zero velocity.
pub fn compute_velocity(transform: &FrameTransform, primary_hit: Option<&HitRecord>) -> Vec2 {
    let hit = match primary_hit {
        Some(hit) => hit,
        None => return Vec2::ZERO,
    };

    match (
        screen_uv(&transform.view_projection(), hit.position),
        screen_uv(&transform.prev_view_projection(), hit.position),
    ) {
        (Some(current), Some(previous)) => {
            let velocity = current - previous;
            if velocity.x.is_finite() && velocity.y.is_finite() {
                velocity
            } else {
                Vec2::ZERO
            }
        }
        _ => Vec2::ZERO,
    }
}
