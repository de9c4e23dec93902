use crate::core::glam::Mat4;

/// The view-projection matrices that relate this frame to the previous one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTransform {
    inverse_view_projection: Mat4,
    view_projection: Mat4,
    prev_view_projection: Mat4,
}

impl FrameTransform {
    /// A transform with no motion: the previous frame is taken to have used `view_projection` too.
    pub fn new(view_projection: Mat4) -> Self {
        Self {
            inverse_view_projection: view_projection.inverse(),
            view_projection,
            prev_view_projection: view_projection,
        }
    }

    /// Moves to the next frame. The current matrix becomes the previous one.
    pub fn advance(&mut self, view_projection: Mat4) {
        self.prev_view_projection = self.view_projection;
        self.view_projection = view_projection;
        self.inverse_view_projection = view_projection.inverse();
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    pub fn prev_view_projection(&self) -> Mat4 {
        self.prev_view_projection
    }

    pub fn inverse_view_projection(&self) -> Mat4 {
        self.inverse_view_projection
    }
}
