use crate::RenderError;
use crate::core::glam::{Vec2, Vec4};

/// Per-frame parameters shared by every pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub jitter: f32,
}

impl FrameConfig {
    pub fn new(canvas_width: u32, canvas_height: u32, jitter: f32) -> Result<Self, RenderError> {
        if canvas_width == 0 || canvas_height == 0 {
            return Err(RenderError::EmptyCanvas {
                width: canvas_width,
                height: canvas_height,
            });
        }

        Ok(Self {
            canvas_width,
            canvas_height,
            jitter,
        })
    }

    pub fn num_pixels(&self) -> usize {
        self.canvas_width as usize * self.canvas_height as usize
    }
}

/// The images written by the trace pass, indexed by `x + y * canvas_width`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffers {
    pub color: Vec<Vec4>,
    pub velocity: Vec<Vec2>,
    /// Ray parameter of the primary hit; infinite where the ray escaped.
    pub depth: Vec<f32>,
    /// Normal of the primary hit in `xyz`, `w = 0`; zero where the ray escaped.
    pub normal: Vec<Vec4>,
}

impl FrameBuffers {
    pub fn new(num_pixels: usize) -> Self {
        Self {
            color: vec![Vec4::ZERO; num_pixels],
            velocity: vec![Vec2::ZERO; num_pixels],
            depth: vec![f32::INFINITY; num_pixels],
            normal: vec![Vec4::ZERO; num_pixels],
        }
    }
}

/// Two resolve targets that trade roles every frame: one holds the previous frame's output (the history) while the
/// other receives this frame's output.
#[derive(Clone, Debug)]
pub struct HistoryBuffers {
    targets: [Vec<Vec4>; 2],
    history_is_a: bool,
    valid: bool,
}

impl HistoryBuffers {
    /// Starts without valid history.
    pub fn new(num_pixels: usize) -> Self {
        Self {
            targets: [vec![Vec4::ZERO; num_pixels], vec![Vec4::ZERO; num_pixels]],
            history_is_a: true,
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Borrows the history (if valid) and the target for this frame's output at the same time.
    pub fn split(&mut self) -> (Option<&[Vec4]>, &mut [Vec4]) {
        let valid = self.valid;
        let [a, b] = &mut self.targets;
        let (history, target) = if self.history_is_a { (a, b) } else { (b, a) };

        (valid.then(|| history.as_slice()), target.as_mut_slice())
    }

    /// Makes the target just written the history of the next frame.
    pub fn swap(&mut self) {
        self.history_is_a = !self.history_is_a;
        self.valid = true;
    }

    /// The output of the most recent frame, i.e. the history after [`HistoryBuffers::swap`].
    pub fn latest(&self) -> &[Vec4] {
        &self.targets[self.history_slot()]
    }

    fn history_slot(&self) -> usize {
        if self.history_is_a {
            0
        } else {
            1
        }
    }
}
