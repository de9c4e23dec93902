use crate::{
    camera::Camera,
    compute_velocity,
    config::RenderConfig,
    frame::{FrameBuffers, FrameConfig, HistoryBuffers},
    integrator::trace_path,
    jitter::JitterSource,
    resolve::resolve_pass,
    transform::FrameTransform,
    RenderError,
};
use crate::core::glam::{Mat4, Vec2, Vec4};
use crate::core::random::pixel_seed;
use crate::core::work_timer::WorkTimer;
use crate::map::{TraversalConfig, VoxelScene};

use rayon::prelude::*;

/// Renders a sequence of frames of a [`VoxelScene`], carrying the temporal history from one frame to the next.
pub struct FrameRenderer {
    config: RenderConfig,
    traversal: TraversalConfig,
    frame: FrameConfig,
    buffers: FrameBuffers,
    history: HistoryBuffers,
    transform: Option<FrameTransform>,
    jitter: JitterSource,
    trace_timer: WorkTimer,
    resolve_timer: WorkTimer,
    frames_rendered: u64,
}

impl FrameRenderer {
    pub fn new(
        canvas_width: u32,
        canvas_height: u32,
        config: RenderConfig,
        traversal: TraversalConfig,
    ) -> Result<Self, RenderError> {
        let config = config.sanitized();
        let frame = FrameConfig::new(canvas_width, canvas_height, 0.0)?;

        Ok(Self {
            traversal,
            buffers: FrameBuffers::new(frame.num_pixels()),
            history: HistoryBuffers::new(frame.num_pixels()),
            transform: None,
            jitter: JitterSource::new(config.jitter),
            trace_timer: WorkTimer::start(),
            resolve_timer: WorkTimer::start(),
            frames_rendered: 0,
            config,
            frame,
        })
    }

    /// Reallocates every buffer for the new canvas size. History and motion start over.
    pub fn resize(&mut self, canvas_width: u32, canvas_height: u32) -> Result<(), RenderError> {
        let frame = FrameConfig::new(canvas_width, canvas_height, self.frame.jitter)?;
        if frame == self.frame {
            return Ok(());
        }
        log::debug!(
            "Resizing canvas {}x{} -> {}x{}",
            self.frame.canvas_width,
            self.frame.canvas_height,
            canvas_width,
            canvas_height
        );

        self.buffers = FrameBuffers::new(frame.num_pixels());
        self.history = HistoryBuffers::new(frame.num_pixels());
        self.transform = None;
        self.frame = frame;

        Ok(())
    }

    /// Drops the accumulated history; the next frame is output without blending.
    pub fn reset_history(&mut self) {
        log::debug!("Resetting temporal history");
        self.history.invalidate();
        self.transform = None;
    }

    /// Traces, then resolves, one frame seen from `camera_to_world`. Returns the resolved image, which also becomes
    /// the history of the next frame.
    pub fn render_frame(&mut self, scene: &VoxelScene, camera_to_world: Mat4) -> &[Vec4] {
        self.frame.jitter = self.jitter.next_jitter();
        let frame = self.frame;

        let camera = Camera::new(
            frame.canvas_width,
            frame.canvas_height,
            frame.jitter,
            camera_to_world,
            self.config.max_bounce_depth,
            [self.config.clip_near, self.config.clip_far],
        );
        let transform = match self.transform {
            Some(mut transform) => {
                transform.advance(camera.view_projection());
                transform
            }
            None => FrameTransform::new(camera.view_projection()),
        };
        self.transform = Some(transform);

        let config = &self.config;
        let traversal = &self.traversal;
        let buffers = &mut self.buffers;
        self.trace_timer.time(|| {
            trace_pass(scene, &camera, &transform, &frame, config, traversal, buffers)
        });

        let history = &mut self.history;
        let current = &self.buffers;
        let blend = self.config.history_blend;
        self.resolve_timer.time(|| {
            let (history_image, target) = history.split();
            resolve_pass(
                frame.canvas_width,
                frame.canvas_height,
                &current.color,
                &current.velocity,
                history_image,
                blend,
                target,
            );
        });
        self.history.swap();

        self.frames_rendered += 1;
        log::debug!(
            "Frame {} (jitter {:.3}): trace {:?}, resolve {:?}",
            self.frames_rendered,
            frame.jitter,
            self.trace_timer.last_time(),
            self.resolve_timer.last_time()
        );

        self.history.latest()
    }

    pub fn frame_config(&self) -> &FrameConfig {
        &self.frame
    }

    /// This frame's color before the resolve pass.
    pub fn color(&self) -> &[Vec4] {
        &self.buffers.color
    }

    pub fn velocity(&self) -> &[Vec2] {
        &self.buffers.velocity
    }

    /// Primary hit distance along each camera ray, `f32::INFINITY` for background pixels.
    pub fn depth(&self) -> &[f32] {
        &self.buffers.depth
    }

    pub fn normal(&self) -> &[Vec4] {
        &self.buffers.normal
    }

    /// The most recently resolved frame.
    pub fn output(&self) -> &[Vec4] {
        self.history.latest()
    }

    pub fn has_history(&self) -> bool {
        self.history.is_valid()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn trace_timer(&self) -> &WorkTimer {
        &self.trace_timer
    }

    pub fn resolve_timer(&self) -> &WorkTimer {
        &self.resolve_timer
    }
}

/// Fills every trace buffer, one row per parallel task.
fn trace_pass(
    scene: &VoxelScene,
    camera: &Camera,
    transform: &FrameTransform,
    frame: &FrameConfig,
    config: &RenderConfig,
    traversal: &TraversalConfig,
    buffers: &mut FrameBuffers,
) {
    let width = frame.canvas_width as usize;
    let config = RenderConfig {
        max_bounce_depth: camera.max_bounce_depth,
        ..*config
    };

    let FrameBuffers {
        color,
        velocity,
        depth,
        normal,
    } = buffers;
    color
        .par_chunks_mut(width)
        .zip(velocity.par_chunks_mut(width))
        .zip(depth.par_chunks_mut(width))
        .zip(normal.par_chunks_mut(width))
        .enumerate()
        .for_each(|(y, (((color_row, velocity_row), depth_row), normal_row))| {
            let y = y as u32;
            for x in 0..width {
                let mut seed = pixel_seed(x as u32, y, frame.jitter);
                let ray = camera.get_ray(x as u32, y);
                let sample = trace_path(scene, &ray, &mut seed, &config, traversal);
                let hit = sample.primary_hit.as_ref();

                color_row[x] = sample.color;
                velocity_row[x] = compute_velocity(transform, hit);
                depth_row[x] = hit.map_or(f32::INFINITY, |hit| hit.t);
                normal_row[x] = hit.map_or(Vec4::ZERO, |hit| {
                    Vec4::new(hit.normal.x, hit.normal.y, hit.normal.z, 0.0)
                });
            }
        });
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use crate::config::JitterConfig;
    use crate::core::approx::assert_relative_eq;
    use crate::core::glam::IVec3;
    use crate::map::{Chunk, ChunkBounds, Palette8, Voxel};

    fn still_config() -> RenderConfig {
        RenderConfig {
            jitter: JitterConfig {
                enabled: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn new_renderer(
        width: u32,
        height: u32,
        config: RenderConfig,
    ) -> Result<FrameRenderer, RenderError> {
        FrameRenderer::new(width, height, config, TraversalConfig::default())
    }

    fn cube_scene() -> VoxelScene {
        let mut chunk = Chunk::default();
        chunk.fill_with(|p| {
            let inside = p.cmpge(IVec3::splat(8)).all() && p.cmplt(IVec3::splat(24)).all();
            inside.then(|| Voxel::solid(1))
        });
        let palette = Palette8::from_colors([Vec4::ONE, Vec4::new(0.8, 0.2, 0.2, 1.0)]);

        VoxelScene::new(chunk, palette, ChunkBounds::default())
    }

    #[test]
    fn empty_canvas_is_an_error() {
        assert!(new_renderer(0, 4, RenderConfig::default()).is_err());

        let mut renderer = new_renderer(4, 4, RenderConfig::default()).unwrap();
        assert_eq!(
            renderer.resize(4, 0),
            Err(RenderError::EmptyCanvas {
                width: 4,
                height: 0
            })
        );
        assert_eq!(renderer.frame_config().canvas_height, 4);
    }

    #[test]
    fn first_frame_is_unblended() {
        let scene = cube_scene();
        let mut renderer = new_renderer(16, 12, RenderConfig::default()).unwrap();

        let output = renderer.render_frame(&scene, Mat4::IDENTITY).to_vec();
        assert_eq!(output, renderer.color());
        assert!(renderer.has_history());
        assert_eq!(renderer.frames_rendered(), 1);
        assert_eq!(renderer.trace_timer().items_completed(), 1);
        assert_eq!(renderer.resolve_timer().items_completed(), 1);
    }

    #[test]
    fn static_scene_without_jitter_is_stable() {
        let scene = cube_scene();
        let mut renderer = new_renderer(16, 12, still_config()).unwrap();

        let first = renderer.render_frame(&scene, Mat4::IDENTITY).to_vec();
        let second = renderer.render_frame(&scene, Mat4::IDENTITY).to_vec();

        // Same seeds and same rays, so the trace is identical and history equals the current frame.
        assert_eq!(first, second);
        assert!(renderer.velocity().iter().all(|&v| v == Vec2::ZERO));
    }

    #[test]
    fn background_pixels_have_zero_velocity() {
        let scene = cube_scene();
        let mut renderer = new_renderer(16, 12, RenderConfig::default()).unwrap();

        renderer.render_frame(&scene, Mat4::IDENTITY);
        let moved = Mat4::from_translation(crate::core::glam::Vec3::new(0.1, 0.0, 0.0));
        renderer.render_frame(&scene, moved);

        // Top left corner looks past the cube into the sky.
        assert_eq!(renderer.velocity()[0], Vec2::ZERO);
        // The center pixel sees the moving cube.
        let center = 8 + 6 * 16;
        assert_ne!(renderer.velocity()[center], Vec2::ZERO);
    }

    #[test]
    fn primary_hits_fill_depth_and_normal() {
        let scene = cube_scene();
        let mut renderer = new_renderer(16, 12, still_config()).unwrap();

        renderer.render_frame(&scene, Mat4::IDENTITY);

        // Sky.
        assert_eq!(renderer.depth()[0], f32::INFINITY);
        assert_eq!(renderer.normal()[0], Vec4::ZERO);

        // The center ray enters the cube through its front face at z = -1.5.
        let center = 8 + 6 * 16;
        assert!(renderer.depth()[center].is_finite());
        assert_relative_eq!(renderer.depth()[center], 1.5, epsilon = 1e-4);
        assert_eq!(renderer.normal()[center], Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn resize_and_reset_drop_history() {
        let scene = cube_scene();
        let mut renderer = new_renderer(8, 8, still_config()).unwrap();

        renderer.render_frame(&scene, Mat4::IDENTITY);
        assert!(renderer.has_history());

        renderer.reset_history();
        assert!(!renderer.has_history());
        let output = renderer.render_frame(&scene, Mat4::IDENTITY).to_vec();
        assert_eq!(output, renderer.color());

        renderer.resize(10, 6).unwrap();
        assert!(!renderer.has_history());
        assert_eq!(renderer.output().len(), 60);
        assert_eq!(renderer.render_frame(&scene, Mat4::IDENTITY).len(), 60);
        assert_eq!(renderer.velocity().len(), 60);
        assert_eq!(renderer.depth().len(), 60);
        assert_eq!(renderer.normal().len(), 60);
    }
}
