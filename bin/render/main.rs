use voxtrace::core::glam::Vec4;
use voxtrace::renderer::{orbit_camera_to_world, FrameRenderer};
use voxtrace::{Config, DemoScene};

use clap::Parser;
use image::{ImageBuffer, Rgba};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "render",
    about = "Render a voxel scene with temporal anti-aliasing and save the last frame"
)]
struct Args {
    /// RON config file; defaults are used when omitted
    #[arg(long, short)]
    config: Option<String>,
    #[arg(long, value_enum, default_value_t = DemoScene::Terrain)]
    scene: DemoScene,
    #[arg(long, default_value_t = 640)]
    width: u32,
    #[arg(long, default_value_t = 360)]
    height: u32,
    /// Number of frames to accumulate
    #[arg(long, default_value_t = 16)]
    frames: u32,
    /// Camera orbit angle covered per frame, in radians
    #[arg(long, default_value_t = 0.01)]
    orbit_speed: f32,
    /// Seed for procedural scenes
    #[arg(long, default_value_t = 0)]
    seed: u32,
    /// Output PNG path
    #[arg(long, short, default_value = "render.png")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::read_file(path)?,
        None => Config::default(),
    };
    let bounds = config.map.bounds();
    let scene = args.scene.build(bounds, args.seed);
    log::info!(
        "Built {:?} scene with {} active voxels",
        args.scene,
        scene.chunk.num_active()
    );

    let mut renderer = FrameRenderer::new(
        args.width,
        args.height,
        config.render,
        config.map.traversal,
    )?;
    let target = args.scene.focus(bounds);
    let radius = 1.5 * (bounds.max() - bounds.min()).max_element();
    for frame in 0..args.frames {
        let angle = frame as f32 * args.orbit_speed;
        let pose = orbit_camera_to_world(target, radius, 0.5 * radius, angle);
        renderer.render_frame(&scene, pose);
    }
    log::info!(
        "Rendered {} frames: trace {} us/frame, resolve {} us/frame",
        renderer.frames_rendered(),
        renderer.trace_timer().average_time_us(),
        renderer.resolve_timer().average_time_us()
    );

    let pixels: Vec<u8> = renderer.output().iter().flat_map(|&c| to_srgba8(c)).collect();
    let image = ImageBuffer::<Rgba<u8>, _>::from_raw(args.width, args.height, pixels)
        .ok_or("output buffer does not match the canvas size")?;
    image.save(&args.output)?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}

fn to_srgba8(c: Vec4) -> [u8; 4] {
    let gamma = 1.0 / 2.2;
    let encode = |v: f32| (v.clamp(0.0, 1.0).powf(gamma) * 255.0) as u8;

    [encode(c.x), encode(c.y), encode(c.z), (c.w.clamp(0.0, 1.0) * 255.0) as u8]
}
