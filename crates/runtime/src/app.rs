//! # Runtime Application Logic
//!
//! Builds or loads a scene, then drives it through [`FrameLoop`] for a fixed
//! number of frames. Without `--gpu` the uniforms land in a CPU-side
//! [`RaymarchUniforms`] block; with it they go through a headless `wgpu`
//! device and are flushed to the uniform buffer after every frame.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use render::{GpuUniforms, HeadlessGpu, RaymarchUniforms};
use scene::demo::demo_scene;
use scene::exchange::{load_csv, load_json, save_csv, save_json};
use scene::{Camera, RenderSettings, Scene, UniformSink};

use crate::config::Args;
use crate::frame_loop::FrameLoop;
use crate::input::{Idle, InputSource, Orbit};

/// Run the configured number of frames.
///
/// # Errors
///
/// Returns an error if the scene file cannot be read or parsed, the GPU
/// device cannot be opened, a uniform write is rejected or the final scene
/// cannot be saved.
pub fn run(args: &Args) -> Result<()> {
    let scene = build_scene(args)?;
    tracing::info!(objects = scene.len(), animated = scene.has_animation(), "scene ready");

    let scene = if args.gpu {
        let gpu = HeadlessGpu::new().context("--gpu requested but no device is available")?;
        let sink = GpuUniforms::new(&gpu.device);
        let mut frame_loop = new_loop(args, scene, sink);
        drive(&mut frame_loop, args, |sink| {
            sink.flush(&gpu.queue);
        })?;
        frame_loop.into_scene()
    } else {
        let mut frame_loop = new_loop(args, scene, RaymarchUniforms::default());
        drive(&mut frame_loop, args, |_| {})?;
        frame_loop.into_scene()
    };

    if let Some(path) = &args.save {
        save_scene(&scene, path)?;
    }
    Ok(())
}

/// Loads `--scene` if given, otherwise builds the animated demo scene.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or does not describe a
/// valid scene.
pub fn build_scene(args: &Args) -> Result<Scene> {
    match &args.scene {
        Some(path) => load_scene(path),
        None => Ok(demo_scene()),
    }
}

/// Scene files ending in `.csv` are tables; anything else is JSON.
fn is_table(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_scene(path: &Path) -> Result<Scene> {
    let file = File::open(path).with_context(|| format!("opening scene {}", path.display()))?;
    let reader = BufReader::new(file);
    let loaded = if is_table(path) { load_csv(reader) } else { load_json(reader) };
    loaded.with_context(|| format!("loading scene {}", path.display()))
}

/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_scene(scene: &Scene, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let saved = if is_table(path) {
        save_csv(scene, &mut writer)
    } else {
        save_json(scene, &mut writer)
    };
    saved.with_context(|| format!("saving scene to {}", path.display()))?;
    writer.flush().with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(objects = scene.len(), path = %path.display(), "scene saved");
    Ok(())
}

fn new_loop<S: UniformSink>(args: &Args, scene: Scene, sink: S) -> FrameLoop<S> {
    let input: Box<dyn InputSource> = if args.orbit {
        Box::new(Orbit::default())
    } else {
        Box::new(Idle)
    };
    FrameLoop::new(scene, Camera::default(), RenderSettings::default(), sink, input)
        .with_resolution(args.width, args.height)
}

/// Steps `frame_loop` `args.frames` times, calling `after_frame` on the sink
/// after each frame (where a draw call would go).
///
/// # Errors
///
/// Stops at the first rejected uniform write.
pub fn drive<S, F>(frame_loop: &mut FrameLoop<S>, args: &Args, mut after_frame: F) -> Result<()>
where
    S: UniformSink,
    F: FnMut(&mut S),
{
    tracing::info!(frames = args.frames, dt = args.dt, "starting frame loop");
    for _ in 0..args.frames {
        let report = match frame_loop.step(args.dt) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("frame {} failed: {e}", frame_loop.frames());
                return Err(e).context("uploading frame uniforms");
            }
        };
        after_frame(frame_loop.sink_mut());

        if args.log_every > 0 && (report.frame + 1) % args.log_every == 0 {
            tracing::info!(
                frame = report.frame + 1,
                elapsed = report.elapsed,
                objects = report.packed,
                camera = ?frame_loop.camera().position,
                "frame complete"
            );
        } else {
            tracing::debug!(frame = report.frame, objects = report.packed, "frame complete");
        }
    }
    tracing::info!(
        frames = frame_loop.frames(),
        elapsed = frame_loop.elapsed(),
        "frame loop finished"
    );
    Ok(())
}
