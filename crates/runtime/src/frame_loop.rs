//! Single-threaded frame driver.
//!
//! One [`FrameLoop::step`] is one frame: sample input, update the camera,
//! tick the scene, then write the scene, camera and viewport uniforms. The
//! draw call that would follow belongs to whoever owns the sink.

use glam::Vec2;
use scene::{
    names, pack_and_upload, Camera, RenderSettings, Scene, SceneCommand, TickReport, UniformError, UniformSink,
};

use crate::input::InputSource;

/// Summary of one completed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Zero-based index of the frame
    pub frame: u64,
    /// Elapsed time passed to the animation hook
    pub elapsed: f64,
    /// Objects packed this frame
    pub packed: usize,
    pub tick: TickReport,
}

/// Owns everything a frame touches.
pub struct FrameLoop<S: UniformSink> {
    scene: Scene,
    camera: Camera,
    settings: RenderSettings,
    sink: S,
    input: Box<dyn InputSource>,
    resolution: Vec2,
    elapsed: f64,
    frame: u64,
}

impl<S: UniformSink> FrameLoop<S> {
    #[must_use]
    pub fn new<I>(scene: Scene, camera: Camera, settings: RenderSettings, sink: S, input: I) -> Self
    where
        I: InputSource + 'static,
    {
        Self {
            scene,
            camera,
            settings,
            sink,
            input: Box::new(input),
            resolution: Vec2::new(1280.0, 720.0),
            elapsed: 0.0,
            frame: 0,
        }
    }

    /// Sets the viewport size reported through `iResolution`.
    #[must_use]
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.set_resolution(width, height);
        self
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = Vec2::new(width as f32, height as f32);
    }

    /// Runs one frame of `dt` seconds.
    ///
    /// Elapsed time advances by `dt` before the tick, so the first frame's
    /// animation hook sees `dt` rather than zero.
    ///
    /// # Errors
    ///
    /// Returns the first [`UniformError`] reported by the sink. The camera
    /// and scene have already advanced when that happens.
    pub fn step(&mut self, dt: f32) -> Result<FrameReport, UniformError> {
        let input = self.input.sample(dt);
        self.camera.apply_input(&input, dt);

        self.elapsed += f64::from(dt);
        let tick = self.scene.tick(dt, self.elapsed);

        let packed = pack_and_upload(&self.scene, &self.settings, &mut self.sink)?;
        self.camera.upload(&mut self.sink)?;
        self.upload_viewport()?;

        let report = FrameReport {
            frame: self.frame,
            elapsed: self.elapsed,
            packed: packed.count,
            tick,
        };
        self.frame += 1;
        Ok(report)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn upload_viewport(&mut self) -> Result<(), UniformError> {
        self.sink.set_vec3(names::RESOLUTION, self.resolution.extend(1.0))?;
        self.sink.set_float(names::ELAPSED_TIME, self.elapsed as f32)
    }

    /// Queues an editor command for the next [`step`](Self::step).
    pub fn stage(&mut self, command: SceneCommand) {
        self.scene.stage(command);
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of completed frames.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Hands back the scene, e.g. for saving it.
    #[must_use]
    pub fn into_scene(self) -> Scene {
        self.scene
    }
}
