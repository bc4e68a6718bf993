//! Command line configuration for `runtime_main`.

use std::path::PathBuf;

use clap::Parser;

/// Headless driver for the ray march scene.
///
/// Builds the demo scene (or loads one), runs it for a fixed number of
/// frames and writes every frame's uniforms into a CPU-side block, or into a
/// GPU uniform buffer with `--gpu`.
#[derive(Parser, Debug, Clone)]
#[command(name = "runtime_main", version)]
pub struct Args {
    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Fixed frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Load the scene from this `.csv` table or JSON file instead of building the demo
    #[arg(long, value_name = "FILE")]
    pub scene: Option<PathBuf>,

    /// Write the final scene to this file (`.csv` for a table, otherwise JSON)
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Upload uniforms through a headless GPU device
    #[arg(long)]
    pub gpu: bool,

    /// Feed synthetic mouse input so the camera moves
    #[arg(long)]
    pub orbit: bool,

    /// Viewport width reported to the shader
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Viewport height reported to the shader
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Log a progress line every N frames (0 disables)
    #[arg(long, default_value_t = 60)]
    pub log_every: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_sixty_hertz_run() {
        let args = Args::parse_from(["runtime_main"]);
        assert_eq!(args.frames, 600);
        assert!((args.dt - 1.0 / 60.0).abs() < 1e-9);
        assert!(!args.gpu && !args.orbit);
        assert!(args.scene.is_none() && args.save.is_none());
    }

    #[test]
    fn flags_are_parsed() {
        let args = Args::parse_from([
            "runtime_main",
            "--frames",
            "3",
            "--dt",
            "0.5",
            "--scene",
            "in.json",
            "--save",
            "out.json",
            "--orbit",
        ]);
        assert_eq!(args.frames, 3);
        assert_eq!(args.dt, 0.5);
        assert_eq!(args.scene, Some(PathBuf::from("in.json")));
        assert_eq!(args.save, Some(PathBuf::from("out.json")));
        assert!(args.orbit);
    }
}
