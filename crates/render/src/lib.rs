#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Ray March Uniform Upload
//!
//! Byte-exact uniform block for the ray marching shader and the `wgpu`
//! plumbing that uploads it. The shader's distance functions live outside
//! this workspace; only the uniform interface is declared here, in
//! `shaders/raymarch_uniforms.wgsl`.

pub mod gpu_types;
pub mod uniform_buffer;

pub use gpu_types::RaymarchUniforms;
pub use uniform_buffer::{GpuError, GpuUniforms, HeadlessGpu, UniformBuffer};

/// WGSL declaration of the uniform block, for inclusion in a full shader.
pub const UNIFORMS_WGSL: &str = include_str!("../shaders/raymarch_uniforms.wgsl");
