//! GPU side of the uniform upload.
//!
//! [`HeadlessGpu`] opens a device without a surface, [`UniformBuffer`] owns
//! the `wgpu` buffer behind `@group(0) @binding(0)`, and [`GpuUniforms`]
//! glues them to the scene's [`UniformSink`] interface: setters write into a
//! CPU copy of the block and [`GpuUniforms::flush`] copies it to the device.

use std::num::NonZeroU64;
use std::sync::Arc;

use glam::{Mat3, Vec2, Vec3, Vec4};
use scene::{UniformError, UniformSink};
use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::gpu_types::RaymarchUniforms;

/// Errors that can occur while acquiring a GPU device.
#[derive(Error, Debug)]
pub enum GpuError {
    #[error("no compatible GPU adapter found")]
    AdapterUnavailable,
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Device and queue opened without a window.
#[derive(Clone)]
pub struct HeadlessGpu {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

impl HeadlessGpu {
    /// Opens the system's default high-performance adapter.
    ///
    /// # Errors
    ///
    /// Returns [`GpuError::AdapterUnavailable`] when no adapter is present
    /// (typical on CI) or [`GpuError::Device`] when the device request fails.
    pub fn new() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::default();
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: None,
        }))
        .ok_or(GpuError::AdapterUnavailable)?;

        tracing::info!(adapter = ?adapter.get_info().name, "using GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("raymarch device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
            },
            None,
        ))?;

        Ok(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }
}

/// Uniform buffer sized for one [`RaymarchUniforms`] block.
pub struct UniformBuffer {
    buffer: wgpu::Buffer,
}

impl UniformBuffer {
    /// Byte size of the block, as the shader sees it.
    pub const SIZE: u64 = std::mem::size_of::<RaymarchUniforms>() as u64;

    /// Creates the buffer with `initial` as its contents.
    #[must_use]
    pub fn new(device: &wgpu::Device, initial: &RaymarchUniforms) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("raymarch uniforms"),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::COPY_SRC,
        });
        Self { buffer }
    }

    /// Queues a full overwrite of the buffer.
    pub fn write(&self, queue: &wgpu::Queue, block: &RaymarchUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(block));
    }

    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Layout entry for binding the block into a fragment shader.
    #[must_use]
    pub fn layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(Self::SIZE),
            },
            count: None,
        }
    }
}

/// [`UniformSink`] that stages writes on the CPU and uploads on [`flush`].
///
/// [`flush`]: GpuUniforms::flush
pub struct GpuUniforms {
    block: RaymarchUniforms,
    buffer: UniformBuffer,
    dirty: bool,
}

impl GpuUniforms {
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        let block = RaymarchUniforms::default();
        let buffer = UniformBuffer::new(device, &block);
        Self {
            block,
            buffer,
            dirty: false,
        }
    }

    /// CPU copy of the block, including writes not yet flushed.
    #[must_use]
    pub fn block(&self) -> &RaymarchUniforms {
        &self.block
    }

    #[must_use]
    pub fn buffer(&self) -> &UniformBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Uploads the block if anything was written since the last flush.
    ///
    /// Returns whether an upload was queued.
    pub fn flush(&mut self, queue: &wgpu::Queue) -> bool {
        if !self.dirty {
            return false;
        }
        self.buffer.write(queue, &self.block);
        self.dirty = false;
        tracing::trace!(bytes = UniformBuffer::SIZE, "uniform block uploaded");
        true
    }

    fn mark<T>(&mut self, result: Result<T, UniformError>) -> Result<T, UniformError> {
        if result.is_ok() {
            self.dirty = true;
        }
        result
    }
}

impl UniformSink for GpuUniforms {
    fn set_float(&mut self, name: &str, value: f32) -> Result<(), UniformError> {
        let result = self.block.set_float(name, value);
        self.mark(result)
    }

    fn set_int(&mut self, name: &str, value: i32) -> Result<(), UniformError> {
        let result = self.block.set_int(name, value);
        self.mark(result)
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<(), UniformError> {
        let result = self.block.set_vec3(name, value);
        self.mark(result)
    }

    fn set_float_array(&mut self, name: &str, values: &[f32]) -> Result<(), UniformError> {
        let result = self.block.set_float_array(name, values);
        self.mark(result)
    }

    fn set_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), UniformError> {
        let result = self.block.set_int_array(name, values);
        self.mark(result)
    }

    fn set_vec2_array(&mut self, name: &str, values: &[Vec2]) -> Result<(), UniformError> {
        let result = self.block.set_vec2_array(name, values);
        self.mark(result)
    }

    fn set_vec3_array(&mut self, name: &str, values: &[Vec3]) -> Result<(), UniformError> {
        let result = self.block.set_vec3_array(name, values);
        self.mark(result)
    }

    fn set_vec4_array(&mut self, name: &str, values: &[Vec4]) -> Result<(), UniformError> {
        let result = self.block.set_vec4_array(name, values);
        self.mark(result)
    }

    fn set_mat3_array(&mut self, name: &str, values: &[Mat3]) -> Result<(), UniformError> {
        let result = self.block.set_mat3_array(name, values);
        self.mark(result)
    }
}
