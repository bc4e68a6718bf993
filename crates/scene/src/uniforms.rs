//! Renderer Interface: the narrow "set a named uniform" capability the core
//! writes through.
//!
//! Arrays are passed as slices; the slice length is the element count. The
//! packer always passes full [`MAX_OBJECTS`](crate::MAX_OBJECTS)-length
//! arrays so that slots past the object count are overwritten with zeros
//! every frame.

use std::collections::BTreeMap;

use glam::{Mat3, Vec2, Vec3, Vec4};

use crate::error::UniformError;

/// Uniform names shared with the ray-marching shader.
pub mod names {
    pub const OBJ_COUNT: &str = "objCount";
    pub const OBJ_POS: &str = "objPos";
    pub const OBJ_COLOR: &str = "objColor";
    pub const OBJ_REFLECT: &str = "objReflect";
    pub const OBJ_TYPE: &str = "objType";
    pub const OBJ_INV_ROT_MAT: &str = "objInvRotMat";
    pub const SPHERE_RADII: &str = "sphereRadii";
    pub const BOX_SIZES: &str = "boxSizes";
    pub const TORUS_RADII: &str = "torusRadii";
    pub const SUN_DIR: &str = "sunDir";
    pub const SUN_COLOR: &str = "sunColor";
    pub const CAM_POS: &str = "camPos";
    pub const CAM_FORWARD: &str = "camForward";
    pub const CAM_RIGHT: &str = "camRight";
    pub const CAM_UP: &str = "camUp";
    pub const FOV: &str = "fov";
    /// Viewport size in pixels, `z` fixed at 1. Written by the frame driver.
    pub const RESOLUTION: &str = "iResolution";
    /// Seconds since the loop started. Written by the frame driver.
    pub const ELAPSED_TIME: &str = "elapsedTime";
}

/// Something that accepts named uniform values before a draw call.
///
/// A value set here must be visible to the next draw that reads it.
pub trait UniformSink {
    fn set_float(&mut self, name: &str, value: f32) -> Result<(), UniformError>;
    fn set_int(&mut self, name: &str, value: i32) -> Result<(), UniformError>;
    fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<(), UniformError>;
    fn set_float_array(&mut self, name: &str, values: &[f32]) -> Result<(), UniformError>;
    fn set_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), UniformError>;
    fn set_vec2_array(&mut self, name: &str, values: &[Vec2]) -> Result<(), UniformError>;
    fn set_vec3_array(&mut self, name: &str, values: &[Vec3]) -> Result<(), UniformError>;
    fn set_vec4_array(&mut self, name: &str, values: &[Vec4]) -> Result<(), UniformError>;
    fn set_mat3_array(&mut self, name: &str, values: &[Mat3]) -> Result<(), UniformError>;
}

/// A uniform value as last written to a [`UniformRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3(Vec3),
    FloatArray(Vec<f32>),
    IntArray(Vec<i32>),
    Vec2Array(Vec<Vec2>),
    Vec3Array(Vec<Vec3>),
    Vec4Array(Vec<Vec4>),
    Mat3Array(Vec<Mat3>),
}

/// Sink that keeps the last value written under each name.
///
/// Lets tests see exactly what would have reached the shader, without a
/// concrete uniform layout.
#[derive(Debug, Default, Clone)]
pub struct UniformRecorder {
    values: BTreeMap<String, UniformValue>,
}

impl UniformRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn record(&mut self, name: &str, value: UniformValue) {
        self.values.insert(name.to_owned(), value);
    }
}

impl UniformSink for UniformRecorder {
    fn set_float(&mut self, name: &str, value: f32) -> Result<(), UniformError> {
        self.record(name, UniformValue::Float(value));
        Ok(())
    }

    fn set_int(&mut self, name: &str, value: i32) -> Result<(), UniformError> {
        self.record(name, UniformValue::Int(value));
        Ok(())
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<(), UniformError> {
        self.record(name, UniformValue::Vec3(value));
        Ok(())
    }

    fn set_float_array(&mut self, name: &str, values: &[f32]) -> Result<(), UniformError> {
        self.record(name, UniformValue::FloatArray(values.to_vec()));
        Ok(())
    }

    fn set_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), UniformError> {
        self.record(name, UniformValue::IntArray(values.to_vec()));
        Ok(())
    }

    fn set_vec2_array(&mut self, name: &str, values: &[Vec2]) -> Result<(), UniformError> {
        self.record(name, UniformValue::Vec2Array(values.to_vec()));
        Ok(())
    }

    fn set_vec3_array(&mut self, name: &str, values: &[Vec3]) -> Result<(), UniformError> {
        self.record(name, UniformValue::Vec3Array(values.to_vec()));
        Ok(())
    }

    fn set_vec4_array(&mut self, name: &str, values: &[Vec4]) -> Result<(), UniformError> {
        self.record(name, UniformValue::Vec4Array(values.to_vec()));
        Ok(())
    }

    fn set_mat3_array(&mut self, name: &str, values: &[Mat3]) -> Result<(), UniformError> {
        self.record(name, UniformValue::Mat3Array(values.to_vec()));
        Ok(())
    }
}
