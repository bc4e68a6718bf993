//! GPU-compatible uniform block for the ray marching shader
//!
//! [`RaymarchUniforms`] mirrors `shaders/raymarch_uniforms.wgsl` byte for
//! byte. It implements [`UniformSink`], so the scene packer and the camera
//! can address its members by the same names the shader program uses.
//!
//! Uniform-address-space arrays need a 16-byte element stride, so scalar and
//! `vec2`/`vec3` arrays are stored as `vec4` slots and `mat3x3` columns are
//! padded to four floats.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Vec2, Vec3, Vec4};
use scene::{names, UniformError, UniformSink, MAX_OBJECTS};

/// One 16-byte array element.
pub type Slot<T> = [T; 4];

/// Uniform buffer contents for one frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RaymarchUniforms {
    /// `iResolution`
    pub resolution: [f32; 3],
    /// `elapsedTime`, seconds
    pub elapsed_time: f32,
    /// `camPos`
    pub cam_pos: [f32; 3],
    /// `fov`, degrees
    pub fov: f32,
    /// `camForward`
    pub cam_forward: [f32; 3],
    /// `objCount`
    pub obj_count: i32,
    /// `camRight`
    pub cam_right: [f32; 3],
    _pad0: f32,
    /// `camUp`
    pub cam_up: [f32; 3],
    _pad1: f32,
    /// `sunDir`
    pub sun_dir: [f32; 3],
    _pad2: f32,
    /// `sunColor`
    pub sun_color: [f32; 3],
    _pad3: f32,
    /// `objPos`
    pub obj_pos: [Slot<f32>; MAX_OBJECTS],
    /// `objColor`
    pub obj_color: [Slot<f32>; MAX_OBJECTS],
    /// `objReflect`, in `.x`
    pub obj_reflect: [Slot<f32>; MAX_OBJECTS],
    /// `objType`, in `.x`
    pub obj_type: [Slot<i32>; MAX_OBJECTS],
    /// `sphereRadii`, in `.x`
    pub sphere_radii: [Slot<f32>; MAX_OBJECTS],
    /// `boxSizes`, in `.xyz`
    pub box_sizes: [Slot<f32>; MAX_OBJECTS],
    /// `torusRadii`, in `.xy`
    pub torus_radii: [Slot<f32>; MAX_OBJECTS],
    /// `objInvRotMat`, column major
    pub obj_inv_rot: [[Slot<f32>; 3]; MAX_OBJECTS],
}

impl Default for RaymarchUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Whether the block has a member for `name`.
fn is_declared(name: &str) -> bool {
    matches!(
        name,
        names::RESOLUTION
            | names::ELAPSED_TIME
            | names::CAM_POS
            | names::FOV
            | names::CAM_FORWARD
            | names::OBJ_COUNT
            | names::CAM_RIGHT
            | names::CAM_UP
            | names::SUN_DIR
            | names::SUN_COLOR
            | names::OBJ_POS
            | names::OBJ_COLOR
            | names::OBJ_REFLECT
            | names::OBJ_TYPE
            | names::SPHERE_RADII
            | names::BOX_SIZES
            | names::TORUS_RADII
            | names::OBJ_INV_ROT_MAT
    )
}

/// Error for a setter that does not own `name`.
fn reject(name: &str, expected: &'static str) -> UniformError {
    if is_declared(name) {
        UniformError::TypeMismatch { name: name.to_owned(), expected }
    } else {
        UniformError::UnknownUniform(name.to_owned())
    }
}

/// Copies `values` into the leading slots of `dst` and zeroes the rest.
fn fill_slots<T, U, F>(dst: &mut [U; MAX_OBJECTS], name: &str, values: &[T], convert: F) -> Result<(), UniformError>
where
    U: Zeroable,
    F: Fn(&T) -> U,
{
    if values.len() > MAX_OBJECTS {
        return Err(UniformError::ArrayTooLong {
            name: name.to_owned(),
            len: values.len(),
            capacity: MAX_OBJECTS,
        });
    }
    for (i, slot) in dst.iter_mut().enumerate() {
        *slot = values.get(i).map_or_else(U::zeroed, &convert);
    }
    Ok(())
}

fn scalar_slot<T: Copy + Zeroable>(value: &T) -> Slot<T> {
    [*value, T::zeroed(), T::zeroed(), T::zeroed()]
}

fn vec2_slot(value: &Vec2) -> Slot<f32> {
    [value.x, value.y, 0.0, 0.0]
}

fn vec3_slot(value: &Vec3) -> Slot<f32> {
    value.extend(0.0).to_array()
}

fn vec4_slot(value: &Vec4) -> Slot<f32> {
    value.to_array()
}

fn mat3_slots(value: &Mat3) -> [Slot<f32>; 3] {
    [vec3_slot(&value.x_axis), vec3_slot(&value.y_axis), vec3_slot(&value.z_axis)]
}

impl UniformSink for RaymarchUniforms {
    fn set_float(&mut self, name: &str, value: f32) -> Result<(), UniformError> {
        match name {
            names::FOV => self.fov = value,
            names::ELAPSED_TIME => self.elapsed_time = value,
            _ => return Err(reject(name, "f32")),
        }
        Ok(())
    }

    fn set_int(&mut self, name: &str, value: i32) -> Result<(), UniformError> {
        match name {
            names::OBJ_COUNT => self.obj_count = value,
            _ => return Err(reject(name, "i32")),
        }
        Ok(())
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) -> Result<(), UniformError> {
        let dst = match name {
            names::RESOLUTION => &mut self.resolution,
            names::CAM_POS => &mut self.cam_pos,
            names::CAM_FORWARD => &mut self.cam_forward,
            names::CAM_RIGHT => &mut self.cam_right,
            names::CAM_UP => &mut self.cam_up,
            names::SUN_DIR => &mut self.sun_dir,
            names::SUN_COLOR => &mut self.sun_color,
            _ => return Err(reject(name, "vec3<f32>")),
        };
        *dst = value.to_array();
        Ok(())
    }

    fn set_float_array(&mut self, name: &str, values: &[f32]) -> Result<(), UniformError> {
        let dst = match name {
            names::OBJ_REFLECT => &mut self.obj_reflect,
            names::SPHERE_RADII => &mut self.sphere_radii,
            _ => return Err(reject(name, "array<f32>")),
        };
        fill_slots(dst, name, values, scalar_slot)
    }

    fn set_int_array(&mut self, name: &str, values: &[i32]) -> Result<(), UniformError> {
        match name {
            names::OBJ_TYPE => fill_slots(&mut self.obj_type, name, values, scalar_slot),
            _ => Err(reject(name, "array<i32>")),
        }
    }

    fn set_vec2_array(&mut self, name: &str, values: &[Vec2]) -> Result<(), UniformError> {
        match name {
            names::TORUS_RADII => fill_slots(&mut self.torus_radii, name, values, vec2_slot),
            _ => Err(reject(name, "array<vec2<f32>>")),
        }
    }

    fn set_vec3_array(&mut self, name: &str, values: &[Vec3]) -> Result<(), UniformError> {
        let dst = match name {
            names::OBJ_POS => &mut self.obj_pos,
            names::BOX_SIZES => &mut self.box_sizes,
            _ => return Err(reject(name, "array<vec3<f32>>")),
        };
        fill_slots(dst, name, values, vec3_slot)
    }

    fn set_vec4_array(&mut self, name: &str, values: &[Vec4]) -> Result<(), UniformError> {
        match name {
            names::OBJ_COLOR => fill_slots(&mut self.obj_color, name, values, vec4_slot),
            _ => Err(reject(name, "array<vec4<f32>>")),
        }
    }

    fn set_mat3_array(&mut self, name: &str, values: &[Mat3]) -> Result<(), UniformError> {
        match name {
            names::OBJ_INV_ROT_MAT => fill_slots(&mut self.obj_inv_rot, name, values, mat3_slots),
            _ => Err(reject(name, "array<mat3x3<f32>>")),
        }
    }
}
