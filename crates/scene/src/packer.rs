//! # Uniform Packer
//!
//! Turns the scene's variable-length object list into the fixed-size
//! parallel arrays the shader declares. Slot `i` always holds object `i` in
//! scene order; slots from the object count up to [`MAX_OBJECTS`] stay zero.
//! The result depends only on the object fields, so packing the same scene
//! twice yields identical arrays.

use glam::{Mat3, Vec2, Vec3, Vec4};

use crate::error::UniformError;
use crate::primitive::Shape;
use crate::registry::Scene;
use crate::rotation::inverse_rotation;
use crate::uniforms::{names, UniformSink};
use crate::MAX_OBJECTS;

/// Static environment uploaded alongside the objects every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub sun_direction: Vec3,
    pub sun_color: Vec3,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            sun_direction: Vec3::new(0.3, 0.7, 0.0),
            sun_color: Vec3::new(1.0, 0.95, 0.8),
        }
    }
}

/// One frame's worth of packed object arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedFrame {
    pub count: usize,
    pub positions: [Vec3; MAX_OBJECTS],
    pub colors: [Vec4; MAX_OBJECTS],
    pub reflectivity: [f32; MAX_OBJECTS],
    pub types: [i32; MAX_OBJECTS],
    pub inverse_rotations: [Mat3; MAX_OBJECTS],
    /// Filled for spheres and lights
    pub sphere_radii: [f32; MAX_OBJECTS],
    /// Box half-extents
    pub box_sizes: [Vec3; MAX_OBJECTS],
    /// Torus (toroidal, poloidal) radii
    pub torus_radii: [Vec2; MAX_OBJECTS],
}

impl Default for PackedFrame {
    fn default() -> Self {
        Self {
            count: 0,
            positions: [Vec3::ZERO; MAX_OBJECTS],
            colors: [Vec4::ZERO; MAX_OBJECTS],
            reflectivity: [0.0; MAX_OBJECTS],
            types: [0; MAX_OBJECTS],
            inverse_rotations: [Mat3::ZERO; MAX_OBJECTS],
            sphere_radii: [0.0; MAX_OBJECTS],
            box_sizes: [Vec3::ZERO; MAX_OBJECTS],
            torus_radii: [Vec2::ZERO; MAX_OBJECTS],
        }
    }
}

impl PackedFrame {
    /// Packs the scene's current objects in scene order.
    #[must_use]
    pub fn pack(scene: &Scene) -> Self {
        let objects = scene.objects();
        // The registry never holds more than MAX_OBJECTS.
        debug_assert!(objects.len() <= MAX_OBJECTS);
        let mut frame = Self {
            count: objects.len().min(MAX_OBJECTS),
            ..Self::default()
        };

        for (i, object) in objects.iter().enumerate().take(MAX_OBJECTS) {
            frame.positions[i] = object.position;
            frame.colors[i] = object.color;
            frame.reflectivity[i] = object.reflectivity;
            frame.types[i] = object.tag().code();
            frame.inverse_rotations[i] = inverse_rotation(object.rotation);

            match *object.shape() {
                Shape::Sphere { radius } | Shape::Light { radius } => frame.sphere_radii[i] = radius,
                Shape::Box { half_extents } => frame.box_sizes[i] = half_extents,
                Shape::Torus { toroidal, poloidal } => frame.torus_radii[i] = Vec2::new(toroidal, poloidal),
                Shape::Capsule { .. } => {}
            }
        }
        frame
    }

    /// Writes every array, the object count and the sun constants.
    ///
    /// # Errors
    ///
    /// Propagates the first error the sink reports.
    pub fn upload<S>(&self, sink: &mut S, settings: &RenderSettings) -> Result<(), UniformError>
    where
        S: UniformSink + ?Sized,
    {
        let count = i32::try_from(self.count).unwrap_or(i32::MAX);
        sink.set_int(names::OBJ_COUNT, count)?;

        sink.set_mat3_array(names::OBJ_INV_ROT_MAT, &self.inverse_rotations)?;
        sink.set_vec3_array(names::OBJ_POS, &self.positions)?;
        sink.set_vec4_array(names::OBJ_COLOR, &self.colors)?;
        sink.set_float_array(names::OBJ_REFLECT, &self.reflectivity)?;
        sink.set_int_array(names::OBJ_TYPE, &self.types)?;

        sink.set_float_array(names::SPHERE_RADII, &self.sphere_radii)?;
        sink.set_vec3_array(names::BOX_SIZES, &self.box_sizes)?;
        sink.set_vec2_array(names::TORUS_RADII, &self.torus_radii)?;

        sink.set_vec3(names::SUN_DIR, settings.sun_direction)?;
        sink.set_vec3(names::SUN_COLOR, settings.sun_color)?;
        Ok(())
    }
}

/// Packs `scene` and pushes the result through `sink`.
///
/// # Errors
///
/// Propagates the first error the sink reports.
pub fn pack_and_upload<S>(scene: &Scene, settings: &RenderSettings, sink: &mut S) -> Result<PackedFrame, UniformError>
where
    S: UniformSink + ?Sized,
{
    let frame = PackedFrame::pack(scene);
    frame.upload(sink, settings)?;
    tracing::debug!("packed {} objects", frame.count);
    Ok(frame)
}
