//! # Primitive Variants
//!
//! Every scene object shares one set of common fields (position, rotation,
//! velocities, color, reflectivity) and carries exactly one shape payload.
//! The shape payload doubles as the type tag the shader branches on, so a
//! tag can never disagree with the parameters stored next to it.
//!
//! No parameter is validated. Negative radii, reflectivity outside `0..=1`
//! and non-finite values are stored as given and reach the shader untouched.

use glam::{Vec3, Vec4};
use std::fmt;

/// Integer discriminant the shader uses to pick a distance function.
///
/// The numeric values are part of the shader contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ShapeTag {
    Light = 0,
    Sphere = 1,
    Box = 2,
    Torus = 3,
    Capsule = 4,
}

impl ShapeTag {
    /// Kinds in the order an editor lists them.
    pub const ALL: [ShapeTag; 5] = [
        ShapeTag::Sphere,
        ShapeTag::Box,
        ShapeTag::Light,
        ShapeTag::Torus,
        ShapeTag::Capsule,
    ];

    /// Value uploaded in the `objType` array.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ShapeTag::Light => "Light",
            ShapeTag::Sphere => "Sphere",
            ShapeTag::Box => "Box",
            ShapeTag::Torus => "Torus",
            ShapeTag::Capsule => "Capsule",
        }
    }

    /// Inverse of [`ShapeTag::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

impl fmt::Display for ShapeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    Capsule { radius: f32, height: f32 },
    Torus { toroidal: f32, poloidal: f32 },
    Light { radius: f32 },
}

impl Shape {
    #[must_use]
    pub const fn tag(&self) -> ShapeTag {
        match self {
            Shape::Sphere { .. } => ShapeTag::Sphere,
            Shape::Box { .. } => ShapeTag::Box,
            Shape::Capsule { .. } => ShapeTag::Capsule,
            Shape::Torus { .. } => ShapeTag::Torus,
            Shape::Light { .. } => ShapeTag::Light,
        }
    }
}

/// Mutable view of a primitive's shape parameters.
///
/// Handing out field references instead of `&mut Shape` lets editors change
/// sizes without being able to swap the variant, which would change the tag.
#[derive(Debug)]
pub enum ShapeMut<'a> {
    Sphere { radius: &'a mut f32 },
    Box { half_extents: &'a mut Vec3 },
    Capsule { radius: &'a mut f32, height: &'a mut f32 },
    Torus { toroidal: &'a mut f32, poloidal: &'a mut f32 },
    Light { radius: &'a mut f32 },
}

/// One shape instance in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// World-space center
    pub position: Vec3,
    /// Euler angles in radians, composed as `Rz * Ry * Rx`
    pub rotation: Vec3,
    /// Units per second added to `position` each tick
    pub linear_velocity: Vec3,
    /// Radians per second added to `rotation` each tick
    pub angular_velocity: Vec3,
    /// RGBA in `0..=1`; lights keep alpha at zero
    pub color: Vec4,
    /// Mirror factor, nominally `0..=1`; lights keep zero
    pub reflectivity: f32,
    shape: Shape,
}

impl Primitive {
    fn with_shape(position: Vec3, rotation: Vec3, color: Vec4, reflectivity: f32, shape: Shape) -> Self {
        Self {
            position,
            rotation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            color,
            reflectivity,
            shape,
        }
    }

    #[must_use]
    pub fn sphere(position: Vec3, rotation: Vec3, color: Vec4, reflectivity: f32, radius: f32) -> Self {
        Self::with_shape(position, rotation, color, reflectivity, Shape::Sphere { radius })
    }

    #[must_use]
    pub fn cuboid(position: Vec3, rotation: Vec3, color: Vec4, reflectivity: f32, half_extents: Vec3) -> Self {
        Self::with_shape(position, rotation, color, reflectivity, Shape::Box { half_extents })
    }

    #[must_use]
    pub fn capsule(
        position: Vec3,
        rotation: Vec3,
        color: Vec4,
        reflectivity: f32,
        radius: f32,
        height: f32,
    ) -> Self {
        Self::with_shape(position, rotation, color, reflectivity, Shape::Capsule { radius, height })
    }

    #[must_use]
    pub fn torus(
        position: Vec3,
        rotation: Vec3,
        color: Vec4,
        reflectivity: f32,
        toroidal: f32,
        poloidal: f32,
    ) -> Self {
        Self::with_shape(position, rotation, color, reflectivity, Shape::Torus { toroidal, poloidal })
    }

    /// Light emitter. Only RGB is taken; alpha and reflectivity are zero.
    #[must_use]
    pub fn light(position: Vec3, rotation: Vec3, color: Vec3, radius: f32) -> Self {
        Self::with_shape(position, rotation, color.extend(0.0), 0.0, Shape::Light { radius })
    }

    #[must_use]
    pub const fn tag(&self) -> ShapeTag {
        self.shape.tag()
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> ShapeMut<'_> {
        match &mut self.shape {
            Shape::Sphere { radius } => ShapeMut::Sphere { radius },
            Shape::Box { half_extents } => ShapeMut::Box { half_extents },
            Shape::Capsule { radius, height } => ShapeMut::Capsule { radius, height },
            Shape::Torus { toroidal, poloidal } => ShapeMut::Torus { toroidal, poloidal },
            Shape::Light { radius } => ShapeMut::Light { radius },
        }
    }

    /// Simple Euler step of position and rotation. Angles are not wrapped.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.linear_velocity * dt;
        self.rotation += self.angular_velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_shader_codes() {
        let white = Vec4::ONE;
        assert_eq!(Primitive::light(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, 1.0).tag().code(), 0);
        assert_eq!(Primitive::sphere(Vec3::ZERO, Vec3::ZERO, white, 0.0, 1.0).tag().code(), 1);
        assert_eq!(Primitive::cuboid(Vec3::ZERO, Vec3::ZERO, white, 0.0, Vec3::ONE).tag().code(), 2);
        assert_eq!(Primitive::torus(Vec3::ZERO, Vec3::ZERO, white, 0.0, 1.0, 0.2).tag().code(), 3);
        assert_eq!(Primitive::capsule(Vec3::ZERO, Vec3::ZERO, white, 0.0, 0.5, 2.0).tag().code(), 4);
    }

    #[test]
    fn light_drops_alpha_and_reflectivity() {
        let light = Primitive::light(Vec3::ONE, Vec3::ZERO, Vec3::new(1.0, 0.5, 0.25), 2.0);
        assert_eq!(light.color, Vec4::new(1.0, 0.5, 0.25, 0.0));
        assert_eq!(light.reflectivity, 0.0);
    }

    #[test]
    fn sphere_and_light_keep_their_rotation() {
        let angles = Vec3::new(0.1, -0.4, 2.0);
        assert_eq!(Primitive::sphere(Vec3::ZERO, angles, Vec4::ONE, 0.0, 1.0).rotation, angles);
        assert_eq!(Primitive::light(Vec3::ZERO, angles, Vec3::ONE, 1.0).rotation, angles);
    }

    #[test]
    fn shape_mut_edits_in_place() {
        let mut torus = Primitive::torus(Vec3::ZERO, Vec3::ZERO, Vec4::ONE, 0.2, 1.5, 0.25);
        if let ShapeMut::Torus { poloidal, .. } = torus.shape_mut() {
            *poloidal = 0.5;
        }
        assert_eq!(*torus.shape(), Shape::Torus { toroidal: 1.5, poloidal: 0.5 });
        assert_eq!(torus.tag(), ShapeTag::Torus);
    }

    #[test]
    fn negative_radius_is_accepted() {
        let sphere = Primitive::sphere(Vec3::ZERO, Vec3::ZERO, Vec4::ONE, 3.0, -1.0);
        assert_eq!(*sphere.shape(), Shape::Sphere { radius: -1.0 });
        assert_eq!(sphere.reflectivity, 3.0);
    }

    #[test]
    fn names_round_trip() {
        for tag in ShapeTag::ALL {
            assert_eq!(ShapeTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(ShapeTag::from_name("Cylinder"), None);
    }
}
