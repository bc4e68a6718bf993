//! Editor-side object creation.
//!
//! [`ObjectDraft`] holds the values of an "add object" form. The form keeps
//! every shape's fields at once, so switching the selected kind does not
//! lose what was typed for another one; only the fields of the selected kind
//! are used when the draft is built.

use glam::{Vec3, Vec4};

use crate::primitive::{Primitive, ShapeTag};
use crate::registry::{Scene, SceneCommand};

/// Pending values of the "add object" form.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDraft {
    pub kind: ShapeTag,
    pub position: Vec3,
    pub rotation: Vec3,
    pub color: Vec4,
    pub reflectivity: f32,
    /// Sphere, light and capsule radius
    pub radius: f32,
    /// Box half extents
    pub size: Vec3,
    pub toroidal: f32,
    pub poloidal: f32,
    /// Capsule height
    pub height: f32,
}

impl Default for ObjectDraft {
    fn default() -> Self {
        Self {
            kind: ShapeTag::ALL[0],
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            color: Vec4::ZERO,
            reflectivity: 0.0,
            radius: 0.0,
            size: Vec3::ZERO,
            toroidal: 0.0,
            poloidal: 0.0,
            height: 0.0,
        }
    }
}

impl ObjectDraft {
    /// Selects the kind by its display name. Unknown names leave it as is.
    pub fn select(&mut self, name: &str) -> bool {
        match ShapeTag::from_name(name) {
            Some(kind) => {
                self.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Builds the selected kind. Reflectivity is clamped to `0..=1`, which is
    /// the only check the form applies.
    #[must_use]
    pub fn build(&self) -> Primitive {
        let reflectivity = self.reflectivity.clamp(0.0, 1.0);
        let (position, rotation, color) = (self.position, self.rotation, self.color);
        match self.kind {
            ShapeTag::Sphere => Primitive::sphere(position, rotation, color, reflectivity, self.radius),
            ShapeTag::Box => Primitive::cuboid(position, rotation, color, reflectivity, self.size),
            ShapeTag::Light => Primitive::light(position, rotation, color.truncate(), self.radius),
            ShapeTag::Torus => {
                Primitive::torus(position, rotation, color, reflectivity, self.toroidal, self.poloidal)
            }
            ShapeTag::Capsule => {
                Primitive::capsule(position, rotation, color, reflectivity, self.radius, self.height)
            }
        }
    }

    /// Queues the built object for the scene's next tick.
    pub fn submit(&self, scene: &mut Scene) {
        let object = self.build();
        tracing::debug!("staging new {}", object.tag());
        scene.stage(SceneCommand::Add(object));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Shape;

    #[test]
    fn light_builds_a_light() {
        let mut draft = ObjectDraft {
            color: Vec4::new(1.0, 0.8, 0.6, 1.0),
            radius: 0.5,
            reflectivity: 0.7,
            ..ObjectDraft::default()
        };
        assert!(draft.select("Light"));
        let light = draft.build();
        assert_eq!(light.tag(), ShapeTag::Light);
        assert_eq!(light.color, Vec4::new(1.0, 0.8, 0.6, 0.0));
        assert_eq!(light.reflectivity, 0.0);
    }

    #[test]
    fn reflectivity_is_clamped() {
        let draft = ObjectDraft {
            reflectivity: 4.0,
            radius: 1.0,
            ..ObjectDraft::default()
        };
        assert_eq!(draft.build().reflectivity, 1.0);
    }

    #[test]
    fn only_selected_fields_are_used() {
        let mut draft = ObjectDraft {
            radius: 0.5,
            height: 2.0,
            toroidal: 9.0,
            ..ObjectDraft::default()
        };
        assert!(draft.select("Capsule"));
        assert_eq!(*draft.build().shape(), Shape::Capsule { radius: 0.5, height: 2.0 });

        assert!(!draft.select("Cone"));
        assert_eq!(draft.kind, ShapeTag::Capsule);
    }

    #[test]
    fn submit_adds_on_next_tick() {
        let mut scene = Scene::new();
        let draft = ObjectDraft {
            radius: 1.0,
            ..ObjectDraft::default()
        };
        draft.submit(&mut scene);
        assert!(scene.is_empty());
        let report = scene.tick(0.0, 0.0);
        assert_eq!(report.added.len(), 1);
        assert_eq!(scene.objects()[0].tag(), ShapeTag::Sphere);
    }
}
