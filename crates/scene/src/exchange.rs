//! Flat per-object records for saving and loading scenes.
//!
//! One [`ObjectRecord`] carries the common fields plus up to three
//! shape-specific properties in the column order used by the tabular scene
//! files (`TypeProp1..3`). Scenes are read and written either as CSV with one
//! flat column per component ([`save_csv`], [`load_csv`]) or as a JSON array
//! of records ([`save_json`], [`load_json`]). Loading rebuilds every object
//! through the public constructors and [`Scene::add_object`], so the capacity
//! limit applies.

use std::io::{Read, Write};

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;
use crate::primitive::{Primitive, Shape, ShapeTag};
use crate::registry::Scene;

/// A single saved object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectRecord {
    #[serde(rename = "Type")]
    pub kind: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub linear_velocity: [f32; 3],
    pub angular_velocity: [f32; 3],
    pub color: [f32; 4],
    pub reflectivity: f32,
    #[serde(rename = "TypeProps", default)]
    pub props: [Option<f32>; 3],
}

impl ObjectRecord {
    #[must_use]
    pub fn from_primitive(object: &Primitive) -> Self {
        let props = match *object.shape() {
            Shape::Sphere { radius } | Shape::Light { radius } => [Some(radius), None, None],
            Shape::Box { half_extents } => [Some(half_extents.x), Some(half_extents.y), Some(half_extents.z)],
            Shape::Torus { toroidal, poloidal } => [Some(toroidal), Some(poloidal), None],
            Shape::Capsule { radius, height } => [Some(radius), Some(height), None],
        };
        Self {
            kind: object.tag().name().to_owned(),
            position: object.position.to_array(),
            rotation: object.rotation.to_array(),
            linear_velocity: object.linear_velocity.to_array(),
            angular_velocity: object.angular_velocity.to_array(),
            color: object.color.to_array(),
            reflectivity: object.reflectivity,
            props,
        }
    }

    /// Rebuilds the object this record describes.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::UnknownKind`] for an unrecognized type name and
    /// [`ExchangeError::MissingProperty`] when a required property is empty.
    pub fn to_primitive(&self) -> Result<Primitive, ExchangeError> {
        let tag = ShapeTag::from_name(&self.kind).ok_or_else(|| ExchangeError::UnknownKind(self.kind.clone()))?;
        let prop = |index: usize| self.props[index - 1].ok_or(ExchangeError::MissingProperty { kind: tag.name(), index });

        let position = Vec3::from_array(self.position);
        let rotation = Vec3::from_array(self.rotation);
        let color = Vec4::from_array(self.color);

        let mut object = match tag {
            ShapeTag::Sphere => Primitive::sphere(position, rotation, color, self.reflectivity, prop(1)?),
            ShapeTag::Light => Primitive::light(position, rotation, color.truncate(), prop(1)?),
            ShapeTag::Box => Primitive::cuboid(
                position,
                rotation,
                color,
                self.reflectivity,
                Vec3::new(prop(1)?, prop(2)?, prop(3)?),
            ),
            ShapeTag::Torus => Primitive::torus(position, rotation, color, self.reflectivity, prop(1)?, prop(2)?),
            ShapeTag::Capsule => Primitive::capsule(position, rotation, color, self.reflectivity, prop(1)?, prop(2)?),
        };
        object.linear_velocity = Vec3::from_array(self.linear_velocity);
        object.angular_velocity = Vec3::from_array(self.angular_velocity);
        Ok(object)
    }
}

/// Column names of a scene table, in order.
pub const CSV_HEADER: [&str; 21] = [
    "Type",
    "PositionX",
    "PositionY",
    "PositionZ",
    "RotationX",
    "RotationY",
    "RotationZ",
    "LinearVelocityX",
    "LinearVelocityY",
    "LinearVelocityZ",
    "AngularVelocityX",
    "AngularVelocityY",
    "AngularVelocityZ",
    "ColorR",
    "ColorG",
    "ColorB",
    "ColorA",
    "Reflectivity",
    "TypeProp1",
    "TypeProp2",
    "TypeProp3",
];

/// One row of a scene table. Field order matches [`CSV_HEADER`]; unused
/// properties are empty cells.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CsvRow {
    #[serde(rename = "Type")]
    kind: String,
    position_x: f32,
    position_y: f32,
    position_z: f32,
    rotation_x: f32,
    rotation_y: f32,
    rotation_z: f32,
    linear_velocity_x: f32,
    linear_velocity_y: f32,
    linear_velocity_z: f32,
    angular_velocity_x: f32,
    angular_velocity_y: f32,
    angular_velocity_z: f32,
    color_r: f32,
    color_g: f32,
    color_b: f32,
    color_a: f32,
    reflectivity: f32,
    type_prop1: Option<f32>,
    type_prop2: Option<f32>,
    type_prop3: Option<f32>,
}

impl From<&ObjectRecord> for CsvRow {
    fn from(record: &ObjectRecord) -> Self {
        let [position_x, position_y, position_z] = record.position;
        let [rotation_x, rotation_y, rotation_z] = record.rotation;
        let [linear_velocity_x, linear_velocity_y, linear_velocity_z] = record.linear_velocity;
        let [angular_velocity_x, angular_velocity_y, angular_velocity_z] = record.angular_velocity;
        let [color_r, color_g, color_b, color_a] = record.color;
        let [type_prop1, type_prop2, type_prop3] = record.props;
        Self {
            kind: record.kind.clone(),
            position_x,
            position_y,
            position_z,
            rotation_x,
            rotation_y,
            rotation_z,
            linear_velocity_x,
            linear_velocity_y,
            linear_velocity_z,
            angular_velocity_x,
            angular_velocity_y,
            angular_velocity_z,
            color_r,
            color_g,
            color_b,
            color_a,
            reflectivity: record.reflectivity,
            type_prop1,
            type_prop2,
            type_prop3,
        }
    }
}

impl From<CsvRow> for ObjectRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            kind: row.kind,
            position: [row.position_x, row.position_y, row.position_z],
            rotation: [row.rotation_x, row.rotation_y, row.rotation_z],
            linear_velocity: [row.linear_velocity_x, row.linear_velocity_y, row.linear_velocity_z],
            angular_velocity: [row.angular_velocity_x, row.angular_velocity_y, row.angular_velocity_z],
            color: [row.color_r, row.color_g, row.color_b, row.color_a],
            reflectivity: row.reflectivity,
            props: [row.type_prop1, row.type_prop2, row.type_prop3],
        }
    }
}

/// Records for every object in scene order.
#[must_use]
pub fn to_records(scene: &Scene) -> Vec<ObjectRecord> {
    scene.objects().iter().map(ObjectRecord::from_primitive).collect()
}

/// Builds a fresh scene from records, in order.
///
/// # Errors
///
/// Fails on the first record that cannot be rebuilt or does not fit.
pub fn from_records(records: &[ObjectRecord]) -> Result<Scene, ExchangeError> {
    let mut scene = Scene::new();
    for record in records {
        scene.add_object(record.to_primitive()?)?;
    }
    Ok(scene)
}

/// Writes the scene as a CSV table: the [`CSV_HEADER`] row, then one row per
/// object. The header is written even for an empty scene.
///
/// # Errors
///
/// Returns [`ExchangeError::Csv`] if the writer fails.
pub fn save_csv<W: Write>(scene: &Scene, writer: W) -> Result<(), ExchangeError> {
    let mut table = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    table.write_record(CSV_HEADER)?;
    for record in to_records(scene) {
        table.serialize(CsvRow::from(&record))?;
    }
    table.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Reads a scene table written by [`save_csv`]. Columns are matched by header
/// name and surrounding whitespace is ignored. The result has no animation
/// hook.
///
/// # Errors
///
/// Returns [`ExchangeError::Csv`] for a row that does not parse and the other
/// [`ExchangeError`] variants for rows that do not describe an object.
pub fn load_csv<R: Read>(reader: R) -> Result<Scene, ExchangeError> {
    let mut table = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in table.deserialize() {
        let row: CsvRow = row?;
        records.push(ObjectRecord::from(row));
    }
    let scene = from_records(&records)?;
    tracing::info!("loaded scene with {} objects", scene.len());
    Ok(scene)
}

/// Writes the scene as a JSON array of records.
///
/// # Errors
///
/// Returns [`ExchangeError::Json`] if serialization or the writer fails.
pub fn save_json<W: Write>(scene: &Scene, writer: W) -> Result<(), ExchangeError> {
    serde_json::to_writer_pretty(writer, &to_records(scene))?;
    Ok(())
}

/// Reads a scene written by [`save_json`]. The result has no animation hook.
///
/// # Errors
///
/// Returns [`ExchangeError`] for malformed JSON or records.
pub fn load_json<R: Read>(reader: R) -> Result<Scene, ExchangeError> {
    let records: Vec<ObjectRecord> = serde_json::from_reader(reader)?;
    let scene = from_records(&records)?;
    tracing::info!("loaded scene with {} objects", scene.len());
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_record_keeps_rgb_only() {
        let mut record = ObjectRecord::from_primitive(&Primitive::light(Vec3::ONE, Vec3::ZERO, Vec3::splat(0.5), 2.0));
        record.color[3] = 1.0;
        record.reflectivity = 0.7;
        let light = record.to_primitive().unwrap();
        assert_eq!(light.color, Vec4::new(0.5, 0.5, 0.5, 0.0));
        assert_eq!(light.reflectivity, 0.0);
    }

    #[test]
    fn missing_property_is_reported() {
        let mut record =
            ObjectRecord::from_primitive(&Primitive::cuboid(Vec3::ZERO, Vec3::ZERO, Vec4::ONE, 0.0, Vec3::ONE));
        record.props[2] = None;
        assert!(matches!(
            record.to_primitive(),
            Err(ExchangeError::MissingProperty { kind: "Box", index: 3 })
        ));
    }

    #[test]
    fn unknown_kind_is_reported() {
        let mut record =
            ObjectRecord::from_primitive(&Primitive::sphere(Vec3::ZERO, Vec3::ZERO, Vec4::ONE, 0.0, 1.0));
        record.kind = "Cone".into();
        assert!(matches!(record.to_primitive(), Err(ExchangeError::UnknownKind(kind)) if kind == "Cone"));
    }
}
