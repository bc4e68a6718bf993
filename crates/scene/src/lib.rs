#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Ray March Scene Core
//!
//! Scene representation and uniform marshaling for an interactive renderer
//! of implicit (distance-field) primitives. The distance functions and
//! shading run in an external shader; this crate owns everything that feeds
//! it.
//!
//! ## Key Components
//!
//! -   **Primitives:** [`Primitive`] holds the common object fields plus one
//!     [`Shape`] payload (sphere, box, capsule, torus, light). The payload
//!     determines the [`ShapeTag`] the shader branches on.
//! -   **Registry:** [`Scene`] keeps at most [`MAX_OBJECTS`] primitives in
//!     insertion order, applies staged editor commands, runs the optional
//!     [`Animation`] hook and integrates velocities each tick.
//! -   **Packing:** [`PackedFrame`] lays the object list out as fixed-size
//!     parallel arrays and writes them through a [`UniformSink`].
//! -   **Camera:** [`Camera`] is a yaw/pitch free-fly camera with a derived
//!     orthonormal basis.
//!
//! ## Frame order
//!
//! ```rust,ignore
//! camera.update_from_input(keys, mouse_delta, dt, captured);
//! let report = scene.tick(dt, elapsed);
//! pack_and_upload(&scene, &settings, &mut sink)?;
//! camera.upload(&mut sink)?;
//! // external draw call
//! ```

pub mod camera;
pub mod demo;
pub mod editor;
pub mod error;
pub mod exchange;
pub mod packer;
pub mod primitive;
pub mod registry;
pub mod rotation;
pub mod uniforms;

/// Maximum number of simultaneous scene objects.
///
/// Must match the array lengths declared by the shader.
pub const MAX_OBJECTS: usize = 32;

pub use camera::{Camera, InputFrame, MovementKeys};
pub use editor::ObjectDraft;
pub use error::{ExchangeError, SceneError, UniformError};
pub use packer::{pack_and_upload, PackedFrame, RenderSettings};
pub use primitive::{Primitive, Shape, ShapeMut, ShapeTag};
pub use registry::{Animation, ObjectId, Scene, SceneCommand, TickReport};
pub use uniforms::{names, UniformRecorder, UniformSink, UniformValue};
