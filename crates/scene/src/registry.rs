//! # Scene Registry
//!
//! Owns the ordered, capacity-bounded list of primitives. Insertion order is
//! the order the editor shows and the order the packer writes GPU slots in,
//! so nothing in here ever reorders the list.
//!
//! Membership changes either happen directly between frames
//! ([`Scene::add_object`], [`Scene::remove_object`]) or are staged with
//! [`Scene::stage`] and applied at the start of the next [`Scene::tick`].
//! During the animation hook and integration the list is only reachable as a
//! slice, so membership cannot change mid-tick.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::SceneError;
use crate::primitive::Primitive;
use crate::MAX_OBJECTS;

/// Identity of a scene object.
///
/// Ids are handed out by [`Scene::add_object`] from a process-wide counter
/// and never reused, so two objects with identical fields are still told
/// apart and an id from one scene never matches an object in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Scripted motion run once per tick before integration.
pub trait Animation {
    /// `elapsed` is seconds since the scene started.
    fn animate(&mut self, objects: &mut [Primitive], elapsed: f64);
}

impl<F> Animation for F
where
    F: FnMut(&mut [Primitive], f64),
{
    fn animate(&mut self, objects: &mut [Primitive], elapsed: f64) {
        self(objects, elapsed);
    }
}

/// A membership change queued for the next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    Add(Primitive),
    Remove(ObjectId),
}

/// What happened to the staged commands drained by a tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    /// Ids of objects added by staged commands, in staging order
    pub added: Vec<ObjectId>,
    /// Number of staged removals that succeeded
    pub removed: usize,
    /// Staged commands that failed; each left the scene unchanged
    pub rejected: Vec<SceneError>,
}

/// Ordered collection of at most [`MAX_OBJECTS`] primitives.
#[derive(Default)]
pub struct Scene {
    ids: Vec<ObjectId>,
    objects: Vec<Primitive>,
    staged: VecDeque<SceneCommand>,
    animation: Option<Box<dyn Animation>>,
}

impl Scene {
    /// Create an empty scene
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from an initial list, in order.
    ///
    /// # Errors
    ///
    /// [`SceneError::CapacityExceeded`] if the list holds more than
    /// [`MAX_OBJECTS`] objects.
    pub fn with_objects<I>(objects: I) -> Result<Self, SceneError>
    where
        I: IntoIterator<Item = Primitive>,
    {
        let mut scene = Self::new();
        for object in objects {
            scene.add_object(object)?;
        }
        Ok(scene)
    }

    /// Appends `object` to the end of the list.
    ///
    /// # Errors
    ///
    /// [`SceneError::CapacityExceeded`] when the scene is full; the object is
    /// dropped and the scene is unchanged.
    pub fn add_object(&mut self, object: Primitive) -> Result<ObjectId, SceneError> {
        if self.objects.len() >= MAX_OBJECTS {
            return Err(SceneError::CapacityExceeded { capacity: MAX_OBJECTS });
        }
        let id = ObjectId::fresh();
        tracing::debug!("adding {} as object {id}", object.tag());
        self.ids.push(id);
        self.objects.push(object);
        Ok(id)
    }

    /// Removes the object with identity `id` and hands it back.
    ///
    /// # Errors
    ///
    /// [`SceneError::NotFound`] if no object in this scene has that id.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<Primitive, SceneError> {
        let index = self.index_of(id).ok_or(SceneError::NotFound(id))?;
        self.ids.remove(index);
        let object = self.objects.remove(index);
        tracing::debug!("removed {} object {id}", object.tag());
        Ok(object)
    }

    /// Queues a membership change for the start of the next tick.
    pub fn stage(&mut self, command: SceneCommand) {
        self.staged.push_back(command);
    }

    /// Number of commands waiting for the next tick.
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Installs the animation hook, replacing any previous one.
    pub fn set_animation<A>(&mut self, animation: A)
    where
        A: Animation + 'static,
    {
        self.animation = Some(Box::new(animation));
    }

    pub fn clear_animation(&mut self) {
        self.animation = None;
    }

    #[must_use]
    pub fn has_animation(&self) -> bool {
        self.animation.is_some()
    }

    /// Advances the scene by one frame.
    ///
    /// Order: staged commands are applied, then the animation hook runs with
    /// `elapsed`, then every object integrates its velocities over `dt`.
    /// Anything the hook writes is therefore integrated in the same tick.
    pub fn tick(&mut self, dt: f32, elapsed: f64) -> TickReport {
        let report = self.apply_staged();

        if let Some(animation) = self.animation.as_mut() {
            animation.animate(&mut self.objects, elapsed);
        }

        for object in &mut self.objects {
            object.integrate(dt);
        }

        report
    }

    fn apply_staged(&mut self) -> TickReport {
        let mut report = TickReport::default();
        while let Some(command) = self.staged.pop_front() {
            let outcome = match command {
                SceneCommand::Add(object) => self.add_object(object).map(|id| report.added.push(id)),
                SceneCommand::Remove(id) => self.remove_object(id).map(|_| report.removed += 1),
            };
            if let Err(err) = outcome {
                tracing::warn!("staged scene command rejected: {err}");
                report.rejected.push(err);
            }
        }
        report
    }

    /// Number of objects currently in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    /// Live field edits. Membership cannot change through the slice.
    pub fn objects_mut(&mut self) -> &mut [Primitive] {
        &mut self.objects
    }

    /// Ids in the same order as [`Scene::objects`].
    #[must_use]
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    #[must_use]
    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.ids.iter().position(|&candidate| candidate == id)
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Primitive> {
        self.index_of(id).map(|index| &self.objects[index])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Primitive> {
        self.index_of(id).map(move |index| &mut self.objects[index])
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("ids", &self.ids)
            .field("objects", &self.objects)
            .field("staged", &self.staged)
            .field("has_animation", &self.animation.is_some())
            .finish_non_exhaustive()
    }
}
