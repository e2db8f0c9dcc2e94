#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scene management and a headless document for Pulse Matrix adapters.
//!
//! A [`Scene`] owns named [`Renderable`] entities and mounts their elements
//! into a container it creates inside the document's mount point. Appending
//! under an existing key replaces the previous entity, so the scene never
//! shows more than one entity per key. [`MemoryDocument`] is the headless
//! [`Document`] implementation used by tests and the command-line adapter.

pub mod memory;
pub mod stylesheet;

use pulse_matrix_core::{Document, DocumentError, RandomSource, Renderable};
use tracing::debug;

pub use memory::{ElementId, ElementSnapshot, MemoryDocument, StyleProperty};

/// Class applied to the container element a scene mounts its entities into.
pub const SCENE_CLASS: &str = "scene";

/// Keyed collection of renderable entities mounted into a single container.
pub struct Scene<D: Document> {
    container: D::Element,
    entries: Vec<(String, Box<dyn Renderable<D>>)>,
}

impl<D: Document> Scene<D> {
    /// Creates an empty scene whose container is appended to the document's
    /// mount point.
    pub fn attach(document: &mut D) -> Result<Self, DocumentError> {
        let mount = document.mount_point()?;
        let container = document.create_element("div")?;
        document.set_class_name(&container, SCENE_CLASS)?;
        document.append_child(&mount, &container)?;

        Ok(Self {
            container,
            entries: Vec::new(),
        })
    }

    /// Registers `entity` under `key`, replacing any entity already stored
    /// there while keeping its position in render order.
    pub fn append<K, E>(&mut self, key: K, entity: E) -> &mut Self
    where
        K: Into<String>,
        E: Renderable<D> + 'static,
    {
        let key = key.into();
        let entity: Box<dyn Renderable<D>> = Box::new(entity);

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => {
                debug!(key = %key, name = entity.name(), "replacing scene entity");
                slot.1 = entity;
            }
            None => {
                debug!(key = %key, name = entity.name(), "adding scene entity");
                self.entries.push((key, entity));
            }
        }

        self
    }

    /// Renders every entity in insertion order and mounts its element,
    /// discarding whatever the container previously displayed.
    pub fn render(
        &mut self,
        document: &mut D,
        random: &mut dyn RandomSource,
    ) -> Result<&mut Self, DocumentError> {
        document.clear_children(&self.container)?;

        for (_, entity) in &mut self.entries {
            entity.render(document, random)?;
            if let Some(element) = entity.element() {
                document.append_child(&self.container, element)?;
            }
        }

        Ok(self)
    }

    /// Entity stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn Renderable<D>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, entity)| entity.as_ref())
    }

    /// Entity stored under `key`, if it has the concrete type `T`.
    #[must_use]
    pub fn get_as<T: 'static>(&self, key: &str) -> Option<&T> {
        self.get(key)?.as_any().downcast_ref::<T>()
    }

    /// Keys of the registered entities in render order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entity has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Container element the entities are mounted into.
    #[must_use]
    pub fn container(&self) -> &D::Element {
        &self.container
    }
}
