//! Platform primitives required to materialise the matrix as visual elements.

use std::{any::Any, fmt};

use thiserror::Error;

use crate::{RandomSource, Viewport};

/// Host surface capable of creating and mutating visual elements.
///
/// This is the complete set of platform calls the matrix issues. Browser
/// adapters map it onto the DOM; headless adapters keep an in-memory tree.
pub trait Document {
    /// Handle to an element owned by the document.
    type Element: Clone + fmt::Debug;

    /// Current size of the visible area.
    fn viewport(&self) -> Viewport;

    /// Element that top-level scene entities are mounted into.
    fn mount_point(&self) -> Result<Self::Element, DocumentError>;

    /// Creates a detached element with the provided tag name.
    fn create_element(&mut self, tag: &str) -> Result<Self::Element, DocumentError>;

    /// Replaces the element's entire class list with `class_name`.
    fn set_class_name(
        &mut self,
        element: &Self::Element,
        class_name: &str,
    ) -> Result<(), DocumentError>;

    /// Adds a single class to the element's class list.
    fn add_class(&mut self, element: &Self::Element, class: &str) -> Result<(), DocumentError>;

    /// Sets an inline style property, typically a CSS custom property.
    fn set_style_property(
        &mut self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError>;

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    fn append_child(
        &mut self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), DocumentError>;

    /// Removes every child of the element.
    fn clear_children(&mut self, element: &Self::Element) -> Result<(), DocumentError>;

    /// Replaces the element's content with a single text run.
    fn set_text_content(&mut self, element: &Self::Element, text: &str)
        -> Result<(), DocumentError>;
}

/// Visual entity that a scene can own and render into a [`Document`].
pub trait Renderable<D: Document> {
    /// Short human-readable tag identifying the kind of entity.
    fn name(&self) -> &'static str;

    /// Brings the entity's elements up to date.
    fn render(
        &mut self,
        document: &mut D,
        random: &mut dyn RandomSource,
    ) -> Result<(), DocumentError>;

    /// Root element of the entity, if it has been created.
    fn element(&self) -> Option<&D::Element>;

    /// Exposes the concrete entity for typed lookups.
    fn as_any(&self) -> &dyn Any;
}

/// Errors reported by [`Document`] implementations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The handle does not refer to an element of this document.
    #[error("element #{id} does not belong to this document")]
    UnknownElement {
        /// Raw identifier of the rejected handle.
        id: usize,
    },
    /// Appending would make an element its own ancestor.
    #[error("element #{child} cannot be appended inside itself")]
    HierarchyCycle {
        /// Raw identifier of the element being appended.
        child: usize,
    },
    /// The host surface offers no element to mount into.
    #[error("document has no mount point")]
    MissingMountPoint,
    /// The underlying platform rejected a call.
    #[error("platform call `{operation}` failed: {message}")]
    Platform {
        /// Name of the failed primitive.
        operation: &'static str,
        /// Message reported by the platform.
        message: String,
    },
}
