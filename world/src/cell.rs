use pulse_matrix_core::{
    visual::{compute_visual_state, CellVisualState, CELL_CLASS},
    Document, DocumentError, PaletteCode,
};

/// Single grid position holding an optional palette code.
///
/// The backing element is created on the first render and mutated in place
/// afterwards.
#[derive(Clone, Debug)]
pub struct Cell<E> {
    value: Option<PaletteCode>,
    element: Option<E>,
}

impl<E> Default for Cell<E> {
    fn default() -> Self {
        Self {
            value: None,
            element: None,
        }
    }
}

impl<E> Cell<E> {
    /// Creates a cell without a value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell holding `value`.
    #[must_use]
    pub fn with_value(value: PaletteCode) -> Self {
        Self {
            value: Some(value),
            element: None,
        }
    }

    /// Current value, if one has been assigned.
    #[must_use]
    pub const fn value(&self) -> Option<PaletteCode> {
        self.value
    }

    /// Assigns a new value. Membership in any palette is not checked.
    pub fn set_value(&mut self, value: Option<PaletteCode>) {
        self.value = value;
    }

    /// Visual state derived from the current value.
    #[must_use]
    pub fn visual_state(&self) -> CellVisualState {
        compute_visual_state(self.value)
    }

    /// Backing element, or `None` if the cell was never rendered.
    #[must_use]
    pub const fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// Brings the backing element in line with the current value and, when
    /// `parent` is provided, appends it there.
    ///
    /// The class list is reset to the base class before the modifier is
    /// applied, so repeated renders never accumulate modifiers.
    pub fn render<D>(
        &mut self,
        document: &mut D,
        parent: Option<&E>,
    ) -> Result<&mut Self, DocumentError>
    where
        D: Document<Element = E>,
    {
        let element = match self.element.take() {
            Some(element) => element,
            None => document.create_element("div")?,
        };
        let applied = self.apply_visual_state(document, &element, parent);
        self.element = Some(element);
        applied?;

        Ok(self)
    }

    fn apply_visual_state<D>(
        &self,
        document: &mut D,
        element: &E,
        parent: Option<&E>,
    ) -> Result<(), DocumentError>
    where
        D: Document<Element = E>,
    {
        document.set_class_name(element, CELL_CLASS)?;
        match self.visual_state().modifier() {
            Some(modifier) => document.add_class(element, modifier)?,
            None => document.set_text_content(element, "")?,
        }

        if let Some(parent) = parent {
            document.append_child(parent, element)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_matrix_core::Viewport;
    use pulse_matrix_rendering::{ElementId, MemoryDocument};

    fn document() -> MemoryDocument {
        MemoryDocument::new(Viewport::new(100.0, 100.0))
    }

    #[test]
    fn element_is_absent_until_first_render() {
        let cell: Cell<ElementId> = Cell::with_value(PaletteCode::new(1));
        assert!(cell.element().is_none());
    }

    #[test]
    fn rendering_twice_keeps_a_single_modifier_and_element() {
        let mut document = document();
        let mut cell = Cell::with_value(PaletteCode::new(3));

        let first = *cell
            .render(&mut document, None)
            .expect("render")
            .element()
            .expect("element created");
        let second = *cell
            .render(&mut document, None)
            .expect("render")
            .element()
            .expect("element reused");

        assert_eq!(first, second);
        assert_eq!(
            document.classes(first),
            Some(&["matrix__cell".to_owned(), "matrix__cell--m-3".to_owned()][..])
        );
    }

    #[test]
    fn changing_the_value_swaps_the_modifier() {
        let mut document = document();
        let mut cell = Cell::with_value(PaletteCode::new(3));
        let _ = cell.render(&mut document, None).expect("render");

        cell.set_value(Some(PaletteCode::new(8)));
        let element = *cell
            .render(&mut document, None)
            .expect("render")
            .element()
            .expect("element");

        assert_eq!(
            document.classes(element),
            Some(&["matrix__cell".to_owned(), "matrix__cell--m-8".to_owned()][..])
        );
    }

    #[test]
    fn missing_value_renders_blank() {
        let mut document = document();
        let mut cell = Cell::with_value(PaletteCode::new(5));
        let _ = cell.render(&mut document, None).expect("render");

        cell.set_value(None);
        let element = *cell
            .render(&mut document, None)
            .expect("render")
            .element()
            .expect("element");

        assert_eq!(
            document.classes(element),
            Some(&["matrix__cell".to_owned()][..])
        );
        assert_eq!(document.text(element), Some(""));
        assert!(cell.visual_state().is_blank());
    }

    #[test]
    fn render_appends_to_parent_and_moves_on_rerender() {
        let mut document = document();
        let first_row = document.create_element("div").expect("create");
        let second_row = document.create_element("div").expect("create");
        let mut cell: Cell<ElementId> = Cell::new();

        let _ = cell
            .render(&mut document, Some(&first_row))
            .expect("render");
        let element = *cell
            .render(&mut document, Some(&second_row))
            .expect("render")
            .element()
            .expect("element");

        assert_eq!(document.children(first_row), Some(&[][..]));
        assert_eq!(document.children(second_row), Some(&[element][..]));
    }

    #[test]
    fn failed_render_keeps_the_created_element() {
        let mut document = document();
        let mut cell: Cell<ElementId> = Cell::with_value(PaletteCode::new(2));
        let bogus_parent = {
            let mut scratch = MemoryDocument::new(Viewport::new(1.0, 1.0));
            for _ in 0..64 {
                let _ = scratch.create_element("div").expect("create");
            }
            scratch.create_element("div").expect("create")
        };

        assert!(cell.render(&mut document, Some(&bogus_parent)).is_err());
        assert!(cell.element().is_some());
    }
}
