use pulse_matrix_core::{layout::MAX_CELLS, GridDimensions, LayoutError, Viewport};
use pulse_matrix_rendering::MemoryDocument;
use pulse_matrix_system_bootstrap::{App, Bootstrap, Config, RebuildError, MATRIX_KEY};
use pulse_matrix_system_randomness::SeededRandom;

fn app(viewport: Viewport) -> App<MemoryDocument, SeededRandom> {
    let bootstrap = Bootstrap::from_config(&Config::default()).expect("default config");
    App::new(bootstrap, MemoryDocument::new(viewport), SeededRandom::new(0x0123_4567))
        .expect("attach scene")
}

fn mounted_matrices(app: &App<MemoryDocument, SeededRandom>) -> usize {
    let document = app.document();
    document
        .children(*app.scene().container())
        .expect("scene container exists")
        .len()
}

#[test]
fn start_shows_a_matrix_sized_for_the_viewport() {
    let mut app = app(Viewport::new(1280.0, 720.0));

    let dimensions = app.start().expect("start");

    assert_eq!(dimensions, GridDimensions::new(20, 11));
    let matrix = app.matrix().expect("matrix registered");
    assert_eq!(matrix.dimensions(), dimensions);
    assert_eq!(mounted_matrices(&app), 1);
    assert_eq!(app.rebuilds(), 1);
}

#[test]
fn consecutive_resizes_leave_exactly_one_matrix() {
    let mut app = app(Viewport::new(1280.0, 720.0));
    let _ = app.start().expect("start");

    app.document_mut().set_viewport(Viewport::new(640.0, 480.0));
    let first = app.handle_resize().expect("first resize");
    app.document_mut().set_viewport(Viewport::new(300.0, 900.0));
    let second = app.handle_resize().expect("second resize");

    assert_eq!(first, GridDimensions::new(10, 7));
    assert_eq!(second, GridDimensions::new(4, 14));
    assert_eq!(app.scene().len(), 1);
    assert_eq!(app.scene().keys().collect::<Vec<_>>(), vec![MATRIX_KEY]);
    assert_eq!(mounted_matrices(&app), 1);
    assert_eq!(
        app.matrix().map(|matrix| matrix.dimensions()),
        Some(second)
    );
    assert_eq!(app.rebuilds(), 3);

    // body, scene container, matrix root, 14 rows and 4x14 cells.
    assert_eq!(app.document().connected_element_count(), 3 + 14 + 4 * 14);
    assert!(app.document().element_count() > app.document().connected_element_count());
}

#[test]
fn every_resize_builds_a_fresh_matrix_even_without_size_change() {
    let mut app = app(Viewport::new(800.0, 600.0));
    let _ = app.start().expect("start");
    let first_root = app.matrix().map(|matrix| *matrix.element());

    let _ = app.handle_resize().expect("resize");
    let second_root = app.matrix().map(|matrix| *matrix.element());

    assert!(first_root.is_some());
    assert_ne!(first_root, second_root, "no incremental reuse across resizes");
    let container = *app.scene().container();
    assert_eq!(
        app.document().children(container),
        second_root.as_ref().map(std::slice::from_ref)
    );
}

#[test]
fn shrinking_below_one_cell_keeps_a_single_cell() {
    let mut app = app(Viewport::new(1280.0, 720.0));
    let _ = app.start().expect("start");

    app.document_mut().set_viewport(Viewport::new(12.0, 3.0));
    let dimensions = app.handle_resize().expect("resize");

    assert_eq!(dimensions, GridDimensions::new(1, 1));
    let matrix = app.matrix().expect("matrix registered");
    assert_eq!(matrix.rows().len(), 1);
    assert_eq!(matrix.rows()[0].len(), 1);
}

#[test]
fn oversized_viewport_is_rejected_and_keeps_previous_matrix() {
    let mut app = app(Viewport::new(1280.0, 720.0));
    let _ = app.start().expect("start");
    let before = app.document().element_count();

    app.document_mut().set_viewport(Viewport::new(1.0e9, 1.0e9));
    let result = app.handle_resize();

    assert!(matches!(
        result,
        Err(RebuildError::Layout(LayoutError::GridTooLarge { limit: MAX_CELLS, .. }))
    ));
    assert_eq!(app.document().element_count(), before, "nothing was built");
    assert_eq!(
        app.matrix().map(|matrix| matrix.dimensions()),
        Some(GridDimensions::new(20, 11))
    );
    assert_eq!(mounted_matrices(&app), 1);
    assert_eq!(app.rebuilds(), 1);
}
