use std::{cell::RefCell, rc::Rc};

use pulse_matrix_rendering::stylesheet::matrix_stylesheet;
use pulse_matrix_system_bootstrap::{App, Bootstrap, Config};
use pulse_matrix_system_randomness::SeededRandom;
use tracing::warn;
use wasm_bindgen::{prelude::*, JsCast};

use crate::dom::DomDocument;

/// Module start hook: shows the matrix and keeps it sized to the window.
///
/// Every `resize` event rebuilds the whole matrix synchronously; there is no
/// debouncing.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = DomDocument::from_window(window.clone()).map_err(to_js)?;
    document
        .install_stylesheet(&matrix_stylesheet())
        .map_err(to_js)?;

    let bootstrap = Bootstrap::from_config(&Config::default()).map_err(to_js)?;
    let mut app = App::new(bootstrap, document, SeededRandom::from_entropy()).map_err(to_js)?;
    let _ = app.start().map_err(to_js)?;

    let app = Rc::new(RefCell::new(app));
    let on_resize = Closure::wrap(Box::new(move || {
        let rebuilt = app.borrow_mut().handle_resize();
        if let Err(error) = rebuilt {
            warn!(%error, "matrix rebuild after resize failed");
        }
    }) as Box<dyn FnMut()>);

    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
