use pulse_matrix_core::{Document, DocumentError, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Window};

/// [`Document`] backed by the live browser DOM.
#[derive(Debug)]
pub struct DomDocument {
    window: Window,
    document: web_sys::Document,
}

impl DomDocument {
    /// Wraps the window's document.
    pub fn from_window(window: Window) -> Result<Self, DocumentError> {
        let document = window.document().ok_or(DocumentError::Platform {
            operation: "window.document",
            message: "window has no document".to_owned(),
        })?;
        Ok(Self { window, document })
    }

    /// Appends a `<style>` element carrying `css` to `<head>`.
    pub fn install_stylesheet(&self, css: &str) -> Result<(), DocumentError> {
        let head = self.document.head().ok_or(DocumentError::Platform {
            operation: "document.head",
            message: "document has no head".to_owned(),
        })?;
        let style = self
            .document
            .create_element("style")
            .map_err(platform("createElement"))?;
        style.set_text_content(Some(css));
        let _ = head.append_child(&style).map_err(platform("appendChild"))?;
        Ok(())
    }

    fn inner_extent(value: Result<JsValue, JsValue>) -> f64 {
        value.ok().and_then(|extent| extent.as_f64()).unwrap_or(0.0)
    }
}

fn platform(operation: &'static str) -> impl FnOnce(JsValue) -> DocumentError {
    move |error| DocumentError::Platform {
        operation,
        message: format!("{error:?}"),
    }
}

impl Document for DomDocument {
    type Element = HtmlElement;

    fn viewport(&self) -> Viewport {
        Viewport::new(
            Self::inner_extent(self.window.inner_width()),
            Self::inner_extent(self.window.inner_height()),
        )
    }

    fn mount_point(&self) -> Result<HtmlElement, DocumentError> {
        self.document.body().ok_or(DocumentError::MissingMountPoint)
    }

    fn create_element(&mut self, tag: &str) -> Result<HtmlElement, DocumentError> {
        self.document
            .create_element(tag)
            .map_err(platform("createElement"))?
            .dyn_into::<HtmlElement>()
            .map_err(|element| DocumentError::Platform {
                operation: "createElement",
                message: format!("<{}> is not an HTML element", element.tag_name()),
            })
    }

    fn set_class_name(
        &mut self,
        element: &HtmlElement,
        class_name: &str,
    ) -> Result<(), DocumentError> {
        element.set_class_name(class_name);
        Ok(())
    }

    fn add_class(&mut self, element: &HtmlElement, class: &str) -> Result<(), DocumentError> {
        element
            .class_list()
            .add_1(class)
            .map_err(platform("classList.add"))
    }

    fn set_style_property(
        &mut self,
        element: &HtmlElement,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        element
            .style()
            .set_property(name, value)
            .map_err(platform("style.setProperty"))
    }

    fn append_child(
        &mut self,
        parent: &HtmlElement,
        child: &HtmlElement,
    ) -> Result<(), DocumentError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(platform("appendChild"))
    }

    fn clear_children(&mut self, element: &HtmlElement) -> Result<(), DocumentError> {
        element.set_inner_html("");
        Ok(())
    }

    fn set_text_content(&mut self, element: &HtmlElement, text: &str) -> Result<(), DocumentError> {
        element.set_text_content(Some(text));
        Ok(())
    }
}
