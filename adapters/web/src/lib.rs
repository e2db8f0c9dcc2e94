#![forbid(unsafe_code)]

//! Browser frontend for Pulse Matrix.
//!
//! On `wasm32` the module start hook injects the matrix stylesheet, mounts the
//! scene into `<body>`, shows the first matrix and rebuilds it on every window
//! `resize` event. The DOM is reached exclusively through `DomDocument`,
//! which maps the core `Document` primitives onto `web-sys` calls. On other
//! targets the crate is empty.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::DomDocument;
#[cfg(target_arch = "wasm32")]
pub use wasm::start;
