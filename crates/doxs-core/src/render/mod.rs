//! Docstring rendering
//!
//! [`Renderer`] lays a validated [`DocRecord`](crate::DocRecord) out as a
//! NumPy-style docstring. Layout options live in [`DialectConfig`]; the
//! renderer never re-checks schema constraints and only refuses records
//! accepted by an incompatible schema version.

pub mod dialect;
pub mod merge;
pub mod renderer;
pub mod wrap;

pub use dialect::DialectConfig;
pub use merge::merge_docstring;
pub use renderer::Renderer;
