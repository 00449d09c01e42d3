//! Form model: widget inference, presentation policy and the built field tree.
//!
//! The form module turns a configuration tree into a renderable description.
//! It is UI-agnostic: [`build::FormBuilder`] walks the tree and produces
//! [`field::FormNode`]s that a frontend (the bundled Cursive layer, or
//! anything else) binds to paths.
//!
//! - [`widget`] - Edit-widget inference from scalar values
//! - [`present`] - Labels, collapse defaults and section layout
//! - [`field`] - The built form tree
//! - [`build`] - Tree walker producing the form

/// Tree walker producing the form.
pub mod build;

/// The built form tree.
pub mod field;

/// Labels, collapse defaults and section layout.
pub mod present;

/// Edit-widget inference from scalar values.
pub mod widget;

pub use build::FormBuilder;
pub use field::{Field, FormNode, Section, SizePair};
pub use present::SectionLayout;
pub use widget::WidgetKind;
