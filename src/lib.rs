//! # dynconfig
//!
//! A Cursive-based TUI component library for schema-free configuration editing.
//!
//! dynconfig turns an arbitrary, unknown-shape configuration document into an
//! interactive terminal form. No schema is required: edit widgets are inferred
//! from the values themselves, nested structure becomes collapsible sections,
//! and every edit is routed back into the document by path without disturbing
//! sibling data.
//!
//! ## Features
//!
//! - Beautiful TUI interface built with [Cursive](https://github.com/gyscos/cursive)
//! - Schema-free widget inference: checkbox, numeric, URL, single/multi-line text
//! - Collapsible sections with derived labels and two-column layout for flat groups
//! - Pluggable override editors for structural idioms the generic renderer
//!   handles poorly (field-mapping tables, paginated form descriptions)
//! - Dirty tracking with safe save/reset against a pluggable persistence backend
//! - Multi-format support: TOML and JSON configuration files
//! - Automatic backup before saving changes
//! - Hidden fields (`*__HIDDEN` keys) preserved verbatim through every save
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Comments are picked up from `config-comments.json` when present.
//!     let saved = dynconfig::run_file("config.toml", None).await?;
//!     if saved {
//!         println!("configuration saved");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Configuration tree, paths and comments
//! - [`form`] - Widget inference, presentation policy and the built form
//! - [`overrides`] - Pluggable specialized sub-editors
//! - [`controller`] - Form-state controller and the persistence contract
//! - [`store`] - File-backed persistence (TOML/JSON)
//! - [`ui`] - Cursive views and event handlers
//! - [`run`] - Application runner and main entry points

/// Form-state controller and the persistence contract.
pub mod controller;

/// Configuration tree, paths and comments.
pub mod data;

/// Widget inference, presentation policy and the built form.
pub mod form;

/// Pluggable specialized sub-editors.
pub mod overrides;

/// TUI application runner and main entry points.
pub mod run;

/// File-backed persistence (TOML/JSON).
pub mod store;

/// Cursive views and event handlers.
pub mod ui;

pub use run::*;
pub use serde_json::Value;
