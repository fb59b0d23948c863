//! Output generation for the rendered dashboard.
//!
//! # Submodules
//!
//! - [`page`]: Writes the full HTML document after each trigger
//!
//! # Output Structure
//!
//! ```text
//! dashboard.html   # form, toasts, loader and the card grid
//! ```

pub mod page;
