//! Output generation.
//!
//! - [`json`]: writes the collected [`Page`](crate::models::Page) corpus as a JSON array

pub mod json;
