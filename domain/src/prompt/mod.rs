//! Prompt domain
//!
//! Templates for every generation call in a debate, plus the placeholder
//! renderer used by evaluation layers.

pub mod render;
mod template;

pub use render::render;
pub use template::{ArgumentPromptContext, PromptTemplate};
