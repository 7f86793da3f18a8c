//! Shared helpers: HTML escaping, path resolution, pluralization.

pub mod html;
pub mod path;
mod plural;

pub use plural::plural_count;
