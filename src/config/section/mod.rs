//! Configuration section definitions.
//!
//! Each module corresponds to a section in `iconsprite.toml`:
//!
//! | Module  | TOML Section    | Purpose                                  |
//! |---------|-----------------|------------------------------------------|
//! | `build` | `[build]`       | Icon/output directories, preview stage   |
//! | `shape` | `[shape]`       | Per-icon id, precision, attribute strip  |
//! | `svg`   | `[svg]`         | Sprite root element and declarations     |
//! | `mode`  | `[mode.symbol]` | Output mode selection                    |

mod build;
mod mode;
mod shape;
mod svg;

pub use build::BuildConfig;
pub use mode::{ModeConfig, SymbolModeConfig};
pub use shape::{BoxSizing, ShapeConfig};
pub use svg::SvgConfig;
