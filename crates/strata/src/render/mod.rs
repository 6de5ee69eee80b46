//! Scene rendering and interaction
//!
//! [`InteractiveRenderer`] turns a model and a layout into a retained-mode
//! [`Scene`] for one view. The scene serializes to SVG; [`Interaction`]
//! mutates its transform and node styles in response to pointer input.

mod interaction;
mod palette;
mod renderer;
mod scene;
mod svg;
mod theme;

pub use interaction::*;
pub use palette::*;
pub use renderer::*;
pub use scene::*;
pub use theme::*;
