//! Live preview of the rendered article
//!
//! The renderer's HTML fragment is read back into blocks once per render
//! and drawn with native egui widgets every frame.

mod model;
mod view;

pub use model::{parse_fragment, PreviewBlock};
pub use view::PreviewView;
