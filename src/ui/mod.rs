//! Terminal presentation: key mapping and snapshot rendering.

pub mod input;
pub mod play_scene;

pub use input::{map_key, UiAction};
pub use play_scene::render_game;
