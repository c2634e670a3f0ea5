mod map_panel;
mod mode_panel;

pub use map_panel::map_panel;
pub use mode_panel::mode_panel;
