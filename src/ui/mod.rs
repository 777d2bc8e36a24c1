//! UI-Komponenten: Toolbar, Status-Bar, Karten-Darstellung und Input-Handling.

pub mod input;
pub mod intent;
/// Zeichnet die Layer einer `MemorySurface` mit dem egui-Painter
pub mod map_view;
pub mod status;
pub mod toolbar;

pub use input::InputState;
pub use intent::UiIntent;
pub use map_view::paint_map;
pub use status::render_status_bar;
pub use toolbar::render_toolbar;
