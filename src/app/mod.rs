//! Application-Layer: Editor-Modus, Karten-Schnittstelle, PathManager, Overlay und Fassade.

pub mod capture;
pub mod draw_result;
/// Editor-Fassade (ein Handle pro Karte)
pub mod facade;
pub mod mode;
pub mod path_manager;
pub mod surface;

pub use capture::{
    CaptureAction, CaptureOverlay, CaptureVariant, CursorStyle, PointerButton, PointerGesture,
    ScreenRect,
};
pub use draw_result::{DrawResult, FencePayload};
pub use facade::{attach_editor, EditorCallbacks, FenceEditor};
pub use mode::{EditorMode, ModeEvent, SessionOp};
pub use path_manager::{DragTarget, PathManager};
pub use surface::{Layer, LayerId, LayerKind, MemorySurface, RenderSurface};
