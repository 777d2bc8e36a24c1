//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die von `app` (Pfad-Logik) und `ui`
//! (Darstellung) gemeinsam gelesen werden.

pub mod options;

pub use options::EditorOptions;
pub use options::{DEDUP_TOLERANCE, MARKER_PICK_RADIUS_PX, RECTANGLE_MIN_DRAG_PX};
