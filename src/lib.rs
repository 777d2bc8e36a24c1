//! Zaun-Pfad-Editor Library.
//! Interaktives Zeichnen und Bearbeiten geschlossener Zaun-Polygone auf einer Karte,
//! als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;
pub mod ui;

pub use app::{
    attach_editor, CaptureAction, CaptureOverlay, CaptureVariant, CursorStyle, DragTarget,
    DrawResult, EditorCallbacks, EditorMode, FencePayload, FenceEditor, LayerKind, MemorySurface,
    PathManager, PointerButton, PointerGesture, RenderSurface,
};
pub use core::{
    is_valid_geo_point, Anchor, AnchorKind, AnchorSnapshot, FenceGeometry, GeoPoint,
    GeoPointError, HandleSide, MapViewport, PolygonRing, RingError,
};
pub use shared::EditorOptions;
