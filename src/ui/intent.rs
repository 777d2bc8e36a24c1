//! UI → Anwendung: Absichten, die die Oberfläche pro Frame meldet.

use crate::app::{PointerGesture, ScreenRect};
use glam::DVec2;

/// Eine vom UI erkannte Absicht, wird in `main` auf die Fassade angewendet.
#[derive(Debug, Clone, PartialEq)]
pub enum UiIntent {
    /// Lage und Größe der Karte im Fenster (jedes Frame)
    ViewportPlaced { origin: DVec2, size: DVec2 },
    /// Bereiche über der Karte, die keine Zeichen-Gesten annehmen
    ExcludedRegions(Vec<ScreenRect>),
    /// Zeiger-Geste im Kartenbereich
    Pointer(PointerGesture),
    /// Zeiger schwebt über der Karte
    Hover { pos: DVec2 },
    /// Karte um Pixel-Delta verschieben (nur wenn Pan erlaubt)
    CameraPan { delta_px: DVec2 },
    /// Zoom um Faktor, Fokus in Client-Pixeln
    CameraZoom { factor: f64, focus: Option<DVec2> },
    ResetViewRequested,
    StartDrawingRequested,
    StartRectangleRequested,
    FinishRequested,
    StopRequested,
    ClearRequested,
    RemoveLastAnchorRequested,
    /// Letztes Ergebnis erneut zum Bearbeiten laden
    EditLastResultRequested,
    SaveOptionsRequested,
}

impl UiIntent {
    /// Zustands-Rauschen (jedes Frame), löst allein kein Neuzeichnen aus.
    pub fn is_ambient(&self) -> bool {
        matches!(
            self,
            UiIntent::ViewportPlaced { .. } | UiIntent::ExcludedRegions(_) | UiIntent::Hover { .. }
        )
    }
}
