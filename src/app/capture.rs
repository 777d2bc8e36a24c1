//! Capture-Overlay: übersetzt Zeiger-Gesten in Zeichen-Aktionen.
//!
//! Das Overlay liegt während des Zeichnens über der Karte, rechnet
//! Client-Pixel in Geo-Koordinaten um und entscheidet, was eine Geste
//! bedeutet (Eckpunkt, Abschluss, Rechteck). Es verändert selbst keinen
//! Pfad-Zustand; die Aktionen wendet die Fassade an.

use crate::app::mode::EditorMode;
use crate::app::surface::RenderSurface;
use crate::core::{GeoPoint, GeoPointError, PolygonRing};
use crate::shared::RECTANGLE_MIN_DRAG_PX;
use glam::DVec2;

/// Maustaste einer Klick-Geste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Zeiger-Geste in Client-Koordinaten (Pixel, Ursprung oben links)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    Click { pos: DVec2, button: PointerButton },
    DoubleClick { pos: DVec2 },
    /// Primärtaste gedrückt (Beginn eines Drags)
    Press { pos: DVec2 },
    /// Zeiger bewegt bei gedrückter Taste
    Move { pos: DVec2 },
    /// Taste losgelassen (Ende eines Drags)
    Release { pos: DVec2 },
}

impl PointerGesture {
    pub fn pos(&self) -> DVec2 {
        match *self {
            PointerGesture::Click { pos, .. }
            | PointerGesture::DoubleClick { pos }
            | PointerGesture::Press { pos }
            | PointerGesture::Move { pos }
            | PointerGesture::Release { pos } => pos,
        }
    }
}

/// Zeichen-Variante des Overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureVariant {
    /// Eckpunkte per Klick, Abschluss per Rechts-/Doppelklick
    #[default]
    Polygon,
    /// Rechteck per Drag zwischen zwei Ecken
    Rectangle,
}

/// Mauszeiger-Darstellung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    /// Über einem verschiebbaren Marker
    Grab,
}

/// Achsenparalleles Rechteck in Client-Pixeln
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: DVec2,
    pub max: DVec2,
}

impl ScreenRect {
    /// Rechteck aus zwei beliebigen Ecken.
    pub fn from_corners(a: DVec2, b: DVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Ergebnis der Gesten-Auswertung
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureAction {
    /// Geste ohne Bedeutung
    None,
    /// Eckpunkt anhängen
    AddVertex(GeoPoint),
    /// Zeichnung abschließen
    Finish,
    /// Rechteck-Vorschau zwischen zwei Ecken
    RectanglePreview { a: GeoPoint, b: GeoPoint },
    /// Fertiges Rechteck (geschlossener 5-Punkte-Ring)
    RectangleComplete(PolygonRing),
    /// Rechteck-Drag zu kurz oder ungültig
    RectangleCancelled,
}

/// Eingabe-Overlay über der Karte.
#[derive(Debug, Clone)]
pub struct CaptureOverlay {
    active: bool,
    cursor: CursorStyle,
    /// Linke obere Ecke des Overlays in Client-Koordinaten
    origin: DVec2,
    excluded: Vec<ScreenRect>,
    variant: CaptureVariant,
    /// Gedrückte Rechteck-Ecke (Client-Pixel + Geo)
    press: Option<(DVec2, GeoPoint)>,
    min_drag_px: f64,
}

impl CaptureOverlay {
    /// Erstellt ein inaktives Overlay.
    pub fn new(min_drag_px: f64) -> Self {
        Self {
            active: false,
            cursor: CursorStyle::Default,
            origin: DVec2::ZERO,
            excluded: Vec::new(),
            variant: CaptureVariant::Polygon,
            press: None,
            min_drag_px,
        }
    }

    pub fn activate(&mut self) {
        if !self.active {
            log::debug!("Capture-Overlay aktiviert ({:?})", self.variant);
        }
        self.active = true;
    }

    /// Deaktiviert das Overlay und verwirft einen halben Rechteck-Drag.
    pub fn deactivate(&mut self) {
        if self.active {
            log::debug!("Capture-Overlay deaktiviert");
        }
        self.active = false;
        self.press = None;
        self.cursor = CursorStyle::Default;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn variant(&self) -> CaptureVariant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: CaptureVariant) {
        self.variant = variant;
        self.press = None;
    }

    pub fn set_min_drag_px(&mut self, min_drag_px: f64) {
        self.min_drag_px = min_drag_px;
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    /// Setzt die Overlay-Position im Client-Fenster.
    pub fn set_origin(&mut self, origin: DVec2) {
        self.origin = origin;
    }

    /// Bereich (z.B. Toolbar über der Karte), in dem Gesten ignoriert werden.
    pub fn add_excluded_region(&mut self, rect: ScreenRect) {
        self.excluded.push(rect);
    }

    pub fn clear_excluded_regions(&mut self) {
        self.excluded.clear();
    }

    pub fn is_excluded(&self, client: DVec2) -> bool {
        self.excluded.iter().any(|r| r.contains(client))
    }

    /// Läuft gerade ein Rechteck-Drag?
    pub fn is_pressing(&self) -> bool {
        self.press.is_some()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    /// Aktualisiert den Mauszeiger für die Position `client`.
    pub fn hover(&mut self, client: DVec2) -> CursorStyle {
        self.cursor = if self.active && !self.is_excluded(client) {
            CursorStyle::Crosshair
        } else {
            CursorStyle::Default
        };
        self.cursor
    }

    /// Client-Pixel → Overlay-Pixel (relativ zur Karte).
    pub fn to_local(&self, client: DVec2) -> DVec2 {
        client - self.origin
    }

    /// Client-Pixel → validierter Geo-Punkt.
    pub fn screen_to_geo(
        &self,
        surface: &dyn RenderSurface,
        client: DVec2,
    ) -> Result<GeoPoint, GeoPointError> {
        GeoPoint::from_dvec2(surface.screen_to_geo(self.to_local(client)))
    }

    /// Wertet eine Geste aus. Wirkt nur aktiv und im Zeichen-Modus.
    ///
    /// Klicks und Drag-Beginn in ausgeschlossenen Bereichen werden ignoriert;
    /// Bewegung und Loslassen eines bereits begonnenen Rechtecks nicht.
    pub fn interpret(
        &mut self,
        gesture: PointerGesture,
        surface: &dyn RenderSurface,
        mode: EditorMode,
    ) -> CaptureAction {
        if !self.active || mode != EditorMode::Drawing {
            return CaptureAction::None;
        }
        let starts_new = matches!(
            gesture,
            PointerGesture::Click { .. } | PointerGesture::DoubleClick { .. } | PointerGesture::Press { .. }
        );
        if starts_new && self.is_excluded(gesture.pos()) {
            return CaptureAction::None;
        }
        match self.variant {
            CaptureVariant::Polygon => self.interpret_polygon(gesture, surface),
            CaptureVariant::Rectangle => self.interpret_rectangle(gesture, surface),
        }
    }

    fn interpret_polygon(
        &mut self,
        gesture: PointerGesture,
        surface: &dyn RenderSurface,
    ) -> CaptureAction {
        match gesture {
            PointerGesture::Click {
                pos,
                button: PointerButton::Primary,
            } => match self.screen_to_geo(surface, pos) {
                Ok(point) => CaptureAction::AddVertex(point),
                Err(e) => {
                    log::warn!("Klick außerhalb der Erde verworfen: {}", e);
                    CaptureAction::None
                }
            },
            PointerGesture::Click {
                button: PointerButton::Secondary,
                ..
            }
            | PointerGesture::DoubleClick { .. } => CaptureAction::Finish,
            _ => CaptureAction::None,
        }
    }

    fn interpret_rectangle(
        &mut self,
        gesture: PointerGesture,
        surface: &dyn RenderSurface,
    ) -> CaptureAction {
        match gesture {
            PointerGesture::Press { pos } => {
                match self.screen_to_geo(surface, pos) {
                    Ok(corner) => self.press = Some((pos, corner)),
                    Err(e) => log::warn!("Rechteck-Ecke verworfen: {}", e),
                }
                CaptureAction::None
            }
            PointerGesture::Move { pos } => {
                let Some((_, a)) = self.press else {
                    return CaptureAction::None;
                };
                match self.screen_to_geo(surface, pos) {
                    Ok(b) => CaptureAction::RectanglePreview { a, b },
                    Err(_) => CaptureAction::None,
                }
            }
            PointerGesture::Release { pos } => {
                let Some((start, a)) = self.press.take() else {
                    return CaptureAction::None;
                };
                if start.distance(pos) <= self.min_drag_px {
                    log::debug!("Rechteck-Drag zu kurz, verworfen");
                    return CaptureAction::RectangleCancelled;
                }
                self.screen_to_geo(surface, pos)
                    .ok()
                    .and_then(|b| PolygonRing::rectangle(a, b))
                    .map_or(CaptureAction::RectangleCancelled, CaptureAction::RectangleComplete)
            }
            PointerGesture::Click { .. } | PointerGesture::DoubleClick { .. } => CaptureAction::None,
        }
    }
}

impl Default for CaptureOverlay {
    fn default() -> Self {
        Self::new(RECTANGLE_MIN_DRAG_PX)
    }
}
