//! State-Definitionen und Konstruktor für den PathManager.

use crate::app::mode::{EditorMode, ModeEvent, SessionOp};
use crate::app::surface::LayerId;
use crate::core::{Anchor, AnchorSnapshot, HandleParams, HandleSide};
use crate::shared::EditorOptions;

/// Welcher Marker wird gerade per Drag verschoben?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Anker an Index
    Anchor(usize),
    /// Griff eines Ankers
    Handle(usize, HandleSide),
}

impl DragTarget {
    /// Index des betroffenen Ankers
    pub fn anchor_index(self) -> usize {
        match self {
            DragTarget::Anchor(i) | DragTarget::Handle(i, _) => i,
        }
    }
}

/// Laufender Drag (zwischen Pointer-Down und Pointer-Up auf einem Marker)
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragSession {
    pub(crate) target: DragTarget,
    /// Pan-Zustand vor dem Drag (wird beim Ende wiederhergestellt)
    pub(crate) panning_before: bool,
}

/// Layer, die zu einem Anker gehören (parallel zur Anker-Liste)
#[derive(Debug, Clone, Copy)]
pub(crate) struct AnchorMarkers {
    pub(crate) anchor: LayerId,
    pub(crate) handle1: Option<LayerId>,
    pub(crate) handle2: Option<LayerId>,
    /// Linie Anker → handle1
    pub(crate) line1: Option<LayerId>,
    /// Linie Anker → handle2
    pub(crate) line2: Option<LayerId>,
}

impl AnchorMarkers {
    pub(crate) fn new(anchor: LayerId) -> Self {
        Self {
            anchor,
            handle1: None,
            handle2: None,
            line1: None,
            line2: None,
        }
    }

    /// Alle belegten Layer-IDs
    pub(crate) fn all(&self) -> impl Iterator<Item = LayerId> {
        [
            Some(self.anchor),
            self.handle1,
            self.handle2,
            self.line1,
            self.line2,
        ]
        .into_iter()
        .flatten()
    }
}

/// Verwaltet den Pfad einer Zeichen- oder Bearbeitungs-Sitzung.
pub struct PathManager {
    pub(crate) anchors: Vec<Anchor>,
    /// Layer je Anker, gleicher Index wie `anchors`
    pub(crate) markers: Vec<AnchorMarkers>,
    /// Pfad-Vorschau (Polylinie)
    pub(crate) preview: Option<LayerId>,
    /// Rechteck-Vorschau während eines Rechteck-Drags
    pub(crate) rect_preview: Option<LayerId>,
    pub(crate) mode: EditorMode,
    pub(crate) drag: Option<DragSession>,
    /// Abtast-Segmente pro Kurvenabschnitt
    pub(crate) segments: usize,
    pub(crate) handle_params: HandleParams,
    /// Toleranz für Eckpunkt-Deduplizierung beim Laden eines Rings (Grad)
    pub(crate) dedup_tolerance: f64,
}

impl PathManager {
    /// Erstellt einen leeren PathManager (Idle) mit den gegebenen Optionen.
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            anchors: Vec::new(),
            markers: Vec::new(),
            preview: None,
            rect_preview: None,
            mode: EditorMode::Idle,
            drag: None,
            segments: options.segments(),
            handle_params: options.handle_params(),
            dedup_tolerance: options.dedup_tolerance,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.mode == EditorMode::Drawing
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Anker-Metadaten in Pfad-Reihenfolge.
    pub fn snapshots(&self) -> Vec<AnchorSnapshot> {
        self.anchors.iter().map(Anchor::snapshot).collect()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Ziel des laufenden Drags
    pub fn drag_target(&self) -> Option<DragTarget> {
        self.drag.map(|d| d.target)
    }

    /// Übernimmt geänderte Optionen (wirkt ab der nächsten Neuberechnung).
    pub fn apply_options(&mut self, options: &EditorOptions) {
        self.segments = options.segments();
        self.handle_params = options.handle_params();
        self.dedup_tolerance = options.dedup_tolerance;
    }

    /// Führt einen Modus-Übergang aus der Übergangstabelle aus.
    pub(crate) fn transition(&mut self, event: ModeEvent) {
        if let Some(next) = self.mode.next(event) {
            log::debug!("PathManager: {:?} --{:?}--> {:?}", self.mode, event, next);
            self.mode = next;
        }
    }

    /// Prüft die Freigabe einer Operation, loggt Fehlbedienung.
    pub(crate) fn guard(&self, op: SessionOp) -> bool {
        let allowed = self.mode.allows(op);
        if !allowed {
            log::debug!("{:?} im Modus {:?} ignoriert", op, self.mode);
        }
        allowed
    }
}

impl Default for PathManager {
    fn default() -> Self {
        Self::new(&EditorOptions::default())
    }
}
