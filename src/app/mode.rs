//! Editor-Modus als expliziter Zustandsautomat.
//!
//! Ein einziges `EditorMode`-Feld ersetzt verstreute Aktiv-Flags: Übergänge
//! kommen aus `next`, Operations-Freigaben aus `allows`.

/// Aktueller Sitzungs-Zustand des Pfad-Editors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Keine aktive Sitzung
    #[default]
    Idle,
    /// Neuer Pfad, Anker werden per Klick angehängt
    Drawing,
    /// Bestehende Geometrie wird bearbeitet
    Editing,
}

/// Auslöser für Modus-Übergänge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Neue Zeichnung beginnen
    StartDrawing,
    /// Bestehende Geometrie laden
    EnterEditing,
    /// Geometrie erfolgreich übergeben
    Finish,
    /// Sitzung abbrechen / Editor stoppen
    Cancel,
}

/// Operationen, deren Zulässigkeit vom Modus abhängt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOp {
    /// Anker per Klick anhängen
    AddAnchor,
    /// Anker entfernen
    RemoveAnchor,
    /// Anker-Art umschalten
    ToggleAnchor,
    /// Marker-Drag starten
    Drag,
    /// Geometrie übergeben
    Finish,
    /// Rechteck-Vorschau aktualisieren
    RectanglePreview,
    /// Aufgezogenes Rechteck als Ergebnis übernehmen
    FinishRectangle,
}

impl EditorMode {
    /// Übergangstabelle. `None` = Ereignis in diesem Zustand ohne Wirkung.
    pub fn next(self, event: ModeEvent) -> Option<EditorMode> {
        use EditorMode::*;
        use ModeEvent::*;
        match (self, event) {
            (_, StartDrawing) => Some(Drawing),
            (_, EnterEditing) => Some(Editing),
            (Drawing | Editing, Finish) => Some(Idle),
            (Idle, Finish) => None,
            (Drawing | Editing, Cancel) => Some(Idle),
            (Idle, Cancel) => None,
        }
    }

    /// Freigabetabelle für Sitzungs-Operationen.
    pub fn allows(self, op: SessionOp) -> bool {
        use EditorMode::*;
        use SessionOp::*;
        match (self, op) {
            (Drawing, AddAnchor | RectanglePreview | FinishRectangle) => true,
            (Drawing | Editing, RemoveAnchor | ToggleAnchor | Drag | Finish) => true,
            _ => false,
        }
    }

    /// True wenn eine Sitzung läuft (Drawing oder Editing).
    pub fn is_active(self) -> bool {
        self != EditorMode::Idle
    }
}
