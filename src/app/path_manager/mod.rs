//! PathManager: Anker-Liste, Marker auf der Karte und Sitzungs-Zustand.
//!
//! **Zeichnen:** `start_drawing` → Klicks hängen Anker an → `finish` liefert
//! den geschlossenen Ring (mind. 3 Anker).
//! **Bearbeiten:** `enter_edit_mode` lädt einen Ring (bevorzugt über gespeicherte
//! Anker-Metadaten), danach Drag/Umschalten wie beim Zeichnen.
//!
//! Alle Layer (Anker-, Griff-Marker, Verbindungslinien, Pfad- und
//! Rechteck-Vorschau) werden ausschließlich hier erzeugt und entfernt.
//!
//! Aufgeteilt in:
//! - `state`   : Structs, Enums, Konstruktor, Modus-Übergänge
//! - `edit`    : Sitzungs-Operationen (Anker hinzufügen/umschalten, finish, cleanup, …)
//! - `drag`    : Hit-Test und Drag-Logik (drag_start/move/end)
//! - `render`  : Abgleich der Marker/Linien mit den Anker-Daten
//! - `geometry`: Pfad-Abtastung und Ring-Erzeugung

mod drag;
mod edit;
mod geometry;
mod render;
mod state;

pub use state::{DragTarget, PathManager};

#[cfg(test)]
mod tests;
