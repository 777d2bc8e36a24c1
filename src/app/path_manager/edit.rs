//! Sitzungs-Operationen: Zeichnen, Bearbeiten, Umschalten, Abschließen, Aufräumen.

use super::render::{create_markers, remove_markers};
use super::state::PathManager;
use crate::app::draw_result::DrawResult;
use crate::app::mode::{ModeEvent, SessionOp};
use crate::app::surface::{LayerKind, RenderSurface};
use crate::core::{
    derive_smooth_handles, Anchor, AnchorKind, AnchorSnapshot, GeoPoint, PolygonRing,
};

impl PathManager {
    /// Beginnt eine neue Zeichnung. Eine laufende Sitzung wird vorher abgebaut.
    pub fn start_drawing(&mut self, surface: &mut dyn RenderSurface) {
        self.cleanup(surface);
        self.transition(ModeEvent::StartDrawing);
        log::info!("Zeichnen gestartet");
    }

    /// Hängt einen Eck-Anker an den Pfad an (nur beim Zeichnen).
    pub fn add_anchor(&mut self, surface: &mut dyn RenderSurface, point: GeoPoint) -> bool {
        if !self.guard(SessionOp::AddAnchor) {
            return false;
        }
        self.push_anchor(surface, Anchor::new(point));
        self.refresh_preview(surface);
        log::debug!("Anker {} bei ({}, {})", self.anchors.len() - 1, point.lat(), point.lng());
        true
    }

    /// Wie `add_anchor`, aus Roh-Koordinaten. Ungültige werden verworfen.
    pub fn add_anchor_at(&mut self, surface: &mut dyn RenderSurface, lat: f64, lng: f64) -> bool {
        match GeoPoint::new(lat, lng) {
            Ok(point) => self.add_anchor(surface, point),
            Err(e) => {
                log::warn!("Anker verworfen: {}", e);
                false
            }
        }
    }

    /// Schaltet einen Anker zwischen Eck- und Kurvenpunkt um.
    ///
    /// Corner → Smooth leitet die Griffe aus den Nachbarn ab,
    /// Smooth → Corner entfernt sie. Die Schlusskante bleibt gerade:
    /// handle1 des ersten und handle2 des letzten Ankers wirken erst, wenn
    /// davor bzw. danach weitere Anker liegen.
    pub fn toggle_anchor_type(&mut self, surface: &mut dyn RenderSurface, index: usize) -> bool {
        if !self.guard(SessionOp::ToggleAnchor) {
            return false;
        }
        let Some(anchor) = self.anchors.get(index).copied() else {
            log::warn!("toggle_anchor_type: Index {} außerhalb (Anker: {})", index, self.anchors.len());
            return false;
        };
        let updated = match anchor.kind() {
            AnchorKind::Smooth => {
                let mut a = anchor;
                a.clear_handles();
                a
            }
            AnchorKind::Corner => {
                let prev = index
                    .checked_sub(1)
                    .and_then(|i| self.anchors.get(i))
                    .map(Anchor::position);
                let next = self.anchors.get(index + 1).map(Anchor::position);
                let (h1, h2) =
                    derive_smooth_handles(prev, anchor.position(), next, &self.handle_params);
                let mut a = anchor;
                a.set_handles(h1, h2);
                a
            }
        };
        self.anchors[index] = updated;
        self.sync_anchor(surface, index);
        self.refresh_preview(surface);
        log::debug!("Anker {}: {:?} → {:?}", index, anchor.kind(), updated.kind());
        true
    }

    /// Entfernt einen Anker samt Markern.
    pub fn remove_anchor(&mut self, surface: &mut dyn RenderSurface, index: usize) -> bool {
        if !self.guard(SessionOp::RemoveAnchor) {
            return false;
        }
        if index >= self.anchors.len() {
            log::warn!("remove_anchor: Index {} außerhalb (Anker: {})", index, self.anchors.len());
            return false;
        }
        // Indizes verschieben sich, laufender Drag wäre ungültig
        self.drag_end(surface);
        self.anchors.remove(index);
        let markers = self.markers.remove(index);
        remove_markers(surface, &markers);
        self.refresh_preview(surface);
        log::info!("Anker {} entfernt, verbleibend: {}", index, self.anchors.len());
        true
    }

    /// Schließt die Sitzung ab und liefert den Ring.
    ///
    /// Scheitert die Geometrie (zu wenige Anker, entarteter Ring), bleibt der
    /// Zustand unverändert und es wird `None` geliefert.
    pub fn finish(&mut self, surface: &mut dyn RenderSurface) -> Option<DrawResult> {
        if !self.guard(SessionOp::Finish) {
            return None;
        }
        let Some(ring) = self.generate_geometry() else {
            log::warn!(
                "Abschließen nicht möglich: mindestens 3 Anker nötig (vorhanden: {})",
                self.anchors.len()
            );
            return None;
        };
        if let Err(e) = ring.validate() {
            log::warn!("Abschließen nicht möglich: {}", e);
            return None;
        }
        let result = DrawResult {
            ring,
            anchors: self.snapshots(),
        };
        self.cleanup(surface);
        self.transition(ModeEvent::Finish);
        log::info!(
            "Zeichnung abgeschlossen: {} Anker, {} Ring-Positionen",
            result.anchors.len(),
            result.ring.len()
        );
        Some(result)
    }

    /// Lädt einen bestehenden Ring zur Bearbeitung.
    ///
    /// Mit mindestens 3 Anker-Metadaten werden diese verlustfrei übernommen,
    /// sonst entstehen Eck-Anker aus den deduplizierten Ring-Eckpunkten
    /// (Kurven gehen dabei verloren). Unter 3 nutzbaren Punkten: Abbruch, Idle.
    pub fn enter_edit_mode(
        &mut self,
        surface: &mut dyn RenderSurface,
        ring: &PolygonRing,
        anchors: Option<&[AnchorSnapshot]>,
    ) -> bool {
        self.cleanup(surface);

        let loaded: Vec<Anchor> = match anchors {
            Some(snapshots) if snapshots.len() >= 3 => {
                snapshots.iter().map(Anchor::from_snapshot).collect()
            }
            other => {
                if let Some(snapshots) = other {
                    log::warn!(
                        "Nur {} Anker-Metadaten, verwende Ring-Eckpunkte",
                        snapshots.len()
                    );
                }
                ring.dedup_vertices(self.dedup_tolerance)
                    .into_iter()
                    .map(Anchor::new)
                    .collect()
            }
        };

        if loaded.len() < 3 {
            log::warn!(
                "Bearbeiten abgebrochen: nur {} nutzbare Eckpunkte",
                loaded.len()
            );
            self.transition(ModeEvent::Cancel);
            return false;
        }

        self.transition(ModeEvent::EnterEditing);
        for anchor in loaded {
            self.push_anchor(surface, anchor);
        }
        self.refresh_preview(surface);
        log::info!("Bearbeiten gestartet: {} Anker", self.anchors.len());
        true
    }

    /// Entfernt alle Anker und Layer, der Modus bleibt erhalten.
    pub fn clear(&mut self, surface: &mut dyn RenderSurface) {
        self.cleanup(surface);
    }

    /// Bricht die Sitzung ab (ohne Ergebnis) und wechselt nach Idle.
    pub fn cancel(&mut self, surface: &mut dyn RenderSurface) {
        self.cleanup(surface);
        self.transition(ModeEvent::Cancel);
    }

    /// Entfernt alle eigenen Layer, leert die Anker und beendet einen Drag.
    ///
    /// Mehrfacher Aufruf ist unschädlich.
    pub fn cleanup(&mut self, surface: &mut dyn RenderSurface) {
        self.drag_end(surface);
        self.remove_all_layers(surface);
        self.anchors.clear();
    }

    // ── Rechteck ────────────────────────────────────────────────────

    /// Zeigt das Rechteck zwischen zwei Ecken als Vorschau.
    pub fn update_rectangle_preview(
        &mut self,
        surface: &mut dyn RenderSurface,
        a: GeoPoint,
        b: GeoPoint,
    ) -> bool {
        if !self.guard(SessionOp::RectanglePreview) {
            return false;
        }
        let Some(ring) = PolygonRing::rectangle(a, b) else {
            return false;
        };
        match self.rect_preview {
            Some(id) => surface.set_polyline(id, ring.points()),
            None => {
                self.rect_preview =
                    Some(surface.add_polyline(LayerKind::RectanglePreview, ring.points()))
            }
        }
        true
    }

    /// Entfernt die Rechteck-Vorschau.
    pub fn clear_rectangle_preview(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(id) = self.rect_preview.take() {
            surface.remove_layer(id);
        }
    }

    /// Übernimmt ein fertiges Rechteck als Ergebnis der Zeichnung.
    ///
    /// Bisher gesetzte Anker werden verworfen; die Rechteck-Ecken werden zu Eck-Ankern.
    pub fn finish_rectangle(
        &mut self,
        surface: &mut dyn RenderSurface,
        ring: PolygonRing,
    ) -> Option<DrawResult> {
        if !self.guard(SessionOp::FinishRectangle) {
            return None;
        }
        if let Err(e) = ring.validate() {
            log::warn!("Rechteck verworfen: {}", e);
            self.clear_rectangle_preview(surface);
            return None;
        }
        let anchors = ring
            .vertices()
            .iter()
            .map(|p| Anchor::new(*p).snapshot())
            .collect();
        self.cleanup(surface);
        self.transition(ModeEvent::Finish);
        log::info!("Rechteck abgeschlossen");
        Some(DrawResult { ring, anchors })
    }

    fn push_anchor(&mut self, surface: &mut dyn RenderSurface, anchor: Anchor) {
        let markers = create_markers(surface, &anchor);
        self.anchors.push(anchor);
        self.markers.push(markers);
    }
}
