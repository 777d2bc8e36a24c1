//! Abgleich der Karten-Layer mit den Anker-Daten.

use super::state::{AnchorMarkers, PathManager};
use crate::app::surface::{LayerId, LayerKind, RenderSurface};
use crate::core::{Anchor, GeoPoint};

/// Legt Anker-Marker plus vorhandene Griffe und Verbindungslinien an.
pub(crate) fn create_markers(surface: &mut dyn RenderSurface, anchor: &Anchor) -> AnchorMarkers {
    let id = surface.add_marker(LayerKind::AnchorMarker(anchor.kind()), anchor.position());
    let mut markers = AnchorMarkers::new(id);
    sync_markers(surface, anchor, &mut markers);
    markers
}

/// Bringt alle Layer eines Ankers auf den aktuellen Stand.
pub(crate) fn sync_markers(
    surface: &mut dyn RenderSurface,
    anchor: &Anchor,
    markers: &mut AnchorMarkers,
) {
    let pos = anchor.position();
    surface.move_marker(markers.anchor, pos);
    surface.set_kind(markers.anchor, LayerKind::AnchorMarker(anchor.kind()));
    sync_handle(
        surface,
        pos,
        anchor.handle1(),
        &mut markers.handle1,
        &mut markers.line1,
    );
    sync_handle(
        surface,
        pos,
        anchor.handle2(),
        &mut markers.handle2,
        &mut markers.line2,
    );
}

/// Griff-Marker + Linie anlegen, verschieben oder entfernen.
fn sync_handle(
    surface: &mut dyn RenderSurface,
    anchor_pos: GeoPoint,
    handle: Option<GeoPoint>,
    marker: &mut Option<LayerId>,
    line: &mut Option<LayerId>,
) {
    let Some(h) = handle else {
        for id in [marker.take(), line.take()].into_iter().flatten() {
            surface.remove_layer(id);
        }
        return;
    };
    match *line {
        Some(id) => surface.set_polyline(id, &[anchor_pos, h]),
        None => *line = Some(surface.add_polyline(LayerKind::HandleConnector, &[anchor_pos, h])),
    }
    match *marker {
        Some(id) => surface.move_marker(id, h),
        None => *marker = Some(surface.add_marker(LayerKind::HandleMarker, h)),
    }
}

/// Entfernt alle Layer eines Ankers.
pub(crate) fn remove_markers(surface: &mut dyn RenderSurface, markers: &AnchorMarkers) {
    for id in markers.all() {
        surface.remove_layer(id);
    }
}

impl PathManager {
    /// Aktualisiert die Layer des Ankers an `index`.
    pub(crate) fn sync_anchor(&mut self, surface: &mut dyn RenderSurface, index: usize) {
        if let (Some(anchor), Some(markers)) = (self.anchors.get(index), self.markers.get_mut(index))
        {
            sync_markers(surface, anchor, markers);
        }
    }

    /// Berechnet die Pfad-Vorschau neu (unter 2 Punkten: keine Vorschau).
    pub(crate) fn refresh_preview(&mut self, surface: &mut dyn RenderSurface) {
        let points = self.preview_points();
        if points.len() < 2 {
            if let Some(id) = self.preview.take() {
                surface.remove_layer(id);
            }
            return;
        }
        match self.preview {
            Some(id) => surface.set_polyline(id, &points),
            None => self.preview = Some(surface.add_polyline(LayerKind::PathPreview, &points)),
        }
    }

    /// Entfernt sämtliche eigenen Layer (Anker, Griffe, Linien, Vorschauen).
    pub(crate) fn remove_all_layers(&mut self, surface: &mut dyn RenderSurface) {
        for markers in self.markers.drain(..) {
            remove_markers(surface, &markers);
        }
        for id in [self.preview.take(), self.rect_preview.take()]
            .into_iter()
            .flatten()
        {
            surface.remove_layer(id);
        }
    }
}
