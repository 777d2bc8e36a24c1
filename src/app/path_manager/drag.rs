//! Hit-Test und Drag-Logik für Anker- und Griff-Marker.

use super::state::{DragSession, DragTarget, PathManager};
use crate::app::mode::SessionOp;
use crate::app::surface::RenderSurface;
use crate::core::{GeoPoint, HandleSide};
use glam::DVec2;

impl PathManager {
    /// Sucht den nächsten Marker innerhalb von `radius_px` um `screen`.
    ///
    /// Griffe liegen über ihrem Anker und gewinnen bei gleichem Abstand.
    pub fn hit_test(
        &self,
        surface: &dyn RenderSurface,
        screen: DVec2,
        radius_px: f64,
    ) -> Option<DragTarget> {
        if !self.mode.allows(SessionOp::Drag) {
            return None;
        }
        let mut candidates: Vec<(DragTarget, f64)> = Vec::with_capacity(self.anchors.len() * 3);
        for (i, anchor) in self.anchors.iter().enumerate() {
            for side in [HandleSide::Leading, HandleSide::Trailing] {
                if let Some(h) = anchor.handle(side) {
                    let dist = surface.geo_to_screen(h).distance(screen);
                    candidates.push((DragTarget::Handle(i, side), dist));
                }
            }
            let dist = surface.geo_to_screen(anchor.position()).distance(screen);
            candidates.push((DragTarget::Anchor(i), dist));
        }
        candidates
            .into_iter()
            .filter(|(_, dist)| *dist <= radius_px)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(target, _)| target)
    }

    /// Startet einen Drag auf `target` und sperrt das Karten-Pan.
    pub fn drag_start(&mut self, surface: &mut dyn RenderSurface, target: DragTarget) -> bool {
        if !self.guard(SessionOp::Drag) {
            return false;
        }
        let valid = match target {
            DragTarget::Anchor(i) => i < self.anchors.len(),
            DragTarget::Handle(i, side) => self
                .anchors
                .get(i)
                .is_some_and(|a| a.handle(side).is_some()),
        };
        if !valid {
            log::warn!("Drag-Ziel {:?} existiert nicht", target);
            return false;
        }
        if self.drag.is_some() {
            self.drag_end(surface);
        }
        self.drag = Some(DragSession {
            target,
            panning_before: surface.panning_enabled(),
        });
        surface.set_panning_enabled(false);
        log::debug!("Drag gestartet: {:?}", target);
        true
    }

    /// Verschiebt das Drag-Ziel auf (lat, lng).
    ///
    /// Ungültige Koordinaten werden verworfen, der Drag läuft weiter.
    /// Ein gezogener Anker nimmt seine Griffe mit.
    pub fn drag_move(&mut self, surface: &mut dyn RenderSurface, lat: f64, lng: f64) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        let point = match GeoPoint::new(lat, lng) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Drag-Position verworfen: {}", e);
                return false;
            }
        };
        let index = session.target.anchor_index();
        let Some(anchor) = self.anchors.get_mut(index) else {
            return false;
        };
        match session.target {
            DragTarget::Anchor(_) => anchor.translate_to(point),
            DragTarget::Handle(_, side) => anchor.set_handle(side, point),
        }
        self.sync_anchor(surface, index);
        self.refresh_preview(surface);
        true
    }

    /// Beendet den Drag und gibt das Karten-Pan wieder frei.
    pub fn drag_end(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(session) = self.drag.take() {
            surface.set_panning_enabled(session.panning_before);
            log::debug!("Drag beendet: {:?}", session.target);
        }
    }
}
