//! Editor-Fassade: bündelt Karten-Darstellung, Capture-Overlay und PathManager.
//!
//! `attach_editor` liefert ein explizites Handle pro Karte. Das Overlay ist
//! genau dann aktiv, wenn gezeichnet wird. Nach `teardown` sind alle
//! Aufrufe wirkungslos.

use crate::app::capture::{
    CaptureAction, CaptureOverlay, CaptureVariant, CursorStyle, PointerGesture,
};
use crate::app::draw_result::DrawResult;
use crate::app::mode::EditorMode;
use crate::app::path_manager::PathManager;
use crate::app::surface::RenderSurface;
use crate::core::{AnchorSnapshot, PolygonRing};
use crate::shared::EditorOptions;
use glam::DVec2;

/// Rückmeldungen an den Aufrufer (alle optional).
pub trait EditorCallbacks {
    /// Zeichnen wurde gestartet
    fn on_draw_start(&mut self) {}
    /// Zeichnung erfolgreich abgeschlossen
    fn on_draw_complete(&mut self, _result: &DrawResult) {}
    /// Zeichnen wurde ohne Ergebnis beendet
    fn on_draw_stop(&mut self) {}
}

/// Callbacks ohne Wirkung (Standard).
struct NoCallbacks;

impl EditorCallbacks for NoCallbacks {}

/// Hängt einen Editor an eine Karten-Darstellung.
pub fn attach_editor<S: RenderSurface>(surface: S, options: EditorOptions) -> FenceEditor<S> {
    log::info!("Zaun-Editor angehängt");
    FenceEditor {
        overlay: CaptureOverlay::new(options.rectangle_min_drag_px),
        path: Some(PathManager::new(&options)),
        callbacks: Box::new(NoCallbacks),
        surface,
        options,
    }
}

/// Editor-Handle für genau eine Karte.
pub struct FenceEditor<S: RenderSurface> {
    surface: S,
    overlay: CaptureOverlay,
    /// `None` nach `teardown`
    path: Option<PathManager>,
    callbacks: Box<dyn EditorCallbacks>,
    options: EditorOptions,
}

impl<S: RenderSurface> FenceEditor<S> {
    // ── Sitzung ─────────────────────────────────────────────────────

    /// Beginnt eine Polygon-Zeichnung.
    pub fn start_drawing(&mut self) {
        self.begin(CaptureVariant::Polygon);
    }

    /// Beginnt eine Rechteck-Zeichnung (Drag zwischen zwei Ecken).
    pub fn start_rectangle(&mut self) {
        self.begin(CaptureVariant::Rectangle);
    }

    fn begin(&mut self, variant: CaptureVariant) {
        let Some(path) = self.path.as_mut() else {
            return;
        };
        path.start_drawing(&mut self.surface);
        self.overlay.set_variant(variant);
        self.sync_overlay();
        self.callbacks.on_draw_start();
    }

    /// Beendet Zeichnen oder Bearbeiten ohne Ergebnis.
    pub fn stop_drawing(&mut self) {
        let Some(path) = self.path.as_mut() else {
            return;
        };
        let was_active = path.mode().is_active();
        path.cancel(&mut self.surface);
        self.sync_overlay();
        if was_active {
            log::info!("Zeichnen abgebrochen");
            self.callbacks.on_draw_stop();
        }
    }

    /// Schließt die Sitzung ab. `None` (Zustand unverändert), wenn die Geometrie scheitert.
    pub fn finish_drawing(&mut self) -> Option<DrawResult> {
        let result = self.path.as_mut()?.finish(&mut self.surface)?;
        self.sync_overlay();
        self.callbacks.on_draw_complete(&result);
        Some(result)
    }

    pub fn mode(&self) -> EditorMode {
        self.path.as_ref().map_or(EditorMode::Idle, PathManager::mode)
    }

    pub fn is_drawing(&self) -> bool {
        self.mode() == EditorMode::Drawing
    }

    pub fn is_editing(&self) -> bool {
        self.mode() == EditorMode::Editing
    }

    /// Anker-Metadaten der laufenden Sitzung.
    pub fn get_anchors(&self) -> Vec<AnchorSnapshot> {
        self.path
            .as_ref()
            .map(PathManager::snapshots)
            .unwrap_or_default()
    }

    /// Aktueller Ring ohne die Sitzung abzuschließen.
    pub fn generate_geometry(&self) -> Option<PolygonRing> {
        self.path.as_ref()?.generate_geometry()
    }

    /// Entfernt alle Anker, die Sitzung läuft weiter.
    pub fn clear_drawing(&mut self) {
        if let Some(path) = self.path.as_mut() {
            path.clear(&mut self.surface);
        }
    }

    /// Lädt einen Ring zum Bearbeiten (siehe `PathManager::enter_edit_mode`).
    pub fn enter_edit_mode(
        &mut self,
        ring: &PolygonRing,
        anchors: Option<&[AnchorSnapshot]>,
    ) -> bool {
        let Some(path) = self.path.as_mut() else {
            return false;
        };
        let entered = path.enter_edit_mode(&mut self.surface, ring, anchors);
        self.sync_overlay();
        entered
    }

    pub fn toggle_anchor_type(&mut self, index: usize) -> bool {
        match self.path.as_mut() {
            Some(path) => path.toggle_anchor_type(&mut self.surface, index),
            None => false,
        }
    }

    pub fn remove_anchor(&mut self, index: usize) -> bool {
        match self.path.as_mut() {
            Some(path) => path.remove_anchor(&mut self.surface, index),
            None => false,
        }
    }

    // ── Eingabe ─────────────────────────────────────────────────────

    /// Verarbeitet eine Zeiger-Geste (Client-Koordinaten).
    ///
    /// Marker haben Vorrang vor dem Overlay: Drücken startet einen Drag,
    /// Doppelklick schaltet die Anker-Art um, ein Klick wird geschluckt.
    /// Liefert das Ergebnis, falls die Geste die Zeichnung abgeschlossen hat.
    pub fn handle_pointer(&mut self, gesture: PointerGesture) -> Option<DrawResult> {
        let path = self.path.as_mut()?;
        let local = self.overlay.to_local(gesture.pos());

        if path.is_dragging() {
            match gesture {
                PointerGesture::Move { .. } => {
                    let geo = self.surface.screen_to_geo(local);
                    path.drag_move(&mut self.surface, geo.y, geo.x);
                    return None;
                }
                PointerGesture::Release { .. } => {
                    let geo = self.surface.screen_to_geo(local);
                    path.drag_move(&mut self.surface, geo.y, geo.x);
                    path.drag_end(&mut self.surface);
                    return None;
                }
                _ => {}
            }
        }

        let on_marker = match gesture {
            PointerGesture::Press { .. }
            | PointerGesture::Click { .. }
            | PointerGesture::DoubleClick { .. } => {
                path.hit_test(&self.surface, local, self.options.marker_pick_radius_px)
            }
            PointerGesture::Move { .. } | PointerGesture::Release { .. } => None,
        };
        if let Some(target) = on_marker {
            match gesture {
                PointerGesture::Press { .. } => {
                    path.drag_start(&mut self.surface, target);
                }
                PointerGesture::DoubleClick { .. } => {
                    path.toggle_anchor_type(&mut self.surface, target.anchor_index());
                }
                _ => {}
            }
            return None;
        }

        let action = self.overlay.interpret(gesture, &self.surface, path.mode());
        self.apply(action)
    }

    fn apply(&mut self, action: CaptureAction) -> Option<DrawResult> {
        let path = self.path.as_mut()?;
        match action {
            CaptureAction::None => None,
            CaptureAction::AddVertex(point) => {
                path.add_anchor(&mut self.surface, point);
                None
            }
            CaptureAction::Finish => self.finish_drawing(),
            CaptureAction::RectanglePreview { a, b } => {
                path.update_rectangle_preview(&mut self.surface, a, b);
                None
            }
            CaptureAction::RectangleComplete(ring) => {
                let result = path.finish_rectangle(&mut self.surface, ring)?;
                self.sync_overlay();
                self.callbacks.on_draw_complete(&result);
                Some(result)
            }
            CaptureAction::RectangleCancelled => {
                path.clear_rectangle_preview(&mut self.surface);
                None
            }
        }
    }

    /// Mauszeiger für die Position `client`.
    pub fn hover(&mut self, client: DVec2) -> CursorStyle {
        let Some(path) = self.path.as_ref() else {
            return CursorStyle::Default;
        };
        let local = self.overlay.to_local(client);
        if path.is_dragging()
            || path
                .hit_test(&self.surface, local, self.options.marker_pick_radius_px)
                .is_some()
        {
            return CursorStyle::Grab;
        }
        self.overlay.hover(client)
    }

    /// Soll ein Primär-Drag beim Editor landen statt die Karte zu verschieben?
    pub fn captures_drag(&self) -> bool {
        let Some(path) = self.path.as_ref() else {
            return false;
        };
        path.is_dragging()
            || (path.is_drawing() && self.overlay.variant() == CaptureVariant::Rectangle)
    }

    // ── Verwaltung ──────────────────────────────────────────────────

    pub fn set_callbacks(&mut self, callbacks: Box<dyn EditorCallbacks>) {
        self.callbacks = callbacks;
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Übernimmt neue Optionen für laufende und künftige Sitzungen.
    pub fn set_options(&mut self, options: EditorOptions) {
        if let Some(path) = self.path.as_mut() {
            path.apply_options(&options);
        }
        self.overlay.set_min_drag_px(options.rectangle_min_drag_px);
        self.options = options;
    }

    pub fn overlay(&self) -> &CaptureOverlay {
        &self.overlay
    }

    /// Für Origin und ausgeschlossene Bereiche.
    pub fn overlay_mut(&mut self) -> &mut CaptureOverlay {
        &mut self.overlay
    }

    pub fn path(&self) -> Option<&PathManager> {
        self.path.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Ist der Editor noch angehängt (kein `teardown`)?
    pub fn is_attached(&self) -> bool {
        self.path.is_some()
    }

    /// Baut den Editor ab: alle Layer weg, Overlay aus, weitere Aufrufe wirkungslos.
    pub fn teardown(&mut self) {
        if let Some(mut path) = self.path.take() {
            let was_active = path.mode().is_active();
            path.cleanup(&mut self.surface);
            self.overlay.deactivate();
            if was_active {
                self.callbacks.on_draw_stop();
            }
            log::info!("Zaun-Editor abgebaut");
        }
    }

    /// Baut den Editor ab und gibt die Karten-Darstellung zurück.
    pub fn into_surface(mut self) -> S {
        self.teardown();
        self.surface
    }

    fn sync_overlay(&mut self) {
        if self.is_drawing() {
            self.overlay.activate();
        } else {
            self.overlay.deactivate();
        }
    }
}
