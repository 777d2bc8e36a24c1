//! Toolbar für Zeichen- und Bearbeitungs-Aktionen.

use super::intent::UiIntent;
use crate::app::{CaptureVariant, EditorMode, FenceEditor, RenderSurface};

/// Rendert die Toolbar und gibt erzeugte Intents zurück.
pub fn render_toolbar<S: RenderSurface>(
    ctx: &egui::Context,
    editor: &FenceEditor<S>,
    has_last_result: bool,
) -> Vec<UiIntent> {
    let mut events = Vec::new();
    let mode = editor.mode();
    let variant = editor.overlay().variant();
    let anchor_count = editor.get_anchors().len();

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label("Zaun:");
            ui.separator();

            let polygon_active = mode == EditorMode::Drawing && variant == CaptureVariant::Polygon;
            if ui
                .add(egui::Button::new("✏ Polygon").selected(polygon_active))
                .clicked()
            {
                events.push(UiIntent::StartDrawingRequested);
            }

            let rect_active = mode == EditorMode::Drawing && variant == CaptureVariant::Rectangle;
            if ui
                .add(egui::Button::new("▭ Rechteck").selected(rect_active))
                .clicked()
            {
                events.push(UiIntent::StartRectangleRequested);
            }

            if ui
                .add_enabled(has_last_result, egui::Button::new("✎ Letzten bearbeiten"))
                .clicked()
            {
                events.push(UiIntent::EditLastResultRequested);
            }

            ui.separator();

            let session = mode.is_active();
            if ui
                .add_enabled(session && anchor_count >= 3, egui::Button::new("✔ Fertig (Enter)"))
                .clicked()
            {
                events.push(UiIntent::FinishRequested);
            }
            if ui
                .add_enabled(session && anchor_count > 0, egui::Button::new("⟲ Letzter Anker (⌫)"))
                .clicked()
            {
                events.push(UiIntent::RemoveLastAnchorRequested);
            }
            if ui
                .add_enabled(session, egui::Button::new("🗑 Leeren"))
                .clicked()
            {
                events.push(UiIntent::ClearRequested);
            }
            if ui
                .add_enabled(session, egui::Button::new("✖ Abbrechen (Esc)"))
                .clicked()
            {
                events.push(UiIntent::StopRequested);
            }

            ui.separator();

            if ui.button("⌂ Ansicht").clicked() {
                events.push(UiIntent::ResetViewRequested);
            }
            if ui.button("💾 Optionen speichern").clicked() {
                events.push(UiIntent::SaveOptionsRequested);
            }
        });
    });

    events
}
