//! Status-Bar am unteren Bildschirmrand.

use crate::app::{EditorMode, FenceEditor, MemorySurface};
use crate::core::{AnchorKind, GeoPoint};

/// Rendert die Status-Bar
pub fn render_status_bar(
    ctx: &egui::Context,
    editor: &FenceEditor<MemorySurface>,
    hover_geo: Option<GeoPoint>,
    message: Option<&str>,
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mode = match editor.mode() {
                EditorMode::Idle => "Bereit",
                EditorMode::Drawing => "Zeichnen",
                EditorMode::Editing => "Bearbeiten",
            };
            ui.label(format!("Modus: {}", mode));

            ui.separator();

            let anchors = editor.get_anchors();
            let smooth = anchors
                .iter()
                .filter(|a| a.kind == AnchorKind::Smooth)
                .count();
            ui.label(format!("Anker: {} (Kurven: {})", anchors.len(), smooth));

            ui.separator();

            let vp = editor.surface().viewport();
            ui.label(format!(
                "Zoom: {:.0} px/° | Mitte: ({:.5}, {:.5})",
                vp.zoom, vp.center.y, vp.center.x
            ));

            ui.separator();

            match hover_geo {
                Some(p) => ui.label(format!("Zeiger: {:.6}, {:.6}", p.lat(), p.lng())),
                None => ui.label("Zeiger: –"),
            };

            if let Some(msg) = message {
                ui.separator();
                ui.label(egui::RichText::new(format!("⚠ {}", msg)).color(egui::Color32::YELLOW));
            }
        });
    });
}
