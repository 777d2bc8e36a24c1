//! Viewport-Input-Handling: Maus-Events, Tastatur, Scroll → UiIntent.

use super::intent::UiIntent;
use crate::app::{PointerButton, PointerGesture};
use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PrimaryDragMode {
    #[default]
    None,
    /// Primär-Drag wird als Press/Move/Release an den Editor gemeldet
    Gesture,
}

/// Verwaltet den Input-Zustand für den Kartenbereich
#[derive(Default)]
pub struct InputState {
    primary_drag_mode: PrimaryDragMode,
}

fn to_dvec2(pos: egui::Pos2) -> DVec2 {
    DVec2::new(pos.x as f64, pos.y as f64)
}

impl InputState {
    /// Erstellt einen neuen, leeren Input-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sammelt Karten-Events aus egui-Input und gibt UiIntents zurück.
    ///
    /// Ein Primär-Drag wird immer als Geste gemeldet und zusätzlich als
    /// Pan-Delta; ob die Karte tatsächlich verschoben wird, entscheidet die
    /// Anwendung anhand von Pan-Freigabe und Editor-Zustand.
    pub fn collect_viewport_events(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        scroll_zoom_step: f64,
    ) -> Vec<UiIntent> {
        let mut events = Vec::new();

        events.push(UiIntent::ViewportPlaced {
            origin: to_dvec2(response.rect.min),
            size: DVec2::new(response.rect.width() as f64, response.rect.height() as f64),
        });

        self.collect_keyboard(ui, &mut events);
        self.handle_drag(ui, response, &mut events);
        self.handle_clicks(response, &mut events);

        if let Some(pos) = response.hover_pos() {
            events.push(UiIntent::Hover {
                pos: to_dvec2(pos),
            });
        }

        self.handle_scroll_zoom(ui, response, scroll_zoom_step, &mut events);
        events
    }

    // ── Tastatur ────────────────────────────────────────────────

    fn collect_keyboard(&self, ui: &egui::Ui, events: &mut Vec<UiIntent>) {
        ui.input(|i| {
            if i.key_pressed(egui::Key::Enter) {
                events.push(UiIntent::FinishRequested);
            }
            if i.key_pressed(egui::Key::Escape) {
                events.push(UiIntent::StopRequested);
            }
            if i.key_pressed(egui::Key::Backspace) || i.key_pressed(egui::Key::Delete) {
                events.push(UiIntent::RemoveLastAnchorRequested);
            }
        });
    }

    // ── Drag (Start / Update / Ende) ────────────────────────────

    fn handle_drag(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        events: &mut Vec<UiIntent>,
    ) {
        let pointer_delta = ui.input(|i| i.pointer.delta());

        if response.drag_started_by(egui::PointerButton::Primary) {
            // press_origin() = exakte Klickposition vor der Drag-Schwelle
            let press = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = press {
                events.push(UiIntent::Pointer(PointerGesture::Press {
                    pos: to_dvec2(pos),
                }));
                self.primary_drag_mode = PrimaryDragMode::Gesture;
            }
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && self.primary_drag_mode == PrimaryDragMode::Gesture
        {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(UiIntent::Pointer(PointerGesture::Move {
                    pos: to_dvec2(pos),
                }));
            }
            if pointer_delta != egui::Vec2::ZERO {
                events.push(UiIntent::CameraPan {
                    delta_px: DVec2::new(pointer_delta.x as f64, pointer_delta.y as f64),
                });
            }
        } else if (response.dragged_by(egui::PointerButton::Middle)
            || response.dragged_by(egui::PointerButton::Secondary))
            && pointer_delta != egui::Vec2::ZERO
        {
            events.push(UiIntent::CameraPan {
                delta_px: DVec2::new(pointer_delta.x as f64, pointer_delta.y as f64),
            });
        }

        if response.drag_stopped_by(egui::PointerButton::Primary)
            && self.primary_drag_mode == PrimaryDragMode::Gesture
        {
            let release = response
                .interact_pointer_pos()
                .or_else(|| ui.input(|i| i.pointer.latest_pos()));
            if let Some(pos) = release {
                events.push(UiIntent::Pointer(PointerGesture::Release {
                    pos: to_dvec2(pos),
                }));
            }
            self.primary_drag_mode = PrimaryDragMode::None;
        }
    }

    // ── Klick-Events ────────────────────────────────────────────

    fn handle_clicks(&mut self, response: &egui::Response, events: &mut Vec<UiIntent>) {
        let Some(pos) = response.interact_pointer_pos().map(to_dvec2) else {
            return;
        };
        if response.double_clicked_by(egui::PointerButton::Primary) {
            events.push(UiIntent::Pointer(PointerGesture::DoubleClick { pos }));
        } else if response.clicked_by(egui::PointerButton::Primary) {
            events.push(UiIntent::Pointer(PointerGesture::Click {
                pos,
                button: PointerButton::Primary,
            }));
        } else if response.clicked_by(egui::PointerButton::Secondary) {
            events.push(UiIntent::Pointer(PointerGesture::Click {
                pos,
                button: PointerButton::Secondary,
            }));
        }
    }

    // ── Scroll-Zoom (auf Mausposition) ──────────────────────────

    fn handle_scroll_zoom(
        &self,
        ui: &egui::Ui,
        response: &egui::Response,
        step: f64,
        events: &mut Vec<UiIntent>,
    ) {
        if !response.hovered() {
            return;
        }
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll == 0.0 {
            return;
        }
        let factor = if scroll > 0.0 { step } else { 1.0 / step };
        events.push(UiIntent::CameraZoom {
            factor,
            focus: response.hover_pos().map(to_dvec2),
        });
    }
}
