//! Zaun-Pfad-Editor.
//!
//! Desktop-Oberfläche zum Zeichnen und Bearbeiten von Zaun-Polygonen
//! mit Eck- und Kurvenankern, auf Basis von egui.

use eframe::egui;
use fence_path_editor::app::CursorStyle;
use fence_path_editor::ui::{self, UiIntent};
use fence_path_editor::{
    attach_editor, CaptureVariant, DrawResult, EditorCallbacks, EditorOptions, FenceEditor,
    GeoPoint, MapViewport, MemorySurface, RenderSurface,
};
use glam::DVec2;

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Zaun-Pfad-Editor v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1280.0, 720.0])
                .with_title("Zaun-Pfad-Editor"),
            renderer: eframe::Renderer::Glow,
            multisampling: 4,
            ..Default::default()
        };

        eframe::run_native(
            "Zaun-Pfad-Editor",
            options,
            Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
        )
    }
}

/// Meldet abgeschlossene Zeichnungen im Log (Payload wie für die Zaun-API).
struct LogCallbacks;

impl EditorCallbacks for LogCallbacks {
    fn on_draw_start(&mut self) {
        log::info!("Zeichnung begonnen");
    }

    fn on_draw_complete(&mut self, result: &DrawResult) {
        match result.to_payload().to_json() {
            Ok(json) => log::info!("Zaun-Payload: {}", json),
            Err(e) => log::error!("Payload nicht serialisierbar: {}", e),
        }
        log::info!("WKT: {}", result.ring.to_wkt());
    }

    fn on_draw_stop(&mut self) {
        log::info!("Zeichnung abgebrochen");
    }
}

/// Haupt-Anwendungsstruktur
struct EditorApp {
    editor: FenceEditor<MemorySurface>,
    input: ui::InputState,
    last_result: Option<DrawResult>,
    hover_geo: Option<GeoPoint>,
    cursor: CursorStyle,
    status_message: Option<String>,
}

impl EditorApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EditorOptions::config_path();
        let options = EditorOptions::load_from_file(&config_path);

        let mut editor = attach_editor(MemorySurface::new(MapViewport::default()), options);
        editor.set_callbacks(Box::new(LogCallbacks));

        Self {
            editor,
            input: ui::InputState::new(),
            last_result: None,
            hover_geo: None,
            cursor: CursorStyle::Default,
            status_message: None,
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let events = self.collect_ui_events(ctx);

        let has_meaningful_events = events.iter().any(|e| !e.is_ambient());

        self.process_events(events);

        ctx.set_cursor_icon(match self.cursor {
            CursorStyle::Default => egui::CursorIcon::Default,
            CursorStyle::Crosshair => egui::CursorIcon::Crosshair,
            CursorStyle::Grab => egui::CursorIcon::Grab,
        });

        if has_meaningful_events || ctx.input(|i| i.pointer.is_moving()) {
            ctx.request_repaint();
        }
    }
}

impl EditorApp {
    fn collect_ui_events(&mut self, ctx: &egui::Context) -> Vec<UiIntent> {
        let mut events = Vec::new();

        ui::render_status_bar(
            ctx,
            &self.editor,
            self.hover_geo,
            self.status_message.as_deref(),
        );
        events.extend(ui::render_toolbar(
            ctx,
            &self.editor,
            self.last_result.is_some(),
        ));

        let hint = self.hint_text();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                events.extend(self.input.collect_viewport_events(
                    ui,
                    &response,
                    self.editor.options().scroll_zoom_step,
                ));
                // Hinweisfeld über der Karte nimmt keine Zeichen-Gesten an
                events.push(UiIntent::ExcludedRegions(
                    hint.map(|_| ui::map_view::hint_rect(rect))
                        .into_iter()
                        .collect(),
                ));

                ui::paint_map(
                    ui.painter(),
                    rect,
                    self.editor.surface(),
                    self.editor.options(),
                    hint,
                );
            });

        events
    }

    fn hint_text(&self) -> Option<&'static str> {
        if self.editor.is_drawing() {
            if self.editor.overlay().variant() == CaptureVariant::Rectangle {
                Some("Rechteck aufziehen (Esc = Abbrechen)")
            } else {
                Some("Klick: Anker · Doppelklick: Fertig/Kurve · Schlusskante bleibt gerade")
            }
        } else if self.editor.is_editing() {
            Some("Anker/Griffe ziehen · Doppelklick: Kurve · Schlusskante bleibt gerade")
        } else {
            None
        }
    }

    fn process_events(&mut self, events: Vec<UiIntent>) {
        for event in events {
            self.handle_intent(event);
        }
    }

    fn handle_intent(&mut self, event: UiIntent) {
        match event {
            UiIntent::ViewportPlaced { origin, size } => {
                self.editor.overlay_mut().set_origin(origin);
                self.editor.surface_mut().viewport_mut().set_size(size);
            }
            UiIntent::ExcludedRegions(regions) => {
                let overlay = self.editor.overlay_mut();
                overlay.clear_excluded_regions();
                for region in regions {
                    overlay.add_excluded_region(region);
                }
            }
            UiIntent::Pointer(gesture) => {
                if let Some(result) = self.editor.handle_pointer(gesture) {
                    self.store_result(result);
                }
            }
            UiIntent::Hover { pos } => {
                self.cursor = self.editor.hover(pos);
                self.hover_geo = self
                    .editor
                    .overlay()
                    .screen_to_geo(self.editor.surface(), pos)
                    .ok();
            }
            UiIntent::CameraPan { delta_px } => {
                if !self.editor.captures_drag() && self.editor.surface().panning_enabled() {
                    self.editor.surface_mut().viewport_mut().pan_pixels(delta_px);
                }
            }
            UiIntent::CameraZoom { factor, focus } => {
                let origin = self.editor.overlay().origin();
                let viewport = self.editor.surface_mut().viewport_mut();
                let focus_px = focus.map_or(viewport.size * 0.5, |p| p - origin);
                viewport.zoom_towards(factor, focus_px);
            }
            UiIntent::ResetViewRequested => {
                let viewport = self.editor.surface_mut().viewport_mut();
                viewport.look_at(DVec2::ZERO);
                viewport.zoom = MapViewport::ZOOM_DEFAULT;
            }
            UiIntent::StartDrawingRequested => {
                self.status_message = None;
                self.editor.start_drawing();
            }
            UiIntent::StartRectangleRequested => {
                self.status_message = None;
                self.editor.start_rectangle();
            }
            UiIntent::FinishRequested => {
                if !self.editor.mode().is_active() {
                    return;
                }
                match self.editor.finish_drawing() {
                    Some(result) => self.store_result(result),
                    None => {
                        self.status_message =
                            Some("Mindestens 3 unterschiedliche Anker nötig".to_string());
                    }
                }
            }
            UiIntent::StopRequested => self.editor.stop_drawing(),
            UiIntent::ClearRequested => self.editor.clear_drawing(),
            UiIntent::RemoveLastAnchorRequested => {
                let count = self.editor.get_anchors().len();
                if count > 0 {
                    self.editor.remove_anchor(count - 1);
                }
            }
            UiIntent::EditLastResultRequested => {
                if let Some(result) = self.last_result.clone() {
                    if !self
                        .editor
                        .enter_edit_mode(&result.ring, Some(&result.anchors))
                    {
                        self.status_message = Some("Geometrie nicht bearbeitbar".to_string());
                    }
                }
            }
            UiIntent::SaveOptionsRequested => {
                let path = EditorOptions::config_path();
                if let Err(e) = self.editor.options().save_to_file(&path) {
                    log::error!("Optionen speichern fehlgeschlagen: {:#}", e);
                    self.status_message = Some(format!("Speichern fehlgeschlagen: {}", e));
                }
            }
        }
    }

    fn store_result(&mut self, result: DrawResult) {
        self.status_message = Some(format!(
            "Zaun übernommen: {} Anker, {} Ring-Positionen",
            result.anchors.len(),
            result.ring.len()
        ));
        self.last_result = Some(result);
    }
}
