//! Zentrale Konfiguration für den Zaun-Pfad-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::bezier::{
    HandleParams, DEFAULT_BEZIER_SEGMENTS, HANDLE_BASE_DISTANCE, HANDLE_DISTANCE_RATIO,
    HANDLE_EPSILON, MAX_BEZIER_SEGMENTS,
};
use serde::{Deserialize, Serialize};

// ── Pfad-Geometrie ──────────────────────────────────────────────────

/// Toleranz (Grad) für das Zusammenlegen benachbarter Ring-Eckpunkte.
pub const DEDUP_TOLERANCE: f64 = 1e-7;

// ── Eingabe ─────────────────────────────────────────────────────────

/// Pick-Radius für Marker in Screen-Pixeln.
pub const MARKER_PICK_RADIUS_PX: f64 = 10.0;
/// Mindest-Drag-Distanz (Pixel), ab der ein Rechteck übernommen wird.
pub const RECTANGLE_MIN_DRAG_PX: f64 = 5.0;
/// Zoom-Faktor pro Mausrad-Raste.
pub const SCROLL_ZOOM_STEP: f64 = 1.2;

// ── Darstellung ─────────────────────────────────────────────────────

/// Radius der Anker-Marker in Pixeln.
pub const ANCHOR_RADIUS_PX: f32 = 6.0;
/// Radius der Griff-Marker in Pixeln.
pub const HANDLE_RADIUS_PX: f32 = 4.0;
/// Farbe für Eck-Anker (RGBA: Weiß).
pub const ANCHOR_COLOR_CORNER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
/// Farbe für Kurven-Anker (RGBA: Orange).
pub const ANCHOR_COLOR_SMOOTH: [f32; 4] = [1.0, 0.6, 0.1, 1.0];
/// Farbe der Griffe und Verbindungslinien (RGBA: Cyan).
pub const HANDLE_COLOR: [f32; 4] = [0.0, 0.8, 1.0, 1.0];
/// Farbe der Pfad-Vorschau (RGBA: Rot, wie Standard-Zaunfarbe).
pub const PATH_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Linienstärke der Pfad-Vorschau in Pixeln.
pub const PATH_THICKNESS_PX: f32 = 2.0;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `fence_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    // ── Pfad-Geometrie ──────────────────────────────────────────
    /// Abtast-Segmente pro Kurvenabschnitt
    pub bezier_segments: usize,
    /// Griff-Länge relativ zum Nachbarabstand
    pub handle_distance_ratio: f64,
    /// Maximale Griff-Länge in Grad
    pub handle_base_distance: f64,
    /// Abstände darunter gelten als zusammenfallend (Grad)
    #[serde(default = "default_handle_epsilon")]
    pub handle_epsilon: f64,
    /// Toleranz für Eckpunkt-Deduplizierung beim Laden eines Rings (Grad)
    pub dedup_tolerance: f64,

    // ── Eingabe ─────────────────────────────────────────────────
    /// Pick-Radius für Marker in Pixeln
    pub marker_pick_radius_px: f64,
    /// Mindest-Drag-Distanz für Rechtecke in Pixeln
    pub rectangle_min_drag_px: f64,
    /// Zoom-Faktor pro Mausrad-Raste
    #[serde(default = "default_scroll_zoom_step")]
    pub scroll_zoom_step: f64,

    // ── Darstellung ─────────────────────────────────────────────
    pub anchor_radius_px: f32,
    pub handle_radius_px: f32,
    pub anchor_color_corner: [f32; 4],
    pub anchor_color_smooth: [f32; 4],
    pub handle_color: [f32; 4],
    pub path_color: [f32; 4],
    pub path_thickness_px: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            bezier_segments: DEFAULT_BEZIER_SEGMENTS,
            handle_distance_ratio: HANDLE_DISTANCE_RATIO,
            handle_base_distance: HANDLE_BASE_DISTANCE,
            handle_epsilon: HANDLE_EPSILON,
            dedup_tolerance: DEDUP_TOLERANCE,

            marker_pick_radius_px: MARKER_PICK_RADIUS_PX,
            rectangle_min_drag_px: RECTANGLE_MIN_DRAG_PX,
            scroll_zoom_step: SCROLL_ZOOM_STEP,

            anchor_radius_px: ANCHOR_RADIUS_PX,
            handle_radius_px: HANDLE_RADIUS_PX,
            anchor_color_corner: ANCHOR_COLOR_CORNER,
            anchor_color_smooth: ANCHOR_COLOR_SMOOTH,
            handle_color: HANDLE_COLOR,
            path_color: PATH_COLOR,
            path_thickness_px: PATH_THICKNESS_PX,
        }
    }
}

/// Serde-Default für `handle_epsilon` (Abwärtskompatibilität).
fn default_handle_epsilon() -> f64 {
    HANDLE_EPSILON
}

fn default_scroll_zoom_step() -> f64 {
    SCROLL_ZOOM_STEP
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).unwrap_or_else(|e| {
                log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                Self::default()
            }),
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Parst Optionen aus TOML-Text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let opts: Self = toml::from_str(content)?;
        Ok(opts.sanitized())
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("fence_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("fence_editor.toml")
    }

    /// Segmente pro Kurvenabschnitt, begrenzt auf `1..=MAX_BEZIER_SEGMENTS`.
    pub fn segments(&self) -> usize {
        self.bezier_segments.clamp(1, MAX_BEZIER_SEGMENTS)
    }

    /// Griff-Parameter für `derive_smooth_handles`.
    pub fn handle_params(&self) -> HandleParams {
        HandleParams {
            distance_ratio: self.handle_distance_ratio,
            base_distance: self.handle_base_distance,
            epsilon: self.handle_epsilon,
        }
    }

    /// Ersetzt unbrauchbare Werte (≤ 0, NaN) durch Standardwerte.
    fn sanitized(mut self) -> Self {
        let d = Self::default();
        if self.bezier_segments == 0 {
            log::warn!("bezier_segments = 0 ungültig, verwende {}", d.bezier_segments);
            self.bezier_segments = d.bezier_segments;
        }
        if self.bezier_segments > MAX_BEZIER_SEGMENTS {
            log::warn!(
                "bezier_segments = {} zu groß, begrenze auf {}",
                self.bezier_segments,
                MAX_BEZIER_SEGMENTS
            );
            self.bezier_segments = MAX_BEZIER_SEGMENTS;
        }
        for (value, fallback, name) in [
            (
                &mut self.handle_distance_ratio,
                d.handle_distance_ratio,
                "handle_distance_ratio",
            ),
            (
                &mut self.handle_base_distance,
                d.handle_base_distance,
                "handle_base_distance",
            ),
            (&mut self.handle_epsilon, d.handle_epsilon, "handle_epsilon"),
            (&mut self.dedup_tolerance, d.dedup_tolerance, "dedup_tolerance"),
            (
                &mut self.marker_pick_radius_px,
                d.marker_pick_radius_px,
                "marker_pick_radius_px",
            ),
        ] {
            if !(value.is_finite() && *value > 0.0) {
                log::warn!("{} = {} ungültig, verwende {}", name, value, fallback);
                *value = fallback;
            }
        }
        if !(self.rectangle_min_drag_px.is_finite() && self.rectangle_min_drag_px >= 0.0) {
            self.rectangle_min_drag_px = d.rectangle_min_drag_px;
        }
        if !(self.scroll_zoom_step.is_finite() && self.scroll_zoom_step > 1.0) {
            self.scroll_zoom_step = d.scroll_zoom_step;
        }
        self
    }
}
