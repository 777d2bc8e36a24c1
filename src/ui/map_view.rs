use crate::app::{LayerKind, MemorySurface, RenderSurface, ScreenRect};
use crate::core::{AnchorKind, GeoPoint};
use crate::shared::EditorOptions;
use glam::DVec2;

/// Mindestabstand der Gitterlinien in Pixeln.
const GRID_MIN_SPACING_PX: f64 = 80.0;
/// Obergrenze Gitterlinien pro Achse.
const GRID_MAX_LINES: usize = 200;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(24, 32, 40);
const GRID_COLOR: egui::Color32 = egui::Color32::from_rgb(44, 56, 68);
const EQUATOR_COLOR: egui::Color32 = egui::Color32::from_rgb(70, 90, 110);

fn color32(c: [f32; 4]) -> egui::Color32 {
    let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(to_u8(c[0]), to_u8(c[1]), to_u8(c[2]), to_u8(c[3]))
}

fn to_pos(rect: egui::Rect, screen: DVec2) -> egui::Pos2 {
    rect.min + egui::vec2(screen.x as f32, screen.y as f32)
}

/// Hinweisfeld oben links über der Karte (nimmt keine Zeichen-Gesten an).
pub fn hint_rect(rect: egui::Rect) -> ScreenRect {
    let min = DVec2::new(rect.min.x as f64 + 8.0, rect.min.y as f64 + 8.0);
    ScreenRect::from_corners(min, min + DVec2::new(480.0, 24.0))
}

/// Zeichnet Hintergrund, Gradnetz und alle Layer der Darstellung.
pub fn paint_map(
    painter: &egui::Painter,
    rect: egui::Rect,
    surface: &MemorySurface,
    options: &EditorOptions,
    hint: Option<&str>,
) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
    paint_graticule(painter, rect, surface);

    let screen = |p: GeoPoint| to_pos(rect, surface.geo_to_screen(p));
    let path_stroke = egui::Stroke::new(options.path_thickness_px, color32(options.path_color));
    let handle_color = color32(options.handle_color);

    for (_, layer) in surface.layers() {
        match layer.kind {
            LayerKind::PathPreview => {
                let points: Vec<egui::Pos2> = layer.points.iter().map(|p| screen(*p)).collect();
                painter.add(egui::Shape::line(points, path_stroke));
            }
            LayerKind::RectanglePreview => {
                let points: Vec<egui::Pos2> = layer.points.iter().map(|p| screen(*p)).collect();
                painter.add(egui::Shape::dashed_line(&points, path_stroke, 6.0, 4.0));
            }
            LayerKind::HandleConnector => {
                if let [a, b] = layer.points.as_slice() {
                    painter.line_segment([screen(*a), screen(*b)], egui::Stroke::new(1.0, handle_color));
                }
            }
            LayerKind::HandleMarker => {
                if let Some(p) = layer.points.first() {
                    painter.circle_filled(screen(*p), options.handle_radius_px, handle_color);
                }
            }
            LayerKind::AnchorMarker(kind) => {
                if let Some(p) = layer.points.first() {
                    let fill = match kind {
                        AnchorKind::Corner => color32(options.anchor_color_corner),
                        AnchorKind::Smooth => color32(options.anchor_color_smooth),
                    };
                    let center = screen(*p);
                    painter.circle_filled(center, options.anchor_radius_px, fill);
                    painter.circle_stroke(
                        center,
                        options.anchor_radius_px,
                        egui::Stroke::new(1.0, egui::Color32::BLACK),
                    );
                }
            }
        }
    }

    if let Some(text) = hint {
        let r = hint_rect(rect);
        let hint_area = egui::Rect::from_min_max(
            egui::pos2(r.min.x as f32, r.min.y as f32),
            egui::pos2(r.max.x as f32, r.max.y as f32),
        );
        painter.rect_filled(hint_area, 4.0, egui::Color32::from_black_alpha(160));
        painter.text(
            hint_area.left_center() + egui::vec2(8.0, 0.0),
            egui::Align2::LEFT_CENTER,
            text,
            egui::FontId::proportional(14.0),
            egui::Color32::WHITE,
        );
    }
}

/// Gradnetz mit dezimaler Schrittweite passend zum Zoom.
fn paint_graticule(painter: &egui::Painter, rect: egui::Rect, surface: &MemorySurface) {
    let vp = surface.viewport();
    let step = 10f64.powf((GRID_MIN_SPACING_PX * vp.degrees_per_pixel()).log10().ceil());
    if !step.is_finite() || step <= 0.0 {
        return;
    }
    let top_left = vp.screen_to_geo(DVec2::ZERO);
    let bottom_right = vp.screen_to_geo(vp.size);
    let stroke = egui::Stroke::new(1.0, GRID_COLOR);

    let lng_start = (top_left.x / step).floor() * step;
    for i in 0..GRID_MAX_LINES {
        let lng = lng_start + i as f64 * step;
        if lng > bottom_right.x {
            break;
        }
        let x = vp.geo_to_screen(DVec2::new(lng, 0.0)).x as f32;
        painter.vline(rect.min.x + x, rect.y_range(), stroke);
    }

    let lat_start = (bottom_right.y / step).floor() * step;
    for i in 0..GRID_MAX_LINES {
        let lat = lat_start + i as f64 * step;
        if lat > top_left.y {
            break;
        }
        let y = vp.geo_to_screen(DVec2::new(0.0, lat)).y as f32;
        let color = if lat.abs() < step * 1e-6 {
            EQUATOR_COLOR
        } else {
            GRID_COLOR
        };
        painter.hline(rect.x_range(), rect.min.y + y, egui::Stroke::new(stroke.width, color));
    }
}
