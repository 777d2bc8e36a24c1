use super::{DragTarget, PathManager};
use crate::app::mode::EditorMode;
use crate::app::surface::{LayerKind, MemorySurface, RenderSurface};
use crate::core::{AnchorKind, GeoPoint, HandleSide, PolygonRing};
use crate::core::bezier::MAX_BEZIER_SEGMENTS;
use crate::shared::EditorOptions;
use approx::assert_relative_eq;
use glam::DVec2;

fn gp(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).expect("Testpunkt gültig")
}

fn drawing(points: &[(f64, f64)]) -> (PathManager, MemorySurface) {
    let mut surface = MemorySurface::default();
    let mut pm = PathManager::default();
    pm.start_drawing(&mut surface);
    for &(lat, lng) in points {
        assert!(pm.add_anchor_at(&mut surface, lat, lng));
    }
    (pm, surface)
}

fn count(surface: &MemorySurface, kind: LayerKind) -> usize {
    surface.count_where(|k| k == kind)
}

// ── Zeichnen ──

#[test]
fn test_anker_nur_im_drawing_modus() {
    let mut surface = MemorySurface::default();
    let mut pm = PathManager::default();
    assert!(!pm.add_anchor_at(&mut surface, 0.0, 0.0));
    assert_eq!(pm.anchor_count(), 0);
    assert_eq!(surface.layer_count(), 0);
}

#[test]
fn test_ungueltiger_anker_wird_verworfen() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    assert!(!pm.add_anchor_at(&mut surface, f64::NAN, 0.0));
    assert!(!pm.add_anchor_at(&mut surface, 0.0, 181.0));
    assert_eq!(pm.anchor_count(), 1);
}

#[test]
fn test_vorschau_ab_zwei_ankern() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    assert_eq!(count(&surface, LayerKind::PathPreview), 0);
    pm.add_anchor_at(&mut surface, 0.0, 1.0);
    assert_eq!(count(&surface, LayerKind::PathPreview), 1);
    pm.add_anchor_at(&mut surface, 1.0, 1.0);
    assert_eq!(count(&surface, LayerKind::PathPreview), 1);

    let preview = surface
        .layers()
        .find(|(_, l)| l.kind == LayerKind::PathPreview)
        .map(|(_, l)| l.points.clone())
        .expect("Vorschau");
    // Ab 3 Ankern geschlossen
    assert_eq!(preview.len(), 4);
    assert_eq!(preview.first(), preview.last());
}

#[test]
fn test_gerader_pfad_ohne_griffe() {
    let (pm, _) = drawing(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    assert_eq!(
        pm.generate_bezier_path(),
        vec![gp(0.0, 0.0), gp(0.0, 1.0), gp(1.0, 1.0)]
    );
}

#[test]
fn test_geometrie_erst_ab_drei_ankern() {
    let (mut pm, mut surface) = drawing(&[]);
    assert!(pm.generate_geometry().is_none());
    pm.add_anchor_at(&mut surface, 0.0, 0.0);
    assert!(pm.generate_geometry().is_none());
    pm.add_anchor_at(&mut surface, 0.0, 1.0);
    assert!(pm.generate_geometry().is_none());
    pm.add_anchor_at(&mut surface, 1.0, 1.0);
    let ring = pm.generate_geometry().expect("Ring");
    assert_eq!(
        ring.points(),
        &[gp(0.0, 0.0), gp(0.0, 1.0), gp(1.0, 1.0), gp(0.0, 0.0)]
    );
}

#[test]
fn test_finish_mit_zwei_ankern_bleibt_im_drawing() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 1.0)]);
    let layers_before = surface.layer_count();
    assert!(pm.finish(&mut surface).is_none());
    assert_eq!(pm.mode(), EditorMode::Drawing);
    assert_eq!(pm.anchor_count(), 2);
    assert_eq!(surface.layer_count(), layers_before);
}

#[test]
fn test_finish_raeumt_auf_und_wechselt_nach_idle() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    let result = pm.finish(&mut surface).expect("Ergebnis");
    assert_eq!(result.ring.len(), 4);
    assert_eq!(result.anchors.len(), 3);
    assert_eq!(pm.mode(), EditorMode::Idle);
    assert_eq!(pm.anchor_count(), 0);
    assert_eq!(surface.layer_count(), 0);
}

#[test]
fn test_finish_lehnt_entarteten_ring_ab() {
    let (mut pm, mut surface) = drawing(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
    assert!(pm.finish(&mut surface).is_none());
    assert_eq!(pm.mode(), EditorMode::Drawing);
    assert_eq!(pm.anchor_count(), 3);
}

// ── Umschalten ──

#[test]
fn test_einzelner_anker_bekommt_fallback_griffe() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    assert!(pm.toggle_anchor_type(&mut surface, 0));
    let a = pm.anchors()[0];
    assert_eq!(a.kind(), AnchorKind::Smooth);
    assert_eq!(a.handle1(), Some(gp(0.0, -0.001)));
    assert_eq!(a.handle2(), Some(gp(0.0, 0.001)));
    assert_eq!(count(&surface, LayerKind::HandleMarker), 2);
    assert_eq!(count(&surface, LayerKind::HandleConnector), 2);
    assert_eq!(count(&surface, LayerKind::AnchorMarker(AnchorKind::Smooth)), 1);
}

#[test]
fn test_zurueckschalten_entfernt_griffe() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 1.0)]);
    pm.toggle_anchor_type(&mut surface, 1);
    pm.toggle_anchor_type(&mut surface, 1);
    assert_eq!(pm.anchors()[1].kind(), AnchorKind::Corner);
    assert_eq!(count(&surface, LayerKind::HandleMarker), 0);
    assert_eq!(count(&surface, LayerKind::HandleConnector), 0);
    assert_eq!(count(&surface, LayerKind::AnchorMarker(AnchorKind::Corner)), 2);
}

#[test]
fn test_kurvenanker_erzeugt_abgetastete_kurve() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 0.01), (0.01, 0.01)]);
    let straight = pm.generate_bezier_path().len();
    pm.toggle_anchor_type(&mut surface, 1);
    let path = pm.generate_bezier_path();
    // Zwei Kurvenabschnitte à 20 Segmente, Grenzpunkte nicht doppelt
    assert_eq!(straight, 3);
    assert_eq!(path.len(), 41);
    assert_eq!(path[0], gp(0.0, 0.0));
    assert_eq!(path[20], gp(0.0, 0.01));
    assert!(path[40].approx_eq(gp(0.01, 0.01), 1e-12));
}

#[test]
fn test_schlusskante_ignoriert_randgriffe() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 0.01), (0.01, 0.01)]);
    pm.toggle_anchor_type(&mut surface, 0);
    pm.toggle_anchor_type(&mut surface, 2);
    let before = pm.generate_geometry().expect("Ring");
    let points = before.points();
    assert!(points[points.len() - 2].approx_eq(gp(0.01, 0.01), 1e-12));
    assert_eq!(points[points.len() - 1], gp(0.0, 0.0));

    assert!(pm.drag_start(&mut surface, DragTarget::Handle(0, HandleSide::Leading)));
    assert!(pm.drag_move(&mut surface, 0.005, -0.005));
    pm.drag_end(&mut surface);
    assert!(pm.drag_start(&mut surface, DragTarget::Handle(2, HandleSide::Trailing)));
    assert!(pm.drag_move(&mut surface, 0.015, 0.005));
    pm.drag_end(&mut surface);

    assert_eq!(pm.generate_geometry(), Some(before));
}

#[test]
fn test_riesige_segmentzahl_ohne_panik() {
    let options = EditorOptions {
        bezier_segments: usize::MAX,
        ..EditorOptions::default()
    };
    let mut surface = MemorySurface::default();
    let mut pm = PathManager::new(&options);
    pm.start_drawing(&mut surface);
    for (lat, lng) in [(0.0, 0.0), (0.0, 0.01), (0.01, 0.01)] {
        pm.add_anchor_at(&mut surface, lat, lng);
    }
    assert!(pm.toggle_anchor_type(&mut surface, 1));
    assert_eq!(pm.generate_bezier_path().len(), 2 * MAX_BEZIER_SEGMENTS + 1);
}

#[test]
fn test_toggle_ungueltiger_index() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    assert!(!pm.toggle_anchor_type(&mut surface, 3));
}

// ── Drag ──

#[test]
fn test_hit_test_findet_anker_im_radius() {
    let (pm, surface) = drawing(&[(0.0, 0.0), (0.0, 1.0)]);
    let screen = surface.geo_to_screen(gp(0.0, 0.0));
    assert_eq!(
        pm.hit_test(&surface, screen + DVec2::new(3.0, 4.0), 10.0),
        Some(DragTarget::Anchor(0))
    );
    assert_eq!(pm.hit_test(&surface, screen + DVec2::new(30.0, 0.0), 10.0), None);
}

#[test]
fn test_hit_test_bevorzugt_naechsten_marker() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    pm.toggle_anchor_type(&mut surface, 0);
    // Zoom 4000 px/°: Griff 0.001° = 4 px neben dem Anker
    let handle = surface.geo_to_screen(gp(0.0, 0.001));
    assert_eq!(
        pm.hit_test(&surface, handle + DVec2::new(1.0, 0.0), 10.0),
        Some(DragTarget::Handle(0, HandleSide::Trailing))
    );
}

#[test]
fn test_drag_sperrt_und_entsperrt_pan() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    assert!(surface.panning_enabled());
    assert!(pm.drag_start(&mut surface, DragTarget::Anchor(0)));
    assert!(!surface.panning_enabled());
    assert!(pm.drag_move(&mut surface, 0.5, 0.5));
    pm.drag_end(&mut surface);
    assert!(surface.panning_enabled());
    assert_eq!(pm.anchors()[0].position(), gp(0.5, 0.5));
}

#[test]
fn test_drag_ausserhalb_wertebereich_ohne_wirkung() {
    let (mut pm, mut surface) = drawing(&[(10.0, 10.0)]);
    pm.drag_start(&mut surface, DragTarget::Anchor(0));
    assert!(!pm.drag_move(&mut surface, 95.0, 10.0));
    assert!(pm.is_dragging());
    assert_eq!(pm.anchors()[0].position(), gp(10.0, 10.0));
    pm.drag_end(&mut surface);
}

#[test]
fn test_anker_drag_nimmt_griffe_mit() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    pm.toggle_anchor_type(&mut surface, 0);
    pm.drag_start(&mut surface, DragTarget::Anchor(0));
    pm.drag_move(&mut surface, 1.0, 2.0);
    pm.drag_end(&mut surface);
    let h2 = pm.anchors()[0].handle2().expect("Griff");
    assert_relative_eq!(h2.lat(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(h2.lng(), 2.001, epsilon = 1e-12);

    let handle_markers: Vec<GeoPoint> = surface
        .layers()
        .filter(|(_, l)| l.kind == LayerKind::HandleMarker)
        .map(|(_, l)| l.points[0])
        .collect();
    assert!(handle_markers.contains(&h2));
}

#[test]
fn test_griff_drag_aktualisiert_verbindungslinie() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    pm.toggle_anchor_type(&mut surface, 0);
    assert!(pm.drag_start(
        &mut surface,
        DragTarget::Handle(0, HandleSide::Leading)
    ));
    pm.drag_move(&mut surface, 0.002, -0.002);
    pm.drag_end(&mut surface);
    assert_eq!(pm.anchors()[0].handle1(), Some(gp(0.002, -0.002)));
    let connected = surface
        .layers()
        .filter(|(_, l)| l.kind == LayerKind::HandleConnector)
        .any(|(_, l)| l.points == vec![gp(0.0, 0.0), gp(0.002, -0.002)]);
    assert!(connected);
}

#[test]
fn test_drag_auf_fehlenden_griff_wird_abgelehnt() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    assert!(!pm.drag_start(
        &mut surface,
        DragTarget::Handle(0, HandleSide::Leading)
    ));
    assert!(surface.panning_enabled());
}

#[test]
fn test_pan_bleibt_aus_wenn_vorher_aus() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    surface.set_panning_enabled(false);
    pm.drag_start(&mut surface, DragTarget::Anchor(0));
    pm.drag_end(&mut surface);
    assert!(!surface.panning_enabled());
}

// ── Bearbeiten ──

#[test]
fn test_bearbeiten_mit_metadaten_verlustfrei() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 0.01), (0.01, 0.01)]);
    pm.toggle_anchor_type(&mut surface, 1);
    let result = pm.finish(&mut surface).expect("Ergebnis");

    assert!(pm.enter_edit_mode(&mut surface, &result.ring, Some(&result.anchors)));
    assert!(pm.is_editing());
    assert_eq!(pm.anchor_count(), 3);
    let kinds: Vec<AnchorKind> = pm.anchors().iter().map(|a| a.kind()).collect();
    assert_eq!(
        kinds,
        vec![AnchorKind::Corner, AnchorKind::Smooth, AnchorKind::Corner]
    );
}

#[test]
fn test_bearbeiten_nur_ring_ist_verlustbehaftet() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 0.01), (0.01, 0.01)]);
    pm.toggle_anchor_type(&mut surface, 1);
    let result = pm.finish(&mut surface).expect("Ergebnis");

    assert!(pm.enter_edit_mode(&mut surface, &result.ring, None));
    // Jeder abgetastete Punkt wird zum Eck-Anker
    assert!(pm.anchor_count() > 3);
    assert!(pm.anchors().iter().all(|a| a.kind() == AnchorKind::Corner));
}

#[test]
fn test_bearbeiten_zu_weniger_punkte_bricht_ab() {
    let mut surface = MemorySurface::default();
    let mut pm = PathManager::default();
    let p = gp(1.0, 1.0);
    let ring = PolygonRing::close(vec![p, gp(1.0, 1.00000001), gp(1.0, 2.0)]).expect("Ring");
    assert!(!pm.enter_edit_mode(&mut surface, &ring, None));
    assert_eq!(pm.mode(), EditorMode::Idle);
    assert_eq!(surface.layer_count(), 0);
}

#[test]
fn test_bearbeiten_baut_laufende_zeichnung_ab() {
    let (mut pm, mut surface) = drawing(&[(3.0, 3.0), (3.0, 4.0)]);
    let ring =
        PolygonRing::close(vec![gp(0.0, 0.0), gp(0.0, 1.0), gp(1.0, 1.0)]).expect("Ring");
    assert!(pm.enter_edit_mode(&mut surface, &ring, None));
    assert_eq!(pm.anchor_count(), 3);
    assert_eq!(surface.marker_count(), 3);
    assert!(!pm.add_anchor_at(&mut surface, 2.0, 2.0));
}

// ── Aufräumen ──

#[test]
fn test_cleanup_zweimal_ohne_fehler() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    pm.toggle_anchor_type(&mut surface, 0);
    pm.drag_start(&mut surface, DragTarget::Anchor(1));
    pm.cleanup(&mut surface);
    pm.cleanup(&mut surface);
    assert_eq!(surface.layer_count(), 0);
    assert_eq!(pm.anchor_count(), 0);
    assert!(!pm.is_dragging());
    assert!(surface.panning_enabled());
}

#[test]
fn test_clear_behaelt_modus() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 1.0)]);
    pm.clear(&mut surface);
    assert!(pm.is_drawing());
    assert_eq!(surface.layer_count(), 0);
    assert!(pm.add_anchor_at(&mut surface, 0.0, 0.0));
}

#[test]
fn test_cancel_wechselt_nach_idle() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0)]);
    pm.cancel(&mut surface);
    assert_eq!(pm.mode(), EditorMode::Idle);
    assert_eq!(surface.layer_count(), 0);
}

#[test]
fn test_anker_entfernen() {
    let (mut pm, mut surface) = drawing(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
    assert!(pm.remove_anchor(&mut surface, 1));
    assert_eq!(pm.anchor_count(), 2);
    assert_eq!(surface.marker_count(), 2);
    assert!(!pm.remove_anchor(&mut surface, 5));
}

// ── Rechteck ──

#[test]
fn test_rechteck_vorschau_und_abschluss() {
    let (mut pm, mut surface) = drawing(&[]);
    assert!(pm.update_rectangle_preview(&mut surface, gp(0.0, 0.0), gp(1.0, 1.0)));
    assert!(pm.update_rectangle_preview(&mut surface, gp(0.0, 0.0), gp(2.0, 2.0)));
    assert_eq!(count(&surface, LayerKind::RectanglePreview), 1);

    let ring = PolygonRing::rectangle(gp(0.0, 0.0), gp(2.0, 2.0)).expect("Rechteck");
    let result = pm.finish_rectangle(&mut surface, ring).expect("Ergebnis");
    assert_eq!(result.ring.len(), 5);
    assert_eq!(result.anchors.len(), 4);
    assert_eq!(pm.mode(), EditorMode::Idle);
    assert_eq!(surface.layer_count(), 0);
}

#[test]
fn test_rechteck_abschluss_im_bearbeiten_abgelehnt() {
    let mut surface = MemorySurface::default();
    let mut pm = PathManager::default();
    let ring = PolygonRing::close(vec![gp(0.0, 0.0), gp(0.0, 1.0), gp(1.0, 1.0)]).expect("Ring");
    assert!(pm.enter_edit_mode(&mut surface, &ring, None));

    let rect = PolygonRing::rectangle(gp(0.0, 0.0), gp(2.0, 2.0)).expect("Rechteck");
    assert!(pm.finish_rectangle(&mut surface, rect).is_none());
    assert!(!pm.update_rectangle_preview(&mut surface, gp(0.0, 0.0), gp(2.0, 2.0)));
    assert_eq!(pm.mode(), EditorMode::Editing);
    assert_eq!(pm.anchor_count(), 3);
}
