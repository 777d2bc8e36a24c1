//! Payload-Format (GeoJSON + Anker) und Wiedereinstieg ins Bearbeiten.

use fence_path_editor::{
    attach_editor, AnchorKind, EditorOptions, FenceGeometry, FencePayload, GeoPoint,
    MemorySurface, PolygonRing, RingError,
};

fn gp(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).expect("Testpunkt gültig")
}

const STORED_FENCE: &str = r#"{
    "geometry": {
        "type": "Polygon",
        "coordinates": [[[7.0, 45.0], [7.01, 45.0], [7.01, 45.01], [7.0, 45.01], [7.0, 45.0]]]
    },
    "anchors": [
        {"position": {"lat": 45.0, "lng": 7.0}, "kind": "corner"},
        {"position": {"lat": 45.0, "lng": 7.01}, "kind": "corner"},
        {
            "position": {"lat": 45.01, "lng": 7.01},
            "kind": "smooth",
            "handle1": {"lat": 45.009, "lng": 7.01},
            "handle2": {"lat": 45.01, "lng": 7.009}
        },
        {"position": {"lat": 45.01, "lng": 7.0}, "kind": "corner"}
    ]
}"#;

#[test]
fn test_gespeicherter_zaun_wird_gelesen() {
    let payload = FencePayload::from_json(STORED_FENCE).expect("Payload lesbar");
    let ring = payload.ring().expect("Ring gültig");
    assert_eq!(ring.len(), 5);
    assert_eq!(ring.points()[1], gp(45.0, 7.01));

    let anchors = payload.anchor_metadata().expect("Anker gespeichert");
    assert_eq!(anchors.len(), 4);
    assert_eq!(anchors[2].kind, AnchorKind::Smooth);
    assert_eq!(anchors[2].handle1, Some(gp(45.009, 7.01)));
}

#[test]
fn test_gespeicherter_zaun_laesst_sich_bearbeiten() {
    let payload = FencePayload::from_json(STORED_FENCE).expect("Payload lesbar");
    let ring = payload.ring().expect("Ring gültig");

    let mut editor = attach_editor(MemorySurface::default(), EditorOptions::default());
    assert!(editor.enter_edit_mode(&ring, payload.anchor_metadata()));
    let kinds: Vec<AnchorKind> = editor.get_anchors().iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AnchorKind::Corner,
            AnchorKind::Corner,
            AnchorKind::Smooth,
            AnchorKind::Corner
        ]
    );

    let result = editor.finish_drawing().expect("Ring nach Bearbeiten");
    // Kurvenabschnitte erzeugen zusätzliche Positionen
    assert!(result.ring.len() > 5);
    assert_eq!(result.ring.points().first(), result.ring.points().last());
}

#[test]
fn test_payload_ohne_anker_nutzt_ringpunkte() {
    let json = r#"{"geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}}"#;
    let payload = FencePayload::from_json(json).expect("Payload lesbar");
    assert!(payload.anchor_metadata().is_none());

    let mut editor = attach_editor(MemorySurface::default(), EditorOptions::default());
    let ring = payload.ring().expect("Ring gültig");
    assert!(editor.enter_edit_mode(&ring, payload.anchor_metadata()));
    assert_eq!(editor.get_anchors().len(), 3);
    assert!(editor
        .get_anchors()
        .iter()
        .all(|a| a.kind == AnchorKind::Corner));
}

#[test]
fn test_ungueltige_koordinaten_werden_abgelehnt() {
    let json = r#"{"geometry":{"type":"Polygon","coordinates":[[[0,0],[1,95],[1,1],[0,0]]]}}"#;
    let payload = FencePayload::from_json(json).expect("Syntax gültig");
    assert!(matches!(
        payload.ring(),
        Err(RingError::InvalidPosition { index: 1, .. })
    ));
}

#[test]
fn test_fremder_geometrietyp_wird_abgelehnt() {
    let json = r#"{"type":"LineString","coordinates":[[0,0],[1,1]]}"#;
    assert!(matches!(
        FenceGeometry::from_json(json),
        Err(RingError::UnsupportedGeometry)
    ));
}

#[test]
fn test_payload_json_form() {
    let ring = PolygonRing::close(vec![gp(0.0, 0.0), gp(0.0, 1.0), gp(1.0, 1.0)]).expect("Ring");
    let mut editor = attach_editor(MemorySurface::default(), EditorOptions::default());
    assert!(editor.enter_edit_mode(&ring, None));
    let result = editor.finish_drawing().expect("Ergebnis");

    let value: serde_json::Value =
        serde_json::from_str(&result.to_payload().to_json().expect("serialisierbar"))
            .expect("gültiges JSON");
    assert_eq!(value["geometry"]["type"], "Polygon");
    assert_eq!(value["geometry"]["coordinates"][0][1][0], 1.0);
    assert_eq!(value["geometry"]["coordinates"][0][1][1], 0.0);
    assert_eq!(value["anchors"][0]["kind"], "corner");
    assert!(value["anchors"][0].get("handle1").is_none());
}
