//! Kubische Bézier-Abtastung und Griff-Ableitung für Kurvenanker.
//!
//! Alle Berechnungen laufen in Grad-Koordinaten (x = Länge, y = Breite).
//! Ergebnisse verlassen das Modul nur als validierte `GeoPoint`s; entarteter
//! Input fällt auf eine gerade Kante zurück statt NaN weiterzugeben.

use super::geo_point::{GeoPoint, LATITUDE_LIMIT, LONGITUDE_LIMIT};
use glam::DVec2;

/// Standard-Anzahl Segmente pro Kurvenabschnitt.
pub const DEFAULT_BEZIER_SEGMENTS: usize = 20;
/// Obergrenze der Segmente pro Kurvenabschnitt.
pub const MAX_BEZIER_SEGMENTS: usize = 1024;
/// Griff-Länge relativ zum Nachbarabstand.
pub const HANDLE_DISTANCE_RATIO: f64 = 0.3;
/// Maximale Griff-Länge in Grad.
pub const HANDLE_BASE_DISTANCE: f64 = 0.001;
/// Abstände darunter gelten als „zusammenfallend“.
pub const HANDLE_EPSILON: f64 = 1e-10;

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// Tastet eine kubische Bézier-Kurve an `segments + 1` Stellen ab (t = i/segments).
///
/// `segments` wird auf `1..=MAX_BEZIER_SEGMENTS` begrenzt. Liefert die
/// Abtastung ein nicht-endliches Sample, wird stattdessen `[p0, p3]`
/// zurückgegeben.
pub fn sample_cubic_bezier(
    p0: GeoPoint,
    control1: GeoPoint,
    control2: GeoPoint,
    p3: GeoPoint,
    segments: usize,
) -> Vec<GeoPoint> {
    sample_points(
        p0.to_dvec2(),
        control1.to_dvec2(),
        control2.to_dvec2(),
        p3.to_dvec2(),
        segments,
    )
    .unwrap_or_else(|| vec![p0, p3])
}

/// Abtastung auf Rohvektoren. `None` beim ersten nicht-endlichen Sample.
fn sample_points(
    v0: DVec2,
    v1: DVec2,
    v2: DVec2,
    v3: DVec2,
    segments: usize,
) -> Option<Vec<GeoPoint>> {
    let segments = segments.clamp(1, MAX_BEZIER_SEGMENTS);
    let mut samples = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let Some(p) = clamp_to_range(cubic_bezier(v0, v1, v2, v3, t)) else {
            log::warn!("Bézier-Sample bei t={:.3} nicht endlich, gerade Kante", t);
            return None;
        };
        samples.push(p);
    }
    Some(samples)
}

/// Endliche Samples liegen in der konvexen Hülle gültiger Punkte; Rundung
/// kann sie nur um wenige ulp über ±90/±180 schieben.
fn clamp_to_range(v: DVec2) -> Option<GeoPoint> {
    if !v.is_finite() {
        return None;
    }
    GeoPoint::new(
        v.y.clamp(-LATITUDE_LIMIT, LATITUDE_LIMIT),
        v.x.clamp(-LONGITUDE_LIMIT, LONGITUDE_LIMIT),
    )
    .ok()
}

/// Parameter der Griff-Ableitung beim Umschalten Corner → Smooth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleParams {
    /// Anteil des Nachbarabstands
    pub distance_ratio: f64,
    /// Obergrenze der Griff-Länge in Grad (auch Länge der Fallback-Griffe)
    pub base_distance: f64,
    /// Unterhalb dieses Abstands wird nicht normiert
    pub epsilon: f64,
}

impl Default for HandleParams {
    fn default() -> Self {
        Self {
            distance_ratio: HANDLE_DISTANCE_RATIO,
            base_distance: HANDLE_BASE_DISTANCE,
            epsilon: HANDLE_EPSILON,
        }
    }
}

/// Richtung + Länge eines Griffs relativ zum Anker.
///
/// `None` wenn der Nachbar fehlt. Zusammenfallende Nachbarn liefern die
/// feste Ersatzrichtung `fallback_dir` mit Basislänge.
fn handle_offset(
    anchor: DVec2,
    neighbor: Option<GeoPoint>,
    fallback_dir: DVec2,
    params: &HandleParams,
) -> Option<DVec2> {
    let delta = neighbor?.to_dvec2() - anchor;
    let dist = delta.length();
    if !dist.is_finite() || dist < params.epsilon {
        return Some(fallback_dir * params.base_distance);
    }
    let len = (dist * params.distance_ratio).min(params.base_distance);
    Some(delta / dist * len)
}

/// Leitet die Griffe für einen Anker ab, der zu Smooth umgeschaltet wird.
///
/// Gibt `(handle1, handle2)` zurück: handle1 zeigt zum vorherigen, handle2
/// zum nächsten Anker. Fehlt ein Nachbar, wird die Gegenseite gespiegelt;
/// fehlen beide, entstehen Griffe mit fester Länge entlang der Längengrad-Achse.
pub fn derive_smooth_handles(
    prev: Option<GeoPoint>,
    anchor: GeoPoint,
    next: Option<GeoPoint>,
    params: &HandleParams,
) -> (Option<GeoPoint>, Option<GeoPoint>) {
    let a = anchor.to_dvec2();
    let to_prev = handle_offset(a, prev, DVec2::NEG_X, params);
    let to_next = handle_offset(a, next, DVec2::X, params);

    let (off1, off2) = match (to_prev, to_next) {
        (Some(p), Some(n)) => (p, n),
        (Some(p), None) => (p, -p),
        (None, Some(n)) => (-n, n),
        (None, None) => (
            DVec2::NEG_X * params.base_distance,
            DVec2::X * params.base_distance,
        ),
    };

    (
        GeoPoint::from_dvec2(a + off1).ok(),
        GeoPoint::from_dvec2(a + off2).ok(),
    )
}
