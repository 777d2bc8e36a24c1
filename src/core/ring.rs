//! Geschlossene Polygon-Ringe und ihr GeoJSON-/WKT-Format für die Persistenz.

use super::geo_point::{GeoPoint, GeoPointError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mindestanzahl Positionen eines geschlossenen Rings (3 Ecken + Schlusspunkt).
pub const MIN_RING_POSITIONS: usize = 4;

/// Fehler beim Aufbau oder Einlesen eines Rings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RingError {
    #[error("Ring benötigt mindestens 4 Positionen, gefunden: {0}")]
    TooFewPoints(usize),
    #[error("Ring ist nicht geschlossen (erster != letzter Punkt)")]
    NotClosed,
    #[error("Ring hat weniger als 3 unterschiedliche Eckpunkte")]
    Degenerate,
    #[error("Nicht unterstützter Geometrie-Typ")]
    UnsupportedGeometry,
    #[error("Ungültige Position an Index {index}: {source}")]
    InvalidPosition {
        index: usize,
        #[source]
        source: GeoPointError,
    },
}

/// Geschlossener Außenring eines Zauns (erster Punkt == letzter Punkt).
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRing {
    points: Vec<GeoPoint>,
}

impl PolygonRing {
    /// Schließt eine offene Punktfolge zum Ring.
    ///
    /// Der erste Punkt wird angehängt, falls er nicht schon am Ende steht.
    /// `None` bei weniger als 3 Punkten.
    pub fn close(mut points: Vec<GeoPoint>) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let first = points[0];
        if points.last() != Some(&first) {
            points.push(first);
        }
        if points.len() < MIN_RING_POSITIONS {
            return None;
        }
        Some(Self { points })
    }

    /// Übernimmt einen bereits geschlossenen Ring (prüft die Invarianten).
    pub fn from_closed(points: Vec<GeoPoint>) -> Result<Self, RingError> {
        let ring = Self { points };
        ring.validate()?;
        Ok(ring)
    }

    /// Rechteck-Ring aus zwei gegenüberliegenden Ecken (5 Positionen).
    pub fn rectangle(a: GeoPoint, b: GeoPoint) -> Option<Self> {
        let sw = GeoPoint::new(a.lat().min(b.lat()), a.lng().min(b.lng())).ok()?;
        let nw = GeoPoint::new(a.lat().max(b.lat()), a.lng().min(b.lng())).ok()?;
        let ne = GeoPoint::new(a.lat().max(b.lat()), a.lng().max(b.lng())).ok()?;
        let se = GeoPoint::new(a.lat().min(b.lat()), a.lng().max(b.lng())).ok()?;
        Self::close(vec![sw, nw, ne, se])
    }

    /// Alle Positionen inkl. Schlusspunkt.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Eckpunkte ohne den wiederholten Schlusspunkt.
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.points[..self.points.len().saturating_sub(1)]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Prüft die Ring-Invarianten vor der Übergabe an die Persistenz.
    pub fn validate(&self) -> Result<(), RingError> {
        if self.points.len() < MIN_RING_POSITIONS {
            return Err(RingError::TooFewPoints(self.points.len()));
        }
        if self.points.first() != self.points.last() {
            return Err(RingError::NotClosed);
        }
        let mut distinct: Vec<GeoPoint> = Vec::with_capacity(3);
        for p in self.vertices() {
            if !distinct.contains(p) {
                distinct.push(*p);
                if distinct.len() >= 3 {
                    return Ok(());
                }
            }
        }
        Err(RingError::Degenerate)
    }

    /// Eckpunkte mit entfernten Beinahe-Duplikaten.
    ///
    /// Aufeinanderfolgende Punkte innerhalb von `tolerance` Grad werden
    /// zusammengelegt, ebenso ein letzter Punkt, der dem ersten entspricht.
    pub fn dedup_vertices(&self, tolerance: f64) -> Vec<GeoPoint> {
        let mut result: Vec<GeoPoint> = Vec::with_capacity(self.points.len());
        for &p in self.vertices() {
            match result.last() {
                Some(&last) if last.approx_eq(p, tolerance) => {}
                _ => result.push(p),
            }
        }
        while result.len() > 1 {
            let (first, last) = (result[0], result[result.len() - 1]);
            if first.approx_eq(last, tolerance) {
                result.pop();
            } else {
                break;
            }
        }
        result
    }

    /// GeoJSON-Geometrie (Polygon, Koordinaten als `[lng, lat]`).
    pub fn to_geometry(&self) -> FenceGeometry {
        FenceGeometry::Polygon {
            coordinates: vec![self.points.iter().map(|p| p.to_lng_lat().to_vec()).collect()],
        }
    }

    /// Liest den Außenring einer gespeicherten GeoJSON-Geometrie.
    ///
    /// Innere Ringe (Löcher) werden ignoriert.
    pub fn from_geometry(geometry: &FenceGeometry) -> Result<Self, RingError> {
        let FenceGeometry::Polygon { coordinates } = geometry;
        let Some(exterior) = coordinates.first() else {
            return Err(RingError::TooFewPoints(0));
        };
        if coordinates.len() > 1 {
            log::warn!(
                "Polygon mit {} Löchern: nur der Außenring wird bearbeitet",
                coordinates.len() - 1
            );
        }
        let points = exterior
            .iter()
            .enumerate()
            .map(|(index, pos)| {
                GeoPoint::from_lng_lat(pos).map_err(|source| RingError::InvalidPosition {
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_closed(points)
    }

    /// WKT-Darstellung `POLYGON((lng lat,...))`.
    pub fn to_wkt(&self) -> String {
        let coords: Vec<String> = self
            .points
            .iter()
            .map(|p| format!("{} {}", p.lng(), p.lat()))
            .collect();
        format!("POLYGON(({}))", coords.join(","))
    }
}

/// GeoJSON-Geometrie, wie sie die Zaun-API erwartet.
///
/// Aktuell nur `Polygon`; `coordinates[0]` ist der Außenring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FenceGeometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
}

impl FenceGeometry {
    /// Parst GeoJSON-Text. Andere Typen als `Polygon` ergeben `UnsupportedGeometry`.
    pub fn from_json(text: &str) -> Result<Self, RingError> {
        serde_json::from_str(text).map_err(|e| {
            log::warn!("GeoJSON-Geometrie nicht lesbar: {}", e);
            RingError::UnsupportedGeometry
        })
    }
}
