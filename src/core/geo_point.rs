//! Geo-Koordinaten mit Validierung beim Erzeugen.
//!
//! Ein `GeoPoint` kann nur über `GeoPoint::new` (oder die daraus abgeleiteten
//! Konstruktoren) entstehen. Nach der Konstruktion ist er garantiert endlich
//! und im gültigen Wertebereich; nachgelagerter Code prüft nicht erneut.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gültiger Breitengrad-Bereich in Grad.
pub const LATITUDE_LIMIT: f64 = 90.0;
/// Gültiger Längengrad-Bereich in Grad.
pub const LONGITUDE_LIMIT: f64 = 180.0;

/// Grund, warum ein Koordinaten-Kandidat abgelehnt wurde.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// NaN oder ±Infinity in Breite oder Länge
    #[error("Koordinate nicht endlich (lat={lat}, lng={lng})")]
    NonFinite { lat: f64, lng: f64 },
    /// Breitengrad außerhalb [-90, 90]
    #[error("Breitengrad {0} außerhalb [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Längengrad außerhalb [-180, 180]
    #[error("Längengrad {0} außerhalb [-180, 180]")]
    LongitudeOutOfRange(f64),
    /// Position hat nicht genau zwei Komponenten
    #[error("Position benötigt genau 2 Komponenten, gefunden: {0}")]
    MissingCoordinate(usize),
}

/// Prüft einen Koordinaten-Kandidaten ohne ihn zu konstruieren.
///
/// `true` genau dann, wenn beide Werte endlich sind und im Wertebereich liegen.
pub fn is_valid_geo_point(lat: f64, lng: f64) -> bool {
    validate(lat, lng).is_ok()
}

fn validate(lat: f64, lng: f64) -> Result<(), GeoPointError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(GeoPointError::NonFinite { lat, lng });
    }
    if lat.abs() > LATITUDE_LIMIT {
        return Err(GeoPointError::LatitudeOutOfRange(lat));
    }
    if lng.abs() > LONGITUDE_LIMIT {
        return Err(GeoPointError::LongitudeOutOfRange(lng));
    }
    Ok(())
}

/// Validierte geographische Position (WGS84, Grad).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Erzeugt einen Punkt, lehnt ungültige Kandidaten ab.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        validate(lat, lng)?;
        Ok(Self { lat, lng })
    }

    /// Erzeugt einen Punkt aus einem Vektor (x = Länge, y = Breite).
    pub fn from_dvec2(v: DVec2) -> Result<Self, GeoPointError> {
        Self::new(v.y, v.x)
    }

    /// Erzeugt einen Punkt aus einer GeoJSON-Position `[lng, lat]`.
    pub fn from_lng_lat(position: &[f64]) -> Result<Self, GeoPointError> {
        match position {
            [lng, lat] => Self::new(*lat, *lng),
            other => Err(GeoPointError::MissingCoordinate(other.len())),
        }
    }

    /// Breitengrad in Grad
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Längengrad in Grad
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Vektor-Darstellung für Geometrie-Berechnungen (x = Länge, y = Breite).
    pub fn to_dvec2(self) -> DVec2 {
        DVec2::new(self.lng, self.lat)
    }

    /// GeoJSON-Position `[lng, lat]`.
    pub fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Euklidischer Abstand in Grad (planare Näherung).
    pub fn distance_deg(self, other: GeoPoint) -> f64 {
        self.to_dvec2().distance(other.to_dvec2())
    }

    /// True wenn beide Komponenten höchstens `tolerance` Grad abweichen.
    pub fn approx_eq(self, other: GeoPoint, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance && (self.lng - other.lng).abs() <= tolerance
    }
}

/// Unvalidierte Serde-Form `{ "lat": .., "lng": .. }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lng)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(p: GeoPoint) -> Self {
        Self {
            lat: p.lat,
            lng: p.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gueltige_koordinaten_werden_akzeptiert() {
        for (lat, lng) in [
            (0.0, 0.0),
            (90.0, 180.0),
            (-90.0, -180.0),
            (52.52, 13.405),
            (-33.86, 151.21),
        ] {
            assert!(is_valid_geo_point(lat, lng), "({lat}, {lng}) muss gültig sein");
            assert!(GeoPoint::new(lat, lng).is_ok());
        }
    }

    #[test]
    fn test_nan_und_infinity_werden_abgelehnt() {
        assert!(!is_valid_geo_point(f64::NAN, 0.0));
        assert!(!is_valid_geo_point(0.0, f64::NAN));
        assert!(!is_valid_geo_point(f64::INFINITY, 0.0));
        assert!(!is_valid_geo_point(0.0, f64::NEG_INFINITY));
        assert!(matches!(
            GeoPoint::new(f64::NAN, 1.0),
            Err(GeoPointError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_bereichsueberschreitung_wird_abgelehnt() {
        assert_eq!(
            GeoPoint::new(95.0, 0.0),
            Err(GeoPointError::LatitudeOutOfRange(95.0))
        );
        assert_eq!(
            GeoPoint::new(0.0, -180.5),
            Err(GeoPointError::LongitudeOutOfRange(-180.5))
        );
        assert!(!is_valid_geo_point(-90.0001, 0.0));
    }

    #[test]
    fn test_geojson_position_reihenfolge_lng_lat() {
        let p = GeoPoint::from_lng_lat(&[13.4, 52.5]).expect("gültige Position");
        assert_eq!(p.lat(), 52.5);
        assert_eq!(p.lng(), 13.4);
        assert_eq!(p.to_lng_lat(), [13.4, 52.5]);
    }

    #[test]
    fn test_geojson_position_mit_falscher_laenge() {
        assert_eq!(
            GeoPoint::from_lng_lat(&[1.0]),
            Err(GeoPointError::MissingCoordinate(1))
        );
        assert_eq!(
            GeoPoint::from_lng_lat(&[1.0, 2.0, 3.0]),
            Err(GeoPointError::MissingCoordinate(3))
        );
    }

    #[test]
    fn test_deserialisierung_validiert() {
        let ok: GeoPoint = serde_json::from_str(r#"{"lat": 10.0, "lng": 20.0}"#).expect("gültig");
        assert_eq!(ok.lat(), 10.0);

        let bad = serde_json::from_str::<GeoPoint>(r#"{"lat": 100.0, "lng": 20.0}"#);
        assert!(bad.is_err(), "Breite 100 darf nicht deserialisiert werden");
    }

    #[test]
    fn test_dvec2_achsenbelegung() {
        let p = GeoPoint::new(1.0, 2.0).expect("gültig");
        let v = p.to_dvec2();
        assert_eq!(v, DVec2::new(2.0, 1.0));
        assert_eq!(GeoPoint::from_dvec2(v), Ok(p));
    }
}
