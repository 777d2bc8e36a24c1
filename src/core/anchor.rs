//! Anker-Punkte des Zaun-Pfads mit optionalen Bézier-Griffen.

use super::geo_point::{GeoPoint, GeoPointError};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Art eines Ankers; folgt immer aus dem Vorhandensein der Griffe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    /// Eckpunkt ohne Griffe (gerade Kanten)
    Corner,
    /// Kurvenpunkt mit mindestens einem Griff
    Smooth,
}

/// Welcher der beiden Griffe eines Ankers?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    /// Eingehender Griff (Kurve vom vorherigen Anker)
    Leading,
    /// Ausgehender Griff (Kurve zum nächsten Anker)
    Trailing,
}

/// Ein Eckpunkt des Pfads.
///
/// Reine Daten: Marker und Linien auf der Karte verwaltet der `PathManager`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    position: GeoPoint,
    handle1: Option<GeoPoint>,
    handle2: Option<GeoPoint>,
}

impl Anchor {
    /// Erstellt einen Eckpunkt ohne Griffe.
    pub fn new(position: GeoPoint) -> Self {
        Self {
            position,
            handle1: None,
            handle2: None,
        }
    }

    /// Erstellt einen Eckpunkt aus Roh-Koordinaten (ungültige werden abgelehnt).
    pub fn from_lat_lng(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        GeoPoint::new(lat, lng).map(Self::new)
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Eingehender Griff
    pub fn handle1(&self) -> Option<GeoPoint> {
        self.handle1
    }

    /// Ausgehender Griff
    pub fn handle2(&self) -> Option<GeoPoint> {
        self.handle2
    }

    pub fn handle(&self, side: HandleSide) -> Option<GeoPoint> {
        match side {
            HandleSide::Leading => self.handle1,
            HandleSide::Trailing => self.handle2,
        }
    }

    pub fn kind(&self) -> AnchorKind {
        if self.has_handles() {
            AnchorKind::Smooth
        } else {
            AnchorKind::Corner
        }
    }

    pub fn has_handles(&self) -> bool {
        self.handle1.is_some() || self.handle2.is_some()
    }

    pub fn set_position(&mut self, position: GeoPoint) {
        self.position = position;
    }

    /// Setzt beide Griffe. Die Art ergibt sich aus dem Ergebnis.
    pub fn set_handles(&mut self, handle1: Option<GeoPoint>, handle2: Option<GeoPoint>) {
        self.handle1 = handle1;
        self.handle2 = handle2;
    }

    /// Setzt beide Griffe aus Roh-Kandidaten (x = Länge, y = Breite).
    ///
    /// Ungültige Kandidaten werden verworfen (→ `None`) statt gespeichert.
    pub fn set_handle_candidates(&mut self, handle1: Option<DVec2>, handle2: Option<DVec2>) {
        self.handle1 = handle1.and_then(|v| accept_handle(v, "handle1"));
        self.handle2 = handle2.and_then(|v| accept_handle(v, "handle2"));
    }

    /// Setzt einen einzelnen Griff.
    pub fn set_handle(&mut self, side: HandleSide, point: GeoPoint) {
        match side {
            HandleSide::Leading => self.handle1 = Some(point),
            HandleSide::Trailing => self.handle2 = Some(point),
        }
    }

    pub fn clear_handles(&mut self) {
        self.handle1 = None;
        self.handle2 = None;
    }

    /// Setzt den Anker auf `position` und verschiebt die Griffe um denselben Versatz.
    ///
    /// Griffe, die dabei den gültigen Bereich verlassen würden, bleiben stehen.
    pub fn translate_to(&mut self, position: GeoPoint) {
        let delta = position.to_dvec2() - self.position.to_dvec2();
        self.position = position;
        for handle in [&mut self.handle1, &mut self.handle2] {
            if let Some(h) = handle {
                if let Ok(moved) = GeoPoint::from_dvec2(h.to_dvec2() + delta) {
                    *h = moved;
                }
            }
        }
    }

    /// Serialisierbarer Schnappschuss (Anker-Metadaten für Persistenz).
    pub fn snapshot(&self) -> AnchorSnapshot {
        AnchorSnapshot {
            position: self.position,
            kind: self.kind(),
            handle1: self.handle1,
            handle2: self.handle2,
        }
    }

    /// Rekonstruiert einen Anker aus gespeicherten Metadaten.
    ///
    /// Die gespeicherte Art wird ignoriert und aus den Griffen neu berechnet.
    pub fn from_snapshot(snapshot: &AnchorSnapshot) -> Self {
        let anchor = Self {
            position: snapshot.position,
            handle1: snapshot.handle1,
            handle2: snapshot.handle2,
        };
        if anchor.kind() != snapshot.kind {
            log::warn!(
                "Anker-Metadaten inkonsistent: gespeichert {:?}, Griffe ergeben {:?}",
                snapshot.kind,
                anchor.kind()
            );
        }
        anchor
    }
}

fn accept_handle(candidate: DVec2, label: &str) -> Option<GeoPoint> {
    match GeoPoint::from_dvec2(candidate) {
        Ok(p) => Some(p),
        Err(e) => {
            log::warn!("Griff {} verworfen: {}", label, e);
            None
        }
    }
}

/// Anker-Metadaten, wie sie an die Persistenz übergeben werden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorSnapshot {
    pub position: GeoPoint,
    pub kind: AnchorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle1: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle2: Option<GeoPoint>,
}
