//! Ergebnis einer abgeschlossenen Zeichnung und ihre Persistenz-Form.

use crate::core::{AnchorSnapshot, FenceGeometry, PolygonRing, RingError};
use serde::{Deserialize, Serialize};

/// Geschlossener Ring plus Anker-Metadaten einer fertigen Zeichnung.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawResult {
    pub ring: PolygonRing,
    /// Anker in Pfad-Reihenfolge (für späteres verlustfreies Bearbeiten)
    pub anchors: Vec<AnchorSnapshot>,
}

impl DrawResult {
    /// Payload für die Zaun-API (GeoJSON-Polygon + Anker).
    pub fn to_payload(&self) -> FencePayload {
        FencePayload {
            geometry: self.ring.to_geometry(),
            anchors: self.anchors.clone(),
        }
    }
}

/// Serialisierte Form einer Zeichnung, wie sie an die Persistenz geht.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FencePayload {
    pub geometry: FenceGeometry,
    #[serde(default)]
    pub anchors: Vec<AnchorSnapshot>,
}

impl FencePayload {
    /// Liest einen Payload aus JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialisiert den Payload als JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Außenring der gespeicherten Geometrie.
    pub fn ring(&self) -> Result<PolygonRing, RingError> {
        PolygonRing::from_geometry(&self.geometry)
    }

    /// Anker-Metadaten oder `None`, wenn keine gespeichert wurden.
    pub fn anchor_metadata(&self) -> Option<&[AnchorSnapshot]> {
        (!self.anchors.is_empty()).then_some(self.anchors.as_slice())
    }
}
