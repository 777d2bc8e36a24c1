//! Schnittstelle zur Karten-Darstellung und eine speicherbasierte Umsetzung.
//!
//! Der Editor kennt die Karte nur über `RenderSurface`: Marker und Linien
//! anlegen/ändern/entfernen, Pixel ↔ Geo umrechnen, Karten-Pan schalten.
//! `MemorySurface` hält die Layer geordnet im Speicher; die egui-Oberfläche
//! zeichnet direkt daraus, Tests prüfen daran den Layer-Bestand.

use crate::core::{AnchorKind, GeoPoint, MapViewport};
use glam::DVec2;
use indexmap::IndexMap;

/// Handle auf einen Layer der Karten-Darstellung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

/// Rolle eines Layers (bestimmt die Darstellung)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Anker-Marker (Eck- oder Kurvenpunkt)
    AnchorMarker(AnchorKind),
    /// Griff-Marker
    HandleMarker,
    /// Linie Anker → Griff
    HandleConnector,
    /// Vorschau des gesamten Pfads
    PathPreview,
    /// Vorschau beim Rechteck-Zeichnen
    RectanglePreview,
}

impl LayerKind {
    /// True für Punkt-Layer (Marker), false für Linien.
    pub fn is_marker(self) -> bool {
        matches!(self, LayerKind::AnchorMarker(_) | LayerKind::HandleMarker)
    }
}

/// Verbraucher-Schnittstelle der Karten-Darstellung.
pub trait RenderSurface {
    /// Legt einen Punkt-Marker an.
    fn add_marker(&mut self, kind: LayerKind, at: GeoPoint) -> LayerId;

    /// Legt eine Polylinie an.
    fn add_polyline(&mut self, kind: LayerKind, points: &[GeoPoint]) -> LayerId;

    /// Verschiebt einen bestehenden Marker.
    fn move_marker(&mut self, id: LayerId, at: GeoPoint);

    /// Ersetzt die Punkte einer Polylinie.
    fn set_polyline(&mut self, id: LayerId, points: &[GeoPoint]);

    /// Ändert die Rolle/Darstellung eines Layers.
    fn set_kind(&mut self, id: LayerId, kind: LayerKind);

    /// Entfernt einen Layer. Unbekannte IDs werden ignoriert.
    fn remove_layer(&mut self, id: LayerId);

    /// Viewport-Pixel → Geo (x = Länge, y = Breite), unvalidiert.
    fn screen_to_geo(&self, screen: DVec2) -> DVec2;

    /// Geo → Viewport-Pixel.
    fn geo_to_screen(&self, geo: GeoPoint) -> DVec2;

    /// Ist Karten-Pan per Maus aktiv?
    fn panning_enabled(&self) -> bool;

    /// Schaltet Karten-Pan per Maus ein/aus.
    fn set_panning_enabled(&mut self, enabled: bool);
}

/// Ein gespeicherter Layer
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    /// Ein Punkt bei Markern, beliebig viele bei Linien
    pub points: Vec<GeoPoint>,
}

/// Speicherbasierte Karten-Darstellung (Layer in Einfügereihenfolge).
#[derive(Debug, Clone)]
pub struct MemorySurface {
    viewport: MapViewport,
    layers: IndexMap<LayerId, Layer>,
    next_id: u64,
    panning: bool,
}

impl MemorySurface {
    /// Erstellt eine leere Darstellung mit dem gegebenen Viewport.
    pub fn new(viewport: MapViewport) -> Self {
        Self {
            viewport,
            layers: IndexMap::new(),
            next_id: 1,
            panning: true,
        }
    }

    pub fn viewport(&self) -> &MapViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut MapViewport {
        &mut self.viewport
    }

    /// Alle Layer in Zeichenreihenfolge.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &Layer)> {
        self.layers.iter().map(|(id, layer)| (*id, layer))
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Anzahl der Layer, deren Rolle `pred` erfüllt.
    pub fn count_where(&self, pred: impl Fn(LayerKind) -> bool) -> usize {
        self.layers.values().filter(|l| pred(l.kind)).count()
    }

    /// Anzahl der Punkt-Marker (Anker + Griffe).
    pub fn marker_count(&self) -> usize {
        self.count_where(LayerKind::is_marker)
    }

    fn insert(&mut self, kind: LayerKind, points: Vec<GeoPoint>) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, Layer { kind, points });
        id
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new(MapViewport::default())
    }
}

impl RenderSurface for MemorySurface {
    fn add_marker(&mut self, kind: LayerKind, at: GeoPoint) -> LayerId {
        self.insert(kind, vec![at])
    }

    fn add_polyline(&mut self, kind: LayerKind, points: &[GeoPoint]) -> LayerId {
        self.insert(kind, points.to_vec())
    }

    fn move_marker(&mut self, id: LayerId, at: GeoPoint) {
        match self.layers.get_mut(&id) {
            Some(layer) => layer.points = vec![at],
            None => log::debug!("move_marker: Layer {:?} existiert nicht", id),
        }
    }

    fn set_polyline(&mut self, id: LayerId, points: &[GeoPoint]) {
        match self.layers.get_mut(&id) {
            Some(layer) => {
                layer.points.clear();
                layer.points.extend_from_slice(points);
            }
            None => log::debug!("set_polyline: Layer {:?} existiert nicht", id),
        }
    }

    fn set_kind(&mut self, id: LayerId, kind: LayerKind) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.kind = kind;
        }
    }

    fn remove_layer(&mut self, id: LayerId) {
        if self.layers.shift_remove(&id).is_none() {
            log::debug!("remove_layer: Layer {:?} existiert nicht", id);
        }
    }

    fn screen_to_geo(&self, screen: DVec2) -> DVec2 {
        self.viewport.screen_to_geo(screen)
    }

    fn geo_to_screen(&self, geo: GeoPoint) -> DVec2 {
        self.viewport.geo_to_screen(geo.to_dvec2())
    }

    fn panning_enabled(&self) -> bool {
        self.panning
    }

    fn set_panning_enabled(&mut self, enabled: bool) {
        self.panning = enabled;
    }
}
