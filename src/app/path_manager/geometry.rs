//! Pfad-Abtastung und Ring-Erzeugung.

use super::state::PathManager;
use crate::core::{sample_cubic_bezier, GeoPoint, PolygonRing};

impl PathManager {
    /// Tastet den offenen Pfad über alle Anker ab.
    ///
    /// Abschnitte ohne Griffe (ausgehender Griff des ersten, eingehender des
    /// zweiten Ankers) bleiben gerade. Ein fehlender Griff wird durch die
    /// Anker-Position ersetzt. Die Schlusskante zurück zum ersten Anker ist
    /// nicht enthalten. Leer bei weniger als 2 Ankern.
    pub fn generate_bezier_path(&self) -> Vec<GeoPoint> {
        if self.anchors.len() < 2 {
            return Vec::new();
        }
        let mut path = Vec::with_capacity(self.anchors.len() * 2);
        path.push(self.anchors[0].position());

        for pair in self.anchors.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.handle2().is_none() && b.handle1().is_none() {
                path.push(b.position());
                continue;
            }
            let samples = sample_cubic_bezier(
                a.position(),
                a.handle2().unwrap_or(a.position()),
                b.handle1().unwrap_or(b.position()),
                b.position(),
                self.segments,
            );
            // Erstes Sample == a, steht bereits im Pfad
            path.extend(samples.into_iter().skip(1));
        }
        path
    }

    /// Geschlossener Ring aus dem abgetasteten Pfad.
    ///
    /// `None` bei weniger als 3 Ankern oder 3 Pfadpunkten.
    pub fn generate_geometry(&self) -> Option<PolygonRing> {
        if self.anchors.len() < 3 {
            return None;
        }
        let path = self.generate_bezier_path();
        if path.len() < 3 {
            return None;
        }
        PolygonRing::close(path)
    }

    /// Punkte der Pfad-Vorschau: ab 3 Ankern geschlossen dargestellt.
    pub(crate) fn preview_points(&self) -> Vec<GeoPoint> {
        let mut path = self.generate_bezier_path();
        if self.anchors.len() >= 3 {
            if let Some(&first) = path.first() {
                path.push(first);
            }
        }
        path
    }
}
