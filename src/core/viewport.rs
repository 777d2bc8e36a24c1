//! Karten-Viewport: Pan, Zoom und Pixel ↔ Geo-Umrechnung.
//!
//! Einfache plattkarten-Projektion (Länge/Breite linear auf Pixel).

use glam::DVec2;

/// Karten-Viewport mit Mittelpunkt, Zoom und Pixelgröße
#[derive(Debug, Clone)]
pub struct MapViewport {
    /// Kartenmitte in Grad (x = Länge, y = Breite)
    pub center: DVec2,
    /// Pixel pro Grad
    pub zoom: f64,
    /// Viewport-Größe in Pixeln
    pub size: DVec2,
}

impl MapViewport {
    /// Minimaler Zoom (ganze Erde passt in ~720 px).
    pub const ZOOM_MIN: f64 = 2.0;
    /// Maximaler Zoom (~1 cm pro Pixel am Äquator).
    pub const ZOOM_MAX: f64 = 1.0e7;
    /// Standard-Zoom beim Start.
    pub const ZOOM_DEFAULT: f64 = 4000.0;

    /// Erstellt einen Viewport um `center` (Länge, Breite).
    pub fn new(center: DVec2, size: DVec2) -> Self {
        Self {
            center,
            zoom: Self::ZOOM_DEFAULT,
            size,
        }
    }

    /// Setzt die Viewport-Größe (Fenster-Resize).
    pub fn set_size(&mut self, size: DVec2) {
        self.size = size.max(DVec2::ONE);
    }

    /// Zentriert den Viewport auf einen Punkt
    pub fn look_at(&mut self, target: DVec2) {
        self.center = target;
    }

    /// Verschiebt die Karte um ein Pixel-Delta (Inhalt folgt dem Zeiger).
    pub fn pan_pixels(&mut self, delta_px: DVec2) {
        self.center -= DVec2::new(delta_px.x, -delta_px.y) / self.zoom;
    }

    /// Zoomt um `factor`, der Geo-Punkt unter `focus_px` bleibt stehen.
    pub fn zoom_towards(&mut self, factor: f64, focus_px: DVec2) {
        let before = self.screen_to_geo(focus_px);
        self.zoom = (self.zoom * factor).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
        let after = self.screen_to_geo(focus_px);
        self.center += before - after;
    }

    /// Pixel (Ursprung oben links) → Geo (x = Länge, y = Breite), unvalidiert.
    ///
    /// Außerhalb der Erde liegende Pixel ergeben Werte außerhalb ±90/±180.
    pub fn screen_to_geo(&self, screen: DVec2) -> DVec2 {
        let offset = screen - self.size * 0.5;
        DVec2::new(
            self.center.x + offset.x / self.zoom,
            self.center.y - offset.y / self.zoom,
        )
    }

    /// Geo (x = Länge, y = Breite) → Pixel (Ursprung oben links).
    pub fn geo_to_screen(&self, geo: DVec2) -> DVec2 {
        let d = geo - self.center;
        self.size * 0.5 + DVec2::new(d.x * self.zoom, -d.y * self.zoom)
    }

    /// Grad pro Pixel beim aktuellen Zoom.
    pub fn degrees_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::new(DVec2::ZERO, DVec2::new(1280.0, 720.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bildmitte_ist_kartenmitte() {
        let vp = MapViewport::new(DVec2::new(13.4, 52.5), DVec2::new(800.0, 600.0));
        let geo = vp.screen_to_geo(DVec2::new(400.0, 300.0));
        assert_relative_eq!(geo.x, 13.4);
        assert_relative_eq!(geo.y, 52.5);
    }

    #[test]
    fn test_pixel_y_nach_unten_ist_sueden() {
        let mut vp = MapViewport::new(DVec2::ZERO, DVec2::new(100.0, 100.0));
        vp.zoom = 10.0;
        let geo = vp.screen_to_geo(DVec2::new(50.0, 60.0));
        assert_relative_eq!(geo.y, -1.0);
        let geo = vp.screen_to_geo(DVec2::new(70.0, 50.0));
        assert_relative_eq!(geo.x, 2.0);
    }

    #[test]
    fn test_hin_und_rueck_transformation() {
        let mut vp = MapViewport::new(DVec2::new(7.0, 45.0), DVec2::new(1024.0, 768.0));
        vp.zoom = 12345.0;
        let px = DVec2::new(123.0, 456.0);
        let back = vp.geo_to_screen(vp.screen_to_geo(px));
        assert_relative_eq!(back.x, px.x, epsilon = 1e-6);
        assert_relative_eq!(back.y, px.y, epsilon = 1e-6);
    }

    #[test]
    fn test_pan_inhalt_folgt_zeiger() {
        let mut vp = MapViewport::new(DVec2::ZERO, DVec2::new(100.0, 100.0));
        vp.zoom = 10.0;
        let geo = vp.screen_to_geo(DVec2::new(50.0, 50.0));
        vp.pan_pixels(DVec2::new(10.0, 10.0));
        let moved = vp.geo_to_screen(geo);
        assert_relative_eq!(moved.x, 60.0, epsilon = 1e-9);
        assert_relative_eq!(moved.y, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_haelt_fokuspunkt() {
        let mut vp = MapViewport::new(DVec2::new(1.0, 1.0), DVec2::new(800.0, 600.0));
        let focus = DVec2::new(100.0, 500.0);
        let before = vp.screen_to_geo(focus);
        vp.zoom_towards(2.0, focus);
        let after = vp.screen_to_geo(focus);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
        assert_relative_eq!(vp.zoom, MapViewport::ZOOM_DEFAULT * 2.0);
    }

    #[test]
    fn test_zoom_wird_begrenzt() {
        let mut vp = MapViewport::default();
        vp.zoom_towards(1.0e-9, DVec2::ZERO);
        assert_relative_eq!(vp.zoom, MapViewport::ZOOM_MIN);
    }
}
