//! Core-Domänentypen: Geo-Punkte, Anker, Bézier-Abtastung, Ringe, Viewport.

pub mod anchor;
/// Kubische Bézier-Kurven und Griff-Ableitung
pub mod bezier;
pub mod geo_point;
pub mod ring;
pub mod viewport;

pub use anchor::{Anchor, AnchorKind, AnchorSnapshot, HandleSide};
pub use bezier::{cubic_bezier, derive_smooth_handles, sample_cubic_bezier, HandleParams};
pub use geo_point::{is_valid_geo_point, GeoPoint, GeoPointError};
pub use ring::{FenceGeometry, PolygonRing, RingError};
pub use viewport::MapViewport;
