use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

use crate::core::types::PlotArea;

/// Columns used by the fallback layout for points without coordinates.
pub const GRID_COLUMNS: usize = 3;
pub const JITTER_X_PX: f64 = 40.0;
pub const JITTER_Y_PX: f64 = 30.0;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a coordinate only when both halves are present and finite.
    #[must_use]
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(Self::new(lat, lon))
            }
            _ => None,
        }
    }
}

/// Equirectangular projection into `area`; north is up.
#[must_use]
pub fn project_equirectangular(coordinate: GeoCoordinate, area: PlotArea) -> (f64, f64) {
    (
        area.left + (coordinate.lon + 180.0) * area.width / 360.0,
        area.top + (90.0 - coordinate.lat) * area.height / 180.0,
    )
}

/// FNV-1a over the key bytes. Stable across runs and platforms.
#[must_use]
pub fn stable_key_seed(key: &str) -> u64 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Pseudo-random `(dx, dy)` offset derived from `key`, within
/// `[-JITTER_X_PX, JITTER_X_PX) x [-JITTER_Y_PX, JITTER_Y_PX)`.
#[must_use]
pub fn seeded_jitter(key: &str) -> (f64, f64) {
    let mut rng = Pcg64Mcg::seed_from_u64(stable_key_seed(key));
    let dx = rng.gen_range(-JITTER_X_PX..JITTER_X_PX);
    let dy = rng.gen_range(-JITTER_Y_PX..JITTER_Y_PX);
    (dx, dy)
}

/// Grid-cluster position for the `index`-th of `count` uncoordinated points.
#[must_use]
pub fn grid_cluster_position(key: &str, index: usize, count: usize, area: PlotArea) -> (f64, f64) {
    let rows = count.div_ceil(GRID_COLUMNS).max(1);
    let cluster_x = (index % GRID_COLUMNS) as f64 * area.width / GRID_COLUMNS as f64;
    let cluster_y = (index / GRID_COLUMNS) as f64 * area.height / rows as f64;
    let (dx, dy) = seeded_jitter(key);
    (area.left + cluster_x + dx, area.top + cluster_y + dy)
}

/// Projects real coordinates when available, otherwise falls back to the
/// seeded grid layout.
#[must_use]
pub fn locate_point(
    key: &str,
    coordinate: Option<GeoCoordinate>,
    index: usize,
    count: usize,
    area: PlotArea,
) -> (f64, f64) {
    match coordinate {
        Some(coordinate) => project_equirectangular(coordinate, area),
        None => grid_cluster_position(key, index, count, area),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{
        GeoCoordinate, JITTER_X_PX, JITTER_Y_PX, grid_cluster_position, project_equirectangular,
        seeded_jitter, stable_key_seed,
    };
    use crate::core::types::PlotArea;

    fn area() -> PlotArea {
        PlotArea {
            left: 40.0,
            top: 40.0,
            width: 520.0,
            height: 320.0,
        }
    }

    #[test]
    fn origin_projects_to_center() {
        let (x, y) = project_equirectangular(GeoCoordinate::new(0.0, 0.0), area());
        assert_relative_eq!(x, 300.0);
        assert_relative_eq!(y, 200.0);
    }

    #[test]
    fn north_west_corner_projects_to_top_left() {
        let (x, y) = project_equirectangular(GeoCoordinate::new(90.0, -180.0), area());
        assert_relative_eq!(x, 40.0);
        assert_relative_eq!(y, 40.0);
    }

    #[test]
    fn fnv_seed_matches_reference_vectors() {
        assert_eq!(stable_key_seed(""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(stable_key_seed("a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn jitter_is_bounded_and_reproducible() {
        for key in ["North", "South", "East", "West", ""] {
            let (dx, dy) = seeded_jitter(key);
            assert!((-JITTER_X_PX..JITTER_X_PX).contains(&dx));
            assert!((-JITTER_Y_PX..JITTER_Y_PX).contains(&dy));
            assert_eq!(seeded_jitter(key), (dx, dy));
        }
    }

    #[test]
    fn grid_rows_advance_every_three_points() {
        let (x0, y0) = grid_cluster_position("k", 0, 6, area());
        let (x3, y3) = grid_cluster_position("k", 3, 6, area());
        assert_relative_eq!(x0, x3);
        assert_relative_eq!(y3 - y0, 160.0);
    }
}
