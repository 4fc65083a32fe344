//! Spatial region handling
//!
//! Clients describe the area of interest as a WKT `POLYGON`. The parser here
//! accepts a simple polygon (outer ring only; interior rings are rejected)
//! and offers point-in-polygon testing so the extractor can decide which grid
//! cells fall inside the clip.

use crate::errors::{ClimoStatError, Result};

/// A simple polygon used to clip a grid to cells of interest.
///
/// Coordinates are (lon, lat) pairs forming a closed ring. Absence of a
/// `Region` in a request means "whole grid".
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    ring: Vec<(f64, f64)>,
}

impl Region {
    /// Parse a WKT `POLYGON((lon1 lat1, lon2 lat2, ..., lon1 lat1))` string.
    ///
    /// The ring must have at least 4 points (including the closing point).
    pub fn from_wkt(wkt: &str) -> Result<Self> {
        let wkt = wkt.trim();

        if !wkt.to_uppercase().starts_with("POLYGON") {
            return Err(ClimoStatError::InvalidWkt(
                "Expected POLYGON format".to_string(),
            ));
        }

        let start = wkt.find("((").ok_or_else(|| {
            ClimoStatError::InvalidWkt("Missing opening parentheses".to_string())
        })?;
        let end = wkt.rfind("))").ok_or_else(|| {
            ClimoStatError::InvalidWkt("Missing closing parentheses".to_string())
        })?;

        if end <= start {
            return Err(ClimoStatError::InvalidWkt(
                "Invalid parenthesis order".to_string(),
            ));
        }

        if !wkt[end + 2..].trim().is_empty() {
            return Err(ClimoStatError::InvalidWkt(
                "Unexpected text after closing parentheses".to_string(),
            ));
        }

        let inner = &wkt[start + 2..end];
        if inner.contains(')') {
            return Err(ClimoStatError::InvalidWkt(
                "Polygons with interior rings are not supported".to_string(),
            ));
        }

        let ring = Self::parse_ring(inner.trim())?;
        Ok(Self { ring })
    }

    /// Parse a ring from a `lon1 lat1, lon2 lat2, ...` coordinate string.
    fn parse_ring(coords_str: &str) -> Result<Vec<(f64, f64)>> {
        let points: Result<Vec<(f64, f64)>> = coords_str
            .split(',')
            .map(|pair| {
                let pair = pair.trim();
                let parts: Vec<&str> = pair.split_whitespace().collect();
                if parts.len() != 2 {
                    return Err(ClimoStatError::InvalidWkt(format!(
                        "Expected 'lon lat' format, got '{}'",
                        pair
                    )));
                }

                let lon: f64 = parts[0].parse().map_err(|_| {
                    ClimoStatError::InvalidWkt(format!("Invalid coordinate '{}'", parts[0]))
                })?;
                let lat: f64 = parts[1].parse().map_err(|_| {
                    ClimoStatError::InvalidWkt(format!("Invalid coordinate '{}'", parts[1]))
                })?;

                Ok((lon, lat))
            })
            .collect();

        let points = points?;

        if points.len() < 4 {
            return Err(ClimoStatError::InvalidWkt(
                "Polygon must have at least 4 points (including closing point)".to_string(),
            ));
        }

        Ok(points)
    }

    /// Check if a point is inside the polygon using the ray casting algorithm.
    ///
    /// Points exactly on an edge may fall on either side; grid cell centres
    /// are the intended input, not polygon vertices.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let n = self.ring.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;

        for i in 0..n {
            let (xi, yi) = self.ring[i];
            let (xj, yj) = self.ring[j];

            if ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Bounding box of the ring as (west, south, east, north).
    pub fn bbox(&self) -> (f64, f64, f64, f64) {
        let mut west = f64::MAX;
        let mut south = f64::MAX;
        let mut east = f64::MIN;
        let mut north = f64::MIN;

        for &(lon, lat) in &self.ring {
            west = west.min(lon);
            east = east.max(lon);
            south = south.min(lat);
            north = north.max(lat);
        }

        (west, south, east, north)
    }

    /// Number of ring points, including the closing point.
    pub fn num_points(&self) -> usize {
        self.ring.len()
    }
}
