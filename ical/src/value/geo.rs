// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Geographic position as carried by the GEO property (RFC 5545 Section 3.8.1.6).

/// A latitude/longitude pair where either coordinate may be absent.
///
/// Absence is distinct from zero: `;56.78` has no latitude, `0;56.78` has a
/// latitude of zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValueGeo {
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}

impl ValueGeo {
    /// Create a position with both coordinates.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Whether both coordinates are absent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none()
    }
}
