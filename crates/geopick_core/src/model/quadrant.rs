//! Quadrant classification of a coordinate pair.
//!
//! # Responsibility
//! - Map `(lat, lng)` to one of four display quadrants with a label and color.
//!
//! # Invariants
//! - Classification is pure and total over the four open quadrants.
//! - A zero or non-numeric coordinate matches no quadrant.
//! - Labels keep the legacy naming where positive longitude reads as "West".

use crate::model::record::Geo;

/// One of the four open coordinate quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// `lat > 0`, `lng > 0`.
    NorthWest,
    /// `lat > 0`, `lng < 0`.
    NorthEast,
    /// `lat < 0`, `lng > 0`.
    SouthWest,
    /// `lat < 0`, `lng < 0`.
    SouthEast,
}

/// Background color of the location panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuadrantColor {
    Orange,
    Purple,
    Green,
    Red,
}

impl Quadrant {
    /// Human-readable label rendered in the location panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::NorthWest => "North and West",
            Self::NorthEast => "North and East",
            Self::SouthWest => "South and West",
            Self::SouthEast => "South and East",
        }
    }

    pub fn color(self) -> QuadrantColor {
        match self {
            Self::NorthWest => QuadrantColor::Orange,
            Self::NorthEast => QuadrantColor::Purple,
            Self::SouthWest => QuadrantColor::Green,
            Self::SouthEast => QuadrantColor::Red,
        }
    }
}

impl QuadrantColor {
    /// Lowercase color name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Orange => "orange",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Red => "red",
        }
    }

    /// Utility class used by the UI shell for the panel background.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Orange => "bg-orange-400",
            Self::Purple => "bg-purple-400",
            Self::Green => "bg-green-400",
            Self::Red => "bg-red-400",
        }
    }
}

/// Classifies a coordinate pair.
///
/// Returns `None` when either axis is zero or `NaN`.
pub fn classify(lat: f64, lng: f64) -> Option<Quadrant> {
    if lat > 0.0 && lng > 0.0 {
        Some(Quadrant::NorthWest)
    } else if lat > 0.0 && lng < 0.0 {
        Some(Quadrant::NorthEast)
    } else if lat < 0.0 && lng > 0.0 {
        Some(Quadrant::SouthWest)
    } else if lat < 0.0 && lng < 0.0 {
        Some(Quadrant::SouthEast)
    } else {
        None
    }
}

/// Classifies upstream coordinates, treating unparseable text as no value.
pub fn classify_geo(geo: &Geo) -> Option<Quadrant> {
    let lat = geo.lat.as_f64()?;
    let lng = geo.lng.as_f64()?;
    classify(lat, lng)
}
