//! Price ranges for the price filter.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::InventoryError;
use crate::search::Selection;

/// Inclusive price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether a price falls inside the range, bounds included.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for PriceRange {
    type Err = InventoryError;

    /// Parse `"min-max"`, e.g. `"15000-25000"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InventoryError::InvalidPriceRange(s.to_string());

        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min: f64 = min.trim().parse().map_err(|_| invalid())?;
        let max: f64 = max.trim().parse().map_err(|_| invalid())?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(invalid());
        }
        Ok(Self { min, max })
    }
}

/// A named entry of the price selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBand {
    pub label: &'static str,
    pub range: Selection<PriceRange>,
}

/// The storefront's price selector options, in display order.
pub const PRICE_BANDS: [PriceBand; 4] = [
    PriceBand {
        label: "All prices",
        range: Selection::All,
    },
    PriceBand {
        label: "≤ RM15,000",
        range: Selection::Only(PriceRange::new(0.0, 15000.0)),
    },
    PriceBand {
        label: "RM15,000 - RM25,000",
        range: Selection::Only(PriceRange::new(15000.0, 25000.0)),
    },
    PriceBand {
        label: "≥ RM25,000",
        range: Selection::Only(PriceRange::new(25000.0, 1000000.0)),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        let range: PriceRange = "15000-25000".parse().unwrap();
        assert_eq!(range, PriceRange::new(15000.0, 25000.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("cheap".parse::<PriceRange>().is_err());
        assert!("100-".parse::<PriceRange>().is_err());
        assert!("500-100".parse::<PriceRange>().is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = PriceRange::new(15000.0, 25000.0);
        assert!(range.contains(15000.0));
        assert!(range.contains(25000.0));
        assert!(!range.contains(25000.5));
        assert!(!range.contains(14999.0));
    }

    #[test]
    fn test_display_round_trips() {
        for band in PRICE_BANDS {
            if let Selection::Only(range) = band.range {
                assert_eq!(range.to_string().parse::<PriceRange>().unwrap(), range);
            }
        }
    }

    #[test]
    fn test_first_band_is_wildcard() {
        assert_eq!(PRICE_BANDS[0].range, Selection::All);
        assert_eq!(PRICE_BANDS[0].range.to_string(), "all");
    }
}
