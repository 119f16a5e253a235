//! BestDeal - Lowest confirmed price for an identical car

use serde::{Deserialize, Serialize};

/// Result of the best-deal lookup for a `(model, year, zipcode)` triple.
///
/// `price` is zero whenever `found` is false.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BestDeal {
    pub price: i64,
    pub found: bool,
}

impl BestDeal {
    /// No qualifying record exists
    pub fn none() -> Self {
        Self::default()
    }

    /// A qualifying record exists with this minimum price
    pub fn at(price: i64) -> Self {
        Self { price, found: true }
    }
}

impl From<Option<i64>> for BestDeal {
    fn from(price: Option<i64>) -> Self {
        price.map(BestDeal::at).unwrap_or_default()
    }
}
