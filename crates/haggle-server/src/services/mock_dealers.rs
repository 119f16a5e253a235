//! Mock dealer generator
//!
//! Deterministic dealer listings for a search request, used until the
//! dealer search is backed by a live inventory source.

use crate::models::{DealerResponse, DealerSearchRequest};

const BASE_PRICE: f64 = 35000.0;
const DISCOUNT_STEP: f64 = 500.0;

const PHONES: [&str; 5] = [
    "469-535-8000",
    "972-468-1800",
    "214-291-2000",
    "469-209-1000",
    "972-661-9000",
];

const ADDRESSES: [&str; 5] = [
    "6000 Central Expy, Plano, TX 75023",
    "5300 N Central Expy, Dallas, TX 75205",
    "8400 Gaylord Pkwy, Frisco, TX 75034",
    "14900 N Dallas Pkwy, Dallas, TX 75254",
    "2700 N Stemmons Fwy, Dallas, TX 75207",
];

/// Five dealers for the requested make, each a little cheaper and further away
pub fn generate(req: &DealerSearchRequest) -> Vec<DealerResponse> {
    let names = [
        format!("{} of Dallas", req.make),
        format!("{} of Plano", req.make),
        format!("{} of Frisco", req.make),
        format!("AutoNation {}", req.make),
        format!("Sewell {}", req.make),
    ];

    names
        .into_iter()
        .enumerate()
        .map(|(i, dealer_name)| DealerResponse {
            dealer_name,
            phone: PHONES[i].to_string(),
            address: ADDRESSES[i].to_string(),
            msrp: BASE_PRICE,
            discounted_price: BASE_PRICE - i as f64 * DISCOUNT_STEP,
            mpg: 28 + (i % 3) as i32,
            distance: 5.5 + i as f64 * 3.2,
        })
        .collect()
}
