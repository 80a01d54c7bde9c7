//! Shared-time discounting of order line items.

use crate::types::{OrderItem, UNKNOWN_SERVICE_TYPE};

/// Weight applied to the second and third unit of every cycle.
pub const SHARED_TIME_FACTOR: f64 = 0.2;
/// Units per discount cycle; the first unit of each cycle is billed in full.
pub const SHARED_TIME_CYCLE: usize = 3;

/// Total technician hours for a set of line items after the shared-time
/// discount.
///
/// Items not flagged as shared contribute their estimate unchanged.
/// Shared items are grouped by service type (missing types group under
/// `"unknown"`), each item is expanded into `quantity` equal units, and
/// within a group every first-of-three unit costs full time while the
/// two behind it cost 20%.
pub fn effective_hours(items: &[OrderItem]) -> f64 {
    let mut individual = 0.0;
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for item in items {
        if !item.shared_time {
            individual += item.estimated_hours;
            continue;
        }

        let key = item
            .service_type_id
            .clone()
            .unwrap_or_else(|| UNKNOWN_SERVICE_TYPE.to_string());
        // Quantity 0 is treated as a single unit.
        let units = item.quantity.max(1) as usize;
        let base = item.estimated_hours / units as f64;

        // Groups keep first-appearance order so the position-based
        // weighting stays deterministic for a given item list.
        let slot = match groups.iter().position(|(group, _)| *group == key) {
            Some(slot) => slot,
            None => {
                groups.push((key, Vec::new()));
                groups.len() - 1
            }
        };
        groups[slot].1.extend(std::iter::repeat(base).take(units));
    }

    let shared: f64 = groups.iter().map(|(_, units)| discounted_sum(units)).sum();

    individual + shared
}

fn discounted_sum(units: &[f64]) -> f64 {
    units
        .iter()
        .enumerate()
        .map(|(index, base)| {
            if index % SHARED_TIME_CYCLE == 0 {
                *base
            } else {
                base * SHARED_TIME_FACTOR
            }
        })
        .sum()
}
