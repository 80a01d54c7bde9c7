//! Support-technician recommendation policy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::types::{Technician, TechnicianId};

/// Below this many hours a single technician always suffices.
pub const SUPPORT_MIN_HOURS: f64 = 8.0;
/// Above this many hours a second technician is always recommended.
pub const SUPPORT_ALWAYS_HOURS: f64 = 16.0;
/// In the middle band, only relieve a primary loaded past this.
pub const BUSY_PRIMARY_HOURS: f64 = 20.0;
/// In the middle band, only candidates below this load are eligible.
pub const AVAILABLE_CANDIDATE_HOURS: f64 = 15.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportSuggestion {
    pub suggested: bool,
    pub technician: Option<Technician>,
    pub reason: String,
}

impl SupportSuggestion {
    fn none(reason: &str) -> Self {
        Self {
            suggested: false,
            technician: None,
            reason: reason.to_string(),
        }
    }

    fn pick(technician: &Technician, reason: &str) -> Self {
        Self {
            suggested: true,
            technician: Some(technician.clone()),
            reason: reason.to_string(),
        }
    }
}

/// Decides whether a second technician should join an order, and which
/// one. Candidates missing from `workloads` count as idle. The rules
/// are evaluated top to bottom; the first that matches wins.
pub fn suggest_support(
    primary_id: &str,
    total_hours: f64,
    candidates: &[Technician],
    workloads: &HashMap<TechnicianId, f64>,
) -> SupportSuggestion {
    if total_hours < SUPPORT_MIN_HOURS {
        return SupportSuggestion::none("work requires under 8 hours");
    }

    let others: Vec<&Technician> = candidates
        .iter()
        .filter(|candidate| candidate.id != primary_id)
        .collect();

    if total_hours > SUPPORT_ALWAYS_HOURS {
        if let Some(pick) = least_loaded(&others, workloads, None) {
            tracing::debug!(technician = %pick.id, total_hours, "support recommended for large order");
            return SupportSuggestion::pick(
                pick,
                "order exceeds 16 hours; assigning the least busy technician",
            );
        }
        return SupportSuggestion::none("support not required for this work");
    }

    let primary_load = workloads.get(primary_id).copied().unwrap_or(0.0);
    if primary_load > BUSY_PRIMARY_HOURS {
        if let Some(pick) = least_loaded(&others, workloads, Some(AVAILABLE_CANDIDATE_HOURS)) {
            tracing::debug!(technician = %pick.id, primary_load, "support recommended for overloaded primary");
            return SupportSuggestion::pick(
                pick,
                "primary technician is already heavily booked",
            );
        }
        return SupportSuggestion::none("no technician with enough availability");
    }

    SupportSuggestion::none("support not required for this work")
}

/// Lowest-workload candidate, optionally restricted to candidates under
/// `max_hours`. Strictly-less comparison keeps the earliest candidate
/// on ties.
fn least_loaded<'a>(
    candidates: &[&'a Technician],
    workloads: &HashMap<TechnicianId, f64>,
    max_hours: Option<f64>,
) -> Option<&'a Technician> {
    let mut best: Option<(&'a Technician, f64)> = None;
    for candidate in candidates {
        let hours = workloads.get(&candidate.id).copied().unwrap_or(0.0);
        if let Some(limit) = max_hours {
            if hours >= limit {
                continue;
            }
        }
        match best {
            Some((_, best_hours)) if hours >= best_hours => {}
            _ => best = Some((candidate, hours)),
        }
    }
    best.map(|(candidate, _)| candidate)
}
