//! Delivery-date projection over technician work schedules.
//!
//! Two projections coexist: [`project_delivery`] treats the daily window
//! as continuous and models a support technician as a flat reduction of
//! the total work, while [`project_delivery_legacy`] subtracts break
//! minutes and adds the support technician's daily hours to the daily
//! throughput instead. Callers pick one; the semantics are not merged.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use shared::estimate::effective_hours;
use shared::types::{DeliveryProjection, OrderItem, WorkSchedule};

/// Fraction of the work left on the primary technician when a support
/// technician is assigned.
pub const SUPPORT_TIME_FACTOR: f64 = 0.8;

/// Projects the delivery date and clock time for a new order.
///
/// Consumption never starts on the creation day: the walk begins on the
/// next scheduled work day and takes `current_workload` queued hours
/// ahead of the new work. Zero-work orders and malformed schedules
/// resolve to conservative placeholder projections instead of errors.
pub fn project_delivery(
    items: &[OrderItem],
    primary: &WorkSchedule,
    support: Option<&WorkSchedule>,
    created_at: DateTime<Utc>,
    current_workload: f64,
) -> DeliveryProjection {
    let effective = effective_hours(items);
    if effective <= 0.0 {
        return next_day_projection(primary, created_at);
    }

    let hours_per_day = primary.window_hours();
    if hours_per_day <= 0.0 || primary.work_days.is_empty() {
        return fallback_projection(primary, created_at, effective);
    }

    let working_hours = match support {
        Some(_) => effective * SUPPORT_TIME_FACTOR,
        None => effective,
    };
    // Queued work is served first; the new order starts behind it.
    let adjusted_hours = working_hours + current_workload;

    let (delivery_date, consumed_on_final) =
        consume_working_days(created_at.date_naive(), primary, hours_per_day, adjusted_hours);

    DeliveryProjection {
        delivery_date,
        delivery_time: delivery_clock(primary, hours_per_day, adjusted_hours, consumed_on_final),
        effective_hours: effective,
        breakdown: String::new(),
    }
}

/// Earlier projection retained for orders scheduled under the previous
/// model: break minutes come out of the daily window, and a support
/// technician adds their own net daily hours to the throughput.
pub fn project_delivery_legacy(
    total_hours: f64,
    primary: &WorkSchedule,
    support: Option<&WorkSchedule>,
    start: DateTime<Utc>,
) -> DeliveryProjection {
    if total_hours <= 0.0 {
        return next_day_projection(primary, start);
    }

    let mut hours_per_day = primary.net_hours();
    if let Some(support) = support {
        hours_per_day += support.net_hours();
    }
    if hours_per_day <= 0.0 || primary.work_days.is_empty() {
        return fallback_projection(primary, start, total_hours);
    }

    let (delivery_date, consumed_on_final) =
        consume_working_days(start.date_naive(), primary, hours_per_day, total_hours);

    DeliveryProjection {
        delivery_date,
        delivery_time: delivery_clock(primary, hours_per_day, total_hours, consumed_on_final),
        effective_hours: total_hours,
        breakdown: String::new(),
    }
}

/// Placeholder for zero-work orders: next day, end of the window.
fn next_day_projection(primary: &WorkSchedule, created_at: DateTime<Utc>) -> DeliveryProjection {
    DeliveryProjection {
        delivery_date: (created_at + Duration::hours(24)).date_naive(),
        delivery_time: format_clock(primary.end_time),
        effective_hours: 0.0,
        breakdown: String::new(),
    }
}

/// Conservative placeholder for schedules the walk cannot consume
/// against (non-positive daily hours or no work days at all).
fn fallback_projection(
    primary: &WorkSchedule,
    created_at: DateTime<Utc>,
    effective: f64,
) -> DeliveryProjection {
    DeliveryProjection {
        delivery_date: (created_at + Duration::days(7)).date_naive(),
        delivery_time: format_clock(primary.end_time),
        effective_hours: effective,
        breakdown: String::new(),
    }
}

/// Walks the calendar forward from the day after `start`, consuming up
/// to `hours_per_day` on each scheduled work day. Returns the date the
/// remaining total reaches zero and the hours consumed on that final
/// day.
fn consume_working_days(
    start: NaiveDate,
    schedule: &WorkSchedule,
    hours_per_day: f64,
    total_hours: f64,
) -> (NaiveDate, f64) {
    let mut dead_days = 0u32;
    let mut day = next_working_day(start, schedule, &mut dead_days);
    let mut remaining = total_hours;

    loop {
        let consumed = remaining.min(hours_per_day);
        remaining -= hours_per_day;
        if remaining <= 0.0 {
            if dead_days > 0 {
                tracing::debug!(dead_days, %day, "non-working days skipped during projection");
            }
            return (day, consumed);
        }
        day = next_working_day(day, schedule, &mut dead_days);
    }
}

fn next_working_day(mut day: NaiveDate, schedule: &WorkSchedule, dead_days: &mut u32) -> NaiveDate {
    day = day + Duration::days(1);
    while !schedule.works_on(day.weekday()) {
        *dead_days += 1;
        day = day + Duration::days(1);
    }
    day
}

fn delivery_clock(
    schedule: &WorkSchedule,
    hours_per_day: f64,
    total_hours: f64,
    consumed_on_final: f64,
) -> String {
    let time = if total_hours <= hours_per_day {
        clock_after(schedule.start_time, total_hours)
    } else if consumed_on_final > 0.0 {
        clock_after(schedule.start_time, consumed_on_final)
    } else {
        schedule.end_time
    };
    format_clock(time)
}

/// Clock arithmetic is minute-granular; this is the only rounding step.
fn clock_after(start: NaiveTime, hours: f64) -> NaiveTime {
    start + Duration::minutes((hours * 60.0).round() as i64)
}

fn format_clock(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}
