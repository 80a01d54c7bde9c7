use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub type TechnicianId = String;
pub type ServiceTypeId = String;

/// Grouping key for line items that carry no service type.
pub const UNKNOWN_SERVICE_TYPE: &str = "unknown";

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
    #[error("Invalid weekday index: {0}")]
    InvalidWeekday(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    EnRoute,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Statuses that still consume technician capacity.
    pub const ACTIVE: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::EnRoute,
    ];

    pub fn is_active(self) -> bool {
        Self::ACTIVE.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::EnRoute => "en_route",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pending,
    InProgress,
    Completed,
}

/// One order line item as supplied by the caller or read from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub shared_time: bool,
    pub service_type_id: Option<ServiceTypeId>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub status: Option<ItemStatus>,
}

fn default_quantity() -> u32 {
    1
}

/// A technician's weekly working calendar. The window is a same-day
/// span; overnight schedules are not supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkSchedule {
    pub work_days: Vec<Weekday>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub break_duration_minutes: u32,
}

impl WorkSchedule {
    pub fn new(
        work_days: Vec<Weekday>,
        start: &str,
        end: &str,
        break_duration_minutes: u32,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            work_days,
            start_time: parse_clock(start)?,
            end_time: parse_clock(end)?,
            break_duration_minutes,
        })
    }

    pub fn works_on(&self, day: Weekday) -> bool {
        self.work_days.contains(&day)
    }

    /// Length of the daily window in hours, breaks ignored.
    pub fn window_hours(&self) -> f64 {
        self.end_time
            .signed_duration_since(self.start_time)
            .num_minutes() as f64
            / 60.0
    }

    /// Daily hours with the configured break taken out.
    pub fn net_hours(&self) -> f64 {
        self.window_hours() - f64::from(self.break_duration_minutes) / 60.0
    }
}

fn parse_clock(value: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(value.to_string()))
}

/// Converts a 0=Sunday..6=Saturday index into a weekday.
pub fn weekday_from_index(index: u8) -> Result<Weekday, ScheduleError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(ScheduleError::InvalidWeekday(index)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: TechnicianId,
    pub name: String,
}

/// Snapshot of a technician's queued work, rebuilt on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicianWorkload {
    pub technician_id: TechnicianId,
    pub current_orders: usize,
    pub total_hours: f64,
}

/// Result of a delivery projection. `breakdown` is reserved for a
/// human-readable explanation and is currently always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryProjection {
    pub delivery_date: NaiveDate,
    pub delivery_time: String,
    pub effective_hours: f64,
    pub breakdown: String,
}
