pub mod config;
pub mod repository;
pub mod service;


pub use repository::{ActiveOrder, PgWorkloadRepository, WorkloadStore};
pub use service::{WorkloadError, WorkloadOutcome, WorkloadService};
