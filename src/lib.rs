pub mod api;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{AuditError, Result};
pub use loader::load_records;
pub use service::{
    AuditService, AuditTrigger, ChartConfig, DiscrepancyAnalyzer, ReportPresenter,
    SampleDataGenerator,
};
