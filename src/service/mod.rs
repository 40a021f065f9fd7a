pub mod analyzer;
pub mod audit;
pub mod generator;
pub mod presenter;

pub use analyzer::DiscrepancyAnalyzer;
pub use audit::{AuditService, AuditTrigger};
pub use generator::{SampleDataGenerator, DEFAULT_SAMPLE_SIZE};
pub use presenter::{format_money, ChartConfig, ReportPresenter};
