pub mod report;
pub mod shipment;
pub mod summary;

pub use report::{BarChart, ChartBar, OverallTotals, RenderedReport, SummaryRow};
pub use shipment::ShipmentRecord;
pub use summary::{savings_of, AuditSummary, TypeSummary};
