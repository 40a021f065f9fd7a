pub mod csv_records;

pub use csv_records::*;
