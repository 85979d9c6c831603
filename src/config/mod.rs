pub mod settings;

pub use settings::{ReportVariant, Settings};
