pub mod aggregator;
pub mod product_resolver;
pub mod report;
pub mod runner;
pub mod slack;
pub mod time_windows;

pub use aggregator::{count_by_product, CountMode, CountTable};
pub use product_resolver::{extract_product, NO_PRODUCT};
pub use report::{render_report, Report, ReportColumn};
pub use runner::{ReportRunner, RunOutcome};
pub use slack::SlackPublisher;
pub use time_windows::TimeWindows;
