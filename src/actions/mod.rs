mod report;
mod upload;

use crate::action::ActionRegistry;

pub use report::{DownloadReport, ReportSummary};
pub use upload::StoreUpload;

/// Actions served by the bundled binary
pub fn register(registry: &mut ActionRegistry) {
    registry
        .register("report", "download", DownloadReport)
        .register("report", "summary", ReportSummary)
        .register("upload", "store", StoreUpload);
}
