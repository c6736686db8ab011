use crate::action::{Action, ActionContext};
use crate::content::dispatch::DispatchOptions;
use crate::content::error::ContentError;
use crate::content::flow::{Complete, Flow};
use async_trait::async_trait;
use serde_json::json;

const ROWS: &[(&str, u32)] = &[("north", 120), ("south", 87), ("east", 45), ("west", 63)];

fn report_id(ctx: &ActionContext) -> String {
    ctx.request().param("id").unwrap_or("1").to_string()
}

/// Csv report, downloaded as `report-{id}.csv`
pub struct DownloadReport;

#[async_trait]
impl Action for DownloadReport {
    async fn execute(&self, ctx: &mut ActionContext) -> Result<Complete, ContentError> {
        let id = report_id(ctx);
        if let Flow::Complete(done) = ctx.set_filename(&format!("report-{}.csv", id)).await? {
            return Ok(done);
        }

        let mut csv = format!("report,{}\nregion,total\n", id);
        for (region, total) in ROWS {
            csv.push_str(&format!("{},{}\n", region, total));
        }
        // type comes from the .csv in the url
        ctx.send(csv, DispatchOptions::default())
    }
}

/// Json summary of the same report, as `summary-{id}.json`
pub struct ReportSummary;

#[async_trait]
impl Action for ReportSummary {
    async fn execute(&self, ctx: &mut ActionContext) -> Result<Complete, ContentError> {
        let id = report_id(ctx);
        if let Flow::Complete(done) = ctx.set_filename(&format!("summary-{}.json", id)).await? {
            return Ok(done);
        }

        let total: u32 = ROWS.iter().map(|(_, total)| total).sum();
        let summary = json!({
            "id": id,
            "method": ctx.request().method().as_str(),
            "regions": ROWS.len(),
            "total": total,
        });
        ctx.send(summary, DispatchOptions::default())
    }
}
