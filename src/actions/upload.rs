use crate::action::{Action, ActionContext};
use crate::content::dispatch::{Content, DispatchOptions};
use crate::content::error::ContentError;
use crate::content::flow::Complete;
use async_trait::async_trait;
use http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
struct StoredFile {
    field: String,
    original_name: String,
    filename: String,
    size: u64,
}

/// Moves every uploaded file into the upload dir
///
/// Existing files are kept unless the `overwrite` param is `1`.
pub struct StoreUpload;

#[async_trait]
impl Action for StoreUpload {
    async fn execute(&self, ctx: &mut ActionContext) -> Result<Complete, ContentError> {
        let overwrite = ctx.request().param("overwrite") == Some("1");
        let destination = ctx.config().upload_dir.clone();

        let mut stored = Vec::new();
        for file in ctx.uploads().files() {
            let filename = ctx
                .move_uploaded_file(file, &destination, overwrite)
                .await?;
            stored.push(StoredFile {
                field: file.field().to_string(),
                original_name: file.original_name().to_string(),
                filename,
                size: file.size(),
            });
        }

        if !stored.is_empty() {
            ctx.set_status(StatusCode::CREATED);
        }
        ctx.send(
            Content::json(&stored)?,
            DispatchOptions::default().with_type("application/json"),
        )
    }
}
