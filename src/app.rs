use crate::action::ActionRegistry;
use crate::config::Config;
use crate::content::redirect::FilenameRedirector;
use crate::content::upload::UploadRelocator;
use std::sync::Arc;

/// Shared state of every request
pub struct AppState {
    pub config: Config,
    pub redirector: FilenameRedirector,
    pub relocator: UploadRelocator,
    pub actions: ActionRegistry,
}

impl AppState {
    pub fn new(config: Config, actions: ActionRegistry) -> Arc<Self> {
        let redirector = FilenameRedirector::new(
            config.session_store.clone(),
            config.set_filename_route.clone(),
        );
        let relocator = UploadRelocator::new(config.unique_filename_attempts);

        Arc::new(AppState {
            config,
            redirector,
            relocator,
            actions,
        })
    }
}
