//! Collaborators handed to the pipeline at construction time

use std::sync::Arc;

use crate::config::Options;
use crate::domain::ports::{FrontendScanner, PackageInstaller};
use crate::infrastructure::{CommandInstaller, ConfiguredScanner};

use super::task::Task;

/// Builds the endpoint generation task when that subsystem is present.
///
/// The pipeline calls `create_task` at most once per pipeline.
pub trait EndpointTaskFactory {
    fn create_task(&self, options: &Options) -> Box<dyn Task>;
}

/// Explicit collaborator handles for one pipeline
#[derive(Clone)]
pub struct Services {
    pub scanner: Arc<dyn FrontendScanner>,
    pub installer: Arc<dyn PackageInstaller>,
    pub endpoint: Option<Arc<dyn EndpointTaskFactory>>,
}

impl Services {
    pub fn new(scanner: Arc<dyn FrontendScanner>, installer: Arc<dyn PackageInstaller>) -> Self {
        Self {
            scanner,
            installer,
            endpoint: None,
        }
    }

    /// Scanner and installer driven by the `[scan]` and `[install]` config
    pub fn from_options(options: &Options) -> Self {
        Self::new(
            Arc::new(ConfiguredScanner::new(options.scan.clone())),
            Arc::new(CommandInstaller::new(&options.install)),
        )
    }

    pub fn with_endpoint(mut self, factory: Arc<dyn EndpointTaskFactory>) -> Self {
        self.endpoint = Some(factory);
        self
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("endpoint", &self.endpoint.is_some())
            .finish_non_exhaustive()
    }
}
