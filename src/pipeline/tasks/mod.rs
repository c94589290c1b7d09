//! Concrete pipeline tasks and their declaration order

mod client_files;
mod imports;
mod packages;
mod prod_bundle;
mod resources;

pub use client_files::{
    Bootstrap, ClientFileGenerator, ClientFileTask, CommercialBanner, IndexHtml, IndexTs,
    ServiceWorker, WebComponents,
};
pub use imports::UpdateImports;
pub use packages::{CreatePackageJson, RunPackageInstall, UpdatePackages};
pub use prod_bundle::{PackProdBundle, PrepareProdBundle, ValidateBundle};
pub use resources::CopyFrontendResources;

use crate::config::Options;

use super::services::Services;
use super::task::Task;

pub(crate) type Predicate = fn(&Options, &Services) -> bool;
pub(crate) type Constructor = fn(&Options, &Services) -> Option<Box<dyn Task>>;

/// One row of the declared task list
pub(crate) struct TaskDeclaration {
    pub name: &'static str,
    pub predicate: Predicate,
    pub construct: Constructor,
}

/// Name under which the endpoint subsystem appears when it is skipped
pub const ENDPOINT_TASK: &str = "generate-endpoints";

/// Every task the pipeline knows about, in execution order
pub(crate) fn declared_tasks() -> Vec<TaskDeclaration> {
    vec![
        TaskDeclaration {
            name: "create-package-json",
            predicate: |o, _| o.features.create_missing_package_json,
            construct: |_, _| Some(Box::new(CreatePackageJson)),
        },
        TaskDeclaration {
            name: "generate-index-html",
            predicate: |_, _| true,
            construct: |_, _| Some(Box::new(ClientFileTask(IndexHtml))),
        },
        TaskDeclaration {
            name: "generate-index-ts",
            predicate: |_, _| true,
            construct: |_, _| Some(Box::new(ClientFileTask(IndexTs))),
        },
        TaskDeclaration {
            name: "generate-service-worker",
            predicate: |o, _| o.features.production_mode,
            construct: |_, _| Some(Box::new(ClientFileTask(ServiceWorker))),
        },
        TaskDeclaration {
            name: "generate-web-components",
            predicate: |o, _| o.features.embeddable_web_components,
            construct: |_, _| Some(Box::new(ClientFileTask(WebComponents))),
        },
        TaskDeclaration {
            name: "generate-commercial-banner",
            predicate: |o, _| {
                o.features.production_mode && o.features.bundle_build && o.features.commercial_banner
            },
            construct: |_, _| Some(Box::new(ClientFileTask(CommercialBanner))),
        },
        TaskDeclaration {
            name: ENDPOINT_TASK,
            predicate: |o, s| o.endpoint.enabled && s.endpoint.is_some(),
            construct: |o, s| s.endpoint.as_ref().map(|factory| factory.create_task(o)),
        },
        TaskDeclaration {
            name: "update-packages",
            predicate: |o, _| o.features.packages_update,
            construct: |_, s| Some(Box::new(UpdatePackages::new(s.scanner.clone()))),
        },
        TaskDeclaration {
            name: "run-package-install",
            predicate: |o, _| o.features.run_package_install,
            construct: |_, s| Some(Box::new(RunPackageInstall::new(s.installer.clone()))),
        },
        TaskDeclaration {
            name: "copy-frontend-resources",
            predicate: |o, _| !o.copy.resource_dirs.is_empty(),
            construct: |o, _| Some(Box::new(CopyFrontendResources::new(o.resource_dirs()))),
        },
        TaskDeclaration {
            name: "update-imports",
            predicate: |o, _| o.features.imports_update,
            construct: |_, s| Some(Box::new(UpdateImports::new(s.scanner.clone()))),
        },
        TaskDeclaration {
            name: "generate-bootstrap",
            predicate: |o, _| o.features.imports_update,
            construct: |_, _| Some(Box::new(ClientFileTask(Bootstrap))),
        },
        TaskDeclaration {
            name: "prepare-prod-bundle",
            predicate: |o, _| o.features.production_mode && !o.features.bundle_build,
            construct: |_, _| Some(Box::new(PrepareProdBundle)),
        },
        TaskDeclaration {
            name: "validate-bundle",
            predicate: |o, _| {
                o.features.production_mode && !o.features.bundle_build && o.validation.enabled
            },
            construct: |_, s| Some(Box::new(ValidateBundle::new(s.scanner.clone()))),
        },
        TaskDeclaration {
            name: "pack-prod-bundle",
            predicate: |o, _| {
                o.features.production_mode && o.features.bundle_build && o.features.pack_bundle
            },
            construct: |_, _| Some(Box::new(PackProdBundle)),
        },
    ]
}
