//! Client-side file generators
//!
//! Each generator declares a target, whether it applies in the current
//! project, and the content. `ClientFileTask` does the rest.

use std::path::PathBuf;

use crate::config::Options;
use crate::pipeline::task::{Task, TaskContext, TaskError};

/// Location of the imports file written by `update-imports`
pub(crate) const FLOW_IMPORTS_FILE: &str = "flow-imports.js";

const BOOTSTRAP_FILE: &str = "vaadin.ts";

pub trait ClientFileGenerator {
    fn name(&self) -> &'static str;

    fn target(&self, options: &Options) -> PathBuf;

    /// `false` when the user authored their own version of the file
    fn should_generate(&self, _options: &Options) -> bool {
        true
    }

    fn content(&self, options: &Options) -> Result<String, TaskError>;
}

/// Adapts a [`ClientFileGenerator`] to a pipeline task
pub struct ClientFileTask<G>(pub G);

impl<G: ClientFileGenerator> Task for ClientFileTask<G> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let target = self.0.target(ctx.options);
        if !self.0.should_generate(ctx.options) {
            tracing::debug!(target = %target.display(), "user-provided file present, not generating");
            return Ok(());
        }
        let content = self.0.content(ctx.options)?;
        ctx.files.write_if_changed(&target, &content)?;
        Ok(())
    }
}

pub struct IndexHtml;

impl ClientFileGenerator for IndexHtml {
    fn name(&self) -> &'static str {
        "generate-index-html"
    }

    fn target(&self, options: &Options) -> PathBuf {
        options.frontend_directory().join("index.html")
    }

    fn should_generate(&self, options: &Options) -> bool {
        !self.target(options).exists()
    }

    fn content(&self, _options: &Options) -> Result<String, TaskError> {
        Ok(concat!(
            "<!DOCTYPE html>\n",
            "<!--\n",
            "This file is auto-generated. Edit it to customize the page served\n",
            "for every route; it will not be overwritten once it exists.\n",
            "-->\n",
            "<html>\n",
            "<head>\n",
            "  <meta charset=\"UTF-8\" />\n",
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
            "  <style>\n",
            "    body, #outlet { height: 100vh; width: 100%; margin: 0; }\n",
            "  </style>\n",
            "</head>\n",
            "<body>\n",
            "  <div id=\"outlet\"></div>\n",
            "</body>\n",
            "</html>\n",
        )
        .to_string())
    }
}

pub struct IndexTs;

impl ClientFileGenerator for IndexTs {
    fn name(&self) -> &'static str {
        "generate-index-ts"
    }

    fn target(&self, options: &Options) -> PathBuf {
        options.generated_directory().join("index.ts")
    }

    fn should_generate(&self, options: &Options) -> bool {
        let frontend = options.frontend_directory();
        !frontend.join("index.ts").exists() && !frontend.join("index.tsx").exists()
    }

    fn content(&self, _options: &Options) -> Result<String, TaskError> {
        Ok(format!(
            "// Application entry point. Create frontend/index.ts to replace it.\nimport './{}';\n",
            BOOTSTRAP_FILE
        ))
    }
}

pub struct ServiceWorker;

impl ClientFileGenerator for ServiceWorker {
    fn name(&self) -> &'static str {
        "generate-service-worker"
    }

    fn target(&self, options: &Options) -> PathBuf {
        options.generated_directory().join("sw.ts")
    }

    fn should_generate(&self, options: &Options) -> bool {
        !options.frontend_directory().join("sw.ts").exists()
    }

    fn content(&self, _options: &Options) -> Result<String, TaskError> {
        Ok(concat!(
            "/// <reference lib=\"webworker\" />\n",
            "declare const self: ServiceWorkerGlobalScope;\n",
            "\n",
            "self.addEventListener('install', () => self.skipWaiting());\n",
            "self.addEventListener('activate', (event) => event.waitUntil(self.clients.claim()));\n",
        )
        .to_string())
    }
}

pub struct WebComponents;

impl ClientFileGenerator for WebComponents {
    fn name(&self) -> &'static str {
        "generate-web-components"
    }

    fn target(&self, options: &Options) -> PathBuf {
        options.generated_directory().join("vaadin-web-component.ts")
    }

    fn content(&self, _options: &Options) -> Result<String, TaskError> {
        Ok(format!(
            "import './{}';\nimport {{ init }} from './jar-resources/FlowClient.js';\ninit();\n",
            FLOW_IMPORTS_FILE
        ))
    }
}

pub struct CommercialBanner;

impl ClientFileGenerator for CommercialBanner {
    fn name(&self) -> &'static str {
        "generate-commercial-banner"
    }

    fn target(&self, options: &Options) -> PathBuf {
        options.generated_directory().join("commercial-banner.js")
    }

    fn content(&self, _options: &Options) -> Result<String, TaskError> {
        Ok(concat!(
            "const banner = document.createElement('vaadin-commercial-banner');\n",
            "document.body.append(banner);\n",
        )
        .to_string())
    }
}

/// Entry module importing everything `update-imports` collected.
///
/// Fails when the imports file has not been generated yet.
pub struct Bootstrap;

impl ClientFileGenerator for Bootstrap {
    fn name(&self) -> &'static str {
        "generate-bootstrap"
    }

    fn target(&self, options: &Options) -> PathBuf {
        options.generated_directory().join(BOOTSTRAP_FILE)
    }

    fn content(&self, options: &Options) -> Result<String, TaskError> {
        let imports = options.generated_directory().join(FLOW_IMPORTS_FILE);
        if !imports.is_file() {
            return Err(TaskError::Precondition(format!(
                "'{}' has not been generated",
                imports.display()
            )));
        }

        let mut content = format!("import './{}';\n", FLOW_IMPORTS_FILE);
        let features = &options.features;
        if features.production_mode && features.bundle_build && features.commercial_banner {
            content.push_str("import './commercial-banner.js';\n");
        }
        Ok(content)
    }
}
