//! `update-imports`: one import line per module the scanner found

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::ports::FrontendScanner;
use crate::pipeline::task::{Task, TaskContext, TaskError};

use super::client_files::FLOW_IMPORTS_FILE;

pub struct UpdateImports {
    scanner: Arc<dyn FrontendScanner>,
}

impl UpdateImports {
    pub fn new(scanner: Arc<dyn FrontendScanner>) -> Self {
        Self { scanner }
    }
}

/// Import statements for `imports`, first occurrence wins
pub(crate) fn render_imports(imports: &[String]) -> String {
    let mut seen = HashSet::new();
    let mut content = String::from("// Generated by frontgen. Do not edit.\n");
    for module in imports {
        if seen.insert(module.as_str()) {
            content.push_str(&format!("import '{}';\n", module));
        }
    }
    content
}

impl Task for UpdateImports {
    fn name(&self) -> &str {
        "update-imports"
    }

    fn execute(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let imports = self.scanner.imports();
        let target = ctx.options.generated_directory().join(FLOW_IMPORTS_FILE);
        ctx.files.write_if_changed(&target, &render_imports(&imports))?;
        tracing::debug!(count = imports.len(), "imports updated");
        Ok(())
    }
}
