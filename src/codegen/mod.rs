//! Code generation: naming, stub synthesis, artifact rendering, and
//! emission to disk.

use std::path::PathBuf;

use crate::options::GeneratorOptions;
use crate::table::PathTable;

mod api_module;
mod naming;
mod operation;
mod paths_module;

pub use api_module::{ApiModule, RenderApiModule};
pub use naming::{format_key, is_valid_identifier};
pub use operation::{FunctionStub, StubPathParam, generate, generate_ungrouped};
pub use paths_module::PathsModule;

/// The per-artifact result of one emission run.
#[derive(Debug)]
pub struct EmitReport {
    outcomes: Vec<ArtifactOutcome>,
}

impl EmitReport {
    pub fn outcomes(&self) -> &[ArtifactOutcome] {
        &self.outcomes
    }

    pub fn written(&self) -> usize {
        self.count(|status| matches!(status, ArtifactStatus::Written))
    }

    pub fn skipped(&self) -> usize {
        self.count(|status| matches!(status, ArtifactStatus::SkippedExists))
    }

    pub fn failed(&self) -> usize {
        self.count(|status| {
            matches!(
                status,
                ArtifactStatus::DirectoryError(_) | ArtifactStatus::WriteError(_)
            )
        })
    }

    fn count(&self, predicate: impl Fn(&ArtifactStatus) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| predicate(&outcome.status))
            .count()
    }
}

#[derive(Debug)]
pub struct ArtifactOutcome {
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

/// What happened to a single artifact.
#[derive(Debug, Eq, PartialEq)]
pub enum ArtifactStatus {
    Written,
    /// The destination exists and overwriting is disabled. Recoverable;
    /// sibling artifacts still proceed.
    SkippedExists,
    /// The destination directory couldn't be created. Fatal for this
    /// artifact only.
    DirectoryError(String),
    WriteError(String),
}

/// Writes the path-constants artifact, then one artifact per module.
///
/// Emission only starts once the table and stubs are fully built, so an
/// aborted run never leaves partial artifacts. Failures are collected per
/// artifact rather than aborting siblings.
pub fn emit(table: &PathTable, modules: &[ApiModule], options: &GeneratorOptions) -> EmitReport {
    let mut outcomes = Vec::with_capacity(modules.len() + 1);

    let paths_code = PathsModule::new(table, options).to_string();
    outcomes.push(write_artifact(
        options.paths_file.clone(),
        &paths_code,
        options.overwrite,
    ));

    for module in modules {
        let code = RenderApiModule::new(module, table, options).to_string();
        let path = options.output_dir.join(format!("{}.js", module.key));
        outcomes.push(write_artifact(path, &code, options.overwrite));
    }

    EmitReport { outcomes }
}

/// Applies the overwrite policy for a single artifact. The parent directory
/// is created first; an existing destination is left untouched unless
/// `overwrite` is set.
fn write_artifact(path: PathBuf, contents: &str, overwrite: bool) -> ArtifactOutcome {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                return ArtifactOutcome {
                    path,
                    status: ArtifactStatus::DirectoryError(err.to_string()),
                };
            }
        }
    }

    if path.exists() && !overwrite {
        return ArtifactOutcome {
            path,
            status: ArtifactStatus::SkippedExists,
        };
    }

    let status = match std::fs::write(&path, contents) {
        Ok(()) => ArtifactStatus::Written,
        Err(err) => ArtifactStatus::WriteError(err.to_string()),
    };
    ArtifactOutcome { path, status }
}
