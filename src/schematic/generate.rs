use std::thread;

use camino::{Utf8Path, Utf8PathBuf};

use super::{GenerationContext, ProjectCapabilities, SchematicKind, paths, templates, validate_name};
use crate::error::GenerateError;
use crate::project;
use crate::routes;
use crate::util::fs;

#[derive(Clone, Copy, Debug, Default)]
pub struct GenerateOptions {
    /// Module generation validates the project layout once up front; the
    /// per-kind calls it fans out set this to skip the redundant re-checks.
    pub skip_project_check: bool,
}

/// CLI-facing entry point: resolve the kind string and dispatch. `module`
/// (alias `mo`) expands to a full module; anything else must be a schematic
/// from the closed set. Parsing happens before any filesystem effect.
pub fn run(project_root: &Utf8Path, kind: &str, name: &str) -> Result<(), GenerateError> {
    match kind {
        "module" | "mo" => generate_module(project_root, name),
        other => {
            let kind = SchematicKind::parse(other)?;
            generate_schematic(project_root, kind, name, GenerateOptions::default()).map(|_| ())
        }
    }
}

/// Generate a single schematic file. Exactly one file is created on success;
/// nothing is written on any failure path, and an existing target is never
/// overwritten.
pub fn generate_schematic(
    project_root: &Utf8Path,
    kind: SchematicKind,
    name: &str,
    opts: GenerateOptions,
) -> Result<Utf8PathBuf, GenerateError> {
    validate_name(name)?;
    if !opts.skip_project_check {
        project::validate_structure(project_root)?;
    }

    let ctx = GenerationContext::new(name);
    let path = paths::output_path(project_root, kind, &ctx.name);
    if fs::path_exists(&path) {
        return Err(GenerateError::AlreadyExists { path });
    }

    let caps = ProjectCapabilities::detect(project_root);
    let content = templates::render(kind, &ctx, caps)?;

    if let Some(parent) = path.parent() {
        fs::ensure_dir(parent).map_err(|source| GenerateError::Write {
            path: parent.to_owned(),
            source,
        })?;
    }
    fs::write_text(&path, &content).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!("created {}", path);
    Ok(path)
}

/// Generate every schematic for one module, then register its routes.
///
/// The per-kind writes are independent and run on scoped threads; completion
/// order does not matter. The registry edit runs only after all six files
/// exist, so a partial failure never leaves the registry pointing at a
/// half-written module. Already-written files are kept on failure (no
/// rollback); the aggregate error names what succeeded and what did not.
pub fn generate_module(project_root: &Utf8Path, name: &str) -> Result<(), GenerateError> {
    validate_name(name)?;
    project::validate_structure(project_root)?;

    let ctx = GenerationContext::new(name);
    let module_dir = paths::module_dir(project_root, &ctx.name);
    if fs::path_exists(&module_dir) {
        return Err(GenerateError::AlreadyExists { path: module_dir });
    }

    let opts = GenerateOptions {
        skip_project_check: true,
    };
    let name = ctx.name.as_str();
    let results: Vec<(SchematicKind, Result<Utf8PathBuf, GenerateError>)> =
        thread::scope(|scope| {
            let handles: Vec<_> = SchematicKind::ALL
                .into_iter()
                .map(|kind| {
                    let handle =
                        scope.spawn(move || generate_schematic(project_root, kind, name, opts));
                    (kind, handle)
                })
                .collect();
            handles
                .into_iter()
                .map(|(kind, handle)| {
                    let result = handle
                        .join()
                        .unwrap_or_else(|_| Err(GenerateError::validation("generation panicked")));
                    (kind, result)
                })
                .collect()
        });

    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for (kind, result) in results {
        match result {
            Ok(_) => succeeded.push(kind),
            Err(err) => failed.push((kind, err)),
        }
    }
    if !failed.is_empty() {
        return Err(GenerateError::PartialModule { succeeded, failed });
    }

    routes::register_module_route(&paths::route_index_path(project_root), &ctx.name)
}
