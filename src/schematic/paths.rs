use camino::{Utf8Path, Utf8PathBuf};

use super::SchematicKind;

// Fixed backend-project layout the generator targets.
pub const SOURCE_DIR: &str = "src";
pub const APP_DIR: &str = "app";
pub const MODULES_DIR: &str = "modules";
pub const ROUTES_DIR: &str = "routes";
pub const ROUTE_INDEX_FILE: &str = "index.ts";

pub fn modules_dir(project_root: &Utf8Path) -> Utf8PathBuf {
    project_root.join(SOURCE_DIR).join(APP_DIR).join(MODULES_DIR)
}

pub fn module_dir(project_root: &Utf8Path, name: &str) -> Utf8PathBuf {
    modules_dir(project_root).join(name)
}

/// Destination for one generated schematic file. Pure concatenation; distinct
/// `(kind, name)` pairs never collide because both appear in the file name.
pub fn output_path(project_root: &Utf8Path, kind: SchematicKind, name: &str) -> Utf8PathBuf {
    module_dir(project_root, name).join(format!("{name}.{}.ts", kind.as_str()))
}

/// The aggregator file that imports and mounts every module's routes.
pub fn route_index_path(project_root: &Utf8Path) -> Utf8PathBuf {
    project_root
        .join(SOURCE_DIR)
        .join(APP_DIR)
        .join(ROUTES_DIR)
        .join(ROUTE_INDEX_FILE)
}
