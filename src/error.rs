use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::schematic::SchematicKind;

/// Failure modes of the generation core.
///
/// Each variant maps to one user-visible outcome so the CLI boundary can
/// render a specific message instead of a generic failure. The core never
/// collapses these into strings internally.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid input: {reason}")]
    Validation { reason: String },

    #[error("{path} already exists; refusing to overwrite")]
    AlreadyExists { path: Utf8PathBuf },

    #[error("{path} not found")]
    NotFound { path: Utf8PathBuf },

    #[error("route registry does not match the expected shape: {reason}")]
    MalformedRegistry { reason: String },

    #[error("unknown schematic `{kind}` (expected one of: {})", SchematicKind::NAMES.join(", "))]
    UnknownSchematic { kind: String },

    #[error("writing {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}", partial_summary(.succeeded, .failed))]
    PartialModule {
        succeeded: Vec<SchematicKind>,
        failed: Vec<(SchematicKind, GenerateError)>,
    },
}

impl GenerateError {
    pub fn validation(reason: impl Into<String>) -> Self {
        GenerateError::Validation {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        GenerateError::MalformedRegistry {
            reason: reason.into(),
        }
    }
}

fn partial_summary(
    succeeded: &[SchematicKind],
    failed: &[(SchematicKind, GenerateError)],
) -> String {
    let ok: Vec<&str> = succeeded.iter().map(SchematicKind::as_str).collect();
    let bad: Vec<String> = failed
        .iter()
        .map(|(kind, err)| format!("{}: {err}", kind.as_str()))
        .collect();
    format!(
        "module generation incomplete: created [{}], failed [{}]",
        ok.join(", "),
        bad.join("; ")
    )
}
