//! Error types.

use crate::path::ElementPath;
use crate::view::ViewKind;
use thiserror::Error;

/// Contract violations that abort a render pass.
///
/// None of these are recoverable: once a pass fails, the controller tree and the native views may
/// disagree, and the host should not be driven again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Two children of one content node share an element path.
    #[error("duplicate identity {path} among the children of {parent}")]
    DuplicateIdentity {
        parent: ElementPath,
        path: ElementPath,
    },

    /// A controller was asked to update in place with a description of another kind.
    #[error("cannot update a {current} view in place with a {new} description (at {path})")]
    KindMismatch {
        path: ElementPath,
        current: ViewKind,
        new: ViewKind,
    },

    /// A pass was started (or completions were drained) while a pass was in progress.
    #[error("a render pass was requested while another pass was in progress")]
    Reentrant,
}

/// Rejected geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("layout attribute `{field}` must be finite")]
    NonFinite { field: &'static str },
}
