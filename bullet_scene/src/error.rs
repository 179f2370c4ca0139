// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by element tree operations.

use thiserror::Error;

use crate::NodeId;

/// Errors returned when operating on a [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The id does not resolve to an element (never created, or already removed).
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// The document root cannot be removed.
    #[error("the document root {0} cannot be removed")]
    RootRemoval(NodeId),
}

/// Shorthand for results of element tree operations.
pub type SceneResult<T> = Result<T, SceneError>;
