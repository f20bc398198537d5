/// Convenience result type used across the outline pipeline.
pub type OutlineResult<T> = Result<T, OutlineError>;

/// Top-level error taxonomy used by the outline jobs and their collaborators.
#[derive(thiserror::Error, Debug)]
pub enum OutlineError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// A job was run without an input its caller must always provide.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A GPU resource was queried before it was allocated.
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// A shader asset does not match the contract expected by a pipeline.
    #[error("shader template error: {0}")]
    ShaderTemplate(String),

    /// The GPU backend rejected a request.
    #[error("backend error: {0}")]
    Backend(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OutlineError {
    /// Build an [`OutlineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`OutlineError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build an [`OutlineError::MissingResource`] value.
    pub fn missing_resource(msg: impl Into<String>) -> Self {
        Self::MissingResource(msg.into())
    }

    /// Build an [`OutlineError::ShaderTemplate`] value.
    pub fn shader_template(msg: impl Into<String>) -> Self {
        Self::ShaderTemplate(msg.into())
    }

    /// Build an [`OutlineError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build an [`OutlineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
