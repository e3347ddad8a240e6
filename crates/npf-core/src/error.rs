use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by tensor and masking operations, carrying the operation name
/// and optional shape context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorError {
    #[error("Shape mismatch in operation '{operation}': expected {expected}, got {got}")]
    ShapeMismatch {
        operation: String,
        expected: String,
        got: String,
        context: Option<ErrorContext>,
    },

    #[error("Invalid shape in operation '{operation}': {reason}")]
    InvalidShape {
        operation: String,
        reason: String,
        shape: Option<Vec<usize>>,
        context: Option<ErrorContext>,
    },

    #[error("Invalid axis {axis} in operation '{operation}' for tensor with {ndim} dimensions")]
    InvalidAxis {
        operation: String,
        axis: i64,
        ndim: usize,
        context: Option<ErrorContext>,
    },

    #[error("Invalid configuration in operation '{operation}': {reason}")]
    InvalidConfiguration {
        operation: String,
        reason: String,
        context: Option<ErrorContext>,
    },

    #[error("Invalid argument in operation '{operation}': {reason}")]
    InvalidArgument {
        operation: String,
        reason: String,
        context: Option<ErrorContext>,
    },

    #[error("Numerical error in operation '{operation}': {details}")]
    NumericalError {
        operation: String,
        details: String,
        context: Option<ErrorContext>,
    },
}

/// Coarse classification of [`TensorError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Contradictory or structurally invalid call configuration. Always a caller bug.
    Configuration,
    /// Shapes or ranks that are individually valid but mutually incompatible.
    Shape,
    /// Malformed inputs to the engine itself.
    Argument,
}

/// Additional context information for errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Input tensor shapes
    pub input_shapes: Vec<Vec<usize>>,
    /// Additional metadata, e.g. resolved axes
    pub metadata: BTreeMap<String, String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input tensor shape
    pub fn with_input_shape(mut self, shape: &[usize]) -> Self {
        self.input_shapes.push(shape.to_vec());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl TensorError {
    pub fn shape_mismatch(operation: &str, expected: &str, got: &str) -> Self {
        Self::ShapeMismatch {
            operation: operation.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
            context: None,
        }
    }

    pub fn invalid_shape(operation: &str, reason: String, shape: Option<&[usize]>) -> Self {
        Self::InvalidShape {
            operation: operation.to_string(),
            reason,
            shape: shape.map(<[usize]>::to_vec),
            context: None,
        }
    }

    pub fn invalid_axis(operation: &str, axis: i64, ndim: usize) -> Self {
        Self::InvalidAxis {
            operation: operation.to_string(),
            axis,
            ndim,
            context: None,
        }
    }

    pub fn invalid_configuration(operation: &str, reason: String) -> Self {
        Self::InvalidConfiguration {
            operation: operation.to_string(),
            reason,
            context: None,
        }
    }

    pub fn invalid_argument(operation: &str, reason: String) -> Self {
        Self::InvalidArgument {
            operation: operation.to_string(),
            reason,
            context: None,
        }
    }

    pub fn numerical_error(operation: &str, details: String) -> Self {
        Self::NumericalError {
            operation: operation.to_string(),
            details,
            context: None,
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        match &mut self {
            Self::ShapeMismatch { context: ctx, .. }
            | Self::InvalidShape { context: ctx, .. }
            | Self::InvalidAxis { context: ctx, .. }
            | Self::InvalidConfiguration { context: ctx, .. }
            | Self::InvalidArgument { context: ctx, .. }
            | Self::NumericalError { context: ctx, .. } => *ctx = Some(context),
        }
        self
    }

    /// Get the operation name for this error
    pub fn operation(&self) -> &str {
        match self {
            Self::ShapeMismatch { operation, .. }
            | Self::InvalidShape { operation, .. }
            | Self::InvalidAxis { operation, .. }
            | Self::InvalidConfiguration { operation, .. }
            | Self::InvalidArgument { operation, .. }
            | Self::NumericalError { operation, .. } => operation,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::ShapeMismatch { context, .. }
            | Self::InvalidShape { context, .. }
            | Self::InvalidAxis { context, .. }
            | Self::InvalidConfiguration { context, .. }
            | Self::InvalidArgument { context, .. }
            | Self::NumericalError { context, .. } => context.as_ref(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::Configuration,
            Self::ShapeMismatch { .. } | Self::InvalidShape { .. } | Self::InvalidAxis { .. } => {
                ErrorKind::Shape
            }
            Self::InvalidArgument { .. } | Self::NumericalError { .. } => ErrorKind::Argument,
        }
    }

    pub fn is_shape_error(&self) -> bool {
        self.kind() == ErrorKind::Shape
    }

    pub fn is_configuration_error(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

pub type Result<T> = std::result::Result<T, TensorError>;

/// Convert from scirs2_core::ndarray::ShapeError to TensorError
impl From<scirs2_core::ndarray::ShapeError> for TensorError {
    fn from(err: scirs2_core::ndarray::ShapeError) -> Self {
        Self::InvalidShape {
            operation: "ndarray".to_string(),
            reason: err.to_string(),
            shape: None,
            context: None,
        }
    }
}
