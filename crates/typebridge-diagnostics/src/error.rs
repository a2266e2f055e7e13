//! TypeBridge error types

use crate::{ErrorCode, Span, TB0300};
use thiserror::Error;

/// Main TypeBridge error type
///
/// Leaf variants describe what went wrong with a single value or definition.
/// `Column` and `Cell` wrap a leaf error with the position it occurred at
/// during bulk row conversion.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// Type definition rejected by the registry
    #[error("{code}: {message}")]
    InvalidDefinition { code: ErrorCode, message: String },

    /// A registered definition or backend handler failed to convert a value
    #[error("{code}: cannot convert '{value}' to {target}: {message}")]
    Conversion {
        code: ErrorCode,
        value: String,
        target: String,
        message: String,
    },

    /// Array literal with unbalanced brackets or quotes
    #[error("{code}: malformed array literal {literal:?}: {message}")]
    MalformedArrayLiteral {
        code: ErrorCode,
        message: String,
        literal: String,
        span: Option<Span>,
    },

    /// Converter configuration could not be loaded
    #[error("{code}: {message}")]
    Config { code: ErrorCode, message: String },

    /// Error raised while converting a named column of a row
    #[error("column {column}: {source}")]
    Column {
        column: String,
        source: Box<ConvertError>,
    },

    /// Error raised while stringifying one cell of a result set
    #[error("row {row}, column {column}: {source}")]
    Cell {
        row: usize,
        column: usize,
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// Create an invalid definition error
    pub fn invalid_definition(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            code,
            message: message.into(),
        }
    }

    /// Create a conversion error
    pub fn conversion(
        code: ErrorCode,
        value: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            code,
            value: value.into(),
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a malformed array literal error
    pub fn malformed_array(
        code: ErrorCode,
        message: impl Into<String>,
        literal: impl Into<String>,
    ) -> Self {
        Self::MalformedArrayLiteral {
            code,
            message: message.into(),
            literal: literal.into(),
            span: None,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: TB0300,
            message: message.into(),
        }
    }

    /// Attach a span to a malformed array literal error
    pub fn with_span(mut self, at: Span) -> Self {
        if let Self::MalformedArrayLiteral { span, .. } = &mut self {
            *span = Some(at);
        }
        self
    }

    /// Wrap this error with the name of the column being converted
    pub fn in_column(self, column: impl Into<String>) -> Self {
        Self::Column {
            column: column.into(),
            source: Box::new(self),
        }
    }

    /// Wrap this error with the row and column index of the failing cell
    pub fn in_cell(self, row: usize, column: usize) -> Self {
        Self::Cell {
            row,
            column,
            source: Box::new(self),
        }
    }

    /// Get the error code of the underlying failure
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidDefinition { code, .. } => *code,
            Self::Conversion { code, .. } => *code,
            Self::MalformedArrayLiteral { code, .. } => *code,
            Self::Config { code, .. } => *code,
            Self::Column { source, .. } | Self::Cell { source, .. } => source.code(),
        }
    }

    /// Get the innermost error, skipping row/column context
    pub fn root(&self) -> &ConvertError {
        match self {
            Self::Column { source, .. } | Self::Cell { source, .. } => source.root(),
            other => other,
        }
    }

    /// Get the span into the literal, if this is an array literal error
    pub fn span(&self) -> Option<Span> {
        match self.root() {
            Self::MalformedArrayLiteral { span, .. } => *span,
            _ => None,
        }
    }

    /// Name of the column the error occurred in, if known
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Self::Column { column, .. } => Some(column),
            Self::Cell { source, .. } => source.column_name(),
            _ => None,
        }
    }

    /// Check whether the root cause is a malformed array literal
    pub fn is_malformed_array_literal(&self) -> bool {
        matches!(self.root(), Self::MalformedArrayLiteral { .. })
    }
}
