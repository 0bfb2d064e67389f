use proc_macro2::{Span, TokenStream};
use thiserror::Error as ThisError;

///
/// ExpansionError
///
/// Every fatal condition of an expansion. Each carries the span the compile
/// error is attributed to, and the message names the type (and field).
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ExpansionError {
    #[error("field `{field}` of `{type_name}` has an ambiguous type: {reason}")]
    AmbiguousFieldType {
        type_name: String,
        field: String,
        reason: &'static str,
        span: Span,
    },

    #[error(transparent)]
    Attributes(#[from] darling::Error),

    #[error(
        "`{type_name}` already declares `fn new({found})`, which does not match its storage fields ({expected})"
    )]
    ConflictingConstructor {
        type_name: String,
        expected: String,
        found: String,
        span: Span,
    },

    #[error("field `{field}` of `{type_name}` cannot have both an inline default and a computed accessor")]
    DefaultedComputedField {
        type_name: String,
        field: String,
        span: Span,
    },

    #[error("`{type_name}` already declares the key set `{key_set}`")]
    DuplicateKeySet {
        type_name: String,
        key_set: String,
        span: Span,
    },

    #[error(transparent)]
    Parse(#[from] syn::Error),

    #[error("`{type_name}` is {kind}; `record!` only expands structs with named fields")]
    UnsupportedDeclarationKind {
        type_name: String,
        kind: &'static str,
        span: Span,
    },
}

impl ExpansionError {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::AmbiguousFieldType { span, .. }
            | Self::ConflictingConstructor { span, .. }
            | Self::DefaultedComputedField { span, .. }
            | Self::DuplicateKeySet { span, .. }
            | Self::UnsupportedDeclarationKind { span, .. } => *span,
            Self::Attributes(err) => err.span(),
            Self::Parse(err) => err.span(),
        }
    }

    /// Render as `compile_error!` tokens attributed to the offending source.
    #[must_use]
    pub fn into_compile_error(self) -> TokenStream {
        match self {
            Self::Attributes(err) => err.write_errors(),
            Self::Parse(err) => err.to_compile_error(),
            other => syn::Error::new(other.span(), other.to_string()).to_compile_error(),
        }
    }
}
