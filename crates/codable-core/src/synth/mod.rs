mod decode;
mod keys;
mod plain;

pub use decode::*;
pub use keys::*;
pub use plain::*;

use crate::{
    classify::{FieldClass, classify},
    error::ExpansionError,
    model::{FieldDeclaration, RecordDeclaration},
};
use derive_more::Display;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Ident;

///
/// Synthesizer
///
/// One independent pass over a record snapshot. Implementations must decide
/// eligibility through `classify` only.
///

pub trait Synthesizer {
    const ARTIFACT: Artifact;

    fn synthesize(record: &RecordDeclaration) -> SynthesisResult;
}

///
/// Artifact
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Artifact {
    #[display("key set")]
    KeySet,

    #[display("decode constructor")]
    DecodeConstructor,

    #[display("plain constructor")]
    PlainConstructor,
}

///
/// Disposition
///

#[derive(Debug, Display)]
pub enum Disposition {
    #[display("emitted")]
    Emitted,

    #[display("skipped: already present")]
    SkippedAlreadyPresent,

    #[display("skipped: no eligible fields")]
    SkippedNoEligibleFields,

    #[display("failed: {_0}")]
    Failed(ExpansionError),
}

impl Disposition {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

///
/// SynthesisResult
///
/// All-or-nothing output of one pass: declarations are only present when
/// the disposition is `Emitted`.
///

#[derive(Debug)]
pub struct SynthesisResult {
    pub artifact: Artifact,
    pub declarations: Vec<SynthesizedDeclaration>,
    pub disposition: Disposition,
}

impl SynthesisResult {
    #[must_use]
    pub const fn emitted(artifact: Artifact, declarations: Vec<SynthesizedDeclaration>) -> Self {
        Self {
            artifact,
            declarations,
            disposition: Disposition::Emitted,
        }
    }

    #[must_use]
    pub const fn skipped_already_present(artifact: Artifact) -> Self {
        Self::without(artifact, Disposition::SkippedAlreadyPresent)
    }

    #[must_use]
    pub const fn skipped_no_eligible_fields(artifact: Artifact) -> Self {
        Self::without(artifact, Disposition::SkippedNoEligibleFields)
    }

    #[must_use]
    pub const fn failed(artifact: Artifact, err: ExpansionError) -> Self {
        Self::without(artifact, Disposition::Failed(err))
    }

    const fn without(artifact: Artifact, disposition: Disposition) -> Self {
        Self {
            artifact,
            declarations: Vec::new(),
            disposition,
        }
    }
}

///
/// SynthesizedDeclaration
///

#[derive(Clone, Debug)]
pub enum SynthesizedDeclaration {
    KeySet(KeySetDecl),
    DecodeConstructor(DecodeConstructorDecl),
    PlainConstructor(PlainConstructorDecl),
}

impl ToTokens for SynthesizedDeclaration {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Self::KeySet(decl) => decl.to_tokens(tokens),
            Self::DecodeConstructor(decl) => decl.to_tokens(tokens),
            Self::PlainConstructor(decl) => decl.to_tokens(tokens),
        }
    }
}

///
/// FieldInit
///
/// One entry of the `Self { .. }` literal a constructor ends with.
///

#[derive(Clone, Debug)]
pub struct FieldInit {
    pub ident: Ident,
    pub expr: TokenStream,
}

impl ToTokens for FieldInit {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = &self.ident;
        let expr = &self.expr;

        tokens.extend(quote!(#ident: #expr));
    }
}

// fallback_init
// What a constructor stores in a field it does not take from its input.
// Computed fields have no storage and get nothing.
pub(crate) fn fallback_init(field: &FieldDeclaration) -> Option<FieldInit> {
    let expr = match (classify(field), &field.default) {
        (FieldClass::StorageEligible | FieldClass::Computed, _) => return None,
        (_, Some(default)) => quote!(#default),
        (_, None) => quote!(::core::default::Default::default()),
    };

    Some(FieldInit {
        ident: field.ident.clone(),
        expr,
    })
}

// comma_list
pub(crate) fn comma_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}
