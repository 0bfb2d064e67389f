//! ## Crate layout
//! - `model`: the declaration snapshot (`RecordDeclaration`, `FieldDeclaration`).
//! - `classify`: the single field eligibility predicate shared by every pass.
//! - `annotate`: the ignore pre-pass that marks non-eligible fields.
//! - `synth`: key set, decode constructor and plain constructor synthesizers.
//! - `reader` / `emit`: the token boundary on either side of the passes.
//!
//! `codable-macros` is a thin proc-macro shell over [`expand`]; everything
//! here is plain library code so the passes can be tested without rustc.

pub mod annotate;
pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod model;
pub mod reader;
pub mod synth;

mod util;

use crate::{
    emit::{EmitOutcome, Emitter},
    synth::{DecodeConstructorSynth, KeySetSynth, PlainConstructorSynth, Synthesizer},
};
use proc_macro2::TokenStream;
use tracing::debug;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        annotate::{AttachmentDirective, MarkerKind},
        classify::{FieldClass, FieldFlags, classify},
        config::{DefaultPolicy, ExpansionConfig},
        error::ExpansionError,
        model::*,
        synth::{Artifact, Disposition, SynthesisResult, SynthesizedDeclaration},
    };
    pub use proc_macro2::{Span, TokenStream};
    pub use quote::{ToTokens, format_ident, quote};
    pub use syn::{Ident, Type};
}

// expand
/// Run one expansion: read the record, run every pass, emit the result.
#[must_use]
pub fn expand(input: TokenStream) -> TokenStream {
    match reader::read(input) {
        Ok(record) => expand_record(&record).into_token_stream(),
        Err(err) => err.into_compile_error(),
    }
}

/// Run the pre-pass and the three synthesizers over an already-read record.
///
/// The synthesizers never see each other's output; a failure in one of them
/// is reported alongside whatever the others produced.
#[must_use]
pub fn expand_record(record: &model::RecordDeclaration) -> EmitOutcome {
    let directives = annotate::annotate(&record.fields);
    debug!(
        record = %record.ident,
        directives = directives.len(),
        "annotated non-eligible fields"
    );

    let results = vec![
        KeySetSynth::synthesize(record),
        DecodeConstructorSynth::synthesize(record),
        PlainConstructorSynth::synthesize(record),
    ];

    Emitter::new(record).emit(&directives, results)
}
