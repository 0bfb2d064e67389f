use crate::{
    error::ExpansionError,
    model::{MemberKind, RecordDeclaration},
    synth::{
        Artifact, FieldInit, SynthesisResult, SynthesizedDeclaration, Synthesizer, comma_list,
        fallback_init,
    },
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, Type, Visibility};
use tracing::trace;

///
/// PlainConstructorSynth
///

pub struct PlainConstructorSynth {}

impl Synthesizer for PlainConstructorSynth {
    const ARTIFACT: Artifact = Artifact::PlainConstructor;

    fn synthesize(record: &RecordDeclaration) -> SynthesisResult {
        let params: Vec<Param> = record
            .eligible_fields()
            .map(|field| Param {
                ident: field.ident.clone(),
                ty: field.ty().clone(),
            })
            .collect();

        if let Some(existing) = record.existing(MemberKind::PlainConstructor) {
            let expected: Vec<String> = record.eligible_fields().map(|f| f.name()).collect();
            if existing.params == expected {
                return SynthesisResult::skipped_already_present(Self::ARTIFACT);
            }

            // Rust has no overloading, so a second `new` can never coexist.
            return SynthesisResult::failed(
                Self::ARTIFACT,
                ExpansionError::ConflictingConstructor {
                    type_name: record.type_name(),
                    expected: comma_list(expected.iter().map(String::as_str)),
                    found: comma_list(existing.params.iter().map(String::as_str)),
                    span: existing.span,
                },
            );
        }

        if params.is_empty() {
            return SynthesisResult::skipped_no_eligible_fields(Self::ARTIFACT);
        }

        let inits = record
            .fields
            .iter()
            .filter_map(|field| {
                if params.iter().any(|p| p.ident == field.ident) {
                    let ident = &field.ident;
                    Some(FieldInit {
                        ident: ident.clone(),
                        expr: quote!(#ident),
                    })
                } else {
                    fallback_init(field)
                }
            })
            .collect();

        trace!(record = %record.ident, params = params.len(), "synthesized plain constructor");

        let decl = PlainConstructorDecl {
            ident: record.ident.clone(),
            vis: record.vis.clone(),
            generics: record.generics.clone(),
            params,
            inits,
        };

        SynthesisResult::emitted(
            Self::ARTIFACT,
            vec![SynthesizedDeclaration::PlainConstructor(decl)],
        )
    }
}

///
/// Param
///

#[derive(Clone, Debug)]
pub struct Param {
    pub ident: Ident,
    pub ty: Type,
}

impl ToTokens for Param {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let Self { ident, ty } = self;

        tokens.extend(quote!(#ident: #ty));
    }
}

///
/// PlainConstructorDecl
///

#[derive(Clone, Debug)]
pub struct PlainConstructorDecl {
    pub ident: Ident,
    pub vis: Visibility,
    pub generics: Generics,
    pub params: Vec<Param>,
    pub inits: Vec<FieldInit>,
}

impl PlainConstructorDecl {
    #[must_use]
    pub fn param_names(&self) -> Vec<String> {
        self.params.iter().map(|p| p.ident.to_string()).collect()
    }
}

impl ToTokens for PlainConstructorDecl {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let Self {
            ident,
            vis,
            generics,
            params,
            inits,
        } = self;
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        tokens.extend(quote! {
            impl #impl_generics #ident #ty_generics #where_clause {
                #[must_use]
                #[allow(clippy::too_many_arguments)]
                #vis fn new(#(#params),*) -> Self {
                    Self {
                        #(#inits),*
                    }
                }
            }
        });
    }
}
