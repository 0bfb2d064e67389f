use crate::{
    classify::{FieldClass, classify},
    config::DefaultPolicy,
    error::ExpansionError,
    model::{FieldDeclaration, MemberKind, RecordDeclaration, TypeShape},
    synth::{Artifact, FieldInit, SynthesisResult, SynthesizedDeclaration, Synthesizer, fallback_init},
    util::where_clause_with_bounds,
};
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Generics, Ident, LitStr, Path, Type};
use tracing::trace;

///
/// DecodeConstructorSynth
///

pub struct DecodeConstructorSynth {}

impl Synthesizer for DecodeConstructorSynth {
    const ARTIFACT: Artifact = Artifact::DecodeConstructor;

    fn synthesize(record: &RecordDeclaration) -> SynthesisResult {
        if record.has_member(MemberKind::DecodeConstructor) {
            return SynthesisResult::skipped_already_present(Self::ARTIFACT);
        }

        let mut reads = Vec::new();
        let mut inits = Vec::new();

        for field in &record.fields {
            let read = match (classify(field), record.config.defaults) {
                (FieldClass::StorageEligible, _) => DecodeRead::new(record, field, false),
                (FieldClass::HasDefault, DefaultPolicy::DecodeIfPresent) => {
                    DecodeRead::new(record, field, true)
                }
                _ => {
                    inits.extend(fallback_init(field));
                    continue;
                }
            };

            match read {
                Ok(read) => {
                    inits.push(read.init());
                    reads.push(read);
                }
                Err(err) => return SynthesisResult::failed(Self::ARTIFACT, err),
            }
        }

        // Nothing to read under the active default policy.
        if reads.is_empty() {
            return SynthesisResult::skipped_no_eligible_fields(Self::ARTIFACT);
        }

        trace!(record = %record.ident, reads = reads.len(), "synthesized decode constructor");

        let decl = DecodeConstructorDecl {
            ident: record.ident.clone(),
            generics: record.generics.clone(),
            krate: record.config.crate_path(),
            reads,
            inits,
        };

        SynthesisResult::emitted(
            Self::ARTIFACT,
            vec![SynthesizedDeclaration::DecodeConstructor(decl)],
        )
    }
}

///
/// ReadMode
///

#[derive(Clone, Debug)]
pub enum ReadMode {
    /// Missing key or wrong value fails the whole constructor.
    Required(Type),

    /// Missing key or `null` yields `None`.
    IfPresent(Type),

    /// Present key overrides the inline default; `optional` keeps `Some`.
    OrDefault {
        ty: Type,
        optional: bool,
        default: TokenStream,
    },
}

///
/// DecodeRead
///
/// One `let` statement of the generated constructor.
///

#[derive(Clone, Debug)]
pub struct DecodeRead {
    pub field: Ident,
    pub local: Ident,
    pub key: LitStr,
    pub mode: ReadMode,
}

impl DecodeRead {
    fn new(
        record: &RecordDeclaration,
        field: &FieldDeclaration,
        or_default: bool,
    ) -> Result<Self, ExpansionError> {
        let (ty, optional) = match &field.declared_type.shape {
            TypeShape::Required => (field.ty().clone(), false),
            TypeShape::Optional(inner) => ((**inner).clone(), true),
            TypeShape::Ambiguous(reason) => {
                return Err(ExpansionError::AmbiguousFieldType {
                    type_name: record.type_name(),
                    field: field.name(),
                    reason: *reason,
                    span: field.ident.span(),
                });
            }
        };

        let mode = match (&field.default, or_default, optional) {
            (Some(default), true, _) => ReadMode::OrDefault {
                ty,
                optional,
                default: default.to_token_stream(),
            },
            (_, _, true) => ReadMode::IfPresent(ty),
            (_, _, false) => ReadMode::Required(ty),
        };

        Ok(Self {
            field: field.ident.clone(),
            local: format_ident!("field_{}", field.name()),
            key: LitStr::new(&field.key(), field.ident.span()),
            mode,
        })
    }

    #[must_use]
    pub const fn read_type(&self) -> &Type {
        match &self.mode {
            ReadMode::Required(ty) | ReadMode::IfPresent(ty) | ReadMode::OrDefault { ty, .. } => ty,
        }
    }

    fn init(&self) -> FieldInit {
        let local = &self.local;

        FieldInit {
            ident: self.field.clone(),
            expr: quote!(#local),
        }
    }
}

impl ToTokens for DecodeRead {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let Self { local, key, .. } = self;

        let value = match &self.mode {
            ReadMode::Required(ty) => quote! {
                container.decode::<#ty>(#key)?
            },
            ReadMode::IfPresent(ty) => quote! {
                container.decode_if_present::<#ty>(#key)?
            },
            ReadMode::OrDefault {
                ty,
                optional,
                default,
            } => {
                let present = if *optional {
                    quote!(::core::option::Option::Some(value))
                } else {
                    quote!(value)
                };

                quote! {
                    match container.decode_if_present::<#ty>(#key)? {
                        ::core::option::Option::Some(value) => #present,
                        ::core::option::Option::None => #default,
                    }
                }
            }
        };

        tokens.extend(quote!(let #local = #value;));
    }
}

///
/// DecodeConstructorDecl
///

#[derive(Clone, Debug)]
pub struct DecodeConstructorDecl {
    pub ident: Ident,
    pub generics: Generics,
    pub krate: Path,
    pub reads: Vec<DecodeRead>,
    pub inits: Vec<FieldInit>,
}

impl ToTokens for DecodeConstructorDecl {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let Self {
            ident,
            generics,
            krate,
            reads,
            inits,
        } = self;
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        // Concrete records need no bounds; generic ones need every read
        // type to be decodable.
        let bounds: Vec<TokenStream> = if generics.params.is_empty() {
            Vec::new()
        } else {
            reads
                .iter()
                .map(|read| {
                    let ty = read.read_type();
                    quote!(#ty: #krate::__reexports::serde::de::DeserializeOwned)
                })
                .collect()
        };
        let where_clause = where_clause_with_bounds(where_clause, &bounds);

        tokens.extend(quote! {
            impl #impl_generics #krate::Decode for #ident #ty_generics #where_clause {
                fn decode<C>(container: &C) -> ::core::result::Result<Self, #krate::DecodeError>
                where
                    C: #krate::KeyedContainer + ?Sized,
                {
                    #(#reads)*

                    ::core::result::Result::Ok(Self {
                        #(#inits),*
                    })
                }
            }
        });
    }
}
