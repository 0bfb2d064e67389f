use crate::{
    annotate::{AttachmentDirective, apply},
    error::ExpansionError,
    model::{FieldDeclaration, RecordDeclaration},
    synth::{Disposition, SynthesisResult},
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use tracing::debug;

///
/// EmitOutcome
///

#[derive(Debug)]
pub enum EmitOutcome {
    Installed(TokenStream),
    Failed {
        tokens: TokenStream,
        errors: Vec<ExpansionError>,
    },
}

impl EmitOutcome {
    #[must_use]
    pub const fn is_installed(&self) -> bool {
        matches!(self, Self::Installed(_))
    }

    #[must_use]
    pub fn errors(&self) -> &[ExpansionError] {
        match self {
            Self::Installed(_) => &[],
            Self::Failed { errors, .. } => errors,
        }
    }

    /// Everything that was installed, followed by one `compile_error!` per
    /// failed artifact.
    #[must_use]
    pub fn into_token_stream(self) -> TokenStream {
        match self {
            Self::Installed(tokens) => tokens,
            Self::Failed { mut tokens, errors } => {
                for err in errors {
                    tokens.extend(err.into_compile_error());
                }
                tokens
            }
        }
    }
}

///
/// Emitter
///
/// Installs the record, its hand-written members and every emitted
/// artifact. Failed artifacts are collected, never partially emitted.
///

pub struct Emitter<'a> {
    record: &'a RecordDeclaration,
}

impl<'a> Emitter<'a> {
    #[must_use]
    pub const fn new(record: &'a RecordDeclaration) -> Self {
        Self { record }
    }

    #[must_use]
    pub fn emit(
        &self,
        directives: &[AttachmentDirective],
        results: Vec<SynthesisResult>,
    ) -> EmitOutcome {
        let marked = apply(self.record, directives);

        let mut tokens = self.type_part();
        tokens.extend(self.accessor_part());
        tokens.extend(self.record_part(&marked));
        tokens.extend(self.record.passthrough.iter().map(ToTokens::to_token_stream));

        let mut errors = Vec::new();
        for result in results {
            debug!(
                record = %self.record.ident,
                artifact = %result.artifact,
                disposition = %result.disposition,
                "synthesis finished"
            );

            match result.disposition {
                Disposition::Emitted => {
                    for decl in &result.declarations {
                        decl.to_tokens(&mut tokens);
                    }
                }
                Disposition::Failed(err) => errors.push(err),
                Disposition::SkippedAlreadyPresent | Disposition::SkippedNoEligibleFields => {}
            }
        }

        if errors.is_empty() {
            EmitOutcome::Installed(tokens)
        } else {
            EmitOutcome::Failed { tokens, errors }
        }
    }

    // type_part
    // The struct itself, storage fields only.
    fn type_part(&self) -> TokenStream {
        let RecordDeclaration {
            attrs,
            vis,
            ident,
            generics,
            ..
        } = self.record;
        let where_clause = &generics.where_clause;
        let fields = self
            .record
            .fields
            .iter()
            .filter(|f| !f.is_computed())
            .map(|f| {
                let FieldDeclaration {
                    attrs, vis, ident, ..
                } = f;
                let ty = f.ty();

                quote!(#(#attrs)* #vis #ident: #ty)
            });

        quote! {
            #(#attrs)*
            #vis struct #ident #generics #where_clause {
                #(#fields),*
            }
        }
    }

    // accessor_part
    // Computed fields become `&self` methods returning the declared type.
    fn accessor_part(&self) -> TokenStream {
        let accessors: Vec<_> = self
            .record
            .fields
            .iter()
            .filter_map(|f| {
                let block = f.accessor.as_ref()?;
                let FieldDeclaration {
                    attrs, vis, ident, ..
                } = f;
                let ty = f.ty();

                Some(quote! {
                    #(#attrs)*
                    #[must_use]
                    #vis fn #ident(&self) -> #ty #block
                })
            })
            .collect();

        if accessors.is_empty() {
            return TokenStream::new();
        }

        let ident = &self.record.ident;
        let (impl_generics, ty_generics, where_clause) = self.record.generics.split_for_impl();

        quote! {
            impl #impl_generics #ident #ty_generics #where_clause {
                #(#accessors)*
            }
        }
    }

    // record_part
    // Publishes the exclusion markers so tools can read them back.
    fn record_part(&self, marked: &RecordDeclaration) -> TokenStream {
        let ident = &self.record.ident;
        let type_name = self.record.type_name();
        let krate = self.record.config.crate_path();
        let (impl_generics, ty_generics, where_clause) = self.record.generics.split_for_impl();
        let excluded: Vec<String> = marked
            .fields
            .iter()
            .filter(|f| f.is_explicitly_excluded())
            .map(FieldDeclaration::name)
            .collect();

        quote! {
            impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
                const TYPE_NAME: &'static str = #type_name;
                const EXCLUDED: &'static [&'static str] = &[#(#excluded),*];
            }
        }
    }
}
