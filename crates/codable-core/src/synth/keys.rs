use crate::{
    error::ExpansionError,
    model::{FieldDeclaration, MemberKind, RecordDeclaration},
    synth::{Artifact, SynthesisResult, SynthesizedDeclaration, Synthesizer},
};
use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Ident, LitStr, Path, Visibility};
use tracing::trace;

///
/// KeySetSynth
///

pub struct KeySetSynth {}

impl Synthesizer for KeySetSynth {
    const ARTIFACT: Artifact = Artifact::KeySet;

    fn synthesize(record: &RecordDeclaration) -> SynthesisResult {
        // A hand-written key set is never shadowed or merged, even when
        // there would be nothing to generate.
        if let Some(existing) = record.existing(MemberKind::KeySetDeclaration) {
            return SynthesisResult::failed(
                Self::ARTIFACT,
                ExpansionError::DuplicateKeySet {
                    type_name: record.type_name(),
                    key_set: existing.name.clone(),
                    span: existing.span,
                },
            );
        }

        let entries: Vec<KeyEntry> = record
            .eligible_fields()
            .map(|field| KeyEntry {
                variant: variant_ident(field),
                key: LitStr::new(&field.key(), field.ident.span()),
            })
            .collect();

        if entries.is_empty() {
            return SynthesisResult::skipped_no_eligible_fields(Self::ARTIFACT);
        }

        trace!(record = %record.ident, keys = entries.len(), "synthesized key set");

        let decl = KeySetDecl {
            ident: record.key_set_ident(),
            vis: record.vis.clone(),
            krate: record.config.crate_path(),
            entries,
        };

        SynthesisResult::emitted(Self::ARTIFACT, vec![SynthesizedDeclaration::KeySet(decl)])
    }
}

// variant_ident
// PascalCase of the field name. Names that stop being identifiers once
// cased (`_0`, `__`) get an `F` prefix.
fn variant_ident(field: &FieldDeclaration) -> Ident {
    let pascal = field.name().to_case(Case::Pascal);
    let mut ident =
        syn::parse_str::<Ident>(&pascal).unwrap_or_else(|_| format_ident!("F{pascal}"));
    ident.set_span(field.ident.span());

    ident
}

///
/// KeyEntry
///

#[derive(Clone, Debug)]
pub struct KeyEntry {
    pub variant: Ident,
    pub key: LitStr,
}

///
/// KeySetDecl
///

#[derive(Clone, Debug)]
pub struct KeySetDecl {
    pub ident: Ident,
    pub vis: Visibility,
    pub krate: Path,
    pub entries: Vec<KeyEntry>,
}

impl KeySetDecl {
    /// Keys in enumeration order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key.value()).collect()
    }
}

impl ToTokens for KeySetDecl {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let Self {
            ident,
            vis,
            krate,
            entries,
        } = self;
        let variants: Vec<_> = entries.iter().map(|e| &e.variant).collect();
        let keys = entries.iter().map(|e| &e.key);

        tokens.extend(quote! {
            #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
            #vis enum #ident {
                #(#variants),*
            }

            impl #krate::KeySet for #ident {
                const ALL: &'static [Self] = &[#(Self::#variants),*];

                fn as_str(self) -> &'static str {
                    match self {
                        #(Self::#variants => #keys),*
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::ExistingMember, synth::Disposition};
    use proc_macro2::Span;
    use proptest::prelude::*;
    use syn::parse_quote;

    fn key_set(result: &SynthesisResult) -> &KeySetDecl {
        match result.declarations.as_slice() {
            [SynthesizedDeclaration::KeySet(decl)] => decl,
            other => panic!("expected one key set, got {other:?}"),
        }
    }

    #[test]
    fn one_key_per_eligible_field_in_declaration_order() {
        let record = RecordDeclaration::new(
            format_ident!("Account"),
            vec![
                FieldDeclaration::new(format_ident!("id"), parse_quote!(u128)),
                FieldDeclaration::new(format_ident!("created"), parse_quote!(u64))
                    .with_default(parse_quote!(0)),
                FieldDeclaration::new(format_ident!("display_name"), parse_quote!(Option<String>)),
                FieldDeclaration::new(format_ident!("label"), parse_quote!(String))
                    .with_accessor(parse_quote!({ String::new() })),
            ],
        );

        let result = KeySetSynth::synthesize(&record);

        assert!(matches!(result.disposition, Disposition::Emitted));
        let decl = key_set(&result);
        assert_eq!(decl.ident, "AccountKey");
        assert_eq!(decl.keys(), vec!["id", "display_name"]);
        let variants: Vec<_> = decl.entries.iter().map(|e| e.variant.to_string()).collect();
        assert_eq!(variants, vec!["Id", "DisplayName"]);
    }

    #[test]
    fn rename_changes_the_key_not_the_variant() {
        let record = RecordDeclaration::new(
            format_ident!("Account"),
            vec![
                FieldDeclaration::new(format_ident!("display_name"), parse_quote!(String))
                    .with_rename("displayName"),
            ],
        );

        let result = KeySetSynth::synthesize(&record);
        let decl = key_set(&result);

        assert_eq!(decl.keys(), vec!["displayName"]);
        assert_eq!(decl.entries[0].variant, "DisplayName");
    }

    #[test]
    fn no_eligible_fields_is_a_skip() {
        let record = RecordDeclaration::new(
            format_ident!("Empty"),
            vec![FieldDeclaration::new(format_ident!("id"), parse_quote!(u64)).with_marker()],
        );

        let result = KeySetSynth::synthesize(&record);

        assert!(matches!(
            result.disposition,
            Disposition::SkippedNoEligibleFields
        ));
        assert!(result.declarations.is_empty());
    }

    #[test]
    fn hand_written_key_set_is_fatal_without_eligible_fields() {
        let record = RecordDeclaration::new(
            format_ident!("Empty"),
            vec![
                FieldDeclaration::new(format_ident!("id"), parse_quote!(u64))
                    .with_default(parse_quote!(0)),
            ],
        )
        .with_member(ExistingMember::new(
            MemberKind::KeySetDeclaration,
            "EmptyKey",
            Span::call_site(),
        ));

        let result = KeySetSynth::synthesize(&record);

        let Disposition::Failed(err) = &result.disposition else {
            panic!("expected failure, got {}", result.disposition);
        };
        assert!(matches!(err, ExpansionError::DuplicateKeySet { .. }));
        assert!(result.declarations.is_empty());
    }

    #[test]
    fn numeric_field_names_get_a_prefixed_variant() {
        let record = RecordDeclaration::new(
            format_ident!("Pair"),
            vec![
                FieldDeclaration::new(format_ident!("_0"), parse_quote!(u8)),
                FieldDeclaration::new(format_ident!("__"), parse_quote!(u8)),
            ],
        );

        let result = KeySetSynth::synthesize(&record);
        let decl = key_set(&result);

        assert_eq!(decl.keys(), vec!["_0", "__"]);
        assert_eq!(decl.entries[0].variant, "F0");
        for entry in &decl.entries {
            assert!(syn::parse_str::<Ident>(&entry.variant.to_string()).is_ok());
        }
    }

    #[test]
    fn hand_written_key_set_is_fatal() {
        let record = RecordDeclaration::new(
            format_ident!("Account"),
            vec![FieldDeclaration::new(format_ident!("id"), parse_quote!(u64))],
        )
        .with_member(ExistingMember::new(
            MemberKind::KeySetDeclaration,
            "AccountKey",
            Span::call_site(),
        ));

        let result = KeySetSynth::synthesize(&record);

        let Disposition::Failed(err) = &result.disposition else {
            panic!("expected failure, got {}", result.disposition);
        };
        assert!(matches!(err, ExpansionError::DuplicateKeySet { .. }));
        assert_eq!(
            err.to_string(),
            "`Account` already declares the key set `AccountKey`"
        );
        assert!(result.declarations.is_empty());
    }

    #[test]
    fn rendered_enum_lists_every_variant() {
        let record = RecordDeclaration::new(
            format_ident!("Pair"),
            vec![
                FieldDeclaration::new(format_ident!("left"), parse_quote!(u8)),
                FieldDeclaration::new(format_ident!("right"), parse_quote!(u8)),
            ],
        );

        let result = KeySetSynth::synthesize(&record);
        let rendered = key_set(&result).to_token_stream().to_string();

        assert!(rendered.contains("enum PairKey { Left , Right }"));
        assert!(rendered.contains("impl :: codable :: KeySet for PairKey"));
        assert!(rendered.contains("Self :: Left => \"left\""));
    }

    proptest! {
        #[test]
        fn keys_correspond_to_eligible_fields(
            flags in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..10),
        ) {
            let fields: Vec<_> = flags
                .iter()
                .enumerate()
                .map(|(i, (default, computed, marked))| {
                    let mut f = FieldDeclaration::new(format_ident!("field_{i}"), parse_quote!(u8));
                    if *default {
                        f = f.with_default(parse_quote!(0));
                    }
                    if *computed {
                        f = f.with_accessor(parse_quote!({ 0 }));
                    }
                    if *marked {
                        f = f.with_marker();
                    }
                    f
                })
                .collect();
            let expected: Vec<String> = flags
                .iter()
                .enumerate()
                .filter(|(_, (d, c, m))| !d && !c && !m)
                .map(|(i, _)| format!("field_{i}"))
                .collect();
            let record = RecordDeclaration::new(format_ident!("Generated"), fields);

            let result = KeySetSynth::synthesize(&record);

            if expected.is_empty() {
                prop_assert!(matches!(result.disposition, Disposition::SkippedNoEligibleFields));
            } else {
                prop_assert_eq!(key_set(&result).keys(), expected);
            }
        }
    }
}
