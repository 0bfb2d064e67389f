//! Declaration reader: turns the body of `record! { .. }` into a
//! [`RecordDeclaration`].
//!
//! The first item is the target; it must be a struct with named fields.
//! Inside it, fields may carry `= expr` (inline default) or a trailing
//! `{ .. }` block (computed accessor). Every following item is a
//! hand-written member and is scanned for constructors and a key set.

use crate::{
    config::{ExpansionConfig, FieldAttrs, strip_codable_attrs},
    error::ExpansionError,
    model::{
        DeclaredType, ExistingMember, FieldDeclaration, FieldList, MemberKind, RecordDeclaration,
    },
};
use darling::FromAttributes;
use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::{
    Attribute, Block, Expr, Fields, FnArg, Generics, Ident, ImplItem, Item, Pat, Token, Type,
    Visibility, WhereClause, braced,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    token,
};
use tracing::debug;

// read
/// Read one record declaration from macro input.
pub fn read(input: TokenStream) -> Result<RecordDeclaration, ExpansionError> {
    let RecordInput { target, members } = syn::parse2(input)?;

    let record = match target {
        Target::Record(record) => record,
        Target::Other(item) => return Err(unsupported(&item)),
    };

    let declaration = record.into_declaration(members)?;
    debug!(
        record = %declaration.ident,
        fields = declaration.fields.len(),
        members = declaration.members.len(),
        "read record declaration"
    );

    Ok(declaration)
}

///
/// RecordInput
///

struct RecordInput {
    target: Target,
    members: Vec<Item>,
}

enum Target {
    Record(RawRecord),
    Other(Item),
}

impl Parse for RecordInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let target = if peek_named_struct(input) {
            Target::Record(input.parse()?)
        } else {
            Target::Other(input.parse()?)
        };

        let mut members = Vec::new();
        while !input.is_empty() {
            members.push(input.parse()?);
        }

        Ok(Self { target, members })
    }
}

// peek_named_struct
// Looks ahead on a fork so tuple and unit structs fall through to `Item`.
fn peek_named_struct(input: ParseStream) -> bool {
    named_struct_header(&input.fork()).unwrap_or(false)
}

fn named_struct_header(input: ParseStream) -> syn::Result<bool> {
    input.call(Attribute::parse_outer)?;
    input.parse::<Visibility>()?;
    if !input.peek(Token![struct]) {
        return Ok(false);
    }
    input.parse::<Token![struct]>()?;
    input.parse::<Ident>()?;
    input.parse::<Generics>()?;
    if input.peek(Token![where]) {
        input.parse::<WhereClause>()?;
    }

    Ok(input.peek(token::Brace))
}

///
/// RawRecord
///

struct RawRecord {
    attrs: Vec<Attribute>,
    vis: Visibility,
    ident: Ident,
    generics: Generics,
    fields: Punctuated<RawField, Token![,]>,
}

impl Parse for RawRecord {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;
        input.parse::<Token![struct]>()?;
        let ident = input.parse()?;
        let mut generics: Generics = input.parse()?;
        if input.peek(Token![where]) {
            generics.where_clause = Some(input.parse()?);
        }

        let content;
        braced!(content in input);
        let fields = content.parse_terminated(RawField::parse, Token![,])?;

        Ok(Self {
            attrs,
            vis,
            ident,
            generics,
            fields,
        })
    }
}

impl RawRecord {
    fn into_declaration(self, members: Vec<Item>) -> Result<RecordDeclaration, ExpansionError> {
        let config = ExpansionConfig::from_attributes(&self.attrs)?;
        let type_name = self.ident.to_string();

        let fields = self
            .fields
            .into_iter()
            .map(|field| field.into_declaration(&type_name))
            .collect::<Result<FieldList, _>>()?;

        let key_set = config.key_set_ident(&self.ident);
        let existing = members
            .iter()
            .flat_map(|item| scan_member(item, &self.ident, &key_set))
            .collect();

        Ok(RecordDeclaration {
            attrs: strip_codable_attrs(&self.attrs),
            vis: self.vis,
            ident: self.ident,
            generics: self.generics,
            fields,
            members: existing,
            passthrough: members,
            config,
        })
    }
}

///
/// RawField
///

struct RawField {
    attrs: Vec<Attribute>,
    vis: Visibility,
    ident: Ident,
    ty: Type,
    default: Option<Expr>,
    accessor: Option<Block>,
}

impl Parse for RawField {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;
        let ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty = input.parse()?;

        let default = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };

        let accessor = if input.peek(token::Brace) {
            Some(input.parse()?)
        } else {
            None
        };

        Ok(Self {
            attrs,
            vis,
            ident,
            ty,
            default,
            accessor,
        })
    }
}

impl RawField {
    fn into_declaration(self, type_name: &str) -> Result<FieldDeclaration, ExpansionError> {
        if self.default.is_some() && self.accessor.is_some() {
            return Err(ExpansionError::DefaultedComputedField {
                type_name: type_name.to_string(),
                field: self.ident.unraw().to_string(),
                span: self.ident.span(),
            });
        }

        let FieldAttrs { skip, rename } = FieldAttrs::from_attributes(&self.attrs)?;

        Ok(FieldDeclaration {
            attrs: strip_codable_attrs(&self.attrs),
            vis: self.vis,
            ident: self.ident,
            declared_type: DeclaredType::new(self.ty),
            default: self.default,
            accessor: self.accessor,
            excluded: skip,
            rename,
        })
    }
}

// scan_member
// Classify one hand-written item that sits next to the record.
fn scan_member(item: &Item, record: &Ident, key_set: &Ident) -> Vec<ExistingMember> {
    match item {
        Item::Enum(item) if item.ident == *key_set => vec![ExistingMember::new(
            MemberKind::KeySetDeclaration,
            item.ident.to_string(),
            item.ident.span(),
        )],

        Item::Impl(item) if names_type(&item.self_ty, record) => match &item.trait_ {
            Some((_, path, _)) if path.segments.last().is_some_and(|s| s.ident == "Decode") => {
                vec![ExistingMember::new(
                    MemberKind::DecodeConstructor,
                    path.to_token_stream().to_string().replace(' ', ""),
                    path.span(),
                )]
            }
            Some(_) => Vec::new(),
            None => item
                .items
                .iter()
                .filter_map(|member| match member {
                    ImplItem::Fn(func)
                        if func.sig.ident == "new" && func.sig.receiver().is_none() =>
                    {
                        Some(
                            ExistingMember::new(
                                MemberKind::PlainConstructor,
                                "new",
                                func.sig.ident.span(),
                            )
                            .with_params(func.sig.inputs.iter().map(param_name).collect()),
                        )
                    }
                    _ => None,
                })
                .collect(),
        },

        _ => Vec::new(),
    }
}

// names_type
fn names_type(ty: &Type, record: &Ident) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == *record)
}

// param_name
fn param_name(arg: &FnArg) -> String {
    match arg {
        FnArg::Typed(typed) => match &*typed.pat {
            Pat::Ident(pat) => pat.ident.unraw().to_string(),
            _ => "_".to_string(),
        },
        FnArg::Receiver(_) => "self".to_string(),
    }
}

// unsupported
fn unsupported(item: &Item) -> ExpansionError {
    let (type_name, kind, span): (String, &'static str, Span) = match item {
        Item::Enum(item) => (item.ident.to_string(), "an enum", item.ident.span()),
        Item::Union(item) => (item.ident.to_string(), "a union", item.ident.span()),
        Item::Trait(item) => (item.ident.to_string(), "a trait", item.ident.span()),
        Item::Type(item) => (item.ident.to_string(), "a type alias", item.ident.span()),
        Item::Struct(item) => {
            let kind = match item.fields {
                Fields::Unnamed(_) => "a tuple struct",
                Fields::Unit => "a unit struct",
                Fields::Named(_) => "a struct without a readable body",
            };
            (item.ident.to_string(), kind, item.ident.span())
        }
        Item::Impl(item) => (
            item.self_ty.to_token_stream().to_string(),
            "an impl block",
            item.self_ty.span(),
        ),
        other => (
            "item".to_string(),
            "not a type declaration",
            other.span(),
        ),
    };

    ExpansionError::UnsupportedDeclarationKind {
        type_name,
        kind,
        span,
    }
}
