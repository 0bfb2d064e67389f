use crate::{
    classify::classify,
    config::ExpansionConfig,
    model::{FieldDeclaration, FieldList},
};
use derive_more::Display;
use proc_macro2::Span;
use syn::{Attribute, Generics, Ident, Item, Visibility};

///
/// RecordDeclaration
///
/// Immutable snapshot of the type under synthesis. Every pass reads the same
/// snapshot; nothing mutates it in place.
///

#[derive(Clone, Debug)]
pub struct RecordDeclaration {
    pub ident: Ident,
    pub vis: Visibility,
    pub attrs: Vec<Attribute>,
    pub generics: Generics,
    pub fields: FieldList,
    pub members: Vec<ExistingMember>,
    pub passthrough: Vec<Item>,
    pub config: ExpansionConfig,
}

impl RecordDeclaration {
    #[must_use]
    pub fn new(ident: Ident, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            ident,
            vis: Visibility::Inherited,
            attrs: Vec::new(),
            generics: Generics::default(),
            fields: FieldList::new(fields),
            members: Vec::new(),
            passthrough: Vec::new(),
            config: ExpansionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_member(mut self, member: ExistingMember) -> Self {
        self.members.push(member);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ExpansionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn type_name(&self) -> String {
        self.ident.to_string()
    }

    /// First hand-written member of the given kind, if any.
    #[must_use]
    pub fn existing(&self, kind: MemberKind) -> Option<&ExistingMember> {
        self.members.iter().find(|m| m.kind == kind)
    }

    #[must_use]
    pub fn has_member(&self, kind: MemberKind) -> bool {
        self.existing(kind).is_some()
    }

    /// Storage-eligible fields in declaration order.
    pub fn eligible_fields(&self) -> impl Iterator<Item = &FieldDeclaration> {
        self.fields.iter().filter(|f| classify(f).is_eligible())
    }

    #[must_use]
    pub fn key_set_ident(&self) -> Ident {
        self.config.key_set_ident(&self.ident)
    }
}

///
/// MemberKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum MemberKind {
    #[display("decode constructor")]
    DecodeConstructor,

    #[display("plain constructor")]
    PlainConstructor,

    #[display("key set")]
    KeySetDeclaration,
}

///
/// ExistingMember
///
/// A hand-written member the reader found next to the record. `params` is
/// only filled for plain constructors.
///

#[derive(Clone, Debug)]
pub struct ExistingMember {
    pub kind: MemberKind,
    pub name: String,
    pub params: Vec<String>,
    pub span: Span,
}

impl ExistingMember {
    #[must_use]
    pub fn new(kind: MemberKind, name: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            params: Vec::new(),
            span,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = params;
        self
    }
}
