use darling::{FromAttributes, FromMeta};
use derive_more::Display;
use quote::format_ident;
use syn::{Attribute, Ident, Path, parse_quote};

/// Name of the helper attribute understood inside `record!`.
pub const ATTRIBUTE: &str = "codable";

///
/// DefaultPolicy
///
/// What the decode constructor does with a field that has an inline default.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, FromMeta, PartialEq)]
pub enum DefaultPolicy {
    /// Never decode the field; it always takes its initializer.
    #[default]
    #[darling(rename = "skip")]
    #[display("skip")]
    Skip,

    /// Decode the field when its key is present, else take the initializer.
    #[darling(rename = "decode_if_present")]
    #[display("decode_if_present")]
    DecodeIfPresent,
}

///
/// ExpansionConfig
///
/// Record-level `#[codable(..)]` options.
///

#[derive(Clone, Debug, Default, FromAttributes)]
#[darling(attributes(codable))]
pub struct ExpansionConfig {
    #[darling(default)]
    pub defaults: DefaultPolicy,

    #[darling(default)]
    pub keys: Option<Ident>,

    #[darling(default, rename = "crate")]
    pub krate: Option<Path>,
}

impl ExpansionConfig {
    /// Path generated code uses to reach the runtime traits.
    #[must_use]
    pub fn crate_path(&self) -> Path {
        self.krate.clone().unwrap_or_else(|| parse_quote!(::codable))
    }

    /// Name of the key set enum for `record`.
    #[must_use]
    pub fn key_set_ident(&self, record: &Ident) -> Ident {
        self.keys
            .clone()
            .unwrap_or_else(|| format_ident!("{record}Key"))
    }
}

///
/// FieldAttrs
///
/// Field-level `#[codable(..)]` options.
///

#[derive(Clone, Debug, Default, FromAttributes)]
#[darling(default, attributes(codable))]
pub struct FieldAttrs {
    /// Exclusion marker.
    pub skip: bool,

    pub rename: Option<String>,
}

// is_codable_attr
#[must_use]
pub fn is_codable_attr(attr: &Attribute) -> bool {
    attr.path().is_ident(ATTRIBUTE)
}

/// Drop the helper attributes so the re-emitted item is plain Rust.
#[must_use]
pub fn strip_codable_attrs(attrs: &[Attribute]) -> Vec<Attribute> {
    attrs
        .iter()
        .filter(|attr| !is_codable_attr(attr))
        .cloned()
        .collect()
}
