use derive_more::{Deref, IntoIterator};
use syn::{
    Attribute, Block, Expr, GenericArgument, Ident, PathArguments, Type, Visibility,
    ext::IdentExt,
};

///
/// FieldList
///

#[derive(Clone, Debug, Default, Deref, IntoIterator)]
#[into_iterator(owned, ref)]
pub struct FieldList(Vec<FieldDeclaration>);

impl FieldList {
    #[must_use]
    pub const fn new(fields: Vec<FieldDeclaration>) -> Self {
        Self(fields)
    }

    pub fn get(&self, ident: &str) -> Option<&FieldDeclaration> {
        self.0.iter().find(|f| f.name() == ident)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, FieldDeclaration> {
        self.0.iter_mut()
    }
}

impl FromIterator<FieldDeclaration> for FieldList {
    fn from_iter<I: IntoIterator<Item = FieldDeclaration>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// FieldDeclaration
///
/// One declared field as the reader saw it. `default` and `accessor` are
/// only ever set from `= expr` and `{ block }` inside `record!`.
///

#[derive(Clone, Debug)]
pub struct FieldDeclaration {
    pub ident: Ident,
    pub vis: Visibility,
    pub attrs: Vec<Attribute>,
    pub declared_type: DeclaredType,
    pub default: Option<Expr>,
    pub accessor: Option<Block>,
    pub excluded: bool,
    pub rename: Option<String>,
}

impl FieldDeclaration {
    #[must_use]
    pub fn new(ident: Ident, ty: Type) -> Self {
        Self {
            ident,
            vis: Visibility::Inherited,
            attrs: Vec::new(),
            declared_type: DeclaredType::new(ty),
            default: None,
            accessor: None,
            excluded: false,
            rename: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, expr: Expr) -> Self {
        self.default = Some(expr);
        self
    }

    #[must_use]
    pub fn with_accessor(mut self, block: Block) -> Self {
        self.accessor = Some(block);
        self
    }

    #[must_use]
    pub const fn with_marker(mut self) -> Self {
        self.excluded = true;
        self
    }

    #[must_use]
    pub fn with_rename(mut self, key: impl Into<String>) -> Self {
        self.rename = Some(key.into());
        self
    }

    /// Field name without any `r#` prefix.
    #[must_use]
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Serialization key for this field.
    #[must_use]
    pub fn key(&self) -> String {
        self.rename.clone().unwrap_or_else(|| self.name())
    }

    #[must_use]
    pub const fn has_inline_default(&self) -> bool {
        self.default.is_some()
    }

    #[must_use]
    pub const fn is_computed(&self) -> bool {
        self.accessor.is_some()
    }

    #[must_use]
    pub const fn is_explicitly_excluded(&self) -> bool {
        self.excluded
    }

    #[must_use]
    pub const fn ty(&self) -> &Type {
        &self.declared_type.ty
    }
}

///
/// DeclaredType
///
/// The field's type as written, plus its shape decided once at read time.
///

#[derive(Clone, Debug)]
pub struct DeclaredType {
    pub ty: Type,
    pub shape: TypeShape,
}

impl DeclaredType {
    #[must_use]
    pub fn new(ty: Type) -> Self {
        let shape = TypeShape::of(&ty);

        Self { ty, shape }
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self.shape, TypeShape::Optional(_))
    }
}

///
/// TypeShape
///

#[derive(Clone, Debug)]
pub enum TypeShape {
    Required,
    Optional(Box<Type>),
    Ambiguous(&'static str),
}

impl TypeShape {
    #[must_use]
    pub fn of(ty: &Type) -> Self {
        match ty {
            Type::Paren(inner) => Self::of(&inner.elem),
            Type::Group(inner) => Self::of(&inner.elem),
            Type::Infer(_) => Self::Ambiguous("`_` cannot be decoded"),
            Type::ImplTrait(_) => Self::Ambiguous("`impl Trait` cannot be decoded"),
            Type::Macro(_) => Self::Ambiguous("type macros are opaque before expansion"),
            Type::Verbatim(_) => Self::Ambiguous("unrecognised type syntax"),
            Type::Path(path) if path.qself.is_none() => {
                let Some(last) = path.path.segments.last() else {
                    return Self::Required;
                };
                if last.ident != "Option" {
                    return Self::Required;
                }

                option_inner(&last.arguments).map_or(
                    Self::Ambiguous("`Option` needs exactly one type argument"),
                    |inner| Self::Optional(Box::new(inner.clone())),
                )
            }
            _ => Self::Required,
        }
    }
}

// option_inner
fn option_inner(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = args else {
        return None;
    };

    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });

    match (types.next(), types.next(), args.args.len()) {
        (Some(ty), None, 1) => Some(ty),
        _ => None,
    }
}
