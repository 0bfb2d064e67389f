use crate::model::FieldDeclaration;
use derive_more::Display;

///
/// FieldClass
///
/// Outcome of the eligibility predicate. This module is the only place the
/// predicate is written down; every pass goes through [`classify`].
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum FieldClass {
    #[display("storage-eligible")]
    StorageEligible,

    #[display("has inline default")]
    HasDefault,

    #[display("computed")]
    Computed,

    #[display("excluded by marker")]
    ExcludedByMarker,
}

impl FieldClass {
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::StorageEligible)
    }
}

///
/// FieldFlags
///
/// The three raw flags classification depends on, and nothing else.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct FieldFlags {
    pub has_inline_default: bool,
    pub is_computed: bool,
    pub is_explicitly_excluded: bool,
}

impl FieldFlags {
    #[must_use]
    pub const fn of(field: &FieldDeclaration) -> Self {
        Self {
            has_inline_default: field.has_inline_default(),
            is_computed: field.is_computed(),
            is_explicitly_excluded: field.is_explicitly_excluded(),
        }
    }

    // An explicit marker wins over the structural reasons.
    #[must_use]
    pub const fn classify(self) -> FieldClass {
        if self.is_explicitly_excluded {
            FieldClass::ExcludedByMarker
        } else if self.is_computed {
            FieldClass::Computed
        } else if self.has_inline_default {
            FieldClass::HasDefault
        } else {
            FieldClass::StorageEligible
        }
    }
}

// classify
#[must_use]
pub const fn classify(field: &FieldDeclaration) -> FieldClass {
    FieldFlags::of(field).classify()
}
