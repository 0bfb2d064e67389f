use crate::{
    classify::{FieldClass, classify},
    model::{FieldDeclaration, FieldList, RecordDeclaration},
};
use derive_more::Display;
use syn::Ident;

///
/// MarkerKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum MarkerKind {
    #[display("skip")]
    Skip,
}

///
/// AttachmentDirective
///
/// Instruction for the emitter to mark one field as excluded. `reason` is
/// the class the field had before the marker.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachmentDirective {
    pub field: Ident,
    pub marker: MarkerKind,
    pub reason: FieldClass,
}

// annotate
/// One directive per non-eligible field that does not carry a marker yet.
#[must_use]
pub fn annotate(fields: &FieldList) -> Vec<AttachmentDirective> {
    fields
        .iter()
        .filter(|field| {
            matches!(
                classify(field),
                FieldClass::HasDefault | FieldClass::Computed
            )
        })
        .map(|field| attach_marker(field, MarkerKind::Skip))
        .collect()
}

// attach_marker
#[must_use]
pub fn attach_marker(field: &FieldDeclaration, marker: MarkerKind) -> AttachmentDirective {
    AttachmentDirective {
        field: field.ident.clone(),
        marker,
        reason: classify(field),
    }
}

// apply
/// Copy of `record` with every directive's marker attached.
#[must_use]
pub fn apply(record: &RecordDeclaration, directives: &[AttachmentDirective]) -> RecordDeclaration {
    let mut marked = record.clone();

    for field in marked.fields.iter_mut() {
        if directives.iter().any(|d| d.field == field.ident) {
            field.excluded = true;
        }
    }

    marked
}
