use proc_macro::TokenStream;

/// Derive the key set, decode constructor and plain constructor of a record.
///
/// ```ignore
/// codable::record! {
///     pub struct Item {
///         pub id: u64,
///         pub name: Option<String>,
///         pub created: u64 = 0,
///         pub label: String { format!("#{}", self.id) },
///     }
/// }
/// ```
#[proc_macro]
pub fn record(input: TokenStream) -> TokenStream {
    codable_core::expand(input.into()).into()
}
