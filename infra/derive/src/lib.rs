#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the backoffice crates.
//!
//! * [`bo_error`] turns an enum into a `thiserror` error with `.context(...)` support.
//! * [`api_model`] / [`api_handler`] keep JSON DTOs and Axum handlers consistent with `OpenAPI`.
//! * [`bo_slice`] wraps feature state into an `Arc` handle registered with the kernel.
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own macros in doctests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a JSON data model exchanged with the backoffice UI.
///
/// # Injected Behaviors
///
/// * **Derives**: adds `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: adds `utoipa::ToSchema` behind the consumer's `server` feature.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields` unless overridden.
///
/// # Example
///
/// ```rust,ignore
/// #[bo_derive::api_model(deny_unknown_fields = false)]
/// pub struct TourFileSummary {
///     pub file_name: String,
///     pub plugin_name: Option<String>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path` when the consumer's `server` feature is on.
///
/// Accepts the standard `utoipa::path` arguments (`get`, `path = "..."`, `responses(...)`, `tag`).
///
/// # Example
///
/// ```rust,ignore
/// #[bo_derive::api_handler(
///     get,
///     path = "/backoffice/tours",
///     responses((status = OK, body = Vec<BackOfficeTourFile>)),
///     tag = TOURS_TAG,
/// )]
/// pub async fn get_tours() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Turns an enum with named-field variants into a domain error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant that wraps a source error.
/// * `From<SourceError>` for every variant with a `source` field.
/// * `From<&'static str>` and `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper for the `#[error(...)]` format strings.
///
/// # Requirements
///
/// Variants must use named fields; a variant with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[bo_derive::bo_error]
/// pub enum ToursError {
///     #[error("Tour file I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///     #[error("Internal tours error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<String, ToursError> {
///     std::fs::read_to_string(path).context(format!("Reading {}", path.display()))
/// }
/// ```
#[proc_macro_attribute]
pub fn bo_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Turns a struct into a feature slice handle.
///
/// The struct body becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`, derefs to it and
/// implements `bo_kernel::domain::registry::FeatureSlice`.
///
/// # Example
/// ```rust,ignore
/// #[bo_derive::bo_slice]
/// pub struct Tours {
///     pub catalog: TourCatalog,
/// }
///
/// let slice = Tours::new(ToursInner { catalog });
/// ```
#[proc_macro_attribute]
pub fn bo_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
