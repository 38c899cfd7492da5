//! Declaration expander for strongly typed identifiers.
//!
//! A declaration request such as `pub OrderId, backing: Uuid, adopts: Ord`
//! is validated argument by argument. Malformed requests produce a batch of
//! [`Diagnostic`]s carrying mechanical [`FixIt`]s; well-formed ones are
//! rendered into a Rust type implementing `identity::Identifier`.
//!
//! The same pipeline backs the `identity-macros` front ends and the
//! `identity-gen` generator binary.

mod error;

pub mod diagnostic;
pub mod generate;
pub mod identifier;
pub mod request;
pub mod schema;

pub use diagnostic::{Diagnostic, DiagnosticKind, FixIt, FixItKind, Severity};
pub use error::*;
pub use identifier::lower::Options;
pub use request::{Argument, DeclarationRequest};

use proc_macro2::TokenStream;
use tracing::debug;

use crate::identifier::{analyze, codegen, lower};

/// A successfully expanded declaration.
pub struct Expansion {
    /// `struct OrderId: Identifier, Ord { raw_value: Uuid }`
    pub signature: String,
    pub rust: TokenStream,
}

pub fn expand(
    request: DeclarationRequest,
    options: &Options,
) -> std::result::Result<Expansion, Vec<Diagnostic>> {
    let model = analyze::analyze(request)?;
    let ir = lower::lower(model, options);
    let signature = ir.to_string();
    debug!(%signature, "expanding identifier");
    Ok(Expansion {
        signature,
        rust: codegen::codegen(ir),
    })
}

pub fn expand_str(source: &str, options: &Options) -> Result<Expansion> {
    let request = DeclarationRequest::parse_str(source)
        .map_err(|e| Error::Syntax(source.to_string(), e))?;
    expand(request, options).map_err(|diagnostics| Error::rejected(source, diagnostics))
}
