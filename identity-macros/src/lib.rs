//! Procedural front ends of the identifier expander.
//!
//! All four forms share the `identity_codegen` pipeline; they differ only in
//! how the declaration is spelled at the use site.

use proc_macro::TokenStream;

use proc_macro_error::proc_macro_error;

use identity_codegen::identifier::{analyze, codegen, lower, parse};
use identity_codegen::Options;

mod report;
use crate::report::{fatal, report};

/// `identifier!(pub OrderId, backing: Uuid, adopts: Ord)`
///
/// Mislabeled arguments are reported together, each with a fix-it.
#[proc_macro]
#[proc_macro_error]
pub fn identifier(ts: TokenStream) -> TokenStream {
    let ast = match parse::parse(ts.into()) {
        Ok(ast) => ast,
        Err(e) => fatal(e.span(), e),
    };
    match analyze::analyze(ast) {
        Ok(model) => {
            let ir = lower::lower(model, &Options::default());
            codegen::codegen(ir).into()
        }
        Err(diagnostics) => report(diagnostics).into(),
    }
}

/// `declare_identifier!(pub <Uuid, Ord>("OrderId"))`
#[proc_macro]
#[proc_macro_error]
pub fn declare_identifier(ts: TokenStream) -> TokenStream {
    let model = parse::parse_generic(ts.into()).and_then(analyze::analyze_generic);
    match model {
        Ok(model) => {
            let ir = lower::lower(model, &Options::default());
            codegen::codegen(ir).into()
        }
        Err(e) => fatal(e.span(), e),
    }
}

/// `#[backed_by(Uuid, Ord)] pub struct ImageId;`
#[proc_macro_attribute]
#[proc_macro_error]
pub fn backed_by(attr: TokenStream, item: TokenStream) -> TokenStream {
    let (args, item) = match parse::parse_attached(attr.into(), item.into()) {
        Ok(parsed) => parsed,
        Err(e) => fatal(e.span(), e),
    };
    match analyze::analyze_backed_by(args, item) {
        Ok(model) => {
            let ir = lower::lower(model, &Options::default());
            codegen::codegen(ir).into()
        }
        Err(diagnostics) => report(diagnostics).into(),
    }
}

/// `#[identifiable(Uuid)] pub struct Image { .. }`
///
/// Declares a sibling `ImageId`, prepends an `id: ImageId` field and
/// implements `Identifiable` for the host.
#[proc_macro_attribute]
#[proc_macro_error]
pub fn identifiable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let (args, host) = match parse::parse_attached(attr.into(), item.into()) {
        Ok(parsed) => parsed,
        Err(e) => fatal(e.span(), e),
    };
    match analyze::analyze_identifiable(args, host) {
        Ok(model) => {
            let ir = lower::lower_identifiable(model, &Options::default());
            codegen::codegen_identifiable(ir).into()
        }
        Err(diagnostics) => report(diagnostics).into(),
    }
}
