use std::fmt::Display;

use proc_macro2::{Span, TokenStream};
use proc_macro_error::{abort, emit_error};

use identity_codegen::{Diagnostic, FixIt};

/// Emits every diagnostic at its own span, fix-its attached as help notes.
/// Nothing is generated for a rejected declaration.
pub fn report(diagnostics: Vec<Diagnostic>) -> TokenStream {
    for diagnostic in diagnostics {
        let help: Vec<String> = diagnostic.fix_its.iter().map(FixIt::help).collect();
        match help.as_slice() {
            [] => emit_error!(diagnostic.span, "{}", diagnostic.kind),
            [help] => emit_error!(diagnostic.span, "{}", diagnostic.kind; help = help),
            _ => emit_error!(
                diagnostic.span,
                "{}", diagnostic.kind;
                help = help.join("\n")
            ),
        }
    }
    TokenStream::new()
}

/// Structural problems with no fix-it stop the expansion right away.
pub fn fatal<T>(span: Span, e: impl Display) -> T {
    abort!(span, e)
}
