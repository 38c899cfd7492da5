use quote::{format_ident, ToTokens};
use syn::spanned::Spanned;
use syn::{
    parse_quote, Attribute, Expr, ExprLit, ExprPath, Fields, Ident, ItemStruct,
    Lit, Visibility,
};
use tracing::debug;

use crate::diagnostic::{Diagnostic, DiagnosticKind, FixIt, FixItKind};
use crate::identifier::parse::{AttachedArgs, GenericAst};
use crate::request::{Argument, DeclarationRequest};

pub const BACKING_LABEL: &str = "backing";
pub const ADOPTS_LABEL: &str = "adopts";

/// A validated identifier declaration.
pub struct Model {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub name: Ident,
    pub backing: Ident,
    pub capabilities: Vec<Ident>,
}

/// A validated `#[identifiable]` host together with the identifier type that
/// will be generated next to it.
pub struct IdentifiableModel {
    pub host: ItemStruct,
    pub id: Model,
}

pub fn analyze(ast: DeclarationRequest) -> Result<Model, Vec<Diagnostic>> {
    let arguments = &ast.arguments;
    if arguments.len() < 2 {
        return Err(vec![Diagnostic::error(
            DiagnosticKind::UnexpectedParameterCount(arguments.len()),
            ast.span,
        )]);
    }

    let mut diagnostics = Vec::new();
    let mut identifiers = Vec::with_capacity(arguments.len());
    for (index, argument) in arguments.iter().enumerate() {
        if let Some(diagnostic) =
            validate_label(index, argument, expected_label(index))
        {
            diagnostics.push(diagnostic);
        }
        match type_identifier(index, argument) {
            Ok(ident) => identifiers.push(ident),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }
    if !diagnostics.is_empty() {
        debug!(count = diagnostics.len(), "declaration request rejected");
        return Err(diagnostics);
    }

    match identifiers.as_slice() {
        [name, backing, capabilities @ ..] => Ok(Model {
            attrs: vec![],
            vis: ast.vis.clone(),
            name: name.clone(),
            backing: backing.clone(),
            capabilities: capabilities.to_vec(),
        }),
        _ => Err(vec![Diagnostic::error(
            DiagnosticKind::UnexpectedParameterCount(identifiers.len()),
            ast.span,
        )]),
    }
}

/// The generic form has no labels to check; structural problems were
/// already rejected while parsing.
pub fn analyze_generic(ast: GenericAst) -> syn::Result<Model> {
    let GenericAst { vis, types, name } = ast;
    let ident = name.parse::<Ident>().map_err(|_| {
        syn::Error::new(
            name.span(),
            format!("\"{}\" is not a valid type identifier", name.value()),
        )
    })?;
    let (backing, capabilities) = split_types(types, &name)?;
    Ok(Model {
        attrs: vec![],
        vis,
        name: ident,
        backing,
        capabilities,
    })
}

pub fn analyze_backed_by(
    args: AttachedArgs,
    item: ItemStruct,
) -> Result<Model, Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();
    if !item.fields.is_empty() {
        diagnostics.push(Diagnostic::error(
            DiagnosticKind::UnsupportedDeclaration(
                "identifier types must be declared without fields, the raw value field is generated"
                    .to_string(),
            ),
            item.fields.span(),
        ));
    }
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        diagnostics.push(Diagnostic::error(
            DiagnosticKind::UnsupportedDeclaration(
                "identifier types cannot be generic".to_string(),
            ),
            item.generics.span(),
        ));
    }
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    let (backing, capabilities) =
        split_types(args.types, &item.ident).map_err(|e| {
            vec![Diagnostic::error(
                DiagnosticKind::UnsupportedDeclaration(e.to_string()),
                e.span(),
            )]
        })?;
    Ok(Model {
        attrs: item.attrs,
        vis: item.vis,
        name: item.ident,
        backing,
        capabilities,
    })
}

pub fn analyze_identifiable(
    args: AttachedArgs,
    host: ItemStruct,
) -> Result<IdentifiableModel, Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();
    match &host.fields {
        Fields::Unnamed(fields) => diagnostics.push(Diagnostic::error(
            DiagnosticKind::UnsupportedDeclaration(
                "identifiable types must use named fields".to_string(),
            ),
            fields.span(),
        )),
        Fields::Named(fields) => {
            let existing = fields
                .named
                .iter()
                .filter_map(|f| f.ident.as_ref())
                .find(|ident| *ident == "id");
            if let Some(existing) = existing {
                diagnostics.push(Diagnostic::error(
                    DiagnosticKind::UnsupportedDeclaration(
                        "identifiable types already declaring an `id` field are not supported"
                            .to_string(),
                    ),
                    existing.span(),
                ));
            }
        }
        Fields::Unit => {}
    }
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    let (backing, capabilities) =
        split_types(args.types, &host.ident).map_err(|e| {
            vec![Diagnostic::error(
                DiagnosticKind::UnsupportedDeclaration(e.to_string()),
                e.span(),
            )]
        })?;
    let name = format_ident!("{}Id", host.ident);
    let doc = format!(" Identifier of [`{}`].", host.ident);
    let id = Model {
        attrs: vec![parse_quote!(#[doc = #doc])],
        vis: host.vis.clone(),
        name,
        backing,
        capabilities,
    };
    Ok(IdentifiableModel { host, id })
}

fn split_types(
    types: Vec<Ident>,
    at: &impl ToTokens,
) -> syn::Result<(Ident, Vec<Ident>)> {
    let mut types = types.into_iter();
    match types.next() {
        Some(backing) => Ok((backing, types.collect())),
        None => Err(syn::Error::new_spanned(at, "missing backing type")),
    }
}

fn expected_label(index: usize) -> Option<&'static str> {
    match index {
        1 => Some(BACKING_LABEL),
        2 => Some(ADOPTS_LABEL),
        _ => None,
    }
}

fn validate_label(
    index: usize,
    argument: &Argument,
    expected: Option<&str>,
) -> Option<Diagnostic> {
    let fix_it = |kind: FixItKind, replacement: Argument| FixIt {
        kind,
        index,
        original: argument.clone(),
        replacement,
    };
    match (&argument.label, expected) {
        (None, None) => None,
        (Some(label), Some(expected)) if label == expected => None,
        (Some(label), None) => Some(
            Diagnostic::error(
                DiagnosticKind::BadParameterLabel {
                    found: Some(label.to_string()),
                    expected: None,
                },
                label.span(),
            )
            .with_fix_it(fix_it(FixItKind::RemoveLabel, argument.without_label())),
        ),
        (None, Some(expected)) => Some(
            Diagnostic::error(
                DiagnosticKind::BadParameterLabel {
                    found: None,
                    expected: Some(expected.to_string()),
                },
                argument.expr.span(),
            )
            .with_fix_it(fix_it(
                FixItKind::AddLabel(expected.to_string()),
                argument.with_label(expected),
            )),
        ),
        (Some(label), Some(expected)) => Some(
            Diagnostic::error(
                DiagnosticKind::BadParameterLabel {
                    found: Some(label.to_string()),
                    expected: Some(expected.to_string()),
                },
                label.span(),
            )
            .with_fix_it(fix_it(
                FixItKind::UpdateLabel {
                    from: label.to_string(),
                    to: expected.to_string(),
                },
                argument.with_label(expected),
            )),
        ),
    }
}

/// The type name may also be spelled as a string literal; everything else
/// must be a bare identifier.
fn type_identifier(index: usize, argument: &Argument) -> Result<Ident, Diagnostic> {
    let ident = match &argument.expr {
        Expr::Path(ExprPath {
            attrs,
            qself: None,
            path,
        }) if attrs.is_empty() => path.get_ident().cloned(),
        Expr::Lit(ExprLit {
            lit: Lit::Str(name),
            ..
        }) if index == 0 => name.parse::<Ident>().ok(),
        _ => None,
    };
    ident.ok_or_else(|| {
        Diagnostic::error(
            DiagnosticKind::ExpressionIsNotTypeIdentifier(
                argument.expr.to_token_stream().to_string(),
            ),
            argument.expr.span(),
        )
    })
}
