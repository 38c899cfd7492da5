use std::fmt;

use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Expr, Ident, Result, Token, Visibility};

use crate::diagnostic::Diagnostic;

/// A single `label: expr` (or bare `expr`) argument of a declaration request.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub label: Option<Ident>,
    pub expr: Expr,
}

/// The argument list of a labeled identifier declaration, e.g.
/// `pub OrderId, backing: Uuid, adopts: Ord`.
#[derive(Debug, Clone)]
pub struct DeclarationRequest {
    pub vis: Visibility,
    pub arguments: Vec<Argument>,
    pub span: Span,
}

impl Argument {
    pub fn unlabeled(expr: Expr) -> Self {
        Self { label: None, expr }
    }

    pub fn labeled(label: Ident, expr: Expr) -> Self {
        Self {
            label: Some(label),
            expr,
        }
    }

    pub fn without_label(&self) -> Self {
        Self::unlabeled(self.expr.clone())
    }

    pub fn with_label(&self, label: &str) -> Self {
        let span = self
            .label
            .as_ref()
            .map(Ident::span)
            .unwrap_or_else(|| syn::spanned::Spanned::span(&self.expr));
        Self::labeled(Ident::new(label, span), self.expr.clone())
    }
}

impl Parse for Argument {
    fn parse(input: ParseStream) -> Result<Self> {
        // Labels may be keywords (`type: X`), so peek for any ident.
        let label = if input.peek(Ident::peek_any)
            && input.peek2(Token![:])
            && !input.peek2(Token![::])
        {
            let label = Ident::parse_any(input)?;
            input.parse::<Token![:]>()?;
            Some(label)
        } else {
            None
        };
        let expr: Expr = input.parse()?;
        Ok(Argument { label, expr })
    }
}

impl ToTokens for Argument {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let expr = &self.expr;
        match &self.label {
            Some(label) => tokens.extend(quote!(#label: #expr)),
            None => expr.to_tokens(tokens),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{}: ", label)?;
        }
        write!(f, "{}", self.expr.to_token_stream())
    }
}

impl Parse for DeclarationRequest {
    fn parse(input: ParseStream) -> Result<Self> {
        let span = input.span();
        let vis: Visibility = input.parse()?;
        let arguments =
            Punctuated::<Argument, Token![,]>::parse_terminated(input)?;
        Ok(DeclarationRequest {
            vis,
            arguments: arguments.into_iter().collect(),
            span,
        })
    }
}

impl DeclarationRequest {
    pub fn parse_str(source: &str) -> Result<Self> {
        syn::parse_str(source)
    }

    /// Returns a copy of the request with every fix-it of `diagnostics`
    /// applied at once.
    pub fn apply_fix_its(&self, diagnostics: &[Diagnostic]) -> Self {
        let mut fixed = self.clone();
        for fix_it in diagnostics.iter().flat_map(|d| d.fix_its.iter()) {
            if let Some(argument) = fixed.arguments.get_mut(fix_it.index) {
                *argument = fix_it.replacement.clone();
            }
        }
        fixed
    }
}

impl fmt::Display for DeclarationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !matches!(self.vis, Visibility::Inherited) {
            write!(f, "{} ", self.vis.to_token_stream())?;
        }
        let arguments: Vec<String> =
            self.arguments.iter().map(ToString::to_string).collect();
        write!(f, "{}", arguments.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn parses_labels_and_visibility() {
        let request: DeclarationRequest =
            parse_quote!(pub(crate) OrderId, backing: Uuid, adopts: Ord, Copy);
        assert!(matches!(request.vis, Visibility::Restricted(_)));
        let labels: Vec<Option<String>> = request
            .arguments
            .iter()
            .map(|a| a.label.as_ref().map(ToString::to_string))
            .collect();
        assert_eq!(
            labels,
            vec![
                None,
                Some("backing".to_string()),
                Some("adopts".to_string()),
                None
            ]
        );
    }

    #[test]
    fn keyword_labels_are_accepted() {
        let request = DeclarationRequest::parse_str("type: X, potato: Y").unwrap();
        assert_eq!(request.arguments[0].label.as_ref().unwrap(), "type");
    }

    #[test]
    fn paths_are_not_mistaken_for_labels() {
        let request = DeclarationRequest::parse_str("X, backing: uuid::Uuid").unwrap();
        assert_eq!(request.arguments.len(), 2);
        assert_eq!(request.arguments[1].to_string(), "backing: uuid :: Uuid");
    }

    #[test]
    fn renders_back_to_source() {
        let request =
            DeclarationRequest::parse_str("pub OrderId, backing: Uuid").unwrap();
        assert_eq!(request.to_string(), "pub OrderId, backing: Uuid");
    }
}
