use proc_macro2::TokenStream;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    parenthesized, parse2, Error, Expr, ExprLit, Ident, ItemStruct, Lit,
    LitStr, Result, Token, Type, TypePath, Visibility,
};

use crate::request::DeclarationRequest;

/// `pub <Uuid, Ord>("OrderId")`: backing type and capabilities as type
/// arguments, the name as the only value argument.
pub struct GenericAst {
    pub vis: Visibility,
    pub types: Vec<Ident>,
    pub name: LitStr,
}

/// `(Uuid, Ord)` attribute arguments of the attached forms.
pub struct AttachedArgs {
    pub types: Vec<Ident>,
}

pub fn parse(ts: TokenStream) -> Result<DeclarationRequest> {
    parse2::<DeclarationRequest>(ts)
}

pub fn parse_generic(ts: TokenStream) -> Result<GenericAst> {
    parse2::<GenericAst>(ts)
}

pub fn parse_attached(
    attr: TokenStream,
    item: TokenStream,
) -> Result<(AttachedArgs, ItemStruct)> {
    let args = parse2::<AttachedArgs>(attr)?;
    let item = parse2::<ItemStruct>(item)?;
    Ok((args, item))
}

impl Parse for GenericAst {
    fn parse(stream: ParseStream) -> Result<Self> {
        let vis: Visibility = stream.parse()?;
        let open = stream.parse::<Token![<]>()?;
        let mut types = Vec::new();
        while !stream.peek(Token![>]) {
            types.push(stream.parse::<Type>()?);
            if !stream.peek(Token![,]) {
                break;
            }
            stream.parse::<Token![,]>()?;
        }
        stream.parse::<Token![>]>()?;
        if types.is_empty() {
            return Err(Error::new(
                open.span(),
                "missing backing type, expected at least one type argument",
            ));
        }

        let content;
        let parens = parenthesized!(content in stream);
        let values = Punctuated::<Expr, Token![,]>::parse_terminated(&content)?;
        let count = values.len();
        let mut values = values.into_iter();
        let name = match (values.next(), values.next()) {
            (
                Some(Expr::Lit(ExprLit {
                    lit: Lit::Str(name),
                    ..
                })),
                None,
            ) => name,
            (Some(other), None) => {
                return Err(Error::new(
                    other.span(),
                    "the identifier name must be a string literal",
                ))
            }
            _ => {
                return Err(Error::new(
                    parens.span.join(),
                    format!(
                        "unexpected argument count {}, expected exactly the identifier name",
                        count
                    ),
                ))
            }
        };

        Ok(GenericAst {
            vis,
            types: bare_identifiers(types)?,
            name,
        })
    }
}

impl Parse for AttachedArgs {
    fn parse(stream: ParseStream) -> Result<Self> {
        let types = Punctuated::<Type, Token![,]>::parse_terminated(stream)?;
        if types.is_empty() {
            return Err(Error::new(
                stream.span(),
                "missing backing type, expected at least one type argument",
            ));
        }
        Ok(AttachedArgs {
            types: bare_identifiers(types)?,
        })
    }
}

fn bare_identifiers(types: impl IntoIterator<Item = Type>) -> Result<Vec<Ident>> {
    types
        .into_iter()
        .map(|ty| match &ty {
            Type::Path(TypePath { qself: None, path }) => path
                .get_ident()
                .cloned()
                .ok_or_else(|| not_bare(&ty)),
            _ => Err(not_bare(&ty)),
        })
        .collect()
}

fn not_bare(ty: &Type) -> Error {
    Error::new(ty.span(), "expected a bare type identifier")
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    #[test]
    fn valid_generic_syntax() {
        let ast = parse_generic(quote!(pub <Uuid, Ord>("OrderId"))).unwrap();
        assert!(matches!(ast.vis, Visibility::Public(_)));
        assert_eq!(ast.types.len(), 2);
        assert_eq!(ast.name.value(), "OrderId");
    }

    #[test]
    fn generic_form_requires_a_backing_type() {
        let err = parse_generic(quote!(<>("OrderId"))).err().unwrap();
        assert!(err.to_string().contains("missing backing type"));
    }

    #[test]
    fn generic_form_requires_exactly_one_name() {
        assert!(parse_generic(quote!(<Uuid>())).is_err());
        assert!(parse_generic(quote!(<Uuid>("A", "B"))).is_err());
        assert!(parse_generic(quote!(<Uuid>(OrderId))).is_err());
    }

    #[test]
    fn generic_form_rejects_paths() {
        assert!(parse_generic(quote!(<uuid::Uuid>("OrderId"))).is_err());
    }

    #[test]
    fn valid_attached_syntax() {
        let (args, item) = parse_attached(
            quote!(Uuid, Ord),
            quote!(
                pub struct ImageId;
            ),
        )
        .unwrap();
        assert_eq!(args.types.len(), 2);
        assert_eq!(item.ident, "ImageId");
    }

    #[test]
    fn attached_form_requires_a_backing_type() {
        assert!(parse_attached(quote!(), quote!(struct ImageId;)).is_err());
    }
}
