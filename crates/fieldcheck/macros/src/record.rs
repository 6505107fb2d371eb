use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericParam, LitStr, ext::IdentExt, parse_macro_input};

use crate::support::{attrs, diag};

const ATTR: &str = "validator";

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

struct AnnotatedField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    name: LitStr,
    rules: LitStr,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // The rule table lives in one static per impl, so it cannot depend on
    // type or const parameters.
    if let Some(param) = input
        .generics
        .params
        .iter()
        .find(|param| !matches!(param, GenericParam::Lifetime(_)))
    {
        return Err(diag::error_spanned(
            param,
            "Record cannot be derived for structs with type or const parameters",
        ));
    }

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(diag::error_spanned(
                    struct_name,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(diag::error_spanned(
                struct_name,
                "Record can only be derived for structs",
            ));
        }
    };

    let container = attrs::parse_attrs(&input.attrs, ATTR)?;
    let (record_name, mode) = match &container {
        Some(args) => container_options(args, struct_name)?,
        None => (
            LitStr::new(&struct_name.to_string(), struct_name.span()),
            quote!(::fieldcheck::Mode::Strict),
        ),
    };

    let mut fields = Vec::new();
    for field in named {
        let Some(args) = attrs::parse_attrs(&field.attrs, ATTR)? else {
            continue;
        };
        let ident = field.ident.as_ref().expect("named field");
        fields.push(annotated_field(ident, &field.ty, &args)?);
    }

    let declarations = fields.iter().map(|field| {
        let AnnotatedField { ty, name, rules, .. } = field;
        quote!(.field::<#ty>(#name, #rules))
    });

    let accessors = fields.iter().enumerate().map(|(index, field)| {
        let ident = field.ident;
        quote!(#index => ::fieldcheck::AsFieldValue::as_field_value(&self.#ident),)
    });

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::fieldcheck::Record for #struct_name #ty_generics #where_clause {
            fn rule_table() -> ::core::result::Result<
                &'static ::fieldcheck::RuleTable,
                &'static ::fieldcheck::DeclarationError,
            > {
                static TABLE: ::std::sync::OnceLock<
                    ::core::result::Result<::fieldcheck::RuleTable, ::fieldcheck::DeclarationError>,
                > = ::std::sync::OnceLock::new();

                TABLE
                    .get_or_init(|| {
                        ::fieldcheck::RuleTable::builder(#record_name)
                            .mode(#mode)
                            #(#declarations)*
                            .build()
                    })
                    .as_ref()
            }

            fn field_value(&self, index: usize) -> ::fieldcheck::FieldValue<'_> {
                match index {
                    #(#accessors)*
                    _ => ::fieldcheck::FieldValue::Other,
                }
            }
        }
    })
}

fn container_options(
    args: &attrs::AttrArgs,
    struct_name: &syn::Ident,
) -> syn::Result<(LitStr, TokenStream2)> {
    args.expect_only(&["strict", "lenient"], &["name", "mode"])?;
    if let Some(lit) = args.positional().next() {
        return Err(diag::error_spanned(
            lit,
            "rules belong on fields; use #[validator(name = \"...\", mode = \"...\")] on the struct",
        ));
    }

    let record_name = args
        .get_string("name")
        .cloned()
        .unwrap_or_else(|| LitStr::new(&struct_name.to_string(), struct_name.span()));

    let lenient = match args.get_string("mode") {
        Some(mode) => match mode.value().as_str() {
            "strict" => false,
            "lenient" => true,
            other => {
                return Err(diag::error_spanned(
                    mode,
                    format!("unknown mode `{other}`, expected `strict` or `lenient`"),
                ));
            }
        },
        None => args.has_flag("lenient"),
    };

    if args.has_flag("lenient") && args.has_flag("strict") {
        return Err(diag::error_spanned(
            struct_name,
            "`strict` and `lenient` are mutually exclusive",
        ));
    }

    let mode = if lenient {
        quote!(::fieldcheck::Mode::Lenient)
    } else {
        quote!(::fieldcheck::Mode::Strict)
    };
    Ok((record_name, mode))
}

fn annotated_field<'a>(
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    args: &attrs::AttrArgs,
) -> syn::Result<AnnotatedField<'a>> {
    args.expect_only(&[], &["rules", "name"])?;

    let mut sources = args.positional().chain(args.get_string("rules"));
    let rules = match (sources.next(), sources.next()) {
        (Some(rules), None) => rules.clone(),
        (Some(_), Some(extra)) => {
            return Err(diag::error_spanned(
                extra,
                "a field takes exactly one rule annotation",
            ));
        }
        (None, _) => {
            return Err(diag::error_spanned(
                ident,
                "missing rule annotation, e.g. #[validator(\"required,min=3\")]",
            ));
        }
    };

    let name = args
        .get_string("name")
        .cloned()
        .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));

    Ok(AnnotatedField {
        ident,
        ty,
        name,
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_str(input: DeriveInput) -> String {
        expand(&input).unwrap().to_string()
    }

    fn expand_err(input: DeriveInput) -> String {
        expand(&input).unwrap_err().to_string()
    }

    #[test]
    fn registers_annotated_fields_in_order() {
        let out = expand_str(parse_quote! {
            struct User {
                #[validator("required")]
                name: String,
                skipped: bool,
                #[validator(rules = "min=1", name = "Age")]
                age: u32,
            }
        });

        let name_at = out.find(". field :: < String > (\"name\" , \"required\")").unwrap();
        let age_at = out.find(". field :: < u32 > (\"Age\" , \"min=1\")").unwrap();
        assert!(name_at < age_at);
        assert!(!out.contains("skipped"));
        assert!(out.contains("0usize => :: fieldcheck :: AsFieldValue :: as_field_value (& self . name)"));
        assert!(out.contains("1usize => :: fieldcheck :: AsFieldValue :: as_field_value (& self . age)"));
        assert!(out.contains(":: fieldcheck :: Mode :: Strict"));
    }

    #[test]
    fn container_mode_and_name() {
        let out = expand_str(parse_quote! {
            #[validator(lenient, name = "Legacy")]
            struct Old {
                #[validator("foo=1")]
                x: i32,
            }
        });
        assert!(out.contains(":: fieldcheck :: Mode :: Lenient"));
        assert!(out.contains("builder (\"Legacy\")"));

        let out = expand_str(parse_quote! {
            #[validator(mode = "lenient")]
            struct Old {
                #[validator("foo=1")]
                x: i32,
            }
        });
        assert!(out.contains(":: fieldcheck :: Mode :: Lenient"));
    }

    #[test]
    fn raw_identifiers_are_unrawed() {
        let out = expand_str(parse_quote! {
            struct T {
                #[validator("required")]
                r#type: String,
            }
        });
        assert!(out.contains("(\"type\" , \"required\")"));
    }

    #[test]
    fn lifetimes_are_allowed() {
        let out = expand_str(parse_quote! {
            struct Borrowed<'a> {
                #[validator("required")]
                name: &'a str,
            }
        });
        assert!(out.contains("impl < 'a > :: fieldcheck :: Record for Borrowed < 'a >"));
    }

    #[test]
    fn rejects_type_parameters() {
        let err = expand_err(parse_quote! {
            struct Generic<T> {
                #[validator("required")]
                value: T,
            }
        });
        assert!(err.contains("type or const parameters"));
    }

    #[test]
    fn rejects_tuple_structs_and_enums() {
        assert!(expand_err(parse_quote!(struct T(u32);)).contains("named fields"));
        assert!(expand_err(parse_quote!(enum E { A })).contains("only be derived for structs"));
    }

    #[test]
    fn rejects_bad_field_attributes() {
        assert!(
            expand_err(parse_quote! {
                struct T {
                    #[validator(name = "X")]
                    x: u32,
                }
            })
            .contains("missing rule annotation")
        );
        assert!(
            expand_err(parse_quote! {
                struct T {
                    #[validator("required", rules = "min=1")]
                    x: u32,
                }
            })
            .contains("exactly one rule annotation")
        );
        assert!(
            expand_err(parse_quote! {
                struct T {
                    #[validator("required", nested)]
                    x: u32,
                }
            })
            .contains("unknown flag `nested`")
        );
        assert!(
            expand_err(parse_quote! {
                struct T {
                    #[validator = "required"]
                    x: u32,
                }
            })
            .contains("expected #[validator(...)]")
        );
    }

    #[test]
    fn rejects_bad_container_attributes() {
        assert!(
            expand_err(parse_quote! {
                #[validator(mode = "loose")]
                struct T {}
            })
            .contains("unknown mode `loose`")
        );
        assert!(
            expand_err(parse_quote! {
                #[validator("required")]
                struct T {}
            })
            .contains("rules belong on fields")
        );
        assert!(
            expand_err(parse_quote! {
                #[validator(strict, lenient)]
                struct T {}
            })
            .contains("mutually exclusive")
        );
    }
}
