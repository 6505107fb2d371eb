use syn::{
    Attribute, Ident, LitStr, Meta, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Parsed `#[validator(...)]` arguments.
#[derive(Debug, Clone)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single attribute item.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// A bare string like `"required,min=3"`
    Positional(LitStr),
    /// A flag like `lenient`
    Flag(Ident),
    /// Key-value pair like `name = "Age"`
    KeyValue { key: Ident, value: LitStr },
}

impl AttrArgs {
    /// Get a string value by key.
    pub fn get_string(&self, key: &str) -> Option<&LitStr> {
        self.items.iter().find_map(|item| match item {
            AttrItem::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }

    /// All positional strings.
    pub fn positional(&self) -> impl Iterator<Item = &LitStr> {
        self.items.iter().filter_map(|item| match item {
            AttrItem::Positional(lit) => Some(lit),
            _ => None,
        })
    }

    /// Rejects flags and keys outside `flags` / `keys`.
    pub fn expect_only(&self, flags: &[&str], keys: &[&str]) -> Result<()> {
        for item in &self.items {
            match item {
                AttrItem::Flag(flag) if !flags.iter().any(|f| flag == f) => {
                    return Err(diag::error_spanned(
                        flag,
                        format!("unknown flag `{flag}` in #[validator(...)]"),
                    ));
                }
                AttrItem::KeyValue { key, .. } if !keys.iter().any(|k| key == k) => {
                    return Err(diag::error_spanned(
                        key,
                        format!("unknown key `{key}` in #[validator(...)]"),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Parse all attributes with the given name and merge them.
///
/// Returns `None` when no such attribute is present.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<Option<AttrArgs>> {
    let mut result: Option<AttrArgs> = None;

    for attr in attrs {
        if !attr.path().is_ident(name) {
            continue;
        }

        let args = match &attr.meta {
            Meta::List(list) => syn::parse2::<AttrArgs>(list.tokens.clone())?,
            other => {
                return Err(diag::error_spanned(
                    other,
                    format!("expected #[{name}(...)]"),
                ));
            }
        };

        result
            .get_or_insert_with(|| AttrArgs { items: vec![] })
            .items
            .extend(args.items);
    }

    Ok(result)
}

impl Parse for AttrArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = Punctuated::<AttrItem, Token![,]>::parse_terminated(input)?;
        Ok(Self {
            items: items.into_iter().collect(),
        })
    }
}

impl Parse for AttrItem {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Positional(input.parse()?));
        }

        let key: Ident = input.parse()?;
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value: LitStr = input.parse()?;
            Ok(Self::KeyValue { key, value })
        } else {
            Ok(Self::Flag(key))
        }
    }
}
