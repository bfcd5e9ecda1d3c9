use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, LitStr, parse_macro_input, spanned::Spanned};

/// How a field is rendered, from `#[kv(fmt = "...")]` or `#[kv(skip)]`.
enum Render {
    Display,
    Path,
    List,
    Skip,
}

fn render_of(field: &Field) -> syn::Result<Render> {
    let mut render = Render::Display;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("kv")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                render = Render::Skip;
                return Ok(());
            }
            if meta.path.is_ident("fmt") {
                let lit: LitStr = meta.value()?.parse()?;
                render = match lit.value().as_str() {
                    "display" => Render::Display,
                    "path" => Render::Path,
                    "list" => Render::List,
                    other => {
                        return Err(syn::Error::new(
                            lit.span(),
                            format!("unknown kv fmt {other:?}; expected display/path/list"),
                        ));
                    }
                };
                return Ok(());
            }
            Err(meta.error("expected fmt = \"...\" or skip"))
        })?;
    }
    Ok(render)
}

pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// One `\tkey = value` line per field, keys padded to a common width.
fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new(input.span(), "KvDisplay can only be derived for structs"));
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new(input.span(), "KvDisplay requires named fields"));
    };

    let mut keys = Vec::new();
    let mut vals = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let val = match render_of(field)? {
            Render::Skip => continue,
            Render::Display => quote! { &self.#ident },
            Render::Path => quote! { &self.#ident.display() },
            Render::List => quote! { &self.#ident.join(",") },
        };
        keys.push(ident.to_string());
        vals.push(val);
    }

    let width = keys.iter().map(String::len).max().unwrap_or(0);
    let lines: String = keys
        .iter()
        .map(|key| format!("\n\t{key:<width$} = {{}}"))
        .collect();
    let format_lit = LitStr::new(&lines, Span::call_site());
    let struct_ident = &input.ident;

    Ok(quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, #format_lit, #(#vals),*)
            }
        }
    })
}
