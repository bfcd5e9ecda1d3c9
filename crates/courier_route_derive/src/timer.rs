use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, ReturnType, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let label = if attr.is_empty() {
        None
    } else {
        Some(parse_macro_input!(attr as LitStr).value())
    };
    let mut func = parse_macro_input!(item as ItemFn);

    if func.sig.asyncness.is_some() {
        return syn::Error::new_spanned(&func.sig, "timer does not support async functions")
            .to_compile_error()
            .into();
    }

    let label = label.unwrap_or_else(|| func.sig.ident.to_string());
    let label_lit = LitStr::new(&label, func.sig.ident.span());
    let ret_ty = match &func.sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };
    let body = &func.block;

    func.block = syn::parse_quote! {{
        let __timer_start = std::time::Instant::now();
        let __timer_out = (move || -> #ret_ty #body)();
        log::debug!(
            "{}: elapsed secs={:.3}",
            #label_lit,
            __timer_start.elapsed().as_secs_f64()
        );
        __timer_out
    }};

    TokenStream::from(quote! { #func })
}
