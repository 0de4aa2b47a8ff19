mod extensions;
mod source;

use crate::source::Source;

use proc_macro2::token_stream::TokenStream;

/// Expand `#[derive(Attributes)]` for `input` item.
pub fn attributes(input: TokenStream) -> TokenStream {
    let input = match syn::parse2::<syn::DeriveInput>(input) {
        Ok(item) => item,
        Err(err) => return err.into_compile_error(),
    };

    match Source::parse(input) {
        Ok(source) => source::implement(&source),
        Err(err) => err.into_compile_error(),
    }
}
