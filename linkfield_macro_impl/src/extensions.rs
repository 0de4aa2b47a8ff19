pub trait CombineSynErr {
    fn combine(&mut self, err: syn::Error);
}

impl CombineSynErr for Option<syn::Error> {
    fn combine(&mut self, err: syn::Error) {
        if let Some(val) = self {
            val.combine(err);
        } else {
            *self = Some(err)
        }
    }
}

/// Collect all items, or every error encountered on the way.
pub trait CollectSynResults<T> {
    fn collect_syn_results<C: Default + Extend<T>>(self) -> syn::Result<C>;
}

impl<T, I: Iterator<Item = syn::Result<T>>> CollectSynResults<T> for I {
    fn collect_syn_results<C: Default + Extend<T>>(self) -> syn::Result<C> {
        let mut coll = C::default();
        let mut errors: Option<syn::Error> = None;

        for item in self {
            match item {
                Ok(res) if errors.is_none() => coll.extend(Some(res)),
                Ok(_) => {}
                Err(err) => errors.combine(err),
            }
        }

        match errors {
            Some(errors) => Err(errors),
            None => Ok(coll),
        }
    }
}
