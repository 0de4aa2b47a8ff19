use linkfield::{Attribute, AttributeSource, Attributes};
use quote::quote;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Serialize, Attributes)]
#[linkfield(rename_all = "camelCase")]
struct Book {
    book_id: u32,
    #[linkfield(rename = "writer")]
    author_name: String,
    #[linkfield(skip)]
    #[allow(dead_code)]
    internal_notes: String,
    r#type: Option<String>,
}

#[derive(Debug, Attributes)]
struct Page<T> {
    number: usize,
    items: Vec<T>,
}

fn book() -> Book {
    Book {
        book_id: 7,
        author_name: "Fred".to_owned(),
        internal_notes: "draft".to_owned(),
        r#type: None,
    }
}

#[test]
fn renamed_fields() {
    let book = book();

    assert_eq!(book.attribute("bookId").unwrap(), Attribute::Present(json!(7)));
    assert_eq!(book.attribute("writer").unwrap(), Attribute::Present(json!("Fred")));
    assert_eq!(book.attribute("book_id").unwrap(), Attribute::Absent);
    assert_eq!(book.attribute("authorName").unwrap(), Attribute::Absent);
}

#[test]
fn skipped_and_null_fields() {
    let book = book();

    assert_eq!(book.attribute("internalNotes").unwrap(), Attribute::Absent);
    assert_eq!(book.attribute("type").unwrap(), Attribute::Null);
}

#[test]
fn generic_struct() {
    let page = Page {
        number: 2,
        items: vec!["a", "b"],
    };

    assert_eq!(page.attribute("number").unwrap(), Attribute::Present(json!(2)));
    assert_eq!(page.attribute("items").unwrap(), Attribute::Present(json!(["a", "b"])));
}

#[test]
fn expands_to_impl() {
    let output = linkfield_macro_impl::attributes(quote! {
        struct Author {
            id: u32,
        }
    });

    let item: syn::ItemImpl = syn::parse2(output).unwrap();
    let trait_path = item.trait_.map(|(_, path, _)| quote!(#path).to_string());

    assert_eq!(trait_path.as_deref(), Some(":: linkfield :: AttributeSource"));
}

#[test]
fn rejects_unsupported_items() {
    let inputs = [
        quote!(enum Kind { A, B }),
        quote!(struct Id(u32);),
        quote!(struct Unit;),
        quote! {
            #[linkfield(rename_all = "Title Case")]
            struct Author { id: u32 }
        },
        quote! {
            struct Author {
                id: u32,
                #[linkfield(rename = "id")]
                other: u32,
            }
        },
    ];

    for input in inputs {
        let output = linkfield_macro_impl::attributes(input).to_string();
        assert!(output.contains("compile_error"), "{output}");
    }
}
