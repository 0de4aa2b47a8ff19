use linkfield::paths::{BuildError, Urls};
use linkfield::{links, placeholder, Error, Hyperlinks, UrlFor};
use rstest::rstest;
use serde_json::{json, Value};

use crate::model::*;

fn url_for(urls: &Urls, endpoint: &str, args: Value) -> Value {
    Value::String(urls.url_for(endpoint, &args, false).unwrap())
}

#[rstest]
#[case("<id>")]
#[case(" <id>")]
#[case("<id> ")]
#[case("< id>")]
#[case("<id  >")]
#[case("< id >")]
#[case("<id>/trailing")]
fn placeholder_template(#[case] template: &str) {
    let name = placeholder(template).unwrap();

    assert_eq!(name, "id");
    assert_eq!(placeholder(&format!("<{name}>")), Some(name));
}

#[rstest]
fn url_field(urls: Urls, mut author: Author) {
    let field = UrlFor::new("author").arg("id", "<id>");

    let result = field.serialize(&author, &urls).unwrap();
    assert_eq!(result, url_for(&urls, "author", json!({ "id": author.id })));

    author.id = 0;
    let result = field.serialize(&author, &urls).unwrap();
    assert_eq!(result, url_for(&urls, "author", json!({ "id": 0 })));
}

#[rstest]
fn url_field_with_invalid_attribute(urls: Urls, author: Author) {
    let field = UrlFor::new("author").arg("id", "<not-an-attr>");

    let err = field.serialize(&author, &urls).unwrap_err();

    assert!(matches!(err, Error::Attribute { .. }));
    let expected_msg = format!("{:?} is not a valid attribute of {:?}", "not-an-attr", author);
    assert!(err.to_string().contains(&expected_msg), "{err}");
}

#[rstest]
fn url_field_deserialization() {
    let field = UrlFor::new("author").arg("id", "<not-an-attr>").allow_none(true);

    assert_eq!(field.deserialize(json!("foo")).unwrap(), json!("foo"));
    assert_eq!(field.deserialize(Value::Null).unwrap(), Value::Null);
}

#[rstest]
fn invalid_endpoint_raises_build_error(urls: Urls, author: Author) {
    let field = UrlFor::new("badendpoint");

    let err = field.serialize(&author, &urls).unwrap_err();

    assert!(matches!(err, Error::Build(BuildError::UnknownEndpoint(_))));
}

#[rstest]
fn hyperlinks_field(urls: Urls, author: Author) {
    let field = Hyperlinks::new(links!({
        "self": (UrlFor::new("author").arg("id", "<id>")),
        "collection": (UrlFor::new("authors")),
    }));

    let result = field.serialize(&author, &urls).unwrap();

    assert_eq!(
        result,
        json!({
            "self": url_for(&urls, "author", json!({ "id": author.id })),
            "collection": url_for(&urls, "authors", json!({})),
        })
    );
}

#[rstest]
fn hyperlinks_field_recurses(urls: Urls, author: Author) {
    let field = Hyperlinks::new(links!({
        "self": {
            "href": (UrlFor::new("author").arg("id", "<id>")),
            "title": "The author",
        },
        "collection": {
            "href": (UrlFor::new("authors")),
            "title": "Authors list",
        },
    }));

    let result = field.serialize(&author, &urls).unwrap();

    assert_eq!(
        result,
        json!({
            "self": {
                "href": url_for(&urls, "author", json!({ "id": author.id })),
                "title": "The author",
            },
            "collection": {
                "href": url_for(&urls, "authors", json!({})),
                "title": "Authors list",
            },
        })
    );
}

#[rstest]
fn hyperlinks_field_recurses_into_list(urls: Urls, author: Author) {
    let field = Hyperlinks::new(links!([
        { "rel": "self", "href": (UrlFor::new("author").arg("id", "<id>")) },
        { "rel": "collection", "href": (UrlFor::new("authors")) },
    ]));

    let result = field.serialize(&author, &urls).unwrap();

    assert_eq!(
        result,
        json!([
            { "rel": "self", "href": url_for(&urls, "author", json!({ "id": author.id })) },
            { "rel": "collection", "href": url_for(&urls, "authors", json!({})) },
        ])
    );
}

#[rstest]
fn hyperlinks_field_deserialization() {
    let field = Hyperlinks::new(links!({
        "href": (UrlFor::new("author").arg("id", "<id>")),
    }))
    .allow_none(true);

    assert_eq!(field.deserialize(json!("/author")).unwrap(), json!("/author"));
    assert_eq!(field.deserialize(Value::Null).unwrap(), Value::Null);
}

#[rstest]
fn absolute_url(urls: Urls, author: Author) {
    let field = UrlFor::absolute("authors");

    let result = field.serialize(&author, &urls).unwrap();

    assert_eq!(result, json!(urls.url_for("authors", &json!({}), true).unwrap()));
    assert_eq!(result, json!("http://localhost/authors"));
}

#[rstest]
fn absolute_url_deserialization() {
    let field = UrlFor::absolute("authors").allow_none(true);

    assert_eq!(field.deserialize(json!("foo")).unwrap(), json!("foo"));
    assert_eq!(field.deserialize(Value::Null).unwrap(), Value::Null);
}

#[rstest]
fn schema_embeds_links(urls: Urls, author: Author) {
    let result = author_schema().dump_object(&author, &urls).unwrap();

    assert_eq!(
        result,
        json!({
            "id": 123,
            "name": "Fred Douglass",
            "url": "http://localhost/authors/123",
            "_links": {
                "self": "/authors/123",
                "collection": "/authors",
            },
        })
    );
}
