use linkfield::paths::{RequestContext, RouteTable, Urls};
use linkfield::{links, Attributes, Hyperlinks, LinkSchema, UrlFor};
use rstest::fixture;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Attributes)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

#[fixture]
pub fn routes() -> RouteTable {
    RouteTable::new()
        .route("author", "/authors/{id}")
        .and_then(|routes| routes.route("authors", "/authors/"))
        .unwrap()
}

#[fixture]
pub fn urls(routes: RouteTable) -> Urls {
    routes.bind(RequestContext::new().with_host("localhost"))
}

#[fixture]
pub fn author() -> Author {
    Author {
        id: 123,
        name: "Fred Douglass".to_owned(),
    }
}

/// Links embedded into served authors.
pub fn author_schema() -> LinkSchema {
    LinkSchema::new()
        .field("url", UrlFor::absolute("author").arg("id", "<id>"))
        .field(
            "_links",
            Hyperlinks::new(links!({
                "self": (UrlFor::new("author").arg("id", "<id>")),
                "collection": (UrlFor::new("authors")),
            })),
        )
}
