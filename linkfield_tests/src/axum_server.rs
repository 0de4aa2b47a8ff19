use std::net::SocketAddr;

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use linkfield::paths::{RouteTable, Urls};
use serde_json::{json, Value};

use crate::model::{author_schema, routes, Author};

async fn get_author(Path(id): Path<i64>, urls: Urls) -> Json<Value> {
    let author = Author {
        id,
        name: "Fred Douglass".to_owned(),
    };

    Json(author_schema().dump_object(&author, &urls).unwrap())
}

async fn get_authors(urls: Urls) -> Json<Value> {
    Json(json!({
        "first": urls.url_for("author", &json!({ "id": 1 }), true).unwrap(),
        "next": urls.url_for("authors", &json!({ "page": 2 }), false).unwrap(),
    }))
}

/// Serve route table on a free local port.
async fn launch_server(routes: RouteTable) -> SocketAddr {
    let author_path = routes.get("author").unwrap().to_string();
    let authors_path = routes.get("authors").unwrap().to_string();

    let app = Router::new()
        .route(&author_path, get(get_author))
        .route(&authors_path, get(get_authors))
        .with_state(routes);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

    addr
}

#[tokio::test]
async fn author_links() {
    let addr = launch_server(routes()).await;

    let body: Value = reqwest::get(format!("http://{addr}/authors/42"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        json!({
            "id": 42,
            "name": "Fred Douglass",
            "url": format!("http://{addr}/authors/42"),
            "_links": {
                "self": "/authors/42",
                "collection": "/authors",
            },
        })
    );
}

#[tokio::test]
async fn urls_from_handler() {
    let addr = launch_server(routes()).await;

    let body: Value = reqwest::get(format!("http://{addr}/authors"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        json!({
            "first": format!("http://{addr}/authors/1"),
            "next": "/authors?page=2",
        })
    );
}
