use actix_web::http::{header, StatusCode};
use actix_web::{get, test, web, App, HttpResponse};
use linkfield::paths::Urls;
use serde_json::{json, Value};

use crate::model::{author_schema, routes, Author};

#[get("/authors/{id}")]
async fn get_author(id: web::Path<i64>, urls: Urls) -> HttpResponse {
    let author = Author {
        id: id.into_inner(),
        name: "Fred Douglass".to_owned(),
    };

    HttpResponse::Ok().json(author_schema().dump_object(&author, &urls).unwrap())
}

#[actix_web::test]
async fn author_links() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(routes()))
            .service(get_author),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/authors/7")
        .insert_header((header::HOST, "books.example"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({
            "id": 7,
            "name": "Fred Douglass",
            "url": "http://books.example/authors/7",
            "_links": {
                "self": "/authors/7",
                "collection": "/authors",
            },
        })
    );
}

#[actix_web::test]
async fn missing_route_table() {
    let app = test::init_service(App::new().service(get_author)).await;

    let req = test::TestRequest::get().uri("/authors/7").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
