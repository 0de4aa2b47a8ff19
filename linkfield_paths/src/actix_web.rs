//! [`Urls`] extractor for [actix-web](https://docs.rs/actix-web/latest/actix_web/) handlers.
//!
//! The route table must be registered as `web::Data<RouteTable>` app data.

use std::future::{ready, Ready};

use ::actix_web::dev::Payload;
use ::actix_web::{web, FromRequest, HttpRequest};

use crate::routes::{RequestContext, RouteTable, Urls};

impl RequestContext {
    /// Context of an incoming request, taken from its connection info.
    pub fn from_request(req: &HttpRequest) -> Self {
        let info = req.connection_info();

        Self::new()
            .with_scheme(info.scheme())
            .with_host(info.host())
    }
}

impl FromRequest for Urls {
    type Error = ::actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<RouteTable>>() {
            Some(routes) => Ok(routes.bind(RequestContext::from_request(req))),
            None => {
                tracing::debug!("route table is not registered as app data");
                Err(::actix_web::error::ErrorInternalServerError(
                    "route table is not registered as app data",
                ))
            }
        };

        ready(result)
    }
}
