//! [`Urls`] extractor for [axum](https://docs.rs/axum/latest/axum/) handlers.
//!
//! The route table is taken from router state, the request context from
//! the request URI and `Host` header.

use std::convert::Infallible;

use ::axum::extract::{FromRef, FromRequestParts};
use ::axum::http::request::Parts;
use ::axum::http::{header, HeaderMap, Uri};

use crate::routes::{RequestContext, RouteTable, Urls};

impl RequestContext {
    /// Context of an incoming request.
    ///
    /// Scheme is taken from an absolute request URI, then from the
    /// `X-Forwarded-Proto` header, defaulting to `http`.
    pub fn from_http(uri: &Uri, headers: &HeaderMap) -> Self {
        let forwarded_proto = headers
            .get("x-forwarded-proto")
            .and_then(|proto| proto.to_str().ok())
            .and_then(|proto| proto.split(',').next())
            .map(str::trim)
            .filter(|proto| !proto.is_empty());

        let scheme = uri.scheme_str().or(forwarded_proto).unwrap_or("http");
        let mut context = Self::new().with_scheme(scheme);

        let host = headers
            .get(header::HOST)
            .and_then(|host| host.to_str().ok())
            .or_else(|| uri.authority().map(|authority| authority.as_str()));

        if let Some(host) = host {
            context = context.with_host(host);
        }

        context
    }
}

impl<S> FromRequestParts<S> for Urls
where
    RouteTable: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let routes = RouteTable::from_ref(state);
        let context = RequestContext::from_http(&parts.uri, &parts.headers);

        Ok(routes.bind(context))
    }
}
