//! Named route table and URL building.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::path_serializer;
use crate::path_template::{self, PathTemplate};

/// Arguments of a single URL build, keyed by argument name.
pub type UrlArgs = BTreeMap<String, serde_json::Value>;

/// Builds URLs for named endpoints.
///
/// This is the routing collaborator consumed by link fields. A host framework
/// can implement it on top of its own routing facility; [`Urls`] is an
/// implementation backed by a [`RouteTable`].
pub trait UrlBuilder {
    /// Build URL for `endpoint` with given arguments.
    ///
    /// Arguments not consumed by the endpoint path are appended as query
    /// parameters. With `external` set, the URL includes scheme and host.
    fn build_url(&self, endpoint: &str, args: &UrlArgs, external: bool)
        -> Result<String, BuildError>;
}

impl<B: UrlBuilder + ?Sized> UrlBuilder for &B {
    fn build_url(
        &self,
        endpoint: &str,
        args: &UrlArgs,
        external: bool,
    ) -> Result<String, BuildError> {
        (**self).build_url(endpoint, args, external)
    }
}

/// Error raised by a [`UrlBuilder`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("could not build url for endpoint '{0}'")]
    UnknownEndpoint(String),
    #[error("could not build url for endpoint '{endpoint}': {source}")]
    Arguments {
        endpoint: String,
        #[source]
        source: path_serializer::Error,
    },
    /// External URL was requested, but request context has no host.
    #[error("could not build external url for endpoint '{0}': no server name in request context")]
    MissingServerName(String),
    /// Error of a third-party [`UrlBuilder`] implementation.
    #[error("{0}")]
    Custom(String),
}

/// Table of named routes.
///
/// Cloning is cheap, routes are shared between clones.
///
/// ```
/// use linkfield_paths::{RequestContext, RouteTable};
///
/// let routes = RouteTable::new()
///     .route("authors", "/authors")?
///     .route("author", "/authors/{id}")?;
///
/// let urls = routes.bind(RequestContext::new());
/// assert_eq!(urls.url_for("author", &serde_json::json!({ "id": 42 }), false)?, "/authors/42");
/// assert_eq!(urls.url_for("authors", &serde_json::json!({ "page": 2 }), false)?, "/authors?page=2");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct RouteTable {
    routes: Arc<BTreeMap<String, PathTemplate>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `endpoint` under path expression `path`.
    pub fn route(
        mut self,
        endpoint: impl Into<String>,
        path: &str,
    ) -> Result<Self, path_template::Error> {
        let template = PathTemplate::parse(path)?;
        self.insert(endpoint, template);
        Ok(self)
    }

    /// Insert parsed template, returning the one previously registered for `endpoint`.
    pub fn insert(&mut self, endpoint: impl Into<String>, template: PathTemplate) -> Option<PathTemplate> {
        Arc::make_mut(&mut self.routes).insert(endpoint.into(), template)
    }

    pub fn get(&self, endpoint: &str) -> Option<&PathTemplate> {
        self.routes.get(endpoint)
    }

    pub fn contains(&self, endpoint: &str) -> bool {
        self.routes.contains_key(endpoint)
    }

    /// Names of registered endpoints, in lexicographic order.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Bind table to a request context, producing a [`UrlBuilder`].
    pub fn bind(&self, context: RequestContext) -> Urls {
        Urls {
            routes: self.clone(),
            context,
        }
    }
}

impl TryFrom<BTreeMap<String, String>> for RouteTable {
    type Error = path_template::Error;

    fn try_from(value: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let routes = value
            .into_iter()
            .map(|(endpoint, path)| Ok((endpoint, PathTemplate::parse(&path)?)))
            .collect::<Result<_, path_template::Error>>()?;

        Ok(Self {
            routes: Arc::new(routes),
        })
    }
}

/// Request-dependent part of URL building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestContext {
    /// URL scheme of external URLs.
    pub scheme: String,
    /// Host (with optional port) of external URLs.
    pub host: Option<String>,
    /// Prefix, the application is mounted under.
    /// Leading and trailing slashes are normalized when building URLs.
    pub script_root: String,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            scheme: "http".to_owned(),
            host: None,
            script_root: String::new(),
        }
    }
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_script_root(mut self, root: impl Into<String>) -> Self {
        self.script_root = root.into().trim_end_matches('/').to_owned();
        self
    }
}

/// [`RouteTable`] bound to a [`RequestContext`].
#[derive(Debug, Clone)]
pub struct Urls {
    routes: RouteTable,
    context: RequestContext,
}

impl Urls {
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Build URL for `endpoint` from any serializable arguments
    /// (see [`ArgsSerializer`](crate::ArgsSerializer) for accepted shapes).
    pub fn url_for<A>(&self, endpoint: &str, args: &A, external: bool) -> Result<String, BuildError>
    where
        A: Serialize + ?Sized,
    {
        let Some(template) = self.routes.get(endpoint) else {
            tracing::debug!(endpoint, "no route registered for endpoint");
            return Err(BuildError::UnknownEndpoint(endpoint.to_owned()));
        };

        let serialized =
            crate::serialize(template, args).map_err(|source| BuildError::Arguments {
                endpoint: endpoint.to_owned(),
                source,
            })?;

        let mut url = String::new();

        if external {
            let host = self
                .context
                .host
                .as_deref()
                .ok_or_else(|| BuildError::MissingServerName(endpoint.to_owned()))?;

            url.push_str(&self.context.scheme);
            url.push_str("://");
            url.push_str(host);
        }

        let root = self.context.script_root.trim_matches('/');
        if !root.is_empty() {
            url.push('/');
            url.push_str(root);
        }

        url.push_str(&serialized.to_string());

        tracing::trace!(endpoint, %url, external, "built url");

        Ok(url)
    }
}

impl UrlBuilder for Urls {
    fn build_url(
        &self,
        endpoint: &str,
        args: &UrlArgs,
        external: bool,
    ) -> Result<String, BuildError> {
        self.url_for(endpoint, args, external)
    }
}
