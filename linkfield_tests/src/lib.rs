#[cfg(test)]
mod model;

#[cfg(test)]
mod derive;
#[cfg(test)]
mod fields;

#[cfg(all(test, feature = "actix-web"))]
mod actix_server;
#[cfg(all(test, feature = "axum"))]
mod axum_server;
