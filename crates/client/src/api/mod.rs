//! Typed endpoint families.
//!
//! Each family is a thin borrowed handle over [`crate::ApiClient`]
//! (`client.clients().list()`); all transport concerns, including the 401
//! interceptor, live in [`crate::http`].

/// Defines a borrowed endpoint handle.
///
/// Declared ahead of the `mod` items so every family file sees it.
macro_rules! endpoint_family {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            client: &'a $crate::http::ApiClient,
        }

        impl<'a> $name<'a> {
            pub(crate) const fn new(client: &'a $crate::http::ApiClient) -> Self {
                Self { client }
            }
        }
    };
}

mod ad_spaces;
mod advertising;
mod auth;
mod clients;
mod content;
mod dashboard;
mod orders;
mod public;
mod users;

pub use ad_spaces::AdSpacesApi;
pub use advertising::AdvertisingApi;
pub use auth::AuthApi;
pub use clients::ClientsApi;
pub use content::ContentApi;
pub use dashboard::DashboardApi;
pub use orders::OrdersApi;
pub use public::PublicAdsApi;
pub use users::UsersApi;
