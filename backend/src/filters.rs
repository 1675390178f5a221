use std::convert::Infallible;

use serde::de::DeserializeOwned;
use warp::{Filter, Rejection};

use shared::constants::HEADER_AUTHORIZATION;

use crate::constants::{BODY_LIMIT, MSG_TOKEN_INVALID, MSG_TOKEN_REQUIRED};
use crate::state::Store;
use crate::Unauthorized;

pub fn with_store(store: Store) -> impl Filter<Extract=(Store, ), Error=Infallible> + Clone {
    warp::any().map(move || store.clone())
}

/// Resolves the `Authorization` header to the logged in username.
pub fn with_user(store: Store) -> impl Filter<Extract=(String, ), Error=Rejection> + Clone {
    warp::header::optional::<String>(HEADER_AUTHORIZATION)
        .and(with_store(store))
        .and_then(|token: Option<String>, store: Store| async move {
            let token = token
                .filter(|token| !token.trim().is_empty())
                .ok_or_else(|| warp::reject::custom(Unauthorized { reason: MSG_TOKEN_REQUIRED }))?;
            store.username(token.trim())
                .ok_or_else(|| warp::reject::custom(Unauthorized { reason: MSG_TOKEN_INVALID }))
        })
}

pub fn with_json<T: DeserializeOwned + Send>() -> impl Filter<Extract=(T, ), Error=Rejection> + Clone {
    warp::body::content_length_limit(BODY_LIMIT).and(warp::body::json())
}
