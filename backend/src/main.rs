use std::convert::Infallible;
use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;
use warp::{Filter, Rejection, Reply};
use warp::http::StatusCode;
use warp::reject::Reject;

use shared::constants::{HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, PATH_ARTICLES};
use shared::types::MessageResponse;

use crate::config::Config;
use crate::constants::{seed_articles, MSG_BAD_BODY, MSG_METHOD, MSG_NOT_FOUND, MSG_TOO_LARGE};
use crate::routes::api;
use crate::state::Store;
use crate::tasks::run_tasks;

mod config;
mod routes;
mod types;
mod filters;
mod utils;
mod state;
mod constants;
mod tasks;

#[tokio::main(worker_threads = 2)]
async fn main() {
    let with_ansi = cfg!(target_os = "macos");

    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_ansi(with_ansi)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_ids(true)
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("tracing: {err}");
    }

    let config = Config::from_env();
    let store = Store::new(seed_articles(), config.session_lifetime);

    tokio::task::spawn(run_tasks(store.clone()));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec![HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE])
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"]);

    // client routes are answered with the app shell, everything else from disk
    let index = Path::new(&config.dist).join("index.html");
    let app_shell = warp::path::end()
        .or(warp::path(PATH_ARTICLES.trim_start_matches('/')).and(warp::path::end()))
        .unify()
        .and(warp::fs::file(index));
    let routes_dir = warp::get().and(app_shell.or(warp::fs::dir(config.dist.clone())));

    let routes = api(store).or(routes_dir);

    tracing::info!("listening on {}, static files from {}", config.addr, config.dist);
    warp::serve(
        routes
            .recover(handle_rejection)
            .with(warp::trace::request()).with(cors),
    )
        .run(config.addr)
        .await;
}

#[tracing::instrument]
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, MSG_NOT_FOUND)
    } else if let Some(Unauthorized { reason }) = err.find::<Unauthorized>() {
        (StatusCode::UNAUTHORIZED, *reason)
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, MSG_BAD_BODY)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, MSG_TOO_LARGE)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD)
    } else {
        tracing::error!("unhandled rejection: {:?}", err);
        (StatusCode::BAD_REQUEST, MSG_BAD_BODY)
    };
    Ok(warp::reply::with_status(warp::reply::json(&MessageResponse::new(message)), status))
}

#[derive(Debug)]
pub struct Unauthorized {
    pub reason: &'static str,
}

impl Reject for Unauthorized {}
