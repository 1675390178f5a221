use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use shared::constants::{API_ARTICLES, API_LOGIN, ROOT_API};
use shared::types::{ArticleDraft, ArticleResponse, ArticlesResponse, Credentials, LoginResponse, MessageResponse};
use shared::utils::{validate_credentials, validate_draft};

use crate::constants::{msg_article_missing, msg_articles, msg_created, msg_deleted, msg_updated, msg_welcome};
use crate::filters::{with_json, with_store, with_user};
use crate::state::Store;

fn json_reply<T: Serialize>(data: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(data), status).into_response()
}

fn ouch(message: String, status: StatusCode) -> Response {
    json_reply(&MessageResponse::new(format!("Ouch: {message}")), status)
}

/// `/api/login` and `/api/articles[/{id}]`.
pub fn api(store: Store) -> impl Filter<Extract=(Response, ), Error=Rejection> + Clone {
    let login = warp::path(API_LOGIN)
        .and(warp::path::end())
        .and(warp::post())
        .and(with_json::<Credentials>())
        .and(with_store(store.clone()))
        .and_then(route_login);

    let articles = warp::path(API_ARTICLES)
        .and(warp::path::end())
        .and(warp::get())
        .and(with_user(store.clone()))
        .and(with_store(store.clone()))
        .and_then(route_articles);

    let article_create = warp::path(API_ARTICLES)
        .and(warp::path::end())
        .and(warp::post())
        .and(with_user(store.clone()))
        .and(with_json::<ArticleDraft>())
        .and(with_store(store.clone()))
        .and_then(route_article_create);

    let article_update = warp::path(API_ARTICLES)
        .and(warp::path::param::<u32>())
        .and(warp::path::end())
        .and(warp::put())
        .and(with_user(store.clone()))
        .and(with_json::<ArticleDraft>())
        .and(with_store(store.clone()))
        .and_then(route_article_update);

    let article_delete = warp::path(API_ARTICLES)
        .and(warp::path::param::<u32>())
        .and(warp::path::end())
        .and(warp::delete())
        .and(with_user(store.clone()))
        .and(with_store(store))
        .and_then(route_article_delete);

    warp::path(ROOT_API).and(
        login
            .or(articles).unify()
            .or(article_create).unify()
            .or(article_update).unify()
            .or(article_delete).unify()
    )
}

pub async fn route_login(source: Credentials, store: Store) -> Result<Response, Rejection> {
    let credentials = match validate_credentials(&source.username, &source.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            tracing::info!("login rejected: {}", err);
            return Ok(ouch(err.to_string(), StatusCode::UNAUTHORIZED));
        }
    };
    let username = credentials.username.trim();
    let token = store.login(username);
    tracing::info!("login: {}", username);
    Ok(json_reply(&LoginResponse { token, message: msg_welcome(username) }, StatusCode::OK))
}

pub async fn route_articles(username: String, store: Store) -> Result<Response, Rejection> {
    let data = ArticlesResponse {
        articles: store.articles(),
        message: msg_articles(&username),
    };
    Ok(json_reply(&data, StatusCode::OK))
}

pub async fn route_article_create(username: String, source: ArticleDraft, store: Store) -> Result<Response, Rejection> {
    let draft = match validate_draft(&source) {
        Ok(draft) => draft,
        Err(err) => return Ok(ouch(err.to_string(), StatusCode::UNPROCESSABLE_ENTITY)),
    };
    let article = store.create(draft);
    tracing::info!("article {} created by {}", article.article_id, username);
    Ok(json_reply(&ArticleResponse { article, message: msg_created(&username) }, StatusCode::CREATED))
}

pub async fn route_article_update(article_id: u32, username: String, source: ArticleDraft, store: Store) -> Result<Response, Rejection> {
    let draft = match validate_draft(&source) {
        Ok(draft) => draft,
        Err(err) => return Ok(ouch(err.to_string(), StatusCode::UNPROCESSABLE_ENTITY)),
    };
    match store.update(article_id, draft) {
        Some(article) => {
            tracing::info!("article {} updated by {}", article_id, username);
            Ok(json_reply(&ArticleResponse { article, message: msg_updated(&username) }, StatusCode::OK))
        }
        None => Ok(json_reply(&MessageResponse::new(msg_article_missing(article_id)), StatusCode::NOT_FOUND)),
    }
}

pub async fn route_article_delete(article_id: u32, username: String, store: Store) -> Result<Response, Rejection> {
    if store.delete(article_id) {
        tracing::info!("article {} deleted by {}", article_id, username);
        Ok(json_reply(&MessageResponse::new(msg_deleted(article_id, &username)), StatusCode::OK))
    } else {
        Ok(json_reply(&MessageResponse::new(msg_article_missing(article_id)), StatusCode::NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde::de::DeserializeOwned;
    use serde_json::json;
    use warp::http::Response as HttpResponse;
    use warp::hyper::body::Bytes;

    use shared::types::{Article, Topic};

    use crate::constants::seed_articles;
    use crate::handle_rejection;

    use super::*;

    fn store() -> Store {
        Store::new(seed_articles(), Duration::from_secs(60))
    }

    async fn send(store: &Store, request: warp::test::RequestBuilder) -> HttpResponse<Bytes> {
        request.reply(&api(store.clone()).recover(handle_rejection)).await
    }

    fn body<T: DeserializeOwned>(res: &HttpResponse<Bytes>) -> T {
        serde_json::from_slice(res.body()).unwrap()
    }

    async fn login(store: &Store) -> String {
        let res = send(store, warp::test::request()
            .method("POST")
            .path("/api/login")
            .json(&json!({"username": "maria", "password": "password"}))).await;
        assert_eq!(res.status(), StatusCode::OK);
        body::<LoginResponse>(&res).token
    }

    fn draft_json(title: &str) -> serde_json::Value {
        json!({"title": title, "text": "Ownership moves values.", "topic": "Node"})
    }

    #[tokio::test]
    async fn login_returns_token_and_welcome() {
        let store = store();
        let res = send(&store, warp::test::request()
            .method("POST")
            .path("/api/login")
            .json(&json!({"username": " maria ", "password": "password"}))).await;

        assert_eq!(res.status(), StatusCode::OK);
        let data: LoginResponse = body(&res);
        assert_eq!(data.message, "Welcome back, maria!");
        assert_eq!(store.username(&data.token).as_deref(), Some("maria"));
    }

    #[tokio::test]
    async fn login_rejects_short_password() {
        let store = store();
        let res = send(&store, warp::test::request()
            .method("POST")
            .path("/api/login")
            .json(&json!({"username": "maria", "password": "short"}))).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(body::<MessageResponse>(&res).message.starts_with("Ouch: "));
    }

    #[tokio::test]
    async fn articles_require_token() {
        let store = store();
        let res = send(&store, warp::test::request().path("/api/articles")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body::<MessageResponse>(&res).message, crate::constants::MSG_TOKEN_REQUIRED);

        let res = send(&store, warp::test::request()
            .path("/api/articles")
            .header("Authorization", "forged")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body::<MessageResponse>(&res).message, crate::constants::MSG_TOKEN_INVALID);
    }

    #[tokio::test]
    async fn articles_list_with_token() {
        let store = store();
        let token = login(&store).await;
        let res = send(&store, warp::test::request()
            .path("/api/articles")
            .header("Authorization", &token)).await;

        assert_eq!(res.status(), StatusCode::OK);
        let data: ArticlesResponse = body(&res);
        assert_eq!(data.articles.len(), 3);
        assert_eq!(data.message, "Here are your articles, maria!");
    }

    #[tokio::test]
    async fn create_assigns_next_id() {
        let store = store();
        let token = login(&store).await;
        let res = send(&store, warp::test::request()
            .method("POST")
            .path("/api/articles")
            .header("Authorization", &token)
            .json(&draft_json("  Borrowing "))).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let data: ArticleResponse = body(&res);
        assert_eq!(data.article, Article {
            article_id: 4,
            title: "Borrowing".to_string(),
            text: "Ownership moves values.".to_string(),
            topic: Topic::Node,
        });
        assert_eq!(store.articles().len(), 4);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let store = store();
        let token = login(&store).await;
        let res = send(&store, warp::test::request()
            .method("POST")
            .path("/api/articles")
            .header("Authorization", &token)
            .json(&draft_json("   "))).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.articles().len(), 3);
    }

    #[tokio::test]
    async fn create_rejects_unknown_topic() {
        let store = store();
        let token = login(&store).await;
        let res = send(&store, warp::test::request()
            .method("POST")
            .path("/api/articles")
            .header("Authorization", &token)
            .json(&json!({"title": "t", "text": "x", "topic": "Rust"}))).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body::<MessageResponse>(&res).message, crate::constants::MSG_BAD_BODY);
    }

    #[tokio::test]
    async fn update_existing_and_missing() {
        let store = store();
        let token = login(&store).await;
        let res = send(&store, warp::test::request()
            .method("PUT")
            .path("/api/articles/2")
            .header("Authorization", &token)
            .json(&draft_json("Effects v2"))).await;
        assert_eq!(res.status(), StatusCode::OK);
        let data: ArticleResponse = body(&res);
        assert_eq!(data.article.article_id, 2);
        assert_eq!(data.message, "Nice update, maria!");

        let res = send(&store, warp::test::request()
            .method("PUT")
            .path("/api/articles/99")
            .header("Authorization", &token)
            .json(&draft_json("Ghost"))).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let store = store();
        let token = login(&store).await;
        let request = || warp::test::request()
            .method("DELETE")
            .path("/api/articles/1")
            .header("Authorization", &token);

        let res = send(&store, request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body::<MessageResponse>(&res).message, "Article 1 was deleted, maria!");
        assert!(store.articles().iter().all(|row| row.article_id != 1));

        let res = send(&store, request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_requires_token() {
        let store = store();
        let res = send(&store, warp::test::request()
            .method("DELETE")
            .path("/api/articles/1")).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(store.articles().len(), 3);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let store = store();
        let res = send(&store, warp::test::request().path("/api/nope")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn wrong_method_is_rejected() {
        let store = store();
        let res = send(&store, warp::test::request().method("GET").path("/api/login")).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
