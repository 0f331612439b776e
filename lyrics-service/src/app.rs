use std::sync::Arc;

use axum::extract::FromRef;
use axum::http::Method;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use common_auth::{access_gate, AccessGate, PolicyRegistry, RoutePolicy, TokenCodec, ROLE_ADMIN};

use crate::store::{InMemorySongStore, InMemoryUserStore, UserStore};
use crate::{auth_handlers, song_handlers, user_handlers};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub users: Arc<dyn UserStore>,
    pub songs: Arc<InMemorySongStore>,
}

impl FromRef<AppState> for Arc<TokenCodec> {
    fn from_ref(state: &AppState) -> Self {
        state.codec.clone()
    }
}

impl AppState {
    /// State backed by in-memory stores; production deployments swap in
    /// a persistent `UserStore`.
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self {
            codec,
            users: Arc::new(InMemoryUserStore::new()),
            songs: Arc::new(InMemorySongStore::new()),
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Route policies, declared next to the routes they guard. Anything not
/// listed here is authenticated-only by default.
fn policies() -> PolicyRegistry {
    PolicyRegistry::new()
        .route(Method::GET, "/healthz", RoutePolicy::public())
        .route(Method::POST, "/auth/register", RoutePolicy::public())
        .route(Method::POST, "/auth/login", RoutePolicy::public())
        .route(Method::POST, "/auth/refresh", RoutePolicy::public())
        .route(Method::GET, "/songs", RoutePolicy::authenticated())
        .route(Method::GET, "/songs/:id", RoutePolicy::authenticated())
        .route(Method::POST, "/songs", RoutePolicy::roles(&[ROLE_ADMIN]))
        .route(Method::DELETE, "/songs/:id", RoutePolicy::roles(&[ROLE_ADMIN]))
        .route(Method::GET, "/users", RoutePolicy::roles(&[ROLE_ADMIN]))
        .route(Method::GET, "/users/me", RoutePolicy::authenticated())
}

pub fn build_router(state: AppState) -> Router {
    let gate = AccessGate::new(state.codec.clone(), policies());

    Router::new()
        .route("/healthz", get(health))
        .route("/auth/register", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .route("/auth/refresh", post(auth_handlers::refresh))
        .route(
            "/songs",
            get(song_handlers::list_songs).post(song_handlers::create_song),
        )
        .route(
            "/songs/:id",
            get(song_handlers::get_song).delete(song_handlers::delete_song),
        )
        .route("/users", get(user_handlers::list_users))
        .route("/users/me", get(user_handlers::me))
        .layer(middleware::from_fn_with_state(gate, access_gate))
        .with_state(state)
}
