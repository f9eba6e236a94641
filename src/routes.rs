use axum::{
    http::{HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{self, SecurityConfig};
use crate::handlers::{protected, public};
use crate::state::AppState;

/// Full application router with global middleware
pub fn app(state: AppState) -> Router {
    let config = config::config();

    let mut router = Router::new()
        // Public
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .route("/unprotected_resource", get(public::system::unprotected_resource))
        .merge(todo_routes())
        .merge(user_record_routes())
        .merge(token_routes())
        .merge(exception_routes())
        // Bearer token required
        .merge(protected_routes())
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn todo_routes() -> Router<AppState> {
    use public::todo;

    Router::new()
        .route("/todo", post(todo::create))
        .route("/todo_list", get(todo::list))
        .route("/delete", get(todo::delete))
        .route("/update", put(todo::update))
        .route("/get-or-create-todo/:pk", put(todo::get_or_create))
        .route("/todos-header/:pk", get(todo::get_with_header))
}

fn user_record_routes() -> Router<AppState> {
    use public::users;

    Router::new()
        .route("/users", post(users::create).get(users::fetch))
        .route("/user/:user_id", put(users::update).delete(users::delete))
}

fn token_routes() -> Router<AppState> {
    Router::new().route("/token", post(public::token::login))
}

fn protected_routes() -> Router<AppState> {
    use protected::{info, resources};

    Router::new()
        .route("/info", get(info::info))
        .route("/admin", get(resources::admin))
        .route("/user", get(resources::user))
        .route("/protected_resource", get(resources::protected_resource))
        .route("/resource_for_authorized", get(resources::resource_for_authorized))
}

fn exception_routes() -> Router<AppState> {
    use public::exceptions;

    Router::new()
        .route("/root", get(exceptions::root))
        .route("/items", post(exceptions::create_item))
        .route("/items/:pk", get(exceptions::item_a))
        .route("/items_2/:pk", get(exceptions::item_b))
        .route("/items_3/:pk", get(exceptions::item_c))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
