use axum::{
    Router,
    routing::{get, patch},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use academy_core::health::healthz;
use academy_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    enrollment::{assign_courses, get_user_courses},
    health::readyz,
    user::{create_user, delete_user, get_user, list_users, update_user, update_user_status},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/{id}/status", patch(update_user_status))
        // Enrollments
        .route(
            "/users/{id}/courses",
            get(get_user_courses).post(assign_courses),
        )
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
