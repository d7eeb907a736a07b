use crate::{
    routes::students::{
        delete_student, get_all_students, get_health, get_student, post_student, put_student,
    },
    state::RosterState,
};
use axum::{Router, routing::get};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub mod students;

pub fn router(state: RosterState) -> Router {
    let body_limit = state.config().server_config().body_limit;

    Router::new()
        .route("/healthz", get(get_health))
        .route("/api/students", get(get_all_students).post(post_student))
        .route(
            "/api/students/{student_number}",
            get(get_student).put(put_student).delete(delete_student),
        )
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
