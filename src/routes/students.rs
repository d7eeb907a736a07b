use crate::{
    data::student::{CreateStudentForm, Student, UpdateStudentForm},
    error::{ErrorBody, RosterResult},
    state::RosterState,
};
use axum::{
    Json,
    extract::{
        FromRequest, Path, State,
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `Json`, but a body that doesn't decode gets the generic invalid-request error instead of axum's.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(InvalidRequest))]
pub struct RosterJson<T>(pub T);

pub struct InvalidRequest;

impl From<JsonRejection> for InvalidRequest {
    fn from(rejection: JsonRejection) -> Self {
        debug!(%rejection, "Rejected request body");
        Self
    }
}

impl IntoResponse for InvalidRequest {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorBody::invalid_request())).into_response()
    }
}

pub async fn post_student(
    State(state): State<RosterState>,
    RosterJson(form): RosterJson<CreateStudentForm>,
) -> RosterResult<(StatusCode, Json<Student>)> {
    let student = state
        .service()
        .create(&state.call_context(), form)
        .await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn get_all_students(State(state): State<RosterState>) -> RosterResult<Json<Vec<Student>>> {
    Ok(Json(state.service().get_all(&state.call_context()).await?))
}

pub async fn get_student(
    State(state): State<RosterState>,
    Path(student_number): Path<String>,
) -> RosterResult<Json<Student>> {
    Ok(Json(
        state
            .service()
            .get(&state.call_context(), &student_number)
            .await?,
    ))
}

pub async fn put_student(
    State(state): State<RosterState>,
    Path(student_number): Path<String>,
    RosterJson(form): RosterJson<UpdateStudentForm>,
) -> RosterResult<Json<Student>> {
    Ok(Json(
        state
            .service()
            .update(&state.call_context(), &student_number, form)
            .await?,
    ))
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Path(student_number): Path<String>,
) -> RosterResult<StatusCode> {
    state
        .service()
        .delete(&state.call_context(), &student_number)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
    students: usize,
}

pub async fn get_health(State(state): State<RosterState>) -> RosterResult<Json<Health>> {
    let students = state.service().count(&state.call_context()).await?;
    Ok(Json(Health {
        status: "ok",
        students,
    }))
}
