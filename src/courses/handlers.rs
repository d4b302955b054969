use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{auth::AuthUser, error::ApiError, state::AppState, validate};

use super::dto::{CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use super::repo::{self, Course, CourseFields};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:id", get(get_course))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", post(create_course))
        .route("/courses/:id", put(update_course).delete(delete_course))
}

/// GET /api/courses - all courses, each with its owner summary.
#[instrument(skip_all)]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let rows = repo::list_with_owner(&state.db).await?;
    Ok(Json(rows.into_iter().map(CourseResponse::from).collect()))
}

/// GET /api/courses/:id
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CourseResponse>, ApiError> {
    match repo::find_with_owner(&state.db, id).await? {
        Some(row) => Ok(Json(CourseResponse::from(row))),
        None => Err(ApiError::NotFound("Sorry, we cannot find that course.".into())),
    }
}

/// POST /api/courses - authenticated; the new course is owned by the caller,
/// whatever `userId` the body claims.
#[instrument(skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let errors = validate::new_course(&payload);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if payload.user_id.is_some_and(|claimed| claimed != user.id) {
        warn!(
            claimed = payload.user_id,
            user_id = user.id,
            "ignoring client-supplied course owner"
        );
    }

    let fields = CourseFields {
        title: payload.title.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        estimated_time: payload.estimated_time,
        materials_needed: payload.materials_needed,
    };
    let course = repo::create(&state.db, user.id, &fields).await?;
    info!(course_id = course.id, user_id = user.id, "course created");

    let location = format!("/api/courses/{}", course.id)
        .parse::<HeaderValue>()
        .map_err(anyhow::Error::from)?;
    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, location);
    Ok((StatusCode::CREATED, headers))
}

/// PUT /api/courses/:id - authenticated owner only; 204 on success.
#[instrument(skip_all)]
pub async fn update_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<StatusCode, ApiError> {
    let course = require_owned(&state, id, user.id, update_forbidden).await?;

    let errors = validate::course_update(&payload);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let fields = CourseFields {
        title: payload.title.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        estimated_time: payload.estimated_time.or(course.estimated_time),
        materials_needed: payload.materials_needed.or(course.materials_needed),
    };
    repo::update(&state.db, id, &fields).await?;
    info!(course_id = id, user_id = user.id, "course updated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/courses/:id - authenticated owner only; 204 on success.
#[instrument(skip_all)]
pub async fn delete_course(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require_owned(&state, id, user.id, delete_forbidden).await?;
    repo::delete(&state.db, id).await?;
    info!(course_id = id, user_id = user.id, "course deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fetches the course and enforces the ownership invariant: only the user a
/// course references may mutate it.
async fn require_owned(
    state: &AppState,
    course_id: i32,
    user_id: i32,
    forbidden: fn() -> ApiError,
) -> Result<Course, ApiError> {
    let found = repo::find_by_id(&state.db, course_id).await?;
    resolve_owned(found, user_id, forbidden)
}

/// Missing course is 404 before 403 so a non-owner cannot probe which ids
/// exist via the error code alone.
fn resolve_owned(
    found: Option<Course>,
    user_id: i32,
    forbidden: fn() -> ApiError,
) -> Result<Course, ApiError> {
    let course = found.ok_or_else(|| {
        ApiError::NotFound("The course that you are looking for cannot be found...".into())
    })?;
    if course.user_id != user_id {
        return Err(forbidden());
    }
    Ok(course)
}

fn update_forbidden() -> ApiError {
    ApiError::Forbidden {
        developer: "course ownership mismatch".into(),
        client: "The user information that you entered does not match what we have in our \
                 records for the owner of this course."
            .into(),
    }
}

fn delete_forbidden() -> ApiError {
    ApiError::Forbidden {
        developer: "course ownership mismatch".into(),
        client: "The course that you are attempting to delete does not belong to you.".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_owned_by(owner: i32) -> Course {
        Course {
            id: 9,
            user_id: owner,
            title: "Intro to Baskets".into(),
            description: "Underwater basket weaving".into(),
            estimated_time: None,
            materials_needed: None,
        }
    }

    #[test]
    fn owner_may_mutate() {
        let course = resolve_owned(Some(course_owned_by(1)), 1, update_forbidden).unwrap();
        assert_eq!(course.id, 9);
    }

    #[test]
    fn non_owner_gets_forbidden_with_both_framings() {
        let err = resolve_owned(Some(course_owned_by(1)), 2, update_forbidden).unwrap_err();
        match err {
            ApiError::Forbidden { developer, client } => {
                assert_eq!(developer, "course ownership mismatch");
                assert!(client.contains("owner of this course"));
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn delete_wording_names_the_attempt() {
        let err = resolve_owned(Some(course_owned_by(1)), 2, delete_forbidden).unwrap_err();
        match err {
            ApiError::Forbidden { client, .. } => {
                assert!(client.contains("attempting to delete"));
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn missing_course_is_not_found_even_for_a_non_owner() {
        let err = resolve_owned(None, 2, update_forbidden).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
