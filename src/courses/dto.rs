use serde::{Deserialize, Serialize};

use super::repo::CourseWithOwnerRow;

/// POST /api/courses body. `userId` is accepted for compatibility but the
/// owner is always the authenticated identity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Option<i32>,
}

/// PUT /api/courses/:id body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user: OwnerSummary,
}

impl From<CourseWithOwnerRow> for CourseResponse {
    fn from(row: CourseWithOwnerRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            estimated_time: row.estimated_time,
            materials_needed: row.materials_needed,
            user: OwnerSummary {
                id: row.user_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email_address: row.owner_email,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_response_nests_owner_summary_in_camel_case() {
        let row = CourseWithOwnerRow {
            id: 3,
            user_id: 1,
            title: "Intro to Baskets".into(),
            description: "Underwater basket weaving".into(),
            estimated_time: Some("12 hours".into()),
            materials_needed: None,
            owner_first_name: "Joe".into(),
            owner_last_name: "Smith".into(),
            owner_email: "joe@x.com".into(),
        };
        let body = serde_json::to_value(CourseResponse::from(row)).unwrap();
        assert_eq!(body["userId"], 1);
        assert_eq!(body["estimatedTime"], "12 hours");
        assert_eq!(body["materialsNeeded"], serde_json::Value::Null);
        assert_eq!(body["user"]["firstName"], "Joe");
        assert_eq!(body["user"]["emailAddress"], "joe@x.com");
        assert_eq!(body["user"]["id"], 1);
    }

    #[test]
    fn create_request_parses_optional_owner_field() {
        let req: CreateCourseRequest = serde_json::from_str(
            r#"{"title":"T","description":"D","userId":42,"estimatedTime":"1h"}"#,
        )
        .unwrap();
        assert_eq!(req.title.as_deref(), Some("T"));
        assert_eq!(req.user_id, Some(42));
    }
}
