use sqlx::{FromRow, PgPool};

use crate::error::ApiError;

#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Course joined with the owning user's public columns.
#[derive(Debug, Clone, FromRow)]
pub struct CourseWithOwnerRow {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email: String,
}

pub struct CourseFields {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

const WITH_OWNER: &str = r#"
    SELECT c.id, c.user_id, c.title, c.description, c.estimated_time, c.materials_needed,
           u.first_name AS owner_first_name, u.last_name AS owner_last_name,
           u.email_address AS owner_email
    FROM courses c
    JOIN users u ON u.id = c.user_id
"#;

pub async fn list_with_owner(db: &PgPool) -> Result<Vec<CourseWithOwnerRow>, ApiError> {
    let rows = sqlx::query_as::<_, CourseWithOwnerRow>(&format!("{WITH_OWNER} ORDER BY c.id"))
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find_with_owner(db: &PgPool, id: i32) -> Result<Option<CourseWithOwnerRow>, ApiError> {
    let row = sqlx::query_as::<_, CourseWithOwnerRow>(&format!("{WITH_OWNER} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<Course>, ApiError> {
    let course = sqlx::query_as::<_, Course>(
        r#"
        SELECT id, user_id, title, description, estimated_time, materials_needed
        FROM courses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(course)
}

pub async fn create(db: &PgPool, user_id: i32, fields: &CourseFields) -> Result<Course, ApiError> {
    let course = sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (user_id, title, description, estimated_time, materials_needed)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, title, description, estimated_time, materials_needed
        "#,
    )
    .bind(user_id)
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.estimated_time)
    .bind(&fields.materials_needed)
    .fetch_one(db)
    .await?;
    Ok(course)
}

pub async fn update(db: &PgPool, id: i32, fields: &CourseFields) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        UPDATE courses
        SET title = $1, description = $2, estimated_time = $3, materials_needed = $4,
            updated_at = now()
        WHERE id = $5
        "#,
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(&fields.estimated_time)
    .bind(&fields.materials_needed)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn delete(db: &PgPool, id: i32) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
