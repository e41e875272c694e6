// src/handlers/comment.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    filter::Pipeline,
    models::comment::{Comment, CommentResponse, CreateCommentRequest},
};

/// Create a new comment. The body is stored raw; filtering happens on display.
pub async fn create_comment(
    State(pool): State<SqlitePool>,
    Path(post_id): Path<i64>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let new_id = sqlx::query(
        r#"
        INSERT INTO comments (post_id, author, content, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(post_id)
    .bind(&payload.author)
    .bind(&payload.content)
    .bind(chrono::Utc::now())
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create comment: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?
    .last_insert_rowid();

    tracing::info!(post_id, comment_id = new_id, "Comment stored");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": new_id })),
    ))
}

/// List all comments for a post, oldest first, rendered for display.
pub async fn list_comments(
    State(pool): State<SqlitePool>,
    State(pipeline): State<Arc<Pipeline>>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author, content, created_at
        FROM comments
        WHERE post_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(&pool)
    .await?;

    let rendered: Vec<CommentResponse> = comments
        .iter()
        .map(|comment| comment.render(&pipeline))
        .collect();

    Ok(Json(rendered))
}

/// Retrieves a single comment by ID, rendered for display.
pub async fn get_comment(
    State(pool): State<SqlitePool>,
    State(pipeline): State<Arc<Pipeline>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author, content, created_at
        FROM comments
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Comment not found".to_string()))?;

    Ok(Json(comment.render(&pipeline)))
}
