use anyhow::Result;
use sqlx::Row;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::engagement::{Comment, Like};
use crate::infra::db::Db;

#[derive(Clone)]
pub struct EngagementService {
    db: Db,
}

impl EngagementService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Inserts the like. A duplicate (profile, post) pair is a
    /// unique-constraint violation and surfaces as an error.
    pub async fn like(&self, profile_id: Uuid, post_id: Uuid) -> Result<Like> {
        let row = sqlx::query(
            "INSERT INTO likes (profile_id, post_id) VALUES ($1, $2) \
             RETURNING id, profile_id, post_id, created_at",
        )
        .bind(profile_id)
        .bind(post_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(Like {
            id: row.get("id"),
            profile_id: row.get("profile_id"),
            post_id: row.get("post_id"),
            created_at: row.get("created_at"),
        })
    }

    pub async fn unlike(&self, profile_id: Uuid, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE profile_id = $1 AND post_id = $2")
            .bind(profile_id)
            .bind(post_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        content: String,
    ) -> Result<Comment> {
        let row = sqlx::query(
            "INSERT INTO comments (author_id, post_id, content) VALUES ($1, $2, $3) \
             RETURNING id, author_id, post_id, content, created_at",
        )
        .bind(author_id)
        .bind(post_id)
        .bind(content)
        .fetch_one(self.db.pool())
        .await?;

        Ok(Comment {
            id: row.get("id"),
            author_id: row.get("author_id"),
            post_id: row.get("post_id"),
            content: row.get("content"),
            created_at: row.get("created_at"),
        })
    }

    pub async fn delete_comment(
        &self,
        comment_id: Uuid,
        post_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM comments WHERE id = $1 AND post_id = $2 AND author_id = $3",
        )
        .bind(comment_id)
        .bind(post_id)
        .bind(author_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_likes(
        &self,
        post_id: Uuid,
        cursor: Option<(OffsetDateTime, Uuid)>,
        limit: i64,
    ) -> Result<Vec<Like>> {
        let rows = match cursor {
            Some((created_at, like_id)) => {
                sqlx::query(
                    "SELECT id, profile_id, post_id, created_at \
                     FROM likes \
                     WHERE post_id = $1 \
                       AND (created_at < $2 OR (created_at = $2 AND id < $3)) \
                     ORDER BY created_at DESC, id DESC \
                     LIMIT $4",
                )
                .bind(post_id)
                .bind(created_at)
                .bind(like_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT id, profile_id, post_id, created_at \
                     FROM likes \
                     WHERE post_id = $1 \
                     ORDER BY created_at DESC, id DESC \
                     LIMIT $2",
                )
                .bind(post_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
        };

        let mut likes = Vec::with_capacity(rows.len());
        for row in rows {
            likes.push(Like {
                id: row.get("id"),
                profile_id: row.get("profile_id"),
                post_id: row.get("post_id"),
                created_at: row.get("created_at"),
            });
        }

        Ok(likes)
    }

    pub async fn list_comments(
        &self,
        post_id: Uuid,
        cursor: Option<(OffsetDateTime, Uuid)>,
        limit: i64,
    ) -> Result<Vec<Comment>> {
        let rows = match cursor {
            Some((created_at, comment_id)) => {
                sqlx::query(
                    "SELECT id, author_id, post_id, content, created_at \
                     FROM comments \
                     WHERE post_id = $1 \
                       AND (created_at < $2 OR (created_at = $2 AND id < $3)) \
                     ORDER BY created_at DESC, id DESC \
                     LIMIT $4",
                )
                .bind(post_id)
                .bind(created_at)
                .bind(comment_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT id, author_id, post_id, content, created_at \
                     FROM comments \
                     WHERE post_id = $1 \
                     ORDER BY created_at DESC, id DESC \
                     LIMIT $2",
                )
                .bind(post_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
        };

        let mut comments = Vec::with_capacity(rows.len());
        for row in rows {
            comments.push(Comment {
                id: row.get("id"),
                author_id: row.get("author_id"),
                post_id: row.get("post_id"),
                content: row.get("content"),
                created_at: row.get("created_at"),
            });
        }

        Ok(comments)
    }
}
