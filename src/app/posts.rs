use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::Row;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::post::Post;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct PostService {
    db: Db,
}

fn post_from_row(row: &PgRow) -> Post {
    Post {
        id: row.get("id"),
        author_id: row.get("author_id"),
        author_username: row.get("author_username"),
        content: row.get("content"),
        picture_key: row.get("picture_key"),
        created_at: row.get("created_at"),
    }
}

impl PostService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, author_id: Uuid, content: String) -> Result<Post> {
        let row = sqlx::query(
            "WITH inserted_post AS ( \
                INSERT INTO posts (author_id, content) \
                VALUES ($1, $2) \
                RETURNING id, author_id, content, picture_key, created_at \
             ) \
             SELECT p.*, a.username AS author_username \
             FROM inserted_post p \
             JOIN profiles a ON a.id = p.author_id",
        )
        .bind(author_id)
        .bind(content)
        .fetch_one(self.db.pool())
        .await?;

        Ok(post_from_row(&row))
    }

    pub async fn get(&self, post_id: Uuid) -> Result<Option<Post>> {
        let row = sqlx::query(
            "SELECT p.id, p.author_id, a.username AS author_username, \
                    p.content, p.picture_key, p.created_at \
             FROM posts p \
             JOIN profiles a ON a.id = p.author_id \
             WHERE p.id = $1",
        )
        .bind(post_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(post_from_row))
    }

    /// Content edits are scoped to the author; a mismatched author behaves
    /// like a missing post.
    pub async fn update_content(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: String,
    ) -> Result<Option<Post>> {
        let row = sqlx::query(
            "WITH updated_post AS ( \
                UPDATE posts \
                SET content = $3 \
                WHERE id = $1 AND author_id = $2 \
                RETURNING id, author_id, content, picture_key, created_at \
             ) \
             SELECT p.*, a.username AS author_username \
             FROM updated_post p \
             JOIN profiles a ON a.id = p.author_id",
        )
        .bind(post_id)
        .bind(author_id)
        .bind(content)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(post_from_row))
    }

    /// Deleting a post cascades to its comments and likes via the foreign
    /// keys.
    pub async fn delete(&self, post_id: Uuid, author_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
            .bind(post_id)
            .bind(author_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_by_author(
        &self,
        author_id: Uuid,
        cursor: Option<(OffsetDateTime, Uuid)>,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let rows = match cursor {
            Some((created_at, post_id)) => {
                sqlx::query(
                    "SELECT p.id, p.author_id, a.username AS author_username, \
                            p.content, p.picture_key, p.created_at \
                     FROM posts p \
                     JOIN profiles a ON a.id = p.author_id \
                     WHERE p.author_id = $1 \
                       AND (p.created_at < $2 OR (p.created_at = $2 AND p.id < $3)) \
                     ORDER BY p.created_at DESC, p.id DESC \
                     LIMIT $4",
                )
                .bind(author_id)
                .bind(created_at)
                .bind(post_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT p.id, p.author_id, a.username AS author_username, \
                            p.content, p.picture_key, p.created_at \
                     FROM posts p \
                     JOIN profiles a ON a.id = p.author_id \
                     WHERE p.author_id = $1 \
                     ORDER BY p.created_at DESC, p.id DESC \
                     LIMIT $2",
                )
                .bind(author_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
        };

        Ok(rows.iter().map(post_from_row).collect())
    }
}
