use anyhow::Result;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::post::Post;
use crate::domain::profile::Profile;
use crate::infra::{db::Db, storage::ObjectStorage};

pub const PROFILE_PICTURE_PREFIX: &str = "uploads/profile_pictures";
pub const POST_PICTURE_PREFIX: &str = "uploads/post_pictures";

#[derive(Clone)]
pub struct PictureService {
    db: Db,
    storage: ObjectStorage,
}

impl PictureService {
    pub fn new(db: Db, storage: ObjectStorage) -> Self {
        Self { db, storage }
    }

    pub async fn attach_profile_picture(
        &self,
        profile_id: Uuid,
        filename: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Option<Profile>> {
        let key = picture_key(PROFILE_PICTURE_PREFIX, filename);

        // Upload before touching the row so the key never points at a
        // missing object.
        self.storage.put(&key, body, content_type).await?;

        let mut tx = self.db.pool().begin().await?;

        let previous: Option<Option<String>> = sqlx::query_scalar(
            "SELECT picture_key FROM profiles WHERE id = $1 FOR UPDATE",
        )
        .bind(profile_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(previous) = previous else {
            tx.rollback().await?;
            self.discard(&key).await;
            return Ok(None);
        };

        let row = sqlx::query(
            "UPDATE profiles SET picture_key = $2 WHERE id = $1 \
             RETURNING id, account_id, username, first_name, last_name, \
                       email, bio, birth_date, picture_key, created_at",
        )
        .bind(profile_id)
        .bind(&key)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if let Some(previous) = previous {
            self.discard(&previous).await;
        }

        Ok(Some(Profile {
            id: row.get("id"),
            account_id: row.get("account_id"),
            username: row.get("username"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            bio: row.get("bio"),
            birth_date: row.get("birth_date"),
            picture_key: row.get("picture_key"),
            created_at: row.get("created_at"),
        }))
    }

    pub async fn attach_post_picture(
        &self,
        post_id: Uuid,
        filename: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<Option<Post>> {
        let key = picture_key(POST_PICTURE_PREFIX, filename);

        self.storage.put(&key, body, content_type).await?;

        let mut tx = self.db.pool().begin().await?;

        let previous: Option<Option<String>> = sqlx::query_scalar(
            "SELECT picture_key FROM posts WHERE id = $1 FOR UPDATE",
        )
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(previous) = previous else {
            tx.rollback().await?;
            self.discard(&key).await;
            return Ok(None);
        };

        let row = sqlx::query(
            "WITH updated_post AS ( \
                UPDATE posts SET picture_key = $2 WHERE id = $1 \
                RETURNING id, author_id, content, picture_key, created_at \
             ) \
             SELECT p.*, a.username AS author_username \
             FROM updated_post p \
             JOIN profiles a ON a.id = p.author_id",
        )
        .bind(post_id)
        .bind(&key)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if let Some(previous) = previous {
            self.discard(&previous).await;
        }

        Ok(Some(Post {
            id: row.get("id"),
            author_id: row.get("author_id"),
            author_username: row.get("author_username"),
            content: row.get("content"),
            picture_key: row.get("picture_key"),
            created_at: row.get("created_at"),
        }))
    }

    /// Best-effort object removal; a leaked object is preferable to failing
    /// the request after the row already changed.
    async fn discard(&self, key: &str) {
        if let Err(err) = self.storage.delete(key).await {
            tracing::warn!(error = ?err, key, "failed to delete stored picture");
        }
    }
}

/// Builds a collision-free object key: the slugged filename stem plus a
/// random identifier, keeping a sanitized extension when one is present.
pub fn picture_key(prefix: &str, filename: &str) -> String {
    let (stem, extension) = split_filename(filename);
    let slug = slugify(stem);
    match extension {
        Some(extension) => format!(
            "{}/{}-{}.{}",
            prefix,
            slug,
            Uuid::new_v4(),
            extension.to_ascii_lowercase()
        ),
        None => format!("{}/{}-{}", prefix, slug, Uuid::new_v4()),
    }
}

fn split_filename(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, extension))
            if !stem.is_empty()
                && !extension.is_empty()
                && extension.chars().all(|ch| ch.is_ascii_alphanumeric()) =>
        {
            (stem, Some(extension))
        }
        _ => (filename, None),
    }
}

fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "picture".to_string()
    } else {
        slug
    }
}
