use anyhow::Result;
use sqlx::Row;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::profile::Profile;
use crate::domain::relationship::Relationship;
use crate::infra::db::Db;

#[derive(Clone)]
pub struct SocialService {
    db: Db,
}

/// A follow edge joined with the profile on the other end.
#[derive(Debug, Clone)]
pub struct RelationshipEdge {
    pub relationship_id: Uuid,
    pub profile: Profile,
    pub followed_at: OffsetDateTime,
}

fn edge_from_row(row: &sqlx::postgres::PgRow) -> RelationshipEdge {
    RelationshipEdge {
        profile: Profile {
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
        },
        relationship_id: row.get("relationship_id"),
        followed_at: row.get("followed_at"),
    }
}

impl SocialService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Inserts the follow edge. A duplicate (follower, followed) pair is a
    /// unique-constraint violation and surfaces as an error, it is never
    /// silently deduplicated.
    pub async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<Relationship> {
        let row = sqlx::query(
            "INSERT INTO relationships (follower_id, followed_id) \
             VALUES ($1, $2) \
             RETURNING id, follower_id, followed_id, created_at",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(Relationship {
            id: row.get("id"),
            follower_id: row.get("follower_id"),
            followed_id: row.get("followed_id"),
            created_at: row.get("created_at"),
        })
    }

    pub async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM relationships WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_followers(
        &self,
        profile_id: Uuid,
        cursor: Option<(OffsetDateTime, Uuid)>,
        limit: i64,
    ) -> Result<Vec<RelationshipEdge>> {
        let rows = match cursor {
            Some((created_at, relationship_id)) => {
                sqlx::query(
                    "SELECT p.id, p.account_id, p.username, p.first_name, p.last_name, \
                            p.email, p.bio, p.birth_date, p.picture_key, p.created_at, \
                            r.id AS relationship_id, r.created_at AS followed_at \
                     FROM relationships r \
                     JOIN profiles p ON p.id = r.follower_id \
                     WHERE r.followed_id = $1 \
                       AND (r.created_at < $2 OR (r.created_at = $2 AND r.id < $3)) \
                     ORDER BY r.created_at DESC, r.id DESC \
                     LIMIT $4",
                )
                .bind(profile_id)
                .bind(created_at)
                .bind(relationship_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT p.id, p.account_id, p.username, p.first_name, p.last_name, \
                            p.email, p.bio, p.birth_date, p.picture_key, p.created_at, \
                            r.id AS relationship_id, r.created_at AS followed_at \
                     FROM relationships r \
                     JOIN profiles p ON p.id = r.follower_id \
                     WHERE r.followed_id = $1 \
                     ORDER BY r.created_at DESC, r.id DESC \
                     LIMIT $2",
                )
                .bind(profile_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
        };

        Ok(rows.iter().map(edge_from_row).collect())
    }

    pub async fn list_following(
        &self,
        profile_id: Uuid,
        cursor: Option<(OffsetDateTime, Uuid)>,
        limit: i64,
    ) -> Result<Vec<RelationshipEdge>> {
        let rows = match cursor {
            Some((created_at, relationship_id)) => {
                sqlx::query(
                    "SELECT p.id, p.account_id, p.username, p.first_name, p.last_name, \
                            p.email, p.bio, p.birth_date, p.picture_key, p.created_at, \
                            r.id AS relationship_id, r.created_at AS followed_at \
                     FROM relationships r \
                     JOIN profiles p ON p.id = r.followed_id \
                     WHERE r.follower_id = $1 \
                       AND (r.created_at < $2 OR (r.created_at = $2 AND r.id < $3)) \
                     ORDER BY r.created_at DESC, r.id DESC \
                     LIMIT $4",
                )
                .bind(profile_id)
                .bind(created_at)
                .bind(relationship_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT p.id, p.account_id, p.username, p.first_name, p.last_name, \
                            p.email, p.bio, p.birth_date, p.picture_key, p.created_at, \
                            r.id AS relationship_id, r.created_at AS followed_at \
                     FROM relationships r \
                     JOIN profiles p ON p.id = r.followed_id \
                     WHERE r.follower_id = $1 \
                     ORDER BY r.created_at DESC, r.id DESC \
                     LIMIT $2",
                )
                .bind(profile_id)
                .bind(limit)
                .fetch_all(self.db.pool())
                .await?
            }
        };

        Ok(rows.iter().map(edge_from_row).collect())
    }
}
