use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::Row;
use time::Date;
use uuid::Uuid;

use crate::domain::profile::Profile;
use crate::infra::db::Db;

const PROFILE_COLUMNS: &str = "id, account_id, username, first_name, last_name, \
                               email, bio, birth_date, picture_key, created_at";

#[derive(Clone)]
pub struct ProfileService {
    db: Db,
}

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub account_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub birth_date: Option<Date>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<Date>,
}

fn profile_from_row(row: &PgRow) -> Profile {
    Profile {
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
    }
}

impl ProfileService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn create(&self, profile: NewProfile) -> Result<Profile> {
        let row = sqlx::query(&format!(
            "INSERT INTO profiles (account_id, username, first_name, last_name, email, bio, birth_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(profile.account_id)
        .bind(profile.username)
        .bind(profile.first_name)
        .bind(profile.last_name)
        .bind(profile.email)
        .bind(profile.bio)
        .bind(profile.birth_date)
        .fetch_one(self.db.pool())
        .await?;

        Ok(profile_from_row(&row))
    }

    pub async fn get(&self, profile_id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(profile_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(profile_from_row))
    }

    /// Profiles list in (first_name, last_name) order.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Profile>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM profiles \
             ORDER BY first_name, last_name, id \
             LIMIT $1 OFFSET $2",
            PROFILE_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(profile_from_row).collect())
    }

    pub async fn update(
        &self,
        profile_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Option<Profile>> {
        let row = sqlx::query(&format!(
            "UPDATE profiles \
             SET username = COALESCE($2, username), \
                 first_name = COALESCE($3, first_name), \
                 last_name = COALESCE($4, last_name), \
                 email = COALESCE($5, email), \
                 bio = COALESCE($6, bio), \
                 birth_date = COALESCE($7, birth_date) \
             WHERE id = $1 \
             RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(profile_id)
        .bind(changes.username)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.email)
        .bind(changes.bio)
        .bind(changes.birth_date)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(profile_from_row))
    }

    /// Deleting a profile cascades to its relationships, posts, comments,
    /// and likes via the foreign keys.
    pub async fn delete(&self, profile_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(profile_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
