use anyhow::Result;
use serde_json::Value;
use uuid::Uuid;

use crate::infra::db::Db;

/// Every entity of the data model is registered here, unmodified; the admin
/// surface is one generic CRUD implementation over this registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminEntity {
    Profiles,
    Relationships,
    Posts,
    Comments,
    Likes,
}

impl AdminEntity {
    pub const ALL: [AdminEntity; 5] = [
        AdminEntity::Profiles,
        AdminEntity::Relationships,
        AdminEntity::Posts,
        AdminEntity::Comments,
        AdminEntity::Likes,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "profiles" => Some(Self::Profiles),
            "relationships" => Some(Self::Relationships),
            "posts" => Some(Self::Posts),
            "comments" => Some(Self::Comments),
            "likes" => Some(Self::Likes),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::Relationships => "relationships",
            Self::Posts => "posts",
            Self::Comments => "comments",
            Self::Likes => "likes",
        }
    }

    // Table names and order clauses are compile-time constants; they are the
    // only strings ever interpolated into admin SQL.
    fn table(&self) -> &'static str {
        self.slug()
    }

    fn default_order(&self) -> &'static str {
        match self {
            Self::Profiles => "first_name, last_name, id",
            _ => "created_at DESC, id DESC",
        }
    }

    /// Columns the admin edit form accepts. Keys, timestamps, and picture
    /// references are read-only.
    pub fn editable_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Profiles => &["username", "first_name", "last_name", "email", "bio"],
            Self::Posts | Self::Comments => &["content"],
            Self::Relationships | Self::Likes => &[],
        }
    }
}

#[derive(Debug)]
pub struct AdminPage {
    pub items: Vec<Value>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Clone)]
pub struct AdminService {
    db: Db,
}

impl AdminService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn list(&self, entity: AdminEntity, page: i64, per_page: i64) -> Result<AdminPage> {
        let offset = (page - 1) * per_page;

        let items: Vec<Value> = sqlx::query_scalar(&format!(
            "SELECT row_to_json(t) \
             FROM (SELECT * FROM {} ORDER BY {} LIMIT $1 OFFSET $2) t",
            entity.table(),
            entity.default_order()
        ))
        .bind(per_page)
        .bind(offset)
        .fetch_all(self.db.pool())
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", entity.table()))
                .fetch_one(self.db.pool())
                .await?;

        Ok(AdminPage {
            items,
            total,
            page,
            per_page,
        })
    }

    pub async fn get(&self, entity: AdminEntity, id: Uuid) -> Result<Option<Value>> {
        let row = sqlx::query_scalar(&format!(
            "SELECT row_to_json(t) FROM (SELECT * FROM {} WHERE id = $1) t",
            entity.table()
        ))
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row)
    }

    /// Applies the given column changes and returns the updated row. The
    /// caller validates column names against `editable_columns`; this method
    /// only ever interpolates those static names.
    pub async fn update(
        &self,
        entity: AdminEntity,
        id: Uuid,
        changes: &[(&'static str, Option<String>)],
    ) -> Result<Option<Value>> {
        let assignments: Vec<String> = changes
            .iter()
            .enumerate()
            .map(|(index, (column, _))| format!("{} = ${}", column, index + 2))
            .collect();

        let sql = format!(
            "UPDATE {} SET {} WHERE id = $1 RETURNING row_to_json({})",
            entity.table(),
            assignments.join(", "),
            entity.table()
        );
        let mut query = sqlx::query_scalar(&sql).bind(id);
        for (_, value) in changes {
            query = query.bind(value.clone());
        }

        let row = query.fetch_optional(self.db.pool()).await?;

        Ok(row)
    }

    pub async fn delete(&self, entity: AdminEntity, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", entity.table()))
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
