//! Bookmark repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use linkstash_core::{
    defaults, CreateLinkRequest, Error, Link, LinkRepository, ListLinksRequest, Page, Result,
};

use crate::filter::{LinkFilterQueryBuilder, QueryParam};

/// Column list shared by every query that materializes a [`Link`].
const LINK_COLUMNS: &str = "l.id, l.user_id, l.url, l.title, l.description, l.image, l.tags, \
                            l.created_at, l.updated_at, l.deleted_at";

/// PostgreSQL implementation of LinkRepository.
#[derive(Debug, Clone)]
pub struct PgLinkRepository {
    pool: Pool<Postgres>,
}

impl PgLinkRepository {
    /// Create a new PgLinkRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Link.
fn map_row_to_link(row: PgRow) -> Link {
    Link {
        id: row.get("id"),
        user_id: row.get("user_id"),
        url: row.get("url"),
        title: row.get("title"),
        description: row.get("description"),
        image: row.get("image"),
        tags: row.get("tags"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }
}

/// Bind accumulated filter params to a query in order.
macro_rules! bind_filter_params {
    ($query:expr, $params:expr) => {{
        let mut q = $query;
        for param in $params {
            q = match param {
                QueryParam::Uuid(id) => q.bind(*id),
                QueryParam::String(s) => q.bind(s.clone()),
            };
        }
        q
    }};
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, user_id: Uuid, req: CreateLinkRequest) -> Result<Link> {
        let link_id = Uuid::now_v7();
        let now = Utc::now();

        let row = sqlx::query(
            "INSERT INTO links (id, user_id, url, title, description, image, tags, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
             RETURNING id, user_id, url, title, description, image, tags, created_at, updated_at, deleted_at",
        )
        .bind(link_id)
        .bind(user_id)
        .bind(&req.url)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.image)
        .bind(&req.tags)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "links",
            op = "insert",
            user_id = %user_id,
            link_id = %link_id,
            "Inserted bookmark"
        );

        Ok(map_row_to_link(row))
    }

    async fn get(&self, user_id: Uuid, link_id: Uuid) -> Result<Option<Link>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM links l
             WHERE l.id = $1 AND l.user_id = $2 AND l.deleted_at IS NULL",
            LINK_COLUMNS
        ))
        .bind(link_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_row_to_link))
    }

    async fn list(&self, user_id: Uuid, req: ListLinksRequest) -> Result<Page> {
        let page = req.page.unwrap_or(defaults::DEFAULT_PAGE).max(1);
        let page_size = req
            .page_size
            .unwrap_or(defaults::DEFAULT_PAGE_SIZE)
            .clamp(1, defaults::MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;

        let (where_clause, params) = LinkFilterQueryBuilder::new(user_id, 0)
            .with_search(req.search)
            .with_tag(req.tag)
            .build();

        // Exact count over the same predicate, ignoring pagination.
        let count_query = format!("SELECT COUNT(*) FROM links l WHERE {}", where_clause);
        let total: i64 = {
            let q = sqlx::query_scalar(&count_query);
            let q = bind_filter_params!(q, &params);
            q.fetch_one(&self.pool).await.map_err(Error::Database)?
        };

        // UUIDv7 ids are time-ordered, so the id tie-break refines
        // creation order and keeps pagination stable.
        let rows_query = format!(
            "SELECT {} FROM links l WHERE {} ORDER BY l.created_at DESC, l.id DESC LIMIT ${} OFFSET ${}",
            LINK_COLUMNS,
            where_clause,
            params.len() + 1,
            params.len() + 2
        );
        let rows = {
            let q = sqlx::query(&rows_query);
            let q = bind_filter_params!(q, &params);
            q.bind(page_size)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
                .map_err(Error::Database)?
        };

        let items: Vec<Link> = rows.into_iter().map(map_row_to_link).collect();

        debug!(
            subsystem = "db",
            component = "links",
            op = "list",
            user_id = %user_id,
            result_count = items.len(),
            total,
            "Listed bookmarks"
        );

        Ok(Page {
            items,
            total,
            page,
            page_size,
        })
    }

    async fn soft_delete(&self, user_id: Uuid, link_id: Uuid) -> Result<u64> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE links SET deleted_at = $1, updated_at = $1
             WHERE id = $2 AND user_id = $3 AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(link_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        let affected = result.rows_affected();
        debug!(
            subsystem = "db",
            component = "links",
            op = "soft_delete",
            user_id = %user_id,
            link_id = %link_id,
            rows_affected = affected,
            "Soft-deleted bookmark"
        );

        Ok(affected)
    }
}
