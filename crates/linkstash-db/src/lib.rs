//! # linkstash-db
//!
//! PostgreSQL database layer for linkstash.
//!
//! This crate provides:
//! - Connection pool management
//! - The bookmark repository (`links` table: create, list, get, soft delete)
//! - Typed filter clause building for composable list queries
//!
//! ## Example
//!
//! ```rust,ignore
//! use linkstash_db::Database;
//! use linkstash_core::{CreateLinkRequest, LinkRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/linkstash").await?;
//!
//!     let link = db.links.insert(user_id, CreateLinkRequest {
//!         url: "https://example.com".to_string(),
//!         title: "Example".to_string(),
//!         description: String::new(),
//!         image: None,
//!         tags: vec!["reading".to_string()],
//!     }).await?;
//!
//!     println!("Created bookmark: {}", link.id);
//!     Ok(())
//! }
//! ```

pub mod filter;
pub mod links;
pub mod pool;

// Re-export core types
pub use linkstash_core::*;

// Re-export repository implementations
pub use filter::{LinkFilterQueryBuilder, QueryParam};
pub use links::PgLinkRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
#[derive(Debug, Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Bookmark repository for CRUD operations.
    pub links: PgLinkRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            links: PgLinkRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
