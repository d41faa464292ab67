use std::{fs, path::PathBuf};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::{config::Config, models::Note};

pub type DbConn = PooledConnection<SqliteConnectionManager>;

const CREATE_NOTES_TABLE: &str = "CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT
)";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create storage directory '{}': {source}", path.display())]
    StorageDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to acquire connection: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// File-backed note store.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct Repository {
    pool: Pool<SqliteConnectionManager>,
}

impl Repository {
    /// Opens the pool over `config.database_path`, creating the parent
    /// directory first if it does not exist yet.
    pub async fn new(config: &Config) -> Result<Self, StoreError> {
        let path = config.database_path.clone();
        let pool_size = config.pool_size;
        let connection_timeout = config.connection_timeout;
        let busy_timeout = config.busy_timeout;

        tokio::task::spawn_blocking(move || -> Result<Self, StoreError> {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).map_err(|source| StoreError::StorageDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            let manager = SqliteConnectionManager::file(&path)
                .with_init(move |conn| conn.busy_timeout(busy_timeout));

            let pool = Pool::builder()
                .max_size(pool_size)
                .connection_timeout(connection_timeout)
                .build(manager)?;

            tracing::info!("Opened note store at {}", path.display());

            Ok(Self { pool })
        })
        .await?
    }

    /// Creates the `notes` table if it is missing. Safe to call on every start.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        self.run(|conn| {
            conn.execute_batch(CREATE_NOTES_TABLE)?;
            Ok(())
        })
        .await?;

        tracing::info!("Note store schema ready");

        Ok(())
    }

    /// Checks a connection out of the pool. It goes back when the guard drops.
    pub fn connection(&self) -> Result<DbConn, StoreError> {
        Ok(self.pool.get()?)
    }

    /// Runs `op` with a pooled connection on the blocking thread pool.
    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let repo = self.clone();

        tokio::task::spawn_blocking(move || {
            let conn = repo.connection()?;
            op(&*conn)
        })
        .await?
    }

    pub async fn create_note(&self, title: String, content: String) -> Result<Note, StoreError> {
        let id = Uuid::new_v4().to_string();

        self.run(move |conn| {
            conn.execute(
                "INSERT INTO notes (id, title, content) VALUES (?1, ?2, ?3)",
                params![id, title, content],
            )?;

            Ok(Note {
                id,
                title,
                content: Some(content),
            })
        })
        .await
    }

    pub async fn get_note(&self, id: String) -> Result<Option<Note>, StoreError> {
        self.run(move |conn| {
            let note = conn
                .query_row(
                    "SELECT id, title, content FROM notes WHERE id = ?1",
                    params![id],
                    Note::from_row,
                )
                .optional()?;

            Ok(note)
        })
        .await
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        self.run(|conn| {
            let mut stmt = conn.prepare("SELECT id, title, content FROM notes ORDER BY rowid")?;

            let notes = stmt
                .query_map([], Note::from_row)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(notes)
        })
        .await
    }

    /// Deletes the note in one conditional statement; `false` means no such id.
    pub async fn delete_note(&self, id: String) -> Result<bool, StoreError> {
        self.run(move |conn| {
            let rows = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
            Ok(rows == 1)
        })
        .await
    }
}
