use cardscan_core::ContactRecord;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;

pub type DbPool = Pool<Sqlite>;

pub async fn create_db(path: &Path) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    configure(&pool).await?;
    run_migrations(&pool).await?;

    Ok(pool)
}

/// In-memory database, used by tests.
pub async fn create_db_in_memory() -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    configure(&pool).await?;
    run_migrations(&pool).await?;

    Ok(pool)
}

async fn configure(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(pool)
        .await?;
    Ok(())
}

async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            scan_hash TEXT NOT NULL,
            name TEXT NOT NULL,
            company TEXT NOT NULL DEFAULT '',
            position TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            website TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            additional_info TEXT NOT NULL DEFAULT '',
            scanned_at TEXT NOT NULL,
            front_text TEXT NOT NULL DEFAULT '',
            back_text TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_contacts_scan_hash ON contacts(scan_hash)")
        .execute(pool)
        .await?;

    Ok(())
}

/// A persisted contact row.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredContact {
    pub id: i64,
    pub scan_hash: String,
    #[serde(flatten)]
    pub record: ContactRecord,
}

/// Append one contact row; returns the new row id. Never updates in place:
/// each scan is its own row.
pub async fn insert_contact(
    pool: &DbPool,
    record: &ContactRecord,
    scan_hash: &str,
    front_text: &str,
    back_text: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO contacts
            (scan_hash, name, company, position, email, phone, website,
             address, additional_info, scanned_at, front_text, back_text)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(scan_hash)
    .bind(&record.name)
    .bind(&record.company)
    .bind(&record.position)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.website)
    .bind(&record.address)
    .bind(&record.additional_info)
    .bind(&record.scanned_at)
    .bind(front_text)
    .bind(back_text)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Whether this card (by image content key) has been scanned before.
pub async fn check_scan_duplicate(pool: &DbPool, scan_hash: &str) -> Result<bool, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts WHERE scan_hash = ?")
        .bind(scan_hash)
        .fetch_one(pool)
        .await?;
    Ok(row.0 > 0)
}

pub async fn get_all_contacts(pool: &DbPool) -> Result<Vec<StoredContact>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ContactRow>(
        "SELECT id, scan_hash, name, company, position, email, phone, website, \
         address, additional_info, scanned_at FROM contacts ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(StoredContact::from).collect())
}

pub async fn get_contact_by_id(
    pool: &DbPool,
    id: i64,
) -> Result<Option<StoredContact>, sqlx::Error> {
    let row = sqlx::query_as::<_, ContactRow>(
        "SELECT id, scan_hash, name, company, position, email, phone, website, \
         address, additional_info, scanned_at FROM contacts WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(StoredContact::from))
}

type ContactRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

impl From<ContactRow> for StoredContact {
    fn from(r: ContactRow) -> Self {
        StoredContact {
            id: r.0,
            scan_hash: r.1,
            record: ContactRecord {
                name: r.2,
                company: r.3,
                position: r.4,
                email: r.5,
                phone: r.6,
                website: r.7,
                address: r.8,
                additional_info: r.9,
                scanned_at: r.10,
            },
        }
    }
}
