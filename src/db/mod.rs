//! Database module
//!
//! All persistence goes through SQLx with SQLite.

mod engine;
mod migrations;
pub mod tables;

pub use engine::{setup_sqlite, DbEngine};
pub use migrations::run_migrations;
pub use tables::*;

#[cfg(test)]
pub(crate) mod test_support {
    use tokio::sync::OnceCell;

    static INIT: OnceCell<()> = OnceCell::const_new();

    /// Initialize the shared test database once per test binary.
    ///
    /// The engine is a process-wide singleton, so every db test shares one
    /// on-disk SQLite file; tests use disjoint id ranges to stay independent.
    pub async fn init_test_db() {
        INIT.get_or_init(|| async {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("test.db");
            // keep the tempdir alive for the whole test run
            std::mem::forget(dir);

            super::setup_sqlite(&path).await.unwrap();
            super::run_migrations().await.unwrap();
        })
        .await;
    }
}
