//! Embedded PostgreSQL for adapter tests.
//!
//! Every test gets its own temporary database on one shared cluster. Set
//! `SKIP_TEST_CLUSTER=1` where the cluster cannot start; tests then return
//! early instead of failing.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;

/// Whether `SKIP_TEST_CLUSTER` holds a truthy value.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// A fresh database, or `None` when the cluster is skipped.
///
/// # Panics
/// Panics when the cluster fails to start and skipping is not enabled.
pub fn temporary_database() -> Option<TemporaryDatabase> {
    let outcome = shared_cluster_handle()
        .map_err(|err| format!("{err:?}"))
        .and_then(|cluster| {
            cluster
                .create_temporary_database()
                .map_err(|err| format!("{err:?}"))
        });
    match outcome {
        Ok(database) => Some(database),
        Err(reason) if should_skip_test_cluster() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}
