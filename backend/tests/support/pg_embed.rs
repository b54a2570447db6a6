//! Access to the process-wide embedded PostgreSQL cluster.

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

const SHARED_CLUSTER_RETRIES: u32 = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);
const STABLE_PASSWORD: &str = "social_embedded_test";

/// Return the shared cluster, bootstrapping it on first use.
///
/// `PG_PASSWORD` is pinned for the bootstrap so a data directory left by an
/// earlier run keeps accepting the same credentials.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let password = std::env::var("PG_PASSWORD").unwrap_or_else(|_| STABLE_PASSWORD.to_owned());
    let _env_guard = env_lock::lock_env([("PG_PASSWORD", Some(password))]);

    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => return Err(format!("{error:?}")),
            Err(error) => {
                eprintln!(
                    "pg-embed: attempt {attempt}/{SHARED_CLUSTER_RETRIES} failed, retrying: {error:?}"
                );
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}
