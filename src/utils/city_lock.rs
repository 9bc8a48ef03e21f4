use std::sync::Arc;
use std::time::Duration;

use futures::lock::Mutex;
use moka::future::Cache;

/// Per-city mutexes so that calculations for one city run one at a time.
#[derive(Clone)]
pub struct CityLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl Default for CityLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl CityLocks {
    pub fn new() -> Self {
        Self {
            locks: Cache::builder()
                .max_capacity(10_000)
                // entries unused for an hour are dropped
                .time_to_idle(Duration::from_secs(3600))
                .build(),
        }
    }

    /// The mutex for `city_name`, created on first use.
    pub async fn lock_for(&self, city_name: &str) -> Arc<Mutex<()>> {
        self.locks
            .get_with(city_name.to_string(), async { Arc::new(Mutex::new(())) })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn same_city_shares_a_lock() {
        let locks = CityLocks::new();

        let a = locks.lock_for("佛山").await;
        let b = locks.lock_for("佛山").await;
        let c = locks.lock_for("广州").await;

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[actix_web::test]
    async fn held_lock_blocks_second_caller() {
        let locks = CityLocks::new();
        let lock = locks.lock_for("佛山").await;
        let _held = lock.lock().await;

        let again = locks.lock_for("佛山").await;
        assert!(again.try_lock().is_none());
    }
}
