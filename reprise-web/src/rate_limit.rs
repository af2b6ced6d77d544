use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Token bucket of one permit, refilled every `delay`.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<Bucket>>,
    capacity: u32,
    refill_every: Duration,
}

#[derive(Debug)]
struct Bucket {
    available: u32,
    refilled_at: Instant,
}

impl RateLimiter {
    pub fn from_delay(delay: Duration) -> Self {
        let capacity = 1;
        Self {
            bucket: Arc::new(Mutex::new(Bucket {
                available: capacity,
                refilled_at: Instant::now(),
            })),
            capacity,
            refill_every: delay,
        }
    }

    pub async fn acquire(&self) {
        loop {
            let mut bucket = self.bucket.lock().await;
            self.refill(&mut bucket);
            if bucket.available > 0 {
                bucket.available -= 1;
                return;
            }
            let wait = self
                .refill_every
                .saturating_sub(bucket.refilled_at.elapsed());
            drop(bucket);
            tokio::time::sleep(wait.max(Duration::from_millis(1))).await;
        }
    }

    fn refill(&self, bucket: &mut Bucket) {
        if self.refill_every.is_zero() {
            bucket.available = self.capacity;
            return;
        }
        let elapsed = bucket.refilled_at.elapsed();
        let refill = elapsed.as_nanos() / self.refill_every.as_nanos();
        if refill > 0 {
            let refill = u32::try_from(refill).unwrap_or(u32::MAX);
            bucket.available = bucket.available.saturating_add(refill).min(self.capacity);
            bucket.refilled_at += self.refill_every * refill;
        }
    }
}
