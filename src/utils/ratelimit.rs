use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use lazy_static::lazy_static;
use serenity::model::id::UserId;
use tokio::sync::Mutex;

lazy_static! {
    static ref COMMAND_COOLDOWNS: Mutex<CooldownTracker<(UserId, String)>> =
        Mutex::new(CooldownTracker::new());

    // Sliding one-second window across all users
    static ref GLOBAL_REQUESTS: Mutex<RequestWindow> =
        Mutex::new(RequestWindow::new(GLOBAL_RATE_LIMIT, RATE_WINDOW));
}

const GLOBAL_RATE_LIMIT: usize = 50;
const RATE_WINDOW: Duration = Duration::from_secs(1);

/// Rejection from the cooldown tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownActive {
    pub remaining: Duration,
    /// True only for the first rejection in a cooldown period
    pub should_warn: bool,
}

/// Per-key cooldown bookkeeping
pub struct CooldownTracker<K> {
    last_used: HashMap<K, Instant>,
    last_warned: HashMap<K, Instant>,
}

impl<K: std::hash::Hash + Eq + Clone> CooldownTracker<K> {
    pub fn new() -> Self {
        Self {
            last_used: HashMap::new(),
            last_warned: HashMap::new(),
        }
    }

    pub fn check(&mut self, key: K, cooldown: Duration, now: Instant) -> Result<(), CooldownActive> {
        self.prune(cooldown, now);

        if let Some(&last) = self.last_used.get(&key) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < cooldown {
                // Warn once per cooldown period, stay silent on retries
                let should_warn = match self.last_warned.get(&key) {
                    Some(&warned) => warned < last,
                    None => true,
                };
                if should_warn {
                    self.last_warned.insert(key, now);
                }
                return Err(CooldownActive {
                    remaining: cooldown - elapsed,
                    should_warn,
                });
            }
        }
        self.last_used.insert(key, now);
        Ok(())
    }

    /// Drop entries whose cooldown has already run out.
    ///
    /// A pruned warning is always older than any live `last_used`, so the
    /// warn-once decision is unchanged.
    fn prune(&mut self, cooldown: Duration, now: Instant) {
        self.last_used
            .retain(|_, &mut last| now.saturating_duration_since(last) < cooldown);
        self.last_warned
            .retain(|_, &mut warned| now.saturating_duration_since(warned) < cooldown);
    }
}

/// Fixed-capacity sliding window of request timestamps
pub struct RequestWindow {
    requests: VecDeque<Instant>,
    limit: usize,
    window: Duration,
}

impl RequestWindow {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            requests: VecDeque::new(),
            limit,
            window,
        }
    }

    /// Record a request at `now`, or return how long until a slot frees up
    pub fn check_and_record(&mut self, now: Instant) -> Result<(), Duration> {
        while let Some(&front) = self.requests.front() {
            if now.saturating_duration_since(front) >= self.window {
                self.requests.pop_front();
            } else {
                break;
            }
        }

        if self.requests.len() >= self.limit {
            if let Some(&oldest) = self.requests.front() {
                return Err(self.window - now.saturating_duration_since(oldest));
            }
        }

        self.requests.push_back(now);
        Ok(())
    }
}

/// Check whether `user_id` may run `command` again
pub async fn check_cooldown(
    user_id: UserId,
    command: &str,
    cooldown: Duration,
) -> Result<(), CooldownActive> {
    let mut cooldowns = COMMAND_COOLDOWNS.lock().await;
    cooldowns.check((user_id, command.to_string()), cooldown, Instant::now())
}

/// Check the global request window; Err carries the wait until a slot frees
pub async fn check_global_rate_limit() -> Result<(), Duration> {
    let mut requests = GLOBAL_REQUESTS.lock().await;
    requests.check_and_record(Instant::now())
}
