use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    // A panic while holding the lock leaves the data usable
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Activate buffering. While active, log lines are stored instead of being
/// printed to stderr.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

/// Write a message. If buffering is active the message is stored;
/// otherwise it is printed to stderr immediately.
pub fn warn(msg: String) {
    let mut guard = lock();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the buffer is process-global
    #[test]
    fn test_activate_collect_drain() {
        activate();
        warn("first".to_string());
        warn(format!("second {}", 2));

        assert_eq!(drain(), vec!["first".to_string(), "second 2".to_string()]);
        assert!(drain().is_empty());
    }
}
