//! Reference count of logical subscribers.
//!
//! A logical subscriber is one unit of interest in receiving step events,
//! tracked independently of hardware registration state. The count is an
//! owned field inside the session's lock domain, never ambient state, so
//! sessions in tests do not interfere with each other.

/// Saturating subscriber reference count.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubscriptionRegistry {
    count: usize,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Add one logical subscriber. Does not arm the sensor session;
    /// subscription and hardware activation are independent concerns.
    pub fn add_subscriber(&mut self) {
        self.count += 1;
    }

    /// Remove up to `n` subscribers, saturating at zero. Removing more than
    /// currently held is not an error. Returns true on the transition to
    /// zero, which the session uses to drive auto-stop.
    pub fn remove_subscribers(&mut self, n: usize) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count = self.count.saturating_sub(n);
        self.count == 0
    }

    /// Hard reset for the lifecycle teardown path.
    pub fn clear(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_saturates_at_zero() {
        let mut registry = SubscriptionRegistry::new();
        registry.add_subscriber();
        assert!(registry.remove_subscribers(10));
        assert_eq!(registry.count(), 0);
        // Already empty, no second zero transition
        assert!(!registry.remove_subscribers(1));
    }

    #[test]
    fn test_zero_transition_only_on_last_removal() {
        let mut registry = SubscriptionRegistry::new();
        registry.add_subscriber();
        registry.add_subscriber();
        registry.add_subscriber();
        assert!(!registry.remove_subscribers(2));
        assert_eq!(registry.count(), 1);
        assert!(registry.remove_subscribers(1));
    }
}
