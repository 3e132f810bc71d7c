/// One-shot deferred reset, tied to the round that scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredReset {
    pub round: u64,
    pub due_at_ms: i64,
}

impl DeferredReset {
    pub fn schedule(round: u64, now_ms: i64, delay_ms: i64) -> Self {
        Self {
            round,
            due_at_ms: now_ms.saturating_add(delay_ms),
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        now_ms >= self.due_at_ms
    }

    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.due_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_at_deadline() {
        let reset = DeferredReset::schedule(1, 10_000, 3_000);

        assert_eq!(reset.due_at_ms, 13_000);
        assert!(!reset.is_due(12_999));
        assert!(reset.is_due(13_000));
        assert!(reset.is_due(20_000));
    }

    #[test]
    fn test_remaining_never_negative() {
        let reset = DeferredReset::schedule(1, 0, 3_000);

        assert_eq!(reset.remaining_ms(0), 3_000);
        assert_eq!(reset.remaining_ms(2_900), 100);
        assert_eq!(reset.remaining_ms(5_000), 0);
    }
}
