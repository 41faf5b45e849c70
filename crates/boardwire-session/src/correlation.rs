use std::time::{SystemTime, UNIX_EPOCH};

/// Per-connection correlation id source.
///
/// The observed peer derives ids straight from the wall clock, which
/// collides when two records are queued within the same millisecond. We keep
/// the millisecond epoch as the seed so ids stay recognizable in captures,
/// but advance monotonically per record.
#[derive(Debug)]
pub struct CorrelationSource {
    next: i64,
}

impl CorrelationSource {
    pub fn new() -> Self {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self { next: now_ms }
    }

    /// Take the next id.
    pub fn next(&mut self) -> i64 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

impl Default for CorrelationSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut source = CorrelationSource::new();
        let a = source.next();
        let b = source.next();
        let c = source.next();
        assert_eq!(b, a + 1);
        assert_eq!(c, b + 1);
    }
}
