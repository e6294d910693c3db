/// Number of recent events kept on screen.
pub const LOG_CAPACITY: usize = 20;

/// Fixed-capacity log that evicts its oldest entry when full.
///
/// Entries live in a preallocated arena; `head` indexes the oldest one once the
/// arena has wrapped.
#[derive(Debug, Clone)]
pub struct RollingLog<T> {
    slots: Vec<T>,
    head: usize,
    capacity: usize,
}

impl<T> Default for RollingLog<T> {
    fn default() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }
}

impl<T> RollingLog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "rolling log capacity must be non-zero");
        Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        }
    }

    pub fn append(&mut self, entry: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(entry);
        } else {
            self.slots[self.head] = entry;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Entries oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &T> + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(log: &RollingLog<u32>) -> Vec<u32> {
        log.entries().copied().collect()
    }

    #[test]
    fn keeps_insertion_order_below_capacity() {
        let mut log = RollingLog::new();
        for i in 1..=5 {
            log.append(i);
        }
        assert_eq!(collect(&log), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn twenty_first_entry_evicts_the_first() {
        let mut log = RollingLog::new();
        for i in 1..=21 {
            log.append(i);
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(collect(&log), (2..=21).collect::<Vec<_>>());
    }

    #[test]
    fn never_exceeds_capacity_over_many_wraps() {
        let mut log = RollingLog::with_capacity(3);
        for i in 1..=100 {
            log.append(i);
            assert!(log.len() <= 3);
        }
        assert_eq!(collect(&log), vec![98, 99, 100]);
        assert_eq!(log.entries().count(), 3);
    }

    #[test]
    fn empty_log() {
        let log: RollingLog<u32> = RollingLog::new();
        assert!(log.is_empty());
        assert_eq!(log.entries().count(), 0);
        assert_eq!(log.capacity(), LOG_CAPACITY);
    }
}
