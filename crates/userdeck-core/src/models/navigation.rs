use std::ops::RangeInclusive;

/// Position within a closed range of user ids, used for prev/next browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCursor {
    current: i64,
    range: RangeInclusive<i64>,
}

impl UserCursor {
    /// Returns `None` when `id` lies outside `range`.
    pub fn new(id: i64, range: RangeInclusive<i64>) -> Option<Self> {
        if range.contains(&id) {
            Some(Self { current: id, range })
        } else {
            None
        }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn has_prev(&self) -> bool {
        self.current > *self.range.start()
    }

    pub fn has_next(&self) -> bool {
        self.current < *self.range.end()
    }

    pub fn prev(&self) -> Option<i64> {
        self.has_prev().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<i64> {
        self.has_next().then(|| self.current + 1)
    }

    /// Move back one id. Stays put at the start of the range.
    pub fn step_back(&mut self) -> bool {
        match self.prev() {
            Some(id) => {
                self.current = id;
                true
            }
            None => false,
        }
    }

    /// Move forward one id. Stays put at the end of the range.
    pub fn step_forward(&mut self) -> bool {
        match self.next() {
            Some(id) => {
                self.current = id;
                true
            }
            None => false,
        }
    }
}
