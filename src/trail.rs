use std::collections::VecDeque;

use ultraviolet::Vec2;

pub const TRAIL_MAX: usize = 100;

/// Largest capacity a configuration may ask for.
pub const TRAIL_LIMIT: usize = 100_000;

/// Most recent positions of a body, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    /// Empty trail; storage grows with the first pushes.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    /// Appends `point`, evicting from the front once over capacity.
    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);

        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn oldest(&self) -> Option<Vec2> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Vec2> + ExactSizeIterator + '_ {
        self.points.iter().copied()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TRAIL_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_first() {
        let mut trail = Trail::new(3);

        for i in 0..5 {
            trail.push(Vec2::new(i as f32, 0.0));
        }

        assert_eq!(trail.len(), 3);
        assert_eq!(trail.oldest(), Some(Vec2::new(2.0, 0.0)));
        assert_eq!(trail.newest(), Some(Vec2::new(4.0, 0.0)));

        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn grows_until_capacity() {
        let mut trail = Trail::default();
        assert!(trail.is_empty());

        for i in 0..TRAIL_MAX {
            trail.push(Vec2::broadcast(i as f32));
            assert_eq!(trail.len(), i + 1);
        }

        trail.push(Vec2::zero());
        assert_eq!(trail.len(), TRAIL_MAX);
    }

    #[test]
    fn huge_capacity_does_not_allocate_up_front() {
        let mut trail = Trail::new(usize::MAX);
        assert_eq!(trail.capacity(), usize::MAX);

        trail.push(Vec2::unit_y());
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut trail = Trail::new(0);
        trail.push(Vec2::unit_x());

        assert!(trail.is_empty());
        assert_eq!(trail.newest(), None);
    }
}
