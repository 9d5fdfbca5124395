/// Direction of a carousel slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

/// Browsing cursor over a card list.
///
/// Unlike a quiz, the carousel wraps around at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    len: usize,
    center: usize,
}

impl Carousel {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len, center: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn center(&self) -> usize {
        self.center
    }

    /// Slide one card and return the new center. No-op when empty.
    pub fn slide(&mut self, direction: Direction) -> usize {
        if self.len == 0 {
            return 0;
        }
        self.center = match direction {
            Direction::Forward => (self.center + 1) % self.len,
            Direction::Back => (self.center + self.len - 1) % self.len,
        };
        self.center
    }

    /// Jump to `index`. Returns false (and stays put) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.center = index;
        true
    }

    /// 1-based position and total, or `None` for an empty carousel.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        (self.len > 0).then_some((self.center + 1, self.len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        let mut carousel = Carousel::new(3);
        assert_eq!(carousel.slide(Direction::Back), 2);
        assert_eq!(carousel.slide(Direction::Forward), 0);
        assert_eq!(carousel.slide(Direction::Forward), 1);
        assert_eq!(carousel.position(), Some((2, 3)));
    }

    #[test]
    fn empty_carousel_never_moves() {
        let mut carousel = Carousel::new(0);
        assert_eq!(carousel.slide(Direction::Forward), 0);
        assert!(!carousel.select(0));
        assert_eq!(carousel.position(), None);
    }

    #[test]
    fn select_is_bounded() {
        let mut carousel = Carousel::new(2);
        assert!(carousel.select(1));
        assert!(!carousel.select(2));
        assert_eq!(carousel.center(), 1);
    }
}
