/// Heart rating: an integer 1..=5 attached to one level.
///
/// `0` is never a valid `Rating`; "unrated" is represented by the
/// absence of one (`Option<Rating>` / a stored `0` in the session).

pub const MAX_HEARTS: u8 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    /// `None` for anything outside 1..=5.
    pub fn new(value: u8) -> Option<Rating> {
        if (1..=MAX_HEARTS).contains(&value) {
            Some(Rating(value))
        } else {
            None
        }
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Which of the five hearts are lit for a stored rating value.
pub fn lit_hearts(value: u8) -> [bool; MAX_HEARTS as usize] {
    let mut out = [false; MAX_HEARTS as usize];
    for (i, lit) in out.iter_mut().enumerate() {
        *lit = (i as u8) < value;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_through_five() {
        for v in 1..=5u8 {
            assert_eq!(Rating::new(v).map(Rating::value), Some(v));
        }
    }

    #[test]
    fn rejects_zero_and_above_five() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert!(Rating::new(u8::MAX).is_none());
    }

    #[test]
    fn lit_hearts_matches_value() {
        assert_eq!(lit_hearts(0), [false; 5]);
        assert_eq!(lit_hearts(3), [true, true, true, false, false]);
        assert_eq!(lit_hearts(5), [true; 5]);
    }
}
