/// Session: the level progression state machine.
///
/// ## States
///
///   `Viewing(i)` ── advance (rating[i] > 0, i < N-1) ──▶ `Viewing(i+1)`
///   `Viewing(N-1)` ── advance (rating > 0) ──▶ `Finished`
///
/// `Finished` is terminal: `rate` and `advance` are no-ops there.
/// Every violated precondition (bad value, bad index, unrated level) is a
/// silent no-op; no operation here can fail.
///
/// Progress is a count of non-zero ratings, independent of position, so a
/// level rated out of order still counts.

use crate::domain::level::{Level, LEVELS};
use crate::domain::rating::Rating;
use crate::sim::event::SessionEvent;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Viewing(usize),
    Finished,
}

#[derive(Clone, Debug)]
pub struct Session {
    levels: &'static [Level],
    phase: Phase,
    /// One entry per level; `0` = unrated, otherwise 1..=5.
    ratings: Vec<u8>,
}

impl Session {
    /// Fresh session over the built-in catalogue, at `Viewing(0)`.
    pub fn new() -> Self {
        Session::with_levels(&LEVELS)
    }

    /// Fresh session over an arbitrary non-empty catalogue.
    pub fn with_levels(levels: &'static [Level]) -> Self {
        assert!(!levels.is_empty(), "a session needs at least one level");
        Session {
            levels,
            phase: Phase::Viewing(0),
            ratings: vec![0; levels.len()],
        }
    }

    // ── Read state ──

    #[allow(dead_code)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &'static [Level] {
        self.levels
    }

    /// Index of the level on screen. Stays at the last index once finished.
    pub fn current_index(&self) -> usize {
        match self.phase {
            Phase::Viewing(i) => i,
            Phase::Finished => self.levels.len() - 1,
        }
    }

    pub fn current_level(&self) -> &'static Level {
        &self.levels[self.current_index()]
    }

    pub fn ratings(&self) -> &[u8] {
        &self.ratings
    }

    pub fn rating_at(&self, index: usize) -> u8 {
        self.ratings.get(index).copied().unwrap_or(0)
    }

    pub fn current_rating(&self) -> u8 {
        self.rating_at(self.current_index())
    }

    pub fn is_last(&self) -> bool {
        self.current_index() + 1 == self.levels.len()
    }

    /// Whether `advance` would do anything right now.
    pub fn can_advance(&self) -> bool {
        matches!(self.phase, Phase::Viewing(i) if self.ratings[i] > 0)
    }

    /// `round(100 * rated / N)`, rounding halves up.
    pub fn progress_percent(&self) -> u8 {
        let n = self.levels.len();
        let rated = self.ratings.iter().filter(|&&r| r > 0).count();
        ((200 * rated + n) / (2 * n)) as u8
    }

    // ── Mutations ──

    /// Set the rating of `level_index`. Out-of-range values or indices,
    /// and any call after the session finished, are ignored.
    pub fn rate(&mut self, level_index: usize, value: u8) -> Option<SessionEvent> {
        if self.is_finished() {
            return None;
        }
        let rating = Rating::new(value)?;
        let slot = self.ratings.get_mut(level_index)?;
        *slot = rating.value();
        Some(SessionEvent::Rated { level: level_index, value: rating.value() })
    }

    /// Rate the level currently on screen.
    pub fn rate_current(&mut self, value: u8) -> Option<SessionEvent> {
        self.rate(self.current_index(), value)
    }

    /// Move past the current level. No-op while it is unrated or once finished.
    pub fn advance(&mut self) -> Option<SessionEvent> {
        let Phase::Viewing(i) = self.phase else {
            return None;
        };
        if self.ratings[i] == 0 {
            return None;
        }
        if i + 1 == self.levels.len() {
            self.phase = Phase::Finished;
            Some(SessionEvent::Finished)
        } else {
            self.phase = Phase::Viewing(i + 1);
            Some(SessionEvent::Advanced { to: i + 1 })
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::level::LEVEL_COUNT;

    static TWO: [Level; 2] = [
        Level { id: 1, title: "a", description: "", tip: "", image: "/a.jpg" },
        Level { id: 2, title: "b", description: "", tip: "", image: "/b.jpg" },
    ];

    #[test]
    fn starts_viewing_first_level_unrated() {
        let s = Session::new();
        assert_eq!(s.phase(), Phase::Viewing(0));
        assert_eq!(s.ratings(), &[0; LEVEL_COUNT]);
        assert_eq!(s.current_level().id, 1);
        assert_eq!(s.progress_percent(), 0);
        assert!(!s.can_advance());
    }

    #[test]
    fn rate_sets_only_the_target_index() {
        for i in 0..LEVEL_COUNT {
            for v in 1..=5u8 {
                let mut s = Session::new();
                let ev = s.rate(i, v);
                assert_eq!(ev, Some(SessionEvent::Rated { level: i, value: v }));
                for j in 0..LEVEL_COUNT {
                    assert_eq!(s.rating_at(j), if j == i { v } else { 0 });
                }
            }
        }
    }

    #[test]
    fn rate_ignores_invalid_values_and_indices() {
        let mut s = Session::new();
        assert_eq!(s.rate(0, 0), None);
        assert_eq!(s.rate(0, 6), None);
        assert_eq!(s.rate(LEVEL_COUNT, 3), None);
        assert_eq!(s.ratings(), &[0; LEVEL_COUNT]);
    }

    #[test]
    fn rating_can_change_before_advancing() {
        let mut s = Session::new();
        s.rate_current(2);
        s.rate_current(5);
        assert_eq!(s.current_rating(), 5);
    }

    #[test]
    fn advance_without_rating_is_noop() {
        let mut s = Session::new();
        assert_eq!(s.advance(), None);
        assert_eq!(s.phase(), Phase::Viewing(0));
        assert!(!s.is_finished());
    }

    #[test]
    fn advance_walks_every_level_then_finishes() {
        let mut s = Session::new();
        for i in 0..LEVEL_COUNT {
            assert_eq!(s.phase(), Phase::Viewing(i));
            s.rate_current(1 + (i % 5) as u8);
            let ev = s.advance();
            if i + 1 < LEVEL_COUNT {
                assert_eq!(ev, Some(SessionEvent::Advanced { to: i + 1 }));
            } else {
                assert_eq!(ev, Some(SessionEvent::Finished));
            }
        }
        assert!(s.is_finished());
        assert_eq!(s.progress_percent(), 100);
    }

    #[test]
    fn finished_session_is_terminal() {
        let mut s = Session::with_levels(&TWO);
        s.rate_current(4);
        s.advance();
        s.rate_current(1);
        s.advance();
        assert!(s.is_finished());

        let before = s.ratings().to_vec();
        assert_eq!(s.advance(), None);
        assert_eq!(s.rate(0, 5), None);
        assert_eq!(s.ratings(), before.as_slice());
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn progress_scenario_for_nine_levels() {
        let mut s = Session::new();
        assert_eq!(s.progress_percent(), 0);
        s.rate(0, 3);
        assert_eq!(s.progress_percent(), 11);
        for i in 1..LEVEL_COUNT {
            s.rate(i, 1);
        }
        assert_eq!(s.progress_percent(), 100);
    }

    #[test]
    fn progress_counts_out_of_order_ratings() {
        let mut s = Session::new();
        s.rate(8, 2);
        s.rate(4, 5);
        assert_eq!(s.phase(), Phase::Viewing(0));
        assert_eq!(s.progress_percent(), 22);
    }

    #[test]
    fn progress_matches_rounding_for_every_count() {
        let mut s = Session::new();
        for k in 0..=LEVEL_COUNT {
            let expected = (100.0 * k as f64 / LEVEL_COUNT as f64).round() as u8;
            assert_eq!(s.progress_percent(), expected, "k = {k}");
            if k < LEVEL_COUNT {
                s.rate(k, 5);
            }
        }
    }

    #[test]
    fn progress_on_short_catalogue() {
        let mut s = Session::with_levels(&TWO);
        s.rate(1, 3);
        assert_eq!(s.progress_percent(), 50);
        s.rate(0, 1);
        assert_eq!(s.progress_percent(), 100);
    }
}
