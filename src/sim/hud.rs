/// Derived read-models for the rating flow: HUD, timeline, continue button.
/// Pure functions of a `Session`; recomputed every frame.

use crate::sim::session::Session;

/// Heart slots shown under "VIDAS".
pub const LIFE_SLOTS: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    /// 1-based level number on screen.
    pub level_number: usize,
    pub total_levels: usize,
    /// `min(current rating, 3)`.
    pub lives_filled: usize,
    /// One entry per level; `true` once the mascot has reached it.
    pub pellets: Vec<bool>,
    /// Mascot position along the pellet track, 0.0..=100.0.
    pub mascot_percent: f32,
}

impl Hud {
    pub fn from_session(s: &Session) -> Self {
        let current = s.current_index();
        let total = s.level_count();
        let mascot_percent = if total > 1 {
            current as f32 / (total - 1) as f32 * 100.0
        } else {
            0.0
        };
        Hud {
            level_number: current + 1,
            total_levels: total,
            lives_filled: (s.current_rating() as usize).min(LIFE_SLOTS),
            pellets: (0..total).map(|i| i <= current).collect(),
            mascot_percent,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Badge {
    pub id: u32,
    pub done: bool,
    pub active: bool,
}

pub fn timeline(s: &Session) -> Vec<Badge> {
    let current = s.current_index();
    s.levels()
        .iter()
        .enumerate()
        .map(|(i, level)| Badge {
            id: level.id,
            done: s.rating_at(i) > 0,
            active: i == current,
        })
        .collect()
}

pub fn continue_label(s: &Session) -> &'static str {
    if s.is_last() {
        "Finalizar aventura"
    } else {
        "Siguiente nivel"
    }
}
