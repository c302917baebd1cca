/// Reveal sequence for the final screen.
///
/// Timeline for a message of `L` characters:
///   - letters appear one by one, `LETTER_STEP` apart
///   - the mascot crosses the track in `D = max(2.2s, L * 0.12s)`
///   - letters vanish at `max(D - 0.4s, 0)`
///   - at `D` the explosion becomes visible (one-way) and its particles
///     burst out, each `index * 50ms` after the explosion
///
/// Particles are rolled once at mount and frozen for the sequence's
/// lifetime. The explosion timer is cancelled on unmount so a late poll
/// can never flip the flag on a discarded screen.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::sim::timer::Deferred;

pub const THANKS_MESSAGE: &str = "MUCHAS GRACIAS";

pub const PARTICLE_COUNT: usize = 12;
pub const PARTICLE_X_SPREAD: f32 = 160.0;
pub const PARTICLE_Y_SPREAD: f32 = 90.0;
const PARTICLE_STAGGER: Duration = Duration::from_millis(50);

const MIN_DURATION: Duration = Duration::from_millis(2200);
const PER_LETTER: Duration = Duration::from_millis(120);
const LETTERS_LEAD: Duration = Duration::from_millis(400);
const LETTER_STEP: Duration = Duration::from_millis(60);

/// One decorative burst fragment. Offsets are in abstract pixels
/// (`x` in ±160, `y` in ±90); the renderer scales them to cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub delay: Duration,
}

/// Total reveal / mascot traversal time for a message of `len` chars.
pub fn reveal_duration(len: usize) -> Duration {
    let by_length = PER_LETTER * len as u32;
    by_length.max(MIN_DURATION)
}

/// When the letters disappear, for a reveal of length `duration`.
pub fn letters_delay(duration: Duration) -> Duration {
    duration.saturating_sub(LETTERS_LEAD)
}

fn roll_particles<R: Rng + ?Sized>(rng: &mut R) -> Vec<Particle> {
    (0..PARTICLE_COUNT)
        .map(|i| Particle {
            x: rng.random_range(-PARTICLE_X_SPREAD..=PARTICLE_X_SPREAD),
            y: rng.random_range(-PARTICLE_Y_SPREAD..=PARTICLE_Y_SPREAD),
            delay: PARTICLE_STAGGER * i as u32,
        })
        .collect()
}

#[derive(Debug)]
pub struct RevealSequence {
    letters: Vec<char>,
    mounted_at: Instant,
    duration: Duration,
    letters_delay: Duration,
    particles: Vec<Particle>,
    explosion_visible: bool,
    explosion_timer: Deferred,
}

impl RevealSequence {
    pub fn mount(message: &str, now: Instant) -> Self {
        Self::mount_with_rng(message, now, &mut rand::rng())
    }

    pub fn mount_with_rng<R: Rng + ?Sized>(message: &str, now: Instant, rng: &mut R) -> Self {
        let letters: Vec<char> = message.chars().collect();
        let duration = reveal_duration(letters.len());
        log::debug!(
            "reveal mounted: {} letters, duration {:?}",
            letters.len(),
            duration
        );
        RevealSequence {
            letters_delay: letters_delay(duration),
            explosion_timer: Deferred::new(now, duration),
            particles: roll_particles(rng),
            explosion_visible: false,
            mounted_at: now,
            duration,
            letters,
        }
    }

    /// Advance the sequence. Returns `true` on the tick the explosion
    /// becomes visible.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.explosion_timer.poll(now) {
            self.explosion_visible = true;
            return true;
        }
        false
    }

    /// Cancel the pending explosion timer. Idempotent.
    pub fn unmount(&mut self) {
        if self.explosion_timer.is_pending() {
            log::debug!("reveal unmounted before explosion");
        }
        self.explosion_timer.cancel();
    }

    // ── Read state ──

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn letters_delay(&self) -> Duration {
        self.letters_delay
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn explosion_visible(&self) -> bool {
        self.explosion_visible
    }

    #[allow(dead_code)]
    pub fn timer_pending(&self) -> bool {
        self.explosion_timer.is_pending()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.mounted_at)
    }

    /// Mascot position along the track, 0.0 at mount, 1.0 at `D`.
    pub fn mascot_progress(&self, now: Instant) -> f32 {
        let t = self.elapsed(now).as_secs_f32() / self.duration.as_secs_f32();
        t.clamp(0.0, 1.0)
    }

    pub fn letter_visible(&self, index: usize, now: Instant) -> bool {
        let elapsed = self.elapsed(now);
        elapsed >= LETTER_STEP * index as u32 && elapsed < self.letters_delay
    }

    /// Particles already released, given how long the explosion has been visible.
    pub fn particle_visible(&self, index: usize, now: Instant) -> bool {
        if !self.explosion_visible {
            return false;
        }
        let since = self.elapsed(now).saturating_sub(self.duration);
        self.particles
            .get(index)
            .is_some_and(|p| since >= p.delay)
    }
}

impl Drop for RevealSequence {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const MS: Duration = Duration::from_millis(1);

    fn mount_at(t0: Instant) -> RevealSequence {
        RevealSequence::mount_with_rng(THANKS_MESSAGE, t0, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn duration_has_floor_of_2200ms() {
        assert_eq!(reveal_duration(14), Duration::from_millis(2200));
        assert_eq!(reveal_duration(15), Duration::from_millis(2200));
        assert_eq!(reveal_duration(0), Duration::from_millis(2200));
        assert_eq!(reveal_duration(30), Duration::from_millis(3600));
    }

    #[test]
    fn letters_delay_leads_duration() {
        assert_eq!(letters_delay(Duration::from_millis(2200)), Duration::from_millis(1800));
        assert_eq!(letters_delay(Duration::from_millis(300)), Duration::ZERO);
    }

    #[test]
    fn thanks_message_parameters() {
        let r = mount_at(Instant::now());
        assert_eq!(r.letters().len(), 14);
        assert_eq!(r.duration(), 2200 * MS);
        assert_eq!(r.letters_delay(), 1800 * MS);
    }

    #[test]
    fn explosion_flips_at_duration_and_not_before() {
        let t0 = Instant::now();
        let mut r = mount_at(t0);
        assert!(!r.update(t0));
        assert!(!r.update(t0 + 2199 * MS));
        assert!(!r.explosion_visible());
        assert!(r.update(t0 + 2200 * MS));
        assert!(r.explosion_visible());
        assert!(!r.update(t0 + 5000 * MS));
        assert!(r.explosion_visible());
    }

    #[test]
    fn unmount_cancels_explosion() {
        let t0 = Instant::now();
        let mut r = mount_at(t0);
        r.unmount();
        assert!(!r.timer_pending());
        assert!(!r.update(t0 + 10_000 * MS));
        assert!(!r.explosion_visible());
    }

    #[test]
    fn particles_are_bounded_and_staggered() {
        let r = mount_at(Instant::now());
        assert_eq!(r.particles().len(), PARTICLE_COUNT);
        for (i, p) in r.particles().iter().enumerate() {
            assert!((-160.0..=160.0).contains(&p.x));
            assert!((-90.0..=90.0).contains(&p.y));
            assert_eq!(p.delay, 50 * MS * i as u32);
        }
    }

    #[test]
    fn particles_are_frozen_across_updates() {
        let t0 = Instant::now();
        let mut r = mount_at(t0);
        let before = r.particles().to_vec();
        for step in 0..50u32 {
            r.update(t0 + 100 * MS * step);
        }
        assert_eq!(r.particles(), before.as_slice());
    }

    #[test]
    fn particles_release_after_explosion() {
        let t0 = Instant::now();
        let mut r = mount_at(t0);
        assert!(!r.particle_visible(0, t0 + 2200 * MS));
        r.update(t0 + 2200 * MS);
        assert!(r.particle_visible(0, t0 + 2200 * MS));
        assert!(!r.particle_visible(11, t0 + 2200 * MS));
        assert!(r.particle_visible(11, t0 + 2750 * MS));
        assert!(!r.particle_visible(PARTICLE_COUNT, t0 + 9000 * MS));
    }

    #[test]
    fn letters_reveal_then_vanish() {
        let t0 = Instant::now();
        let r = mount_at(t0);
        assert!(r.letter_visible(0, t0));
        assert!(!r.letter_visible(5, t0 + 200 * MS));
        assert!(r.letter_visible(5, t0 + 300 * MS));
        assert!(!r.letter_visible(0, t0 + 1800 * MS));
    }

    #[test]
    fn mascot_progress_is_clamped() {
        let t0 = Instant::now();
        let r = mount_at(t0);
        assert_eq!(r.mascot_progress(t0), 0.0);
        assert!((r.mascot_progress(t0 + 1100 * MS) - 0.5).abs() < 1e-3);
        assert_eq!(r.mascot_progress(t0 + 9000 * MS), 1.0);
    }
}
