/// Waveform generators: procedural 8-bit cues rendered to mono f32 samples.
///
/// Every cue is a square wave shaped by ramps that mirror audio-graph
/// automation: `lin_ramp` / `exp_ramp` from a start value to a target over
/// a window, holding the target afterwards. Cue loudness is baked into the
/// samples; the output context applies only the master volume.

use std::f32::consts::PI;

pub const SAMPLE_RATE: u32 = 22050;

// ── Confirmation cue ──
const CONFIRM_GAIN: f32 = 0.08;
const CONFIRM_BASE_HZ: f32 = 240.0;
const CONFIRM_HZ_PER_HEART: f32 = 20.0;
const CONFIRM_SECOND_OFFSET: f32 = 0.12;
const CONFIRM_SECOND_RATIO: f32 = 0.9;
const BURST_LEN: f32 = 0.2;
const BURST_SWEEP: f32 = 0.12;
const BURST_SWEEP_RATIO: f32 = 1.4;
const BURST_ATTACK: f32 = 0.02;
const BURST_DECAY_END: f32 = 0.18;
const BURST_FILTER_Q: f32 = 0.9;
const BURST_FILTER_FROM: f32 = 800.0;
const BURST_FILTER_TO: f32 = 1800.0;

// ── Transition chime ──
const CHIME_GAIN: f32 = 0.2;
const CHIME_FROM_HZ: f32 = 440.0;
const CHIME_TO_HZ: f32 = 880.0;
const CHIME_SWEEP: f32 = 0.12;
const CHIME_LEN: f32 = 0.25;

// ── Background loop ──
pub const LOOP_PATTERN: [f32; 8] = [523.25, 659.25, 784.0, 659.25, 880.0, 659.25, 784.0, 659.25];
const LOOP_GAIN: f32 = 0.05;
const LOOP_TONE_LEN: f32 = 0.18;
const LOOP_ATTACK: f32 = 0.005;

/// Floor used by exponential ramps (they cannot reach zero).
const SILENCE: f32 = 0.001;

#[inline]
fn sample_count(seconds: f32) -> usize {
    (SAMPLE_RATE as f32 * seconds).round() as usize
}

#[inline]
fn lin_ramp(from: f32, to: f32, t: f32, window: f32) -> f32 {
    if t >= window {
        to
    } else {
        from + (to - from) * (t / window)
    }
}

#[inline]
fn exp_ramp(from: f32, to: f32, t: f32, window: f32) -> f32 {
    if t >= window {
        to
    } else {
        from * (to / from).powf(t / window)
    }
}

/// Phase-accumulating square oscillator, so frequency sweeps stay continuous.
struct Square {
    phase: f32,
}

impl Square {
    fn new() -> Self {
        Square { phase: 0.0 }
    }

    fn next(&mut self, freq: f32) -> f32 {
        let s = if self.phase < 0.5 { 1.0 } else { -1.0 };
        self.phase = (self.phase + freq / SAMPLE_RATE as f32).fract();
        s
    }
}

/// Band-pass biquad (constant 0 dB peak gain) with a movable centre.
struct BandPass {
    q: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BandPass {
    fn new(q: f32) -> Self {
        BandPass { q, x1: 0.0, x2: 0.0, y1: 0.0, y2: 0.0 }
    }

    fn process(&mut self, x: f32, centre: f32) -> f32 {
        let w0 = 2.0 * PI * centre / SAMPLE_RATE as f32;
        let alpha = w0.sin() / (2.0 * self.q);
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * w0.cos();
        let a2 = 1.0 - alpha;
        let y = (alpha * x - alpha * self.x2 - a1 * self.y1 - a2 * self.y2) / a0;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Base pitch of the confirmation cue for a rating of `intensity` hearts.
pub fn confirmation_base_hz(intensity: u8) -> f32 {
    CONFIRM_BASE_HZ + CONFIRM_HZ_PER_HEART * intensity as f32
}

/// One rising, filtered chirp starting at `start_hz`.
fn burst(start_hz: f32) -> Vec<f32> {
    let n = sample_count(BURST_LEN);
    let mut osc = Square::new();
    let mut filter = BandPass::new(BURST_FILTER_Q);
    (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let freq = exp_ramp(start_hz, start_hz * BURST_SWEEP_RATIO, t, BURST_SWEEP);
            let centre = lin_ramp(BURST_FILTER_FROM, BURST_FILTER_TO, t, BURST_SWEEP);
            let env = if t < BURST_ATTACK {
                lin_ramp(0.0, 1.0, t, BURST_ATTACK)
            } else {
                exp_ramp(1.0, SILENCE, t - BURST_ATTACK, BURST_DECAY_END - BURST_ATTACK)
            };
            filter.process(osc.next(freq), centre) * env
        })
        .collect()
}

/// Mix `src` into `dst` starting `offset` samples in, growing `dst` as needed.
fn mix_into(dst: &mut Vec<f32>, src: &[f32], offset: usize) {
    if dst.len() < offset + src.len() {
        dst.resize(offset + src.len(), 0.0);
    }
    for (d, s) in dst[offset..].iter_mut().zip(src) {
        *d += s;
    }
}

/// Two overlapping chirps; pitch rises with the rating.
pub fn confirmation(intensity: u8) -> Vec<f32> {
    let base = confirmation_base_hz(intensity);
    let mut out = burst(base);
    let second = burst(base * CONFIRM_SECOND_RATIO);
    mix_into(&mut out, &second, sample_count(CONFIRM_SECOND_OFFSET));
    for s in &mut out {
        *s *= CONFIRM_GAIN;
    }
    out
}

/// 440Hz → 880Hz sweep played when entering the rating flow.
pub fn transition_chime() -> Vec<f32> {
    let n = sample_count(CHIME_LEN);
    let mut osc = Square::new();
    (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let freq = lin_ramp(CHIME_FROM_HZ, CHIME_TO_HZ, t, CHIME_SWEEP);
            osc.next(freq) * exp_ramp(CHIME_GAIN, SILENCE, t, CHIME_LEN)
        })
        .collect()
}

/// Pitch for the given loop step.
pub fn loop_note(step: usize) -> f32 {
    LOOP_PATTERN[step % LOOP_PATTERN.len()]
}

/// Short plucked square tone for one loop step.
pub fn loop_tone(freq: f32) -> Vec<f32> {
    let n = sample_count(LOOP_TONE_LEN);
    let mut osc = Square::new();
    (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = if t < LOOP_ATTACK {
                lin_ramp(0.0, 1.0, t, LOOP_ATTACK)
            } else {
                exp_ramp(1.0, SILENCE, t - LOOP_ATTACK, LOOP_TONE_LEN - LOOP_ATTACK)
            };
            osc.next(freq) * env * LOOP_GAIN
        })
        .collect()
}
