/// Sound engine: procedural 8-bit cues and the background loop.
///
/// ## Ownership
///
/// Each view owns one `SoundEngine`. The engine opens at most two
/// `AudioContext`s from the shared `AudioDevice`:
///   - the cue context, opened lazily on the first cue and reused after
///   - the loop context, opened when the background loop starts and
///     closed when it stops
///
/// `shutdown()` (also run on `Drop`) cancels the loop timer and closes
/// both contexts, so tearing down a view always releases its audio.
///
/// ## Capability
///
/// A device that cannot open an output returns `None`; the engine then
/// stays silent for its lifetime. Build without the "sound" feature (or
/// set `audio.enabled = false`) to get the `NullDevice` everywhere.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::config::AudioConfig;
use crate::sim::timer::Repeating;
use crate::ui::synth;

/// An open output: a signal context plus its master gain stage.
pub trait AudioContext {
    /// Schedule `samples` (mono, `synth::SAMPLE_RATE`) for immediate playback.
    fn play(&mut self, samples: Vec<f32>);
    /// Stop every voice and release the output. Idempotent.
    fn close(&mut self);
}

/// Source of audio contexts.
pub trait AudioDevice {
    /// `None` when no output is available.
    fn open(&self, volume: f32) -> Option<Box<dyn AudioContext>>;
}

/// Device used when audio is disabled or compiled out.
pub struct NullDevice;

impl AudioDevice for NullDevice {
    fn open(&self, _volume: f32) -> Option<Box<dyn AudioContext>> {
        None
    }
}

#[cfg(feature = "sound")]
mod backend {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{AudioContext, AudioDevice};
    use crate::ui::synth::SAMPLE_RATE;

    /// System default output via rodio.
    pub struct RodioDevice;

    impl AudioDevice for RodioDevice {
        fn open(&self, volume: f32) -> Option<Box<dyn AudioContext>> {
            match OutputStream::try_default() {
                Ok((stream, handle)) => Some(Box::new(RodioContext {
                    stream: Some(stream),
                    handle,
                    volume,
                    voices: Vec::new(),
                })),
                Err(e) => {
                    log::debug!("audio output unavailable: {e}");
                    None
                }
            }
        }
    }

    struct RodioContext {
        stream: Option<OutputStream>,
        handle: OutputStreamHandle,
        volume: f32,
        /// One sink per sounding cue so overlapping cues mix.
        voices: Vec<Sink>,
    }

    impl AudioContext for RodioContext {
        fn play(&mut self, samples: Vec<f32>) {
            if self.stream.is_none() {
                return;
            }
            self.voices.retain(|v| !v.empty());
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    sink.set_volume(self.volume);
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                    self.voices.push(sink);
                }
                Err(e) => log::debug!("could not create audio sink: {e}"),
            }
        }

        fn close(&mut self) {
            for voice in self.voices.drain(..) {
                voice.stop();
            }
            // Dropping the stream closes the output device.
            self.stream = None;
        }
    }

    impl Drop for RodioContext {
        fn drop(&mut self) {
            self.close();
        }
    }
}

/// Device selected by config and compiled features.
pub fn default_device(cfg: &AudioConfig) -> Rc<dyn AudioDevice> {
    if !cfg.enabled {
        log::info!("audio disabled by config");
        return Rc::new(NullDevice);
    }
    #[cfg(feature = "sound")]
    {
        Rc::new(backend::RodioDevice)
    }
    #[cfg(not(feature = "sound"))]
    {
        Rc::new(NullDevice)
    }
}

struct BackgroundLoop {
    context: Box<dyn AudioContext>,
    timer: Repeating,
    step: usize,
}

pub struct SoundEngine {
    device: Rc<dyn AudioDevice>,
    volume: f32,
    loop_period: Duration,
    cues: Option<Box<dyn AudioContext>>,
    /// Set once the device refused to open; no further attempts.
    unavailable: bool,
    background: Option<BackgroundLoop>,
}

impl SoundEngine {
    pub fn new(device: Rc<dyn AudioDevice>, cfg: &AudioConfig) -> Self {
        SoundEngine {
            device,
            volume: cfg.volume,
            loop_period: Duration::from_millis(cfg.loop_step_ms),
            cues: None,
            unavailable: false,
            background: None,
        }
    }

    fn open(&mut self) -> Option<Box<dyn AudioContext>> {
        if self.unavailable {
            return None;
        }
        let ctx = self.device.open(self.volume);
        if ctx.is_none() {
            self.unavailable = true;
        }
        ctx
    }

    fn play_cue(&mut self, samples: Vec<f32>) {
        if self.cues.is_none() {
            self.cues = self.open();
        }
        if let Some(ctx) = self.cues.as_mut() {
            ctx.play(samples);
        }
    }

    /// Rising double chirp; pitch follows the rating (1..=5).
    pub fn play_confirmation(&mut self, intensity: u8) {
        self.play_cue(synth::confirmation(intensity));
    }

    pub fn play_transition_chime(&mut self) {
        self.play_cue(synth::transition_chime());
    }

    /// Start or stop the background loop. Returns whether it is running.
    pub fn toggle_background_loop(&mut self, now: Instant) -> bool {
        if self.background.is_some() {
            self.stop_background_loop();
            return false;
        }
        let Some(context) = self.open() else {
            return false;
        };
        log::debug!("background loop started ({:?} per step)", self.loop_period);
        self.background = Some(BackgroundLoop {
            context,
            timer: Repeating::new(now, self.loop_period),
            step: 0,
        });
        true
    }

    fn stop_background_loop(&mut self) {
        if let Some(mut bg) = self.background.take() {
            bg.timer.cancel();
            bg.context.close();
            log::debug!("background loop stopped after {} steps", bg.step);
        }
    }

    /// Drive the loop timer. Call once per tick.
    pub fn update(&mut self, now: Instant) {
        if let Some(bg) = self.background.as_mut() {
            if bg.timer.poll(now) {
                let note = synth::loop_note(bg.step);
                bg.context.play(synth::loop_tone(note));
                bg.step += 1;
            }
        }
    }

    pub fn is_looping(&self) -> bool {
        self.background.is_some()
    }

    #[allow(dead_code)]
    pub fn loop_step(&self) -> usize {
        self.background.as_ref().map_or(0, |bg| bg.step)
    }

    /// Release every timer and context this engine holds. Idempotent.
    pub fn shutdown(&mut self) {
        self.stop_background_loop();
        if let Some(mut ctx) = self.cues.take() {
            ctx.close();
        }
    }
}

impl Drop for SoundEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MockDevice;
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn cfg() -> AudioConfig {
        AudioConfig { enabled: true, volume: 1.0, loop_step_ms: 220 }
    }

    #[test]
    fn cue_context_is_lazy_and_reused() {
        let (dev, counters) = MockDevice::new();
        let mut engine = SoundEngine::new(dev, &cfg());
        assert_eq!(counters.opened.get(), 0);

        engine.play_confirmation(1);
        engine.play_confirmation(5);
        engine.play_transition_chime();
        assert_eq!(counters.opened.get(), 1);
        assert_eq!(counters.played.borrow().len(), 3);
    }

    #[test]
    fn unavailable_device_is_silent_noop() {
        let (dev, counters) = MockDevice::unavailable();
        let mut engine = SoundEngine::new(dev, &cfg());
        engine.play_confirmation(3);
        assert!(!engine.toggle_background_loop(Instant::now()));
        assert!(!engine.is_looping());
        assert!(counters.played.borrow().is_empty());
    }

    #[test]
    fn null_device_never_opens() {
        let mut engine = SoundEngine::new(Rc::new(NullDevice), &cfg());
        engine.play_transition_chime();
        assert!(!engine.toggle_background_loop(Instant::now()));
    }

    #[test]
    fn loop_start_then_stop_releases_everything() {
        let (dev, counters) = MockDevice::new();
        let mut engine = SoundEngine::new(dev, &cfg());
        let t0 = Instant::now();
        assert!(engine.toggle_background_loop(t0));
        assert_eq!(counters.open_now.get(), 1);
        engine.update(t0);
        assert!(!engine.toggle_background_loop(t0 + 10 * MS));
        assert!(!engine.is_looping());
        assert_eq!(counters.open_now.get(), 0);
    }

    #[test]
    fn loop_steps_at_fixed_cadence() {
        let (dev, counters) = MockDevice::new();
        let mut engine = SoundEngine::new(dev, &cfg());
        let t0 = Instant::now();
        engine.toggle_background_loop(t0);
        for ms in (0..=1000u32).step_by(10) {
            engine.update(t0 + ms * MS);
        }
        // Fires at 0, 220, 440, 660, 880.
        assert_eq!(engine.loop_step(), 5);
        assert_eq!(counters.played.borrow().len(), 5);
    }

    #[test]
    fn stopped_loop_never_plays_again() {
        let (dev, counters) = MockDevice::new();
        let mut engine = SoundEngine::new(dev, &cfg());
        let t0 = Instant::now();
        engine.toggle_background_loop(t0);
        engine.update(t0);
        engine.toggle_background_loop(t0);
        engine.update(t0 + 5000 * MS);
        assert_eq!(counters.played.borrow().len(), 1);
    }

    #[test]
    fn drop_with_active_loop_closes_all_contexts() {
        let (dev, counters) = MockDevice::new();
        {
            let mut engine = SoundEngine::new(dev, &cfg());
            engine.play_confirmation(2);
            engine.toggle_background_loop(Instant::now());
            assert_eq!(counters.open_now.get(), 2);
        }
        assert_eq!(counters.open_now.get(), 0);
        assert_eq!(counters.opened.get(), 2);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let (dev, counters) = MockDevice::new();
        let mut engine = SoundEngine::new(dev, &cfg());
        engine.play_confirmation(4);
        engine.shutdown();
        engine.shutdown();
        assert_eq!(counters.open_now.get(), 0);
    }
}
