/// Views and navigation.
///
/// Two routes: `Title` (entry) and `Levels` (rating flow). The final
/// screen is the `Levels` view once its session has finished; it owns the
/// `RevealSequence`.
///
/// Every view owns its own `SoundEngine`. Navigation tears the outgoing
/// view down (audio contexts closed, loop and reveal timers cancelled)
/// before the incoming view is built, so no two views ever hold audio at
/// the same time.

use std::rc::Rc;
use std::time::Instant;

use crate::config::AudioConfig;
use crate::domain::rating::MAX_HEARTS;
use crate::sim::event::SessionEvent;
use crate::sim::reveal::{RevealSequence, THANKS_MESSAGE};
use crate::sim::session::Session;
use crate::ui::input::Action;
use crate::ui::sound::{AudioDevice, SoundEngine};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Route {
    Title,
    Levels,
}

/// What has keyboard focus on the rating card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Hearts,
    Continue,
}

pub struct TitleView {
    pub mounted_at: Instant,
    pub sound: SoundEngine,
}

pub struct LevelsView {
    pub session: Session,
    /// Heart under the cursor, 1..=5.
    pub heart_cursor: u8,
    pub focus: Focus,
    /// Mounted when the session finishes.
    pub reveal: Option<RevealSequence>,
    pub sound: SoundEngine,
}

pub enum Screen {
    Title(TitleView),
    Levels(LevelsView),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Title(_) => Route::Title,
            Screen::Levels(_) => Route::Levels,
        }
    }

    pub fn is_looping(&self) -> bool {
        match self {
            Screen::Title(v) => v.sound.is_looping(),
            Screen::Levels(v) => v.sound.is_looping(),
        }
    }

    /// Release every timer and audio context the view holds.
    fn teardown(&mut self) {
        match self {
            Screen::Title(v) => v.sound.shutdown(),
            Screen::Levels(v) => v.teardown(),
        }
    }
}

impl LevelsView {
    fn new(sound: SoundEngine) -> Self {
        LevelsView {
            session: Session::new(),
            heart_cursor: 1,
            focus: Focus::Hearts,
            reveal: None,
            sound,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    fn teardown(&mut self) {
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.unmount();
        }
        self.sound.shutdown();
    }

    fn rate(&mut self, value: u8, now: Instant) {
        let ev = self.session.rate_current(value);
        if ev.is_some() {
            self.heart_cursor = value;
        }
        self.apply(ev, now);
    }

    fn advance(&mut self, now: Instant) {
        let ev = self.session.advance();
        self.apply(ev, now);
    }

    /// React to a session transition: sound, focus, reveal.
    fn apply(&mut self, event: Option<SessionEvent>, now: Instant) {
        let Some(event) = event else { return };
        log::debug!("session event: {event:?}");
        match event {
            SessionEvent::Rated { value, .. } => self.sound.play_confirmation(value),
            SessionEvent::Advanced { .. } => {
                self.focus = Focus::Hearts;
                self.heart_cursor = 1;
            }
            SessionEvent::Finished => {
                log::info!(
                    "all {} levels rated: {:?}",
                    self.session.level_count(),
                    self.session.ratings()
                );
                self.reveal = Some(RevealSequence::mount(THANKS_MESSAGE, now));
            }
        }
    }

    /// Returns a route to navigate to, if the action asks for one.
    fn handle(&mut self, action: Action, now: Instant) -> Option<Route> {
        if self.is_finished() {
            return match action {
                Action::Confirm | Action::Back => Some(Route::Title),
                Action::ToggleLoop => {
                    self.sound.toggle_background_loop(now);
                    None
                }
                _ => None,
            };
        }

        match action {
            Action::Back => return Some(Route::Title),
            Action::Rate(v) => self.rate(v, now),
            Action::HeartLeft => {
                self.focus = Focus::Hearts;
                self.heart_cursor = self.heart_cursor.saturating_sub(1).max(1);
            }
            Action::HeartRight => {
                self.focus = Focus::Hearts;
                self.heart_cursor = (self.heart_cursor + 1).min(MAX_HEARTS);
            }
            Action::FocusNext => {
                self.focus = match self.focus {
                    Focus::Hearts => Focus::Continue,
                    Focus::Continue => Focus::Hearts,
                };
            }
            Action::Confirm => match self.focus {
                Focus::Hearts => self.rate(self.heart_cursor, now),
                Focus::Continue => self.advance(now),
            },
            Action::Advance => self.advance(now),
            Action::ToggleLoop => {
                self.sound.toggle_background_loop(now);
            }
            Action::Exit | Action::Quit => {}
        }
        None
    }

    fn update(&mut self, now: Instant) {
        self.sound.update(now);
        if let Some(reveal) = self.reveal.as_mut() {
            if reveal.update(now) {
                log::debug!("reveal explosion visible");
            }
        }
    }
}

pub struct App {
    device: Rc<dyn AudioDevice>,
    audio: AudioConfig,
    screen: Screen,
    quit: bool,
}

impl App {
    pub fn new(device: Rc<dyn AudioDevice>, audio: AudioConfig, now: Instant) -> Self {
        let sound = SoundEngine::new(device.clone(), &audio);
        App {
            device,
            audio,
            screen: Screen::Title(TitleView { mounted_at: now, sound }),
            quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle(&mut self, action: Action, now: Instant) {
        if action == Action::Quit {
            self.quit = true;
            return;
        }
        let next = match &mut self.screen {
            Screen::Title(v) => match action {
                Action::Confirm => Some(Route::Levels),
                Action::Back | Action::Exit => {
                    self.quit = true;
                    None
                }
                Action::ToggleLoop => {
                    v.sound.toggle_background_loop(now);
                    None
                }
                _ => None,
            },
            Screen::Levels(v) => v.handle(action, now),
        };
        if let Some(route) = next {
            self.navigate(route, now);
        }
    }

    /// One pass of the main loop: apply this frame's actions, then poll
    /// every timer. Runs every frame so timers keep their own cadence.
    pub fn frame(&mut self, actions: impl IntoIterator<Item = Action>, now: Instant) {
        for action in actions {
            self.handle(action, now);
            if self.quit {
                return;
            }
        }
        self.update(now);
    }

    pub fn update(&mut self, now: Instant) {
        match &mut self.screen {
            Screen::Title(v) => v.sound.update(now),
            Screen::Levels(v) => v.update(now),
        }
    }

    /// Replace the current view. Each entry starts from scratch.
    fn navigate(&mut self, route: Route, now: Instant) {
        log::info!("navigate {:?} -> {:?}", self.screen.route(), route);
        self.screen.teardown();
        let sound = SoundEngine::new(self.device.clone(), &self.audio);
        self.screen = match route {
            Route::Title => Screen::Title(TitleView { mounted_at: now, sound }),
            Route::Levels => {
                let mut view = LevelsView::new(sound);
                view.sound.play_transition_chime();
                Screen::Levels(view)
            }
        };
    }

    /// Release the current view's resources before exit.
    pub fn shutdown(&mut self) {
        self.screen.teardown();
    }
}
