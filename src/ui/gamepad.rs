/// Gamepad input tracker using gilrs.
///
/// Button mapping is loaded from config.toml via `load_button_config()`.
/// Default mapping:
///   D-pad / Left Stick ←→  →  Move heart cursor
///   D-pad / Left Stick ↑↓  →  Switch focus (hearts / continue)
///   A / Start              →  Confirm
///   B / Select             →  Back
///   Y                      →  Toggle background loop

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::ui::input::Action;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST" => Some(Btn::B),
            "X" | "WEST" => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "L1" | "LB" => Some(Btn::L1),
            "R1" | "RB" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East => Some(Btn::B),
            Button::West => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
struct ActionMap {
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
    toggle_loop: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            confirm: vec![Btn::A, Btn::Start],
            cancel: vec![Btn::B, Btn::Select],
            toggle_loop: vec![Btn::Y],
        }
    }
}

fn parse_list(names: &[String]) -> Vec<Btn> {
    names.iter().filter_map(|s| Btn::from_name(s)).collect()
}

/// Directions, edge-triggered.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
enum Dir {
    Left,
    Right,
    Up,
    Down,
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Buttons pressed since the last `update()`, in order.
    pressed: Vec<Btn>,
    /// Directions pressed since the last `update()`, in order.
    dirs: Vec<Dir>,

    // Stick digital state, for edge detection
    stick_x: f32,
    stick_y: f32,
    stick_held: [bool; 4],

    action_map: ActionMap,

    pub connected: bool,
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                log::debug!("gamepad support unavailable: {e}");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            pressed: Vec::with_capacity(4),
            dirs: Vec::with_capacity(4),
            stick_x: 0.0,
            stick_y: 0.0,
            stick_held: [false; 4],
            action_map: ActionMap::default(),
            connected,
        }
    }

    /// Load button mapping from config. Empty or unparsable lists keep
    /// the default for that action.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        let map = &mut self.action_map;
        let cf = parse_list(&cfg.confirm);
        if !cf.is_empty() { map.confirm = cf; }
        let ca = parse_list(&cfg.cancel);
        if !ca.is_empty() { map.cancel = ca; }
        let tl = parse_list(&cfg.toggle_loop);
        if !tl.is_empty() { map.toggle_loop = tl; }
    }

    pub fn update(&mut self) {
        self.pressed.clear();
        self.dirs.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    match btn {
                        Button::DPadLeft => self.dirs.push(Dir::Left),
                        Button::DPadRight => self.dirs.push(Dir::Right),
                        Button::DPadUp => self.dirs.push(Dir::Up),
                        Button::DPadDown => self.dirs.push(Dir::Down),
                        other => {
                            if let Some(b) = Btn::from_gilrs(other) {
                                self.pressed.push(b);
                            }
                        }
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                }
                EventType::Connected => {
                    log::info!("gamepad connected");
                    self.connected = true;
                }
                EventType::Disconnected => {
                    log::info!("gamepad disconnected");
                    self.connected = false;
                    self.stick_x = 0.0;
                    self.stick_y = 0.0;
                }
                _ => {}
            }
        }

        self.derive_stick_edges();
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn derive_stick_edges(&mut self) {
        let now = [
            self.stick_x < -STICK_DEADZONE,
            self.stick_x > STICK_DEADZONE,
            self.stick_y > STICK_DEADZONE,
            self.stick_y < -STICK_DEADZONE,
        ];
        let dirs = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];
        for i in 0..4 {
            if now[i] && !self.stick_held[i] {
                self.dirs.push(dirs[i]);
            }
        }
        self.stick_held = now;
    }

    /// Actions from this frame's presses.
    pub fn actions(&self) -> Vec<Action> {
        let map = &self.action_map;
        let mut out = Vec::with_capacity(self.pressed.len() + self.dirs.len());
        for d in &self.dirs {
            out.push(match d {
                Dir::Left => Action::HeartLeft,
                Dir::Right => Action::HeartRight,
                Dir::Up | Dir::Down => Action::FocusNext,
            });
        }
        for b in &self.pressed {
            if map.confirm.contains(b) {
                out.push(Action::Confirm);
            } else if map.cancel.contains(b) {
                out.push(Action::Back);
            } else if map.toggle_loop.contains(b) {
                out.push(Action::ToggleLoop);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GamepadState {
        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: None,
            pressed: vec![],
            dirs: vec![],
            stick_x: 0.0,
            stick_y: 0.0,
            stick_held: [false; 4],
            action_map: ActionMap::default(),
            connected: false,
        }
    }

    #[test]
    fn button_names_parse_case_insensitively() {
        assert_eq!(Btn::from_name("a"), Some(Btn::A));
        assert_eq!(Btn::from_name("North"), Some(Btn::Y));
        assert_eq!(Btn::from_name("back"), Some(Btn::Select));
        assert_eq!(Btn::from_name("Z9"), None);
    }

    #[test]
    fn default_mapping_produces_actions() {
        let mut gp = state();
        gp.pressed = vec![Btn::A, Btn::B, Btn::Y, Btn::X];
        gp.dirs = vec![Dir::Right, Dir::Down];
        assert_eq!(
            gp.actions(),
            vec![
                Action::HeartRight,
                Action::FocusNext,
                Action::Confirm,
                Action::Back,
                Action::ToggleLoop,
            ]
        );
    }

    #[test]
    fn config_overrides_mapping_but_ignores_garbage() {
        let mut gp = state();
        gp.load_button_config(&GamepadConfig {
            confirm: vec!["X".into()],
            cancel: vec!["nope".into()],
            toggle_loop: vec![],
        });
        gp.pressed = vec![Btn::X, Btn::B, Btn::Y];
        assert_eq!(gp.actions(), vec![Action::Confirm, Action::Back, Action::ToggleLoop]);
    }

    #[test]
    fn stick_edges_fire_once_per_push() {
        let mut gp = state();
        gp.stick_x = -0.9;
        gp.derive_stick_edges();
        gp.derive_stick_edges();
        assert_eq!(gp.dirs, vec![Dir::Left]);
        gp.stick_x = 0.0;
        gp.derive_stick_edges();
        gp.stick_x = -0.9;
        gp.derive_stick_edges();
        assert_eq!(gp.dirs, vec![Dir::Left, Dir::Left]);
    }
}
