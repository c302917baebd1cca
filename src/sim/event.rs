/// Events emitted by session transitions.
/// The presentation layer consumes these for sound and screen changes.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Rated { level: usize, value: u8 },
    Advanced { to: usize },
    Finished,
}
