use crate::graph::Step;

/// Input to a [`crate::playback::PlaybackController`], produced by whatever shell translates user
/// interaction (buttons, sliders, key presses).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Continue the drill with a step leaving its end position.
    Append(Step),
    /// Extend the drill backwards with a step arriving at its start position.
    Prepend(Step),
    PopFront,
    PopBack,
    /// Jump to a global keyframe index.
    Seek(i64),
    TogglePause,
    ToggleMirror,
    /// The user grabbed the position slider. Automatic advance is suspended until
    /// [`Command::EndScrub`].
    BeginScrub,
    EndScrub,
}
