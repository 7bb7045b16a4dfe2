//=========================================================================
// Actions
//=========================================================================
//
// Declarative animation steps, modeled after classic sprite-kit actions.
//
// An `Action` is a recipe. Running it on a node produces a `Track`
// (see `timeline.rs`) that holds the mutable playback state.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use glam::Vec2;

//=== Cue =================================================================

/// Message emitted when a `run` step is reached.
///
/// Cues never capture scene state. They are collected by the animator
/// and delivered back into the scene thread after the tick, so a scene
/// that was released in the meantime simply never sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue<K> {
    /// Ask the scene manager to move on to another scene.
    Transition(K),

    /// Scene-local signal, delivered to the scene's cue hook.
    Signal(&'static str),
}

//=== Action ==============================================================

/// A single animation step or a composition of steps.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<K> {
    /// Moves the node by a relative offset.
    MoveBy { delta: Vec2, duration: f32 },

    /// Moves the node to an absolute position on either or both axes.
    MoveTo { x: Option<f32>, y: Option<f32>, duration: f32 },

    /// Does nothing for a while.
    Wait { duration: f32 },

    /// Fades the node's alpha to zero.
    FadeOut { duration: f32 },

    /// Emits a cue and completes immediately.
    Run(Cue<K>),

    /// Detaches the node (and its children) from the stage.
    RemoveFromParent,

    /// Runs steps one after another.
    Sequence(Vec<Action<K>>),

    /// Runs steps in parallel; completes when the longest one does.
    Group(Vec<Action<K>>),

    /// Restarts the inner action every time it completes.
    RepeatForever(Box<Action<K>>),
}

impl<K> Action<K> {
    //--- Constructors -----------------------------------------------------

    pub fn move_by(dx: f32, dy: f32, duration: f32) -> Self {
        Self::MoveBy {
            delta: Vec2::new(dx, dy),
            duration,
        }
    }

    pub fn move_to(position: Vec2, duration: f32) -> Self {
        Self::MoveTo {
            x: Some(position.x),
            y: Some(position.y),
            duration,
        }
    }

    pub fn move_to_x(x: f32, duration: f32) -> Self {
        Self::MoveTo { x: Some(x), y: None, duration }
    }

    pub fn move_to_y(y: f32, duration: f32) -> Self {
        Self::MoveTo { x: None, y: Some(y), duration }
    }

    pub fn wait(duration: f32) -> Self {
        Self::Wait { duration }
    }

    pub fn fade_out(duration: f32) -> Self {
        Self::FadeOut { duration }
    }

    pub fn transition(target: K) -> Self {
        Self::Run(Cue::Transition(target))
    }

    pub fn signal(name: &'static str) -> Self {
        Self::Run(Cue::Signal(name))
    }

    pub fn remove_from_parent() -> Self {
        Self::RemoveFromParent
    }

    pub fn sequence(steps: impl IntoIterator<Item = Action<K>>) -> Self {
        Self::Sequence(steps.into_iter().collect())
    }

    pub fn group(steps: impl IntoIterator<Item = Action<K>>) -> Self {
        Self::Group(steps.into_iter().collect())
    }

    pub fn repeat_forever(action: Action<K>) -> Self {
        Self::RepeatForever(Box::new(action))
    }

    //--- Queries ----------------------------------------------------------

    /// Total running time. `None` for actions that never finish.
    pub fn duration(&self) -> Option<Duration> {
        self.seconds().map(Duration::from_secs_f32)
    }

    fn seconds(&self) -> Option<f32> {
        match self {
            Self::MoveBy { duration, .. }
            | Self::MoveTo { duration, .. }
            | Self::Wait { duration }
            | Self::FadeOut { duration } => Some(duration.max(0.0)),
            Self::Run(_) | Self::RemoveFromParent => Some(0.0),
            Self::Sequence(steps) => steps.iter().map(Self::seconds).sum(),
            Self::Group(steps) => steps
                .iter()
                .map(Self::seconds)
                .try_fold(0.0_f32, |longest, step| step.map(|s| longest.max(s))),
            Self::RepeatForever(_) => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    type TestAction = Action<u8>;

    #[test]
    fn sequence_duration_is_sum_of_steps() {
        let action = TestAction::sequence([
            Action::move_by(-10.0, 0.0, 1.0),
            Action::wait(1.0),
            Action::wait(1.0),
            Action::move_by(10.0, 0.0, 2.0),
            Action::transition(3),
        ]);
        assert_eq!(action.duration(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn group_duration_is_longest_step() {
        let action = TestAction::group([Action::move_by(0.0, 100.0, 1.0), Action::fade_out(2.5)]);
        assert_eq!(action.duration(), Some(Duration::from_secs_f32(2.5)));
    }

    #[test]
    fn repeat_forever_has_no_duration() {
        let action = TestAction::repeat_forever(Action::wait(1.0));
        assert_eq!(action.duration(), None);

        let nested = TestAction::sequence([Action::wait(1.0), action]);
        assert_eq!(nested.duration(), None);
    }
}
