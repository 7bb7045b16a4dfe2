//=========================================================================
// Timeline
//=========================================================================
//
// Host-driven playback of actions.
//
// Architecture:
//   Scene ── run(node, Action) ──> Animator
//                                    └─ tracks: Vec<(NodeId, Track)>
//   Tick  ── advance(stage, dt) ──> step every track ──> fired cues
//
// Each track is an independent timeline. Leftover time from a finished
// step flows into the next one, so a coarse tick never drops a step and
// cumulative offsets stay exact.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use super::{Action, Cue};
use crate::core::stage::{NodeId, Stage};

//=== Progress ============================================================

/// Result of stepping a track.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Progress {
    Running,

    /// Finished, with this many seconds of the tick left unused.
    Done(f32),
}

//=== Track ===============================================================

/// Mutable playback state of one action on one node.
enum Track<K> {
    MoveBy {
        delta: Vec2,
        duration: f32,
        elapsed: f32,
    },
    MoveTo {
        target: (Option<f32>, Option<f32>),
        duration: f32,
        elapsed: f32,
        origin: Option<Vec2>,
    },
    Wait {
        duration: f32,
        elapsed: f32,
    },
    FadeOut {
        duration: f32,
        elapsed: f32,
        origin: Option<f32>,
    },
    Run(Cue<K>),
    Remove,
    Sequence {
        pending: VecDeque<Action<K>>,
        current: Option<Box<Track<K>>>,
    },
    Group(Vec<Option<Track<K>>>),
    Repeat {
        template: Action<K>,
        current: Box<Track<K>>,
    },
}

impl<K: Copy> Track<K> {
    //--- Construction -----------------------------------------------------

    fn new(action: Action<K>) -> Self {
        match action {
            Action::MoveBy { delta, duration } => Self::MoveBy {
                delta,
                duration,
                elapsed: 0.0,
            },
            Action::MoveTo { x, y, duration } => Self::MoveTo {
                target: (x, y),
                duration,
                elapsed: 0.0,
                origin: None,
            },
            Action::Wait { duration } => Self::Wait {
                duration,
                elapsed: 0.0,
            },
            Action::FadeOut { duration } => Self::FadeOut {
                duration,
                elapsed: 0.0,
                origin: None,
            },
            Action::Run(cue) => Self::Run(cue),
            Action::RemoveFromParent => Self::Remove,
            Action::Sequence(steps) => Self::Sequence {
                pending: steps.into(),
                current: None,
            },
            Action::Group(steps) => {
                Self::Group(steps.into_iter().map(|s| Some(Self::new(s))).collect())
            }
            Action::RepeatForever(inner) => Self::Repeat {
                current: Box::new(Self::new((*inner).clone())),
                template: *inner,
            },
        }
    }

    //--- Playback ---------------------------------------------------------

    fn step(
        &mut self,
        node: NodeId,
        stage: &mut Stage,
        dt: f32,
        cues: &mut Vec<Cue<K>>,
    ) -> Progress {
        match self {
            Self::MoveBy { delta, duration, elapsed } => {
                let (from, to, progress) = tick_clock(elapsed, *duration, dt);
                if let Some(node) = stage.get_mut(node) {
                    node.position += *delta * (to - from);
                }
                progress
            }

            Self::MoveTo { target, duration, elapsed, origin } => {
                let Some(node) = stage.get_mut(node) else {
                    return Progress::Done(dt);
                };
                let start = *origin.get_or_insert(node.position);
                let (_, to, progress) = tick_clock(elapsed, *duration, dt);

                if let Some(x) = target.0 {
                    node.position.x = start.x + (x - start.x) * to;
                }
                if let Some(y) = target.1 {
                    node.position.y = start.y + (y - start.y) * to;
                }
                progress
            }

            Self::Wait { duration, elapsed } => tick_clock(elapsed, *duration, dt).2,

            Self::FadeOut { duration, elapsed, origin } => {
                let Some(node) = stage.get_mut(node) else {
                    return Progress::Done(dt);
                };
                let start = *origin.get_or_insert(node.alpha);
                let (_, to, progress) = tick_clock(elapsed, *duration, dt);
                node.alpha = start * (1.0 - to);
                progress
            }

            Self::Run(cue) => {
                cues.push(*cue);
                Progress::Done(dt)
            }

            Self::Remove => {
                stage.remove(node);
                Progress::Done(dt)
            }

            Self::Sequence { pending, current } => {
                let mut dt = dt;
                loop {
                    if current.is_none() {
                        let Some(next) = pending.pop_front() else {
                            return Progress::Done(dt);
                        };
                        *current = Some(Box::new(Self::new(next)));
                    }

                    let progress = match current.as_mut() {
                        Some(track) => track.step(node, stage, dt, cues),
                        None => return Progress::Done(dt),
                    };

                    match progress {
                        Progress::Running => return Progress::Running,
                        Progress::Done(left) => {
                            *current = None;
                            dt = left;
                        }
                    }
                }
            }

            Self::Group(tracks) => {
                let mut leftover = dt;
                for slot in tracks.iter_mut() {
                    let Some(track) = slot else { continue };
                    if let Progress::Done(left) = track.step(node, stage, dt, cues) {
                        leftover = leftover.min(left);
                        *slot = None;
                    }
                }

                if tracks.iter().all(Option::is_none) {
                    Progress::Done(leftover)
                } else {
                    Progress::Running
                }
            }

            Self::Repeat { template, current } => {
                let mut dt = dt;
                loop {
                    match current.step(node, stage, dt, cues) {
                        Progress::Running => return Progress::Running,
                        Progress::Done(left) => {
                            **current = Self::new(template.clone());
                            // A body that consumed no time would spin forever.
                            if left <= 0.0 || left >= dt {
                                return Progress::Running;
                            }
                            dt = left;
                        }
                    }
                }
            }
        }
    }
}

//--- Clock Helper --------------------------------------------------------

/// Advances a timed step. Returns the completed fraction before and
/// after the tick, plus the resulting progress.
fn tick_clock(elapsed: &mut f32, duration: f32, dt: f32) -> (f32, f32, Progress) {
    let fraction = |t: f32| if duration <= 0.0 { 1.0 } else { (t / duration).min(1.0) };

    let from = fraction(*elapsed);
    *elapsed += dt;
    let to = fraction(*elapsed);

    let progress = if *elapsed >= duration {
        Progress::Done(*elapsed - duration.max(0.0))
    } else {
        Progress::Running
    };

    (from, to, progress)
}

//=== Animator ============================================================

/// Runs actions on stage nodes, one independent timeline per `run` call.
///
/// The animator is owned next to the stage it animates. Dropping it
/// discards every in-flight timeline without firing pending cues.
pub struct Animator<K> {
    tracks: Vec<(NodeId, Track<K>)>,
}

impl<K: Copy> Animator<K> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    //--- Scheduling -------------------------------------------------------

    /// Starts a new timeline for `node`. Playback begins on the next
    /// `advance` call.
    pub fn run(&mut self, node: NodeId, action: Action<K>) {
        self.tracks.push((node, Track::new(action)));
    }

    //--- Playback ---------------------------------------------------------

    /// Advances all timelines by `dt` and returns the cues they fired,
    /// in scheduling order.
    pub fn advance(&mut self, stage: &mut Stage, dt: Duration) -> Vec<Cue<K>> {
        let dt = dt.as_secs_f32();
        let mut cues = Vec::new();

        self.tracks.retain_mut(|(node, track)| {
            if !stage.contains(*node) {
                trace!("Dropping timeline of detached node {:?}", node);
                return false;
            }

            let progress = track.step(*node, stage, dt, &mut cues);
            progress == Progress::Running && stage.contains(*node)
        });

        cues
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_idle(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of live timelines.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }
}

impl<K: Copy> Default for Animator<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
