//=========================================================================
// Message Bus
//=========================================================================
//
// Typed, single-threaded mailbox between scenes and the scene manager.
//
// Architecture:
//   Scene tap / cue ──> push<M>() ──> HashMap<TypeId, Box<dyn Queue>>
//                                              ↓
//   SceneManager ─────> drain<M>() at the hand-off point
//
// Scenes never call back into the manager directly. They leave a
// message here and the manager acts on it once the scene call returns,
// which keeps the manager out of the scene's borrow.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::{Any, TypeId};
use std::collections::HashMap;

//=== Message Trait =======================================================

/// Marker trait for types that can travel through the [`MessageBus`].
///
/// Automatically implemented for all types that are Send + 'static.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== Type-Erased Queue ===================================================

/// Object-safe view of a `Vec<M>` so queues of different message types
/// can share one map.
trait Queue: Send {
    fn len(&self) -> usize;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> Queue for Vec<M> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== MessageBus ==========================================================

/// One FIFO queue per message type.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn Queue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Message Operations -----------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        self.queue_mut::<M>().push(msg);
    }

    /// Takes every queued message of type `M`, oldest first.
    ///
    /// The queue keeps its allocation for the next round.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        match self
            .queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
        {
            Some(queue) => queue.drain(..).collect(),
            None => Vec::new(),
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.queues
            .get(&TypeId::of::<M>())
            .is_some_and(|q| q.len() > 0)
    }

    //--- Internal Helpers -------------------------------------------------

    fn queue_mut<M: Message>(&mut self) -> &mut Vec<M> {
        self.queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<M>>()
            .expect("MessageBus queue stored under a foreign TypeId")
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Clone, Copy)]
    struct Request {
        target: u8,
        generation: u64,
    }

    #[derive(Debug, PartialEq, Clone)]
    struct Note(&'static str);

    #[test]
    fn new_bus_is_empty() {
        let mut bus = MessageBus::new();
        assert!(!bus.has_messages::<Request>());
        assert!(bus.drain::<Request>().is_empty());
    }

    #[test]
    fn drain_returns_messages_in_push_order() {
        let mut bus = MessageBus::new();
        bus.push(Request { target: 1, generation: 0 });
        bus.push(Request { target: 2, generation: 0 });
        assert!(bus.has_messages::<Request>());

        let drained = bus.drain::<Request>();
        assert_eq!(drained.iter().map(|r| r.target).collect::<Vec<_>>(), vec![1, 2]);
        assert!(!bus.has_messages::<Request>());
        assert!(bus.drain::<Request>().is_empty());
    }

    #[test]
    fn queues_are_separated_by_type() {
        let mut bus = MessageBus::new();
        bus.push(Request { target: 3, generation: 1 });
        bus.push(Note("rail"));
        bus.push(Note("wrap"));

        assert_eq!(bus.drain::<Note>(), vec![Note("rail"), Note("wrap")]);
        assert!(!bus.has_messages::<Note>());
        assert!(bus.has_messages::<Request>());
        assert_eq!(bus.drain::<Request>(), vec![Request { target: 3, generation: 1 }]);
    }
}
