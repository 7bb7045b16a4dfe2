//=========================================================================
// Input Buffer
//
// Collects taps between two frame boundaries. Acts as a transient
// event aggregator between the Platform and the core thread.
//
// Responsibilities:
// - Store taps in arrival order for the current frame
// - Hand the whole frame over via `drain()`
//
// Notes:
// Taps are never deduplicated: two quick taps on the advance control
// are two advances.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::InputEvent;

//=== InputBuffer Struct ==================================================

pub struct InputBuffer {
    taps: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates so typical frames never reallocate.
    //
    pub fn new() -> Self {
        const TAP_BASE: usize = 16;

        Self {
            taps: Vec::with_capacity(TAP_BASE),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.taps.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns this frame's taps and clears the buffer. `None` when nothing
    // was collected, so empty frames are never sent.
    //
    pub fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.taps.is_empty() {
            return None;
        }
        Some(self.taps.drain(..).collect())
    }

    //--- Utilities --------------------------------------------------------
    pub fn clear(&mut self) {
        self.taps.clear();
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(x: f32, y: f32) -> InputEvent {
        InputEvent::Tap { x, y }
    }

    #[test]
    fn test_repeated_taps_are_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push(tap(1.0, 1.0));
        buffer.push(tap(1.0, 1.0));
        assert_eq!(buffer.len(), 2, "Repeated taps are separate advances");
    }

    #[test]
    fn test_drain_keeps_order_and_clears() {
        let mut buffer = InputBuffer::new();
        buffer.push(tap(1.0, 1.0));
        buffer.push(tap(2.0, 2.0));

        let events = buffer.drain();
        assert_eq!(events, Some(vec![tap(1.0, 1.0), tap(2.0, 2.0)]));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_empty_drain_is_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());
    }

    //--- Memory Retention -------------------------------------------------
    //
    // Ensures that draining does not deallocate underlying storage,
    // preserving buffer capacity for reuse across frames.
    //
    #[test]
    fn test_drain_does_not_deallocate() {
        let mut buffer = InputBuffer::new();
        for i in 0..64 {
            buffer.push(tap(i as f32, i as f32));
        }
        let cap_before = buffer.taps.capacity();

        buffer.drain();
        buffer.clear();

        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.taps.capacity(), cap_before);
    }
}
