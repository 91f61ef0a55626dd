//! Single-slot owner of the active engine instance

use crate::audio::AudioEngine;

/// Holds at most one engine. Putting a new engine in always releases the
/// previous one first: subscriptions removed, playback stopped, instance
/// dropped, in that order.
pub(crate) struct EngineSlot<E: AudioEngine> {
    engine: Option<E>,
}

impl<E: AudioEngine> EngineSlot<E> {
    pub fn empty() -> Self {
        Self { engine: None }
    }

    pub fn replace(&mut self, engine: E) {
        self.release();
        self.engine = Some(engine);
    }

    /// Release the current engine, if any. Returns whether one was held.
    pub fn release(&mut self) -> bool {
        match self.engine.take() {
            Some(mut engine) => {
                engine.unsubscribe();
                engine.stop();
                drop(engine);
                true
            }
            None => false,
        }
    }

    pub fn get(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.is_none()
    }
}

impl<E: AudioEngine> Drop for EngineSlot<E> {
    fn drop(&mut self) {
        self.release();
    }
}
