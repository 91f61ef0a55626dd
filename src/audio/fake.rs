//! Recording engine used by the player and app controller tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::error::EngineError;
use super::{AudioEngine, EngineEvents, EngineFactory};

pub type Log = Arc<Mutex<Vec<String>>>;

pub struct FakeEngine {
    url: String,
    log: Log,
    position: f64,
    duration: f64,
    fail_play: bool,
}

impl FakeEngine {
    fn record(&self, what: &str) {
        self.log.lock().unwrap().push(format!("{what}:{}", self.url));
    }
}

impl AudioEngine for FakeEngine {
    fn play(&mut self) -> Result<(), EngineError> {
        self.record("play");
        if self.fail_play {
            return Err(EngineError::Play("device busy".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.record("pause");
    }

    fn stop(&mut self) {
        self.record("stop");
    }

    fn seek(&mut self, seconds: f64) {
        self.record(&format!("seek={seconds}"));
        self.position = seconds;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.record(&format!("volume={volume}"));
    }

    fn unsubscribe(&mut self) {
        self.record("unsubscribe");
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        self.record("drop");
    }
}

#[derive(Default)]
pub struct FakeFactory {
    pub log: Log,
    pub duration: f64,
    pub unloadable: HashSet<String>,
    pub fail_play: bool,
    pub events: Arc<Mutex<Vec<EngineEvents>>>,
}

impl EngineFactory for FakeFactory {
    type Engine = FakeEngine;

    fn create(&mut self, url: &str, volume: f32, events: EngineEvents) -> Result<FakeEngine, EngineError> {
        self.log.lock().unwrap().push(format!("create:{url}@{volume}"));
        if self.unloadable.contains(url) {
            return Err(EngineError::Load {
                url: url.to_string(),
                reason: "404".to_string(),
            });
        }
        self.events.lock().unwrap().push(events);
        Ok(FakeEngine {
            url: url.to_string(),
            log: self.log.clone(),
            position: 0.0,
            duration: self.duration,
            fail_play: self.fail_play,
        })
    }
}
