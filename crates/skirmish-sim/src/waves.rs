//! Wave scheduler: timed progression through a scripted table of batches.
//!
//! `Idle → Running → Over`. Starting releases wave 0 and arms the interval
//! timer; each timer period steps the index. Stepping past the end of the
//! table completes the campaign and stops the timer.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use skirmish_core::enums::{Edge, MobKind, SchedulerState};
use skirmish_core::error::ConfigError;

use crate::clock::RepeatingTimer;

/// A group of identical mobs released together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub kind: MobKind,
    #[serde(default)]
    pub appearance: String,
    pub count: u32,
}

impl Batch {
    pub fn new(kind: MobKind, appearance: &str, count: u32) -> Self {
        Self {
            kind,
            appearance: appearance.to_string(),
            count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveDef {
    pub batches: Vec<Batch>,
}

/// Ordered, static sequence of waves. Fixed once a session is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveTable {
    waves: Vec<WaveDef>,
}

impl WaveTable {
    pub fn new(waves: Vec<WaveDef>) -> Result<Self, ConfigError> {
        if waves.is_empty() {
            return Err(ConfigError::EmptyWaveTable);
        }
        Ok(Self { waves })
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WaveDef> {
        self.waves.get(index)
    }

    /// Escalating six-wave horde script.
    pub fn default_horde() -> Self {
        use MobKind::*;
        let wave = |batches: Vec<Batch>| WaveDef { batches };
        Self {
            waves: vec![
                wave(vec![Batch::new(Grunt, "green", 10)]),
                wave(vec![Batch::new(Grunt, "green", 12), Batch::new(Runner, "red", 6)]),
                wave(vec![Batch::new(Swarmer, "bat", 30), Batch::new(Grunt, "green", 10)]),
                wave(vec![Batch::new(Brute, "ogre", 4), Batch::new(Runner, "red", 12)]),
                wave(vec![
                    Batch::new(Swarmer, "bat", 40),
                    Batch::new(Brute, "ogre", 6),
                    Batch::new(Grunt, "blue", 20),
                ]),
                wave(vec![Batch::new(Brute, "ogre", 12), Batch::new(Runner, "red", 30)]),
            ],
        }
    }

    /// Five-wave defense script.
    pub fn default_defense() -> Self {
        use MobKind::*;
        let wave = |batches: Vec<Batch>| WaveDef { batches };
        Self {
            waves: vec![
                wave(vec![Batch::new(Grunt, "green", 6)]),
                wave(vec![Batch::new(Grunt, "green", 8), Batch::new(Runner, "red", 4)]),
                wave(vec![Batch::new(Swarmer, "bat", 14), Batch::new(Grunt, "blue", 6)]),
                wave(vec![Batch::new(Brute, "ogre", 3), Batch::new(Runner, "red", 8)]),
                wave(vec![Batch::new(Brute, "ogre", 6), Batch::new(Swarmer, "bat", 20)]),
            ],
        }
    }
}

/// One mob the session should spawn, with the edge zone it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSpawn {
    pub kind: MobKind,
    pub appearance: String,
    pub edge: Edge,
}

/// Everything released by one wave.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePlan {
    pub index: usize,
    pub edge: Edge,
    pub spawns: Vec<PlannedSpawn>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WaveTick {
    Spawn(WavePlan),
    /// The table is exhausted. Emitted exactly once.
    Complete,
}

/// Split each batch across edges: the first 10% at `edge+1`, the next 10% at
/// `edge+2`, the next 30% at `edge+3`, the remaining half at `edge`.
pub fn distribute(wave: &WaveDef, edge: Edge) -> Vec<PlannedSpawn> {
    let mut spawns = Vec::new();
    for batch in &wave.batches {
        let n = batch.count as usize;
        for i in 0..n {
            let zone = if i * 10 < n {
                edge.offset(1)
            } else if i * 10 < 2 * n {
                edge.offset(2)
            } else if i * 10 < 5 * n {
                edge.offset(3)
            } else {
                edge
            };
            spawns.push(PlannedSpawn {
                kind: batch.kind,
                appearance: batch.appearance.clone(),
                edge: zone,
            });
        }
    }
    spawns
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    table: WaveTable,
    state: SchedulerState,
    index: usize,
    timer: RepeatingTimer,
}

impl WaveScheduler {
    pub fn new(table: WaveTable, interval: f32) -> Self {
        Self {
            table,
            state: SchedulerState::Idle,
            index: 0,
            timer: RepeatingTimer::new(interval),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Index of the most recently released wave (or the table length once over).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn wave_count(&self) -> usize {
        self.table.len()
    }

    /// `Idle → Running`: release wave 0 and arm the interval timer.
    /// Does nothing unless idle.
    pub fn start(&mut self, rng: &mut ChaCha8Rng) -> Option<WaveTick> {
        if self.state != SchedulerState::Idle {
            return None;
        }
        self.state = SchedulerState::Running;
        self.index = 0;
        self.timer.arm();
        info!(waves = self.table.len(), "wave scheduler started");
        Some(self.release(rng))
    }

    /// Feed frame time; returns one tick per elapsed interval.
    pub fn advance(&mut self, dt: f32, rng: &mut ChaCha8Rng) -> Vec<WaveTick> {
        let mut ticks = Vec::new();
        if self.state != SchedulerState::Running {
            return ticks;
        }
        for _ in 0..self.timer.tick(dt) {
            ticks.push(self.step(rng));
            if self.state == SchedulerState::Over {
                break;
            }
        }
        ticks
    }

    /// Move to the next wave immediately.
    pub fn step(&mut self, rng: &mut ChaCha8Rng) -> WaveTick {
        if self.state == SchedulerState::Over {
            return WaveTick::Complete;
        }
        self.index += 1;
        if self.index >= self.table.len() {
            self.state = SchedulerState::Over;
            self.timer.disarm();
            info!(waves = self.table.len(), "wave table exhausted");
            return WaveTick::Complete;
        }
        self.release(rng)
    }

    /// Cancel the timer and rewind to the start of the table. Idempotent.
    pub fn stop(&mut self) {
        self.timer.disarm();
        self.index = 0;
        self.state = SchedulerState::Idle;
    }

    fn release(&mut self, rng: &mut ChaCha8Rng) -> WaveTick {
        let edge = Edge::from_index(rng.gen_range(0..4));
        let spawns = self
            .table
            .get(self.index)
            .map(|wave| distribute(wave, edge))
            .unwrap_or_default();
        info!(wave = self.index, spawns = spawns.len(), ?edge, "wave released");
        WaveTick::Spawn(WavePlan {
            index: self.index,
            edge,
            spawns,
        })
    }
}
