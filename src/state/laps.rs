//! Lap bookkeeping

use serde::{Deserialize, Serialize};

/// One recorded lap split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lap {
    /// 1-based, sequential
    pub index: u32,
    pub duration_ms: u64,
}

/// Ordered lap list plus the next index to hand out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LapRecorder {
    laps: Vec<Lap>,
    next_index: u32,
}

impl LapRecorder {
    pub fn new() -> Self {
        Self {
            laps: Vec::new(),
            next_index: 1,
        }
    }

    /// Rebuild from stored durations; indices are 1..=n and the next is n + 1
    pub fn from_durations(durations: &[u64]) -> Self {
        let laps: Vec<Lap> = durations
            .iter()
            .zip(1u32..)
            .map(|(&duration_ms, index)| Lap { index, duration_ms })
            .collect();
        let next_index = laps.last().map_or(1, |lap| lap.index.saturating_add(1));
        Self { laps, next_index }
    }

    /// Append a lap ending at `elapsed_ms` of total running time
    ///
    /// None once the index space is exhausted.
    pub fn record(&mut self, elapsed_ms: u64) -> Option<Lap> {
        let following = self.next_index.checked_add(1)?;
        let lap = Lap {
            index: self.next_index,
            duration_ms: elapsed_ms.saturating_sub(self.total_ms()),
        };
        self.laps.push(lap);
        self.next_index = following;
        Some(lap)
    }

    /// Sum of all recorded lap durations
    pub fn total_ms(&self) -> u64 {
        self.laps.iter().map(|lap| lap.duration_ms).sum()
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn durations(&self) -> Vec<u64> {
        self.laps.iter().map(|lap| lap.duration_ms).collect()
    }

    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for LapRecorder {
    fn default() -> Self {
        Self::new()
    }
}
