use slotgrid_core::RandomSource;
use std::collections::VecDeque;

/// Random source that replays a fixed sequence of draws.
///
/// Each draw is reduced modulo the requested bound. Once the script runs out every
/// draw returns 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<usize>,
}

impl ScriptedRandom {
    /// Replay `values` in order.
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, upper: usize) -> usize {
        self.values.pop_front().unwrap_or(0) % upper
    }
}
