//! Scripted RNG used to force specific branches in unit tests.
use rand::RngCore;
use std::collections::VecDeque;

/// Replays queued outputs, then yields zeros.
///
/// `f64` rolls and `usize` ranges consume the `u64` queue; `i32`/`u32`
/// ranges consume the `u32` queue. A zero `u64` rolls `0.0` and a zero `u32`
/// picks the low end of any range.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedRng {
    u64s: VecDeque<u64>,
    u32s: VecDeque<u32>,
}

impl ScriptedRng {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_u64s(mut self, values: impl IntoIterator<Item = u64>) -> Self {
        self.u64s.extend(values);
        self
    }

    pub(crate) fn with_u32s(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.u32s.extend(values);
        self
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.u32s.pop_front().unwrap_or(0)
    }

    fn next_u64(&mut self) -> u64 {
        self.u64s.pop_front().unwrap_or(0)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
