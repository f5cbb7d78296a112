//! Optional per-step instrumentation for the round pipeline.

use core::fmt;

use crate::block::Block;

/// A single transform applied to the state during encryption or decryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// XOR with a round key.
    AddRoundKey,
    /// Forward S-box substitution.
    SubBytes,
    /// Forward row rotation.
    ShiftRows,
    /// Forward column mixing.
    MixColumns,
    /// Inverse S-box substitution.
    InvSubBytes,
    /// Inverse row rotation.
    InvShiftRows,
    /// Inverse column mixing.
    InvMixColumns,
}

impl Step {
    /// Conventional name of the transform.
    pub const fn name(self) -> &'static str {
        match self {
            Step::AddRoundKey => "AddRoundKey",
            Step::SubBytes => "SubBytes",
            Step::ShiftRows => "ShiftRows",
            Step::MixColumns => "MixColumns",
            Step::InvSubBytes => "InvSubBytes",
            Step::InvShiftRows => "InvShiftRows",
            Step::InvMixColumns => "InvMixColumns",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives a snapshot of the state after every step of a block operation.
///
/// `round` is the index of the round key that step belongs to (0..=10).
pub trait RoundObserver {
    /// Called once per transform, in execution order.
    fn observe(&mut self, round: usize, step: Step, state: Block);
}

/// Observer that ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl RoundObserver for NoTrace {
    #[inline(always)]
    fn observe(&mut self, _round: usize, _step: Step, _state: Block) {}
}

impl<F> RoundObserver for F
where
    F: FnMut(usize, Step, Block),
{
    fn observe(&mut self, round: usize, step: Step, state: Block) {
        self(round, step, state)
    }
}

/// Observer that records every step, mostly useful in tests and tooling.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// Recorded `(round, step, state)` entries in execution order.
    pub steps: Vec<(usize, Step, Block)>,
}

impl RoundObserver for Recorder {
    fn observe(&mut self, round: usize, step: Step, state: Block) {
        self.steps.push((round, step, state));
    }
}
