use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

thread_local! {
    static STATE: RefCell<CastMetricsState> = RefCell::new(CastMetricsState::default());
}

///
/// CastMetricsState
/// Ephemeral, in-memory counters for casts and registrations.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct CastMetricsState {
    pub ops: CastCounters,
    pub fields: BTreeMap<String, FieldCounters>,
}

///
/// CastCounters
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct CastCounters {
    pub registrations: u64,

    // Successful casts
    pub casts_out: u64,
    pub casts_in: u64,
    pub nulls_out: u64,
    pub nulls_in: u64,

    // Rejections
    pub unknown_members: u64,
    pub unknown_enum_types: u64,
    pub not_nullable: u64,
    pub type_mismatches: u64,
    pub delimiter_in_key: u64,
}

///
/// FieldCounters
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct FieldCounters {
    pub casts_out: u64,
    pub casts_in: u64,
    pub rejections: u64,
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut CastMetricsState) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

/// Copy of the current thread's counters.
#[must_use]
pub fn metrics_snapshot() -> CastMetricsState {
    STATE.with(|state| state.borrow().clone())
}

/// Reset the current thread's counters.
pub fn metrics_reset() {
    with_state_mut(|state| *state = CastMetricsState::default());
}
