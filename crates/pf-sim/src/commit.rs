//! Step commit.

use pf_valves::Valve;

/// Latch each DPRV's position and error as the base for the next step.
///
/// Called once per converged instant. Calling it again without an
/// intervening controller update changes nothing.
pub fn commit_step(valves: &mut [Valve]) {
    for state in valves.iter_mut().filter_map(Valve::dprv_mut) {
        state.control.commit();
    }
}
