//! Valve status and the head-driven transition rules.
//!
//! Pressure reducing kinds (PRV, DPRV) compare against the downstream head;
//! the sustaining kind (PSV) mirrors the rules on the upstream side. A small
//! band around zero flow keeps near-zero flows from toggling OPEN/CLOSED.

use std::fmt;

/// Operating status of a valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValveStatus {
    /// Regulating: the kind-specific law applies.
    Active,
    Open,
    Closed,
    /// Closed by the solver for this instant (e.g. draining an empty tank).
    TempClosed,
}

impl ValveStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ValveStatus::Active => "ACTIVE",
            ValveStatus::Open => "OPEN",
            ValveStatus::Closed => "CLOSED",
            ValveStatus::TempClosed => "TEMP_CLOSED",
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, ValveStatus::Closed | ValveStatus::TempClosed)
    }
}

impl fmt::Display for ValveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Next status of a reducing valve with head-set point `hset`.
pub fn reducing_transition(
    status: ValveStatus,
    q: f64,
    h1: f64,
    h2: f64,
    hset: f64,
    zero_flow: f64,
) -> ValveStatus {
    match status {
        ValveStatus::Active => {
            if q < -zero_flow {
                ValveStatus::Closed
            } else if h1 < hset {
                ValveStatus::Open
            } else {
                status
            }
        }
        ValveStatus::Open => {
            if q < -zero_flow {
                ValveStatus::Closed
            } else if h2 > hset {
                ValveStatus::Active
            } else {
                status
            }
        }
        ValveStatus::Closed => {
            if h1 > hset && h2 < hset {
                ValveStatus::Active
            } else if h1 < hset && h1 > h2 {
                ValveStatus::Open
            } else {
                status
            }
        }
        ValveStatus::TempClosed => status,
    }
}

/// Next status of a sustaining valve with head-set point `hset`.
pub fn sustaining_transition(
    status: ValveStatus,
    q: f64,
    h1: f64,
    h2: f64,
    hset: f64,
    zero_flow: f64,
) -> ValveStatus {
    match status {
        ValveStatus::Active => {
            if q < -zero_flow {
                ValveStatus::Closed
            } else if h2 > hset {
                ValveStatus::Open
            } else {
                status
            }
        }
        ValveStatus::Open => {
            if q < -zero_flow {
                ValveStatus::Closed
            } else if h1 < hset {
                ValveStatus::Active
            } else {
                status
            }
        }
        ValveStatus::Closed => {
            if h2 < hset && h1 > hset {
                ValveStatus::Active
            } else if h2 > hset && h1 > h2 {
                ValveStatus::Open
            } else {
                status
            }
        }
        ValveStatus::TempClosed => status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ValveStatus::*;

    const ZF: f64 = 1e-6;

    #[test]
    fn reducing_table() {
        let hset = 100.0;
        // reverse flow closes regardless of heads
        assert_eq!(reducing_transition(Active, -1.0, 500.0, 50.0, hset, ZF), Closed);
        assert_eq!(reducing_transition(Open, -1.0, 500.0, 50.0, hset, ZF), Closed);
        // tolerance band
        assert_eq!(reducing_transition(Active, -1e-7, 150.0, 90.0, hset, ZF), Active);
        assert_eq!(reducing_transition(Active, 1.0, 90.0, 80.0, hset, ZF), Open);
        assert_eq!(reducing_transition(Open, 1.0, 150.0, 120.0, hset, ZF), Active);
        assert_eq!(reducing_transition(Open, 1.0, 150.0, 90.0, hset, ZF), Open);
        assert_eq!(reducing_transition(Closed, 0.0, 150.0, 90.0, hset, ZF), Active);
        assert_eq!(reducing_transition(Closed, 0.0, 95.0, 90.0, hset, ZF), Open);
        assert_eq!(reducing_transition(Closed, 0.0, 80.0, 90.0, hset, ZF), Closed);
    }

    #[test]
    fn sustaining_table() {
        let hset = 100.0;
        assert_eq!(sustaining_transition(Active, -1.0, 150.0, 90.0, hset, ZF), Closed);
        assert_eq!(sustaining_transition(Active, 1.0, 150.0, 120.0, hset, ZF), Open);
        assert_eq!(sustaining_transition(Open, 1.0, 90.0, 80.0, hset, ZF), Active);
        assert_eq!(sustaining_transition(Closed, 0.0, 150.0, 90.0, hset, ZF), Active);
        assert_eq!(sustaining_transition(Closed, 0.0, 150.0, 120.0, hset, ZF), Open);
        assert_eq!(sustaining_transition(Closed, 0.0, 110.0, 120.0, hset, ZF), Closed);
    }

    #[test]
    fn temp_closed_is_sticky() {
        assert_eq!(reducing_transition(TempClosed, 5.0, 500.0, 0.0, 1.0, ZF), TempClosed);
    }
}
