//! Actuator-position time series.

use std::io::Write;

use pf_core::format_clock;

use crate::error::SimResult;
use crate::regulation::RegulationSample;

/// Writes one `H:MM:SS <position>` line per DPRV per step.
pub struct PositionWriter<W: Write> {
    out: W,
}

impl<W: Write> PositionWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_sample(&mut self, sample: &RegulationSample) -> SimResult<()> {
        writeln!(self.out, "{} {}", format_clock(sample.time_s), sample.position)?;
        Ok(())
    }

    pub fn flush(&mut self) -> SimResult<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
