use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ok,
    Invalid,
    Failed,
}

/// One processed row of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderOutcome {
    pub row: usize,
    pub status: OutcomeStatus,
    pub confirmation_id: String,
    pub message: String,
}

/// Writes `row,status,confirmation_id,message` records.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcome(&mut self, outcome: &OrderOutcome) -> Result<()> {
        self.writer.serialize(outcome)?;
        Ok(())
    }

    pub fn write_outcomes(
        &mut self,
        outcomes: impl IntoIterator<Item = OrderOutcome>,
    ) -> Result<()> {
        for outcome in outcomes {
            self.write_outcome(&outcome)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
