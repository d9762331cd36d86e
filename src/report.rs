//! Non-interactive batch mode
//!
//! Applies a list of writes to a fresh session and summarizes the resulting
//! heap as JSON, for scripts and web front-ends that want the state without
//! driving the menu.

use crate::error::AppError;
use crate::memory::{HeapState, WriteReport};
use crate::session::{Phase, Session};
use serde::Serialize;

/// Summary of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub state: HeapState,
    pub guard_intact: bool,
    pub phase: Phase,
    pub writes: Vec<WriteReport>,
}

/// Apply each value in order, then check the guard once
pub fn run_batch<S: AsRef<str>>(session: &mut Session, values: &[S]) -> BatchReport {
    let writes = values
        .iter()
        .map(|value| session.write(value.as_ref().as_bytes()))
        .collect();
    let guard_intact = session.check();

    BatchReport {
        state: session.heap().describe_state(),
        guard_intact,
        phase: session.phase(),
        writes,
    }
}

impl BatchReport {
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::HeapModel;

    #[test]
    fn test_batch_without_writes() {
        let mut session = Session::new(HeapModel::reference().unwrap());
        let report = run_batch::<&str>(&mut session, &[]);
        assert!(report.guard_intact);
        assert_eq!(report.phase, Phase::Intact);
        assert!(report.writes.is_empty());
    }

    #[test]
    fn test_batch_json_shape() {
        let mut session = Session::new(HeapModel::reference().unwrap());
        let report = run_batch(&mut session, &["AAAAAAAAAAAAAAAAAAAA"]);
        assert!(!report.guard_intact);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["phase"], "exploited");
        assert_eq!(json["guard_intact"], false);
        assert_eq!(json["writes"][0]["spilled"], 13);
        assert_eq!(json["state"]["regions"][0]["name"], "Buffer1");
        assert_eq!(json["state"]["regions"][1]["address"], 0x1000_0008u64);
    }
}
