//! Checkpoint and resume for calculator sessions.
//!
//! A checkpoint captures the registers, the input phase and the tape so a
//! session can continue after the process exits. Checkpoints encode to
//! JSON for files people may read and to bincode for compact storage.

use crate::core::{is_operand_text, Phase, Registers, Tape};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a calculator session.
/// Does NOT include the display sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Operand registers at capture time
    pub registers: Registers,

    /// Input phase at capture time
    pub phase: Phase,

    /// Calculation tape at capture time
    pub tape: Tape,
}

impl Checkpoint {
    pub(crate) fn capture(registers: &Registers, phase: Phase, tape: &Tape) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            registers: registers.clone(),
            phase,
            tape: tape.clone(),
        }
    }

    /// Check that the checkpoint can be resumed by this version.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let pending = self.registers.pending();
        if self.registers.current_operand().is_empty() && pending.is_none() {
            return Err(CheckpointError::ValidationFailed(
                "current operand is empty with no pending operation".to_string(),
            ));
        }
        if pending.is_some_and(|p| p.operand.is_empty()) {
            return Err(CheckpointError::ValidationFailed(
                "pending operation has an empty left operand".to_string(),
            ));
        }
        let current = self.registers.current_operand();
        if !current.is_empty() && !is_operand_text(current) {
            return Err(CheckpointError::ValidationFailed(format!(
                "current operand {current:?} is not a numeral"
            )));
        }
        if let Some(p) = pending.filter(|p| !is_operand_text(&p.operand)) {
            return Err(CheckpointError::ValidationFailed(format!(
                "pending operand {:?} is not a numeral",
                p.operand
            )));
        }
        if self.phase == Phase::OperatorPending && pending.is_none() {
            return Err(CheckpointError::ValidationFailed(
                "phase is OperatorPending but no operation is pending".to_string(),
            ));
        }
        Ok(())
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Encode as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;
    use crate::machine::{Calculator, RecordingSink};

    fn session() -> Calculator<RecordingSink> {
        let mut calc = Calculator::new(RecordingSink::new());
        for key in ['1', '2'] {
            calc.append(key);
        }
        calc.set_operator(Operator::Divide);
        calc.append('4');
        calc.compute();
        calc.set_operator(Operator::Add);
        calc
    }

    #[test]
    fn capture_records_current_version() {
        let checkpoint = session().checkpoint();
        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert!(Uuid::parse_str(&checkpoint.id).is_ok());
        assert_eq!(checkpoint.phase, Phase::OperatorPending);
        assert_eq!(checkpoint.registers.previous_operand(), "3");
        assert_eq!(checkpoint.tape.len(), 1);
    }

    #[test]
    fn checkpoint_ids_are_unique() {
        let calc = session();
        assert_ne!(calc.checkpoint().id, calc.checkpoint().id);
    }

    #[test]
    fn json_round_trip_preserves_session() {
        let checkpoint = session().checkpoint();
        let json = checkpoint.to_json().unwrap();
        assert!(json.contains("\"operator\": \"+\""));

        let restored = Checkpoint::from_json(&json).unwrap();
        assert_eq!(restored, checkpoint);
    }

    #[test]
    fn binary_round_trip_preserves_session() {
        let checkpoint = session().checkpoint();
        let bytes = checkpoint.to_bytes().unwrap();
        let restored = Checkpoint::from_bytes(&bytes).unwrap();
        assert_eq!(restored, checkpoint);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut checkpoint = session().checkpoint();
        checkpoint.version = CHECKPOINT_VERSION + 1;
        let json = checkpoint.to_json().unwrap();

        let result = Checkpoint::from_json(&json);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { supported: 1, .. })
        ));
    }

    #[test]
    fn rejects_empty_operand_without_pending() {
        let json = r#"{
            "version": 1,
            "id": "test",
            "timestamp": "2024-01-01T00:00:00Z",
            "registers": { "current": "", "pending": null },
            "phase": "Idle",
            "tape": { "entries": [], "limit": 10 }
        }"#;

        let result = Checkpoint::from_json(json);
        assert!(matches!(result, Err(CheckpointError::ValidationFailed(_))));
    }

    #[test]
    fn rejects_operator_phase_without_pending() {
        let json = r#"{
            "version": 1,
            "id": "test",
            "timestamp": "2024-01-01T00:00:00Z",
            "registers": { "current": "5", "pending": null },
            "phase": "OperatorPending",
            "tape": { "entries": [], "limit": 10 }
        }"#;

        let result = Checkpoint::from_json(json);
        assert!(matches!(result, Err(CheckpointError::ValidationFailed(_))));
    }

    fn with_current(current: &str) -> String {
        format!(
            r#"{{
            "version": 1,
            "id": "test",
            "timestamp": "2024-01-01T00:00:00Z",
            "registers": {{ "current": {current:?}, "pending": null }},
            "phase": "Accumulating",
            "tape": {{ "entries": [], "limit": 10 }}
        }}"#
        )
    }

    #[test]
    fn rejects_current_operand_that_is_not_a_numeral() {
        for current in ["abc", "1.2.3"] {
            let result = Checkpoint::from_json(&with_current(current));
            assert!(
                matches!(result, Err(CheckpointError::ValidationFailed(_))),
                "{current:?} was accepted"
            );
        }
    }

    #[test]
    fn accepts_partial_numerals_and_error() {
        for current in ["12.", "-", "Error"] {
            assert!(Checkpoint::from_json(&with_current(current)).is_ok());
        }
    }

    #[test]
    fn accepts_error_as_pending_operand() {
        let mut calc = Calculator::new(RecordingSink::new());
        for key in ['9', '/', '0'] {
            match key {
                '/' => calc.set_operator(Operator::Divide),
                digit => calc.append(digit),
            };
        }
        calc.set_operator(Operator::Add);
        assert_eq!(calc.previous_operand(), "Error");

        let json = calc.checkpoint().to_json().unwrap();
        assert!(Checkpoint::from_json(&json).is_ok());
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = Checkpoint::from_json("{ not json");
        assert!(matches!(result, Err(CheckpointError::Json(_))));
    }

    #[test]
    fn truncated_bytes_are_reported() {
        let bytes = session().checkpoint().to_bytes().unwrap();
        let result = Checkpoint::from_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(CheckpointError::Binary(_))));
    }
}
