//! Ephemeral form state for writes.
//!
//! Intents live for a single submit cycle; nothing here is persisted.

use crate::error::{Error, Result};
use alloy_primitives::{U256, utils::parse_ether};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Input format for the create-market end time.
pub const END_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Lifecycle of an in-flight write.
///
/// Replaces a bare pending boolean so the UI can say which half of the
/// simulate-then-send flow it is waiting on. There is still no timeout;
/// a hung call leaves the phase in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxPhase {
    #[default]
    Idle,
    /// Dry-running the call.
    Simulating,
    /// Transaction signed and on its way to the mempool.
    Submitting,
    /// Submitted; hash received.
    Settled,
    /// Validation, simulation, or transport failure.
    Failed,
}

impl TxPhase {
    /// Whether a submission is in flight and resubmission is blocked.
    pub fn in_flight(&self) -> bool {
        matches!(self, Self::Simulating | Self::Submitting)
    }
}

/// Which create-market field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateField {
    #[default]
    Description,
    EndTime,
}

/// State of the create-market form.
#[derive(Debug, Clone)]
pub struct CreateMarketForm {
    /// Market question.
    pub description: String,
    /// Absolute end date/time, `YYYY-MM-DD HH:MM`, UTC.
    pub end_time_input: String,
    /// Focused field.
    pub focus: CreateField,
    /// Write lifecycle.
    pub phase: TxPhase,
    /// Inline error shown under the form.
    pub error: Option<String>,
}

impl CreateMarketForm {
    /// Open the form with the end time defaulted to a day from now.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            description: String::new(),
            end_time_input: (now + Duration::days(1)).format(END_TIME_FORMAT).to_string(),
            focus: CreateField::default(),
            phase: TxPhase::default(),
            error: None,
        }
    }

    /// Duration from `now` to the entered end time, in seconds.
    ///
    /// Non-future end times are rejected here, before any network call.
    pub fn duration_from(&self, now: DateTime<Utc>) -> Result<u64> {
        let naive = NaiveDateTime::parse_from_str(self.end_time_input.trim(), END_TIME_FORMAT)
            .map_err(|_| Error::validation("end time must be YYYY-MM-DD HH:MM"))?;
        let seconds = naive.and_utc().timestamp() - now.timestamp();
        if seconds <= 0 {
            return Err(Error::validation("end time must be in the future"));
        }
        Ok(seconds as u64)
    }

    /// Validate the whole form into a submit-ready intent.
    pub fn intent(&self, now: DateTime<Utc>) -> Result<CreateMarketIntent> {
        if self.description.trim().is_empty() {
            return Err(Error::validation("description must not be empty"));
        }
        Ok(CreateMarketIntent {
            description: self.description.trim().to_string(),
            duration_seconds: self.duration_from(now)?,
        })
    }

    /// Switch focus between fields.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            CreateField::Description => CreateField::EndTime,
            CreateField::EndTime => CreateField::Description,
        };
    }

    /// Type into the focused field.
    pub fn push_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.focus {
            CreateField::Description => self.description.push(c),
            CreateField::EndTime => self.end_time_input.push(c),
        }
    }

    /// Delete from the focused field.
    pub fn pop_char(&mut self) {
        match self.focus {
            CreateField::Description => {
                self.description.pop();
            }
            CreateField::EndTime => {
                self.end_time_input.pop();
            }
        }
    }
}

/// Validated create-market submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMarketIntent {
    pub description: String,
    pub duration_seconds: u64,
}

/// Per-card bet form state.
#[derive(Debug, Clone)]
pub struct BetForm {
    /// Decimal ETH amount as typed.
    pub amount_input: String,
    /// Write lifecycle.
    pub phase: TxPhase,
    /// Inline error shown on the card.
    pub error: Option<String>,
}

impl Default for BetForm {
    fn default() -> Self {
        Self {
            amount_input: "0.1".to_string(),
            phase: TxPhase::default(),
            error: None,
        }
    }
}

impl BetForm {
    /// Reset for a newly selected market, keeping the default amount.
    pub fn reset(&mut self, default_amount: &str) {
        self.amount_input = default_amount.to_string();
        self.phase = TxPhase::Idle;
        self.error = None;
    }

    /// Parse the typed amount into wei.
    pub fn amount_wei(&self) -> Result<U256> {
        let wei = parse_ether(self.amount_input.trim())
            .map_err(|_| Error::validation("invalid bet amount"))?;
        if wei.is_zero() {
            return Err(Error::validation("bet amount must be positive"));
        }
        Ok(wei)
    }

    /// Type into the amount input. Only decimal strings are accepted.
    pub fn push_char(&mut self, c: char) {
        let dot_ok = c == '.' && !self.amount_input.contains('.');
        if c.is_ascii_digit() || dot_ok {
            self.amount_input.push(c);
        }
    }

    /// Delete from the amount input.
    pub fn pop_char(&mut self) {
        self.amount_input.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(timestamp: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(timestamp, 0).expect("timestamp")
    }

    #[test]
    fn duration_is_end_minus_now() {
        let now = at(1_700_000_040);
        let mut form = CreateMarketForm::new(now);
        form.end_time_input = (now + Duration::hours(2)).format(END_TIME_FORMAT).to_string();
        assert_eq!(form.duration_from(now).expect("duration"), 7_200);
    }

    #[test]
    fn default_end_time_is_one_day_out() {
        let now = at(1_700_000_040);
        let form = CreateMarketForm::new(now);
        // Seconds are truncated by the input format
        assert_eq!(form.duration_from(now).expect("duration"), 86_400);
    }

    #[test]
    fn past_or_present_end_time_is_rejected() {
        let now = at(1_700_000_040);
        let mut form = CreateMarketForm::new(now);

        form.end_time_input = now.format(END_TIME_FORMAT).to_string();
        assert!(matches!(form.duration_from(now), Err(Error::Validation(_))));

        form.end_time_input = (now - Duration::hours(1)).format(END_TIME_FORMAT).to_string();
        assert!(matches!(form.duration_from(now), Err(Error::Validation(_))));
    }

    #[test]
    fn garbled_end_time_is_rejected() {
        let now = at(1_700_000_040);
        let mut form = CreateMarketForm::new(now);
        form.end_time_input = "next tuesday".to_string();
        assert!(matches!(form.duration_from(now), Err(Error::Validation(_))));
    }

    #[test]
    fn intent_requires_a_description() {
        let now = at(1_700_000_040);
        let mut form = CreateMarketForm::new(now);
        assert!(matches!(form.intent(now), Err(Error::Validation(_))));

        form.description = "Will it rain?".to_string();
        let intent = form.intent(now).expect("intent");
        assert_eq!(intent.description, "Will it rain?");
        assert_eq!(intent.duration_seconds, 86_400);
    }

    #[test]
    fn bet_amount_parses_to_wei() {
        let form = BetForm::default();
        assert_eq!(
            form.amount_wei().expect("wei"),
            U256::from(100_000_000_000_000_000u128)
        );
    }

    #[test]
    fn bad_bet_amounts_are_validation_errors() {
        let mut form = BetForm::default();
        form.amount_input = "zero point one".to_string();
        assert!(matches!(form.amount_wei(), Err(Error::Validation(_))));

        form.amount_input = "0".to_string();
        assert!(matches!(form.amount_wei(), Err(Error::Validation(_))));
    }

    #[test]
    fn amount_input_accepts_only_one_decimal_point() {
        let mut form = BetForm::default();
        form.amount_input.clear();
        for c in "1.2.3x4".chars() {
            form.push_char(c);
        }
        assert_eq!(form.amount_input, "1.234");
    }

    #[test]
    fn phases_block_resubmission_while_in_flight() {
        assert!(!TxPhase::Idle.in_flight());
        assert!(TxPhase::Simulating.in_flight());
        assert!(TxPhase::Submitting.in_flight());
        assert!(!TxPhase::Settled.in_flight());
        assert!(!TxPhase::Failed.in_flight());
    }
}
