//! Market snapshots and the derived view-model.

use alloy_primitives::{U256, utils::format_ether};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

use super::form_state::BetForm;

/// Market status as encoded by the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketStatus {
    #[default]
    Open,
    Closed,
    Resolved,
}

impl MarketStatus {
    /// Decode the wire discriminant (0 = Open, 1 = Closed, 2 = Resolved).
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Open),
            1 => Some(Self::Closed),
            2 => Some(Self::Resolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::Closed => write!(f, "Closed"),
            Self::Resolved => write!(f, "Resolved"),
        }
    }
}

/// Winning side of a market, or none while unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    None,
    A,
    B,
}

impl Outcome {
    /// Decode the wire discriminant (0 = none, 1 = A, 2 = B).
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::A),
            2 => Some(Self::B),
            _ => None,
        }
    }

    /// Encode for `placeBet`. Only A and B are valid bet sides.
    pub fn wire(&self) -> Option<u8> {
        match self {
            Self::None => None,
            Self::A => Some(1),
            Self::B => Some(2),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "-"),
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A snapshot of one market as read from the contract.
///
/// The contract is the sole writer; this is plain data, refreshed
/// wholesale on each fetch.
#[derive(Debug, Clone, Default)]
pub struct Market {
    /// Dense zero-based index assigned at creation, never reused.
    pub id: u64,
    /// Market question.
    pub description: String,
    /// Aggregate wagered value backing outcome A, in wei.
    pub pool_a: U256,
    /// Aggregate wagered value backing outcome B, in wei.
    pub pool_b: U256,
    /// Winning side once resolved.
    pub outcome: Outcome,
    /// Lifecycle status.
    pub status: MarketStatus,
    /// Betting cutoff, unix seconds.
    pub end_time: u64,
}

impl Market {
    /// The zero-valued placeholder rendered when a read fails.
    pub fn unavailable(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Fraction of the combined pool backing outcome A. Zero when both
    /// pools are empty.
    pub fn pool_share_a(&self) -> Decimal {
        let total = self.pool_a.saturating_add(self.pool_b);
        if total.is_zero() {
            return Decimal::ZERO;
        }
        // Basis points keep the division in U256 before it narrows
        let bps = self.pool_a.saturating_mul(U256::from(10_000u64)) / total;
        Decimal::new(i64::try_from(bps).unwrap_or(10_000), 4)
    }

    /// Fraction of the combined pool backing outcome B.
    pub fn pool_share_b(&self) -> Decimal {
        let total = self.pool_a.saturating_add(self.pool_b);
        if total.is_zero() {
            return Decimal::ZERO;
        }
        Decimal::ONE - self.pool_share_a()
    }

    /// Derive the display view-model at the given wall-clock time.
    pub fn view_at(&self, now: DateTime<Utc>) -> MarketView {
        let time_remaining = self.end_time as i64 - now.timestamp();
        let has_ended = time_remaining <= 0;

        let display_status = if self.status == MarketStatus::Resolved {
            DisplayStatus::Resolved
        } else if self.status != MarketStatus::Open {
            DisplayStatus::Closed
        } else if has_ended {
            DisplayStatus::AwaitingResolution
        } else {
            DisplayStatus::Countdown(format_time_remaining(time_remaining))
        };

        let winner = (self.status == MarketStatus::Resolved && self.outcome != Outcome::None)
            .then_some(self.outcome);

        MarketView {
            time_remaining,
            has_ended,
            display_status,
            pool_share_a: self.pool_share_a(),
            pool_share_b: self.pool_share_b(),
            betting_allowed: self.status == MarketStatus::Open && !has_ended,
            winner,
        }
    }
}

/// Display-ready classification of a market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayStatus {
    Resolved,
    Closed,
    AwaitingResolution,
    Countdown(String),
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved => write!(f, "Resolved"),
            Self::Closed => write!(f, "Closed"),
            Self::AwaitingResolution => write!(f, "Awaiting Resolution"),
            Self::Countdown(text) => write!(f, "{text}"),
        }
    }
}

/// Derived, display-ready facts about a market at a point in time.
///
/// A pure function of `(Market, now)`; nothing here touches the chain.
#[derive(Debug, Clone)]
pub struct MarketView {
    /// Seconds until the betting cutoff; negative once passed.
    pub time_remaining: i64,
    /// Whether the cutoff has passed.
    pub has_ended: bool,
    /// Badge text for the card.
    pub display_status: DisplayStatus,
    /// Pool A's fraction of the combined pool.
    pub pool_share_a: Decimal,
    /// Pool B's fraction of the combined pool.
    pub pool_share_b: Decimal,
    /// Whether the bet form should be offered.
    pub betting_allowed: bool,
    /// Winning side, present only for resolved markets.
    pub winner: Option<Outcome>,
}

/// Human countdown from the largest applicable unit, floored.
pub fn format_time_remaining(seconds: i64) -> String {
    if seconds <= 0 {
        return "Ended".to_string();
    }
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h remaining")
    } else if hours > 0 {
        format!("{hours}h {minutes}m remaining")
    } else {
        format!("{minutes}m remaining")
    }
}

/// Format a wei amount as a trimmed decimal ETH string.
///
/// Values that do not fit a `Decimal` degrade to "0" rather than failing
/// the render.
pub fn format_eth(wei: U256) -> String {
    match format_ether(wei).parse::<Decimal>() {
        Ok(amount) => amount.normalize().to_string(),
        Err(_) => "0".to_string(),
    }
}

/// State for market-related data.
#[derive(Debug, Default)]
pub struct MarketState {
    /// All loaded markets, indexed by their dense contract id.
    pub markets: Vec<Market>,
    /// Ids whose last read failed; their slots hold the zero market.
    pub failed: HashSet<u64>,
    /// Currently selected market index.
    pub selected_index: Option<usize>,
    /// Whether markets are currently loading.
    pub loading: bool,
    /// Last update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
    /// Bet form for the selected market.
    pub bet_form: BetForm,
}

impl MarketState {
    /// Get the currently selected market.
    pub fn selected_market(&self) -> Option<&Market> {
        self.selected_index.and_then(|i| self.markets.get(i))
    }

    /// Whether the last read of the given market failed.
    pub fn is_failed(&self, id: u64) -> bool {
        self.failed.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn market(status: MarketStatus, end_time: u64) -> Market {
        Market {
            id: 0,
            description: "Will ETH flip BTC?".to_string(),
            pool_a: U256::from(3_000_000_000_000_000_000u128),
            pool_b: U256::from(1_000_000_000_000_000_000u128),
            outcome: Outcome::None,
            status,
            end_time,
        }
    }

    fn at(timestamp: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(timestamp, 0).expect("timestamp")
    }

    #[test]
    fn pool_shares_sum_to_one() {
        let m = market(MarketStatus::Open, 0);
        assert_eq!(m.pool_share_a(), dec!(0.75));
        assert_eq!(m.pool_share_b(), dec!(0.25));
        assert_eq!(m.pool_share_a() + m.pool_share_b(), Decimal::ONE);
    }

    #[test]
    fn empty_pools_yield_zero_shares() {
        let mut m = market(MarketStatus::Open, 0);
        m.pool_a = U256::ZERO;
        m.pool_b = U256::ZERO;
        assert_eq!(m.pool_share_a(), Decimal::ZERO);
        assert_eq!(m.pool_share_b(), Decimal::ZERO);
    }

    #[test]
    fn one_sided_pool_takes_the_whole_bar() {
        let mut m = market(MarketStatus::Open, 0);
        m.pool_b = U256::ZERO;
        assert_eq!(m.pool_share_a(), Decimal::ONE);
        assert_eq!(m.pool_share_b(), Decimal::ZERO);
    }

    #[test]
    fn resolved_takes_precedence_over_everything() {
        let now = at(1_000_000);
        // Resolved even though the clock has not run out
        let mut m = market(MarketStatus::Resolved, 2_000_000);
        m.outcome = Outcome::B;
        let view = m.view_at(now);
        assert_eq!(view.display_status, DisplayStatus::Resolved);
        assert_eq!(view.winner, Some(Outcome::B));
        assert!(!view.betting_allowed);
    }

    #[test]
    fn closed_beats_the_clock() {
        let now = at(1_000_000);
        let view = market(MarketStatus::Closed, 2_000_000).view_at(now);
        assert_eq!(view.display_status, DisplayStatus::Closed);
        assert!(!view.betting_allowed);
    }

    #[test]
    fn open_but_ended_awaits_resolution() {
        let now = at(1_000_000);
        let view = market(MarketStatus::Open, 1_000_000).view_at(now);
        assert!(view.has_ended);
        assert_eq!(view.display_status, DisplayStatus::AwaitingResolution);
        assert!(!view.betting_allowed);
    }

    #[test]
    fn open_and_running_shows_a_countdown() {
        let now = at(1_000_000);
        let view = market(MarketStatus::Open, 1_000_000 + 120).view_at(now);
        assert!(!view.has_ended);
        assert_eq!(
            view.display_status,
            DisplayStatus::Countdown("2m remaining".to_string())
        );
        assert!(view.betting_allowed);
        assert_eq!(view.winner, None);
    }

    #[test]
    fn countdown_uses_the_largest_applicable_units() {
        assert_eq!(format_time_remaining(90_000), "1d 1h remaining");
        assert_eq!(format_time_remaining(3_700), "1h 1m remaining");
        assert_eq!(format_time_remaining(120), "2m remaining");
        assert_eq!(format_time_remaining(0), "Ended");
        assert_eq!(format_time_remaining(-50), "Ended");
    }

    #[test]
    fn unavailable_market_is_zero_valued() {
        let m = Market::unavailable(4);
        assert_eq!(m.id, 4);
        assert_eq!(m.description, "");
        assert_eq!(m.pool_a, U256::ZERO);
        assert_eq!(m.pool_b, U256::ZERO);
        assert_eq!(m.outcome, Outcome::None);
        assert_eq!(m.status, MarketStatus::Open);
        assert_eq!(m.end_time, 0);
    }

    #[test]
    fn eth_formatting_trims_and_degrades_to_zero() {
        assert_eq!(format_eth(U256::from(1_500_000_000_000_000_000u128)), "1.5");
        assert_eq!(format_eth(U256::ZERO), "0");
        // Larger than Decimal can hold
        assert_eq!(format_eth(U256::MAX), "0");
    }

    #[test]
    fn wire_encodings_round_trip() {
        assert_eq!(Outcome::from_wire(1), Some(Outcome::A));
        assert_eq!(Outcome::from_wire(2), Some(Outcome::B));
        assert_eq!(Outcome::from_wire(7), None);
        assert_eq!(Outcome::A.wire(), Some(1));
        assert_eq!(Outcome::None.wire(), None);
        assert_eq!(MarketStatus::from_wire(2), Some(MarketStatus::Resolved));
        assert_eq!(MarketStatus::from_wire(3), None);
    }
}
