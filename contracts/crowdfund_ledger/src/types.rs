//! # Types
//!
//! Shared data structures used across all modules of the crowdfunding ledger.
//!
//! ## Config / State split
//!
//! A `Campaign` is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at creation; never mutated.
//! - [`CampaignState`] — written on every contribution, refund and withdrawal.
//!
//! The public API exposes the reconstructed [`Campaign`] struct.
//!
//! ## Lifecycle phase
//!
//! The phase is never stored. [`Campaign::phase`] derives it from the stored
//! timestamps and the current ledger time on every read:
//!
//! ```text
//! Open ──► Ended ─────────► Withdrawable ──► Closed
//!   └────► RefundWindow ──►┘
//! ```

use soroban_sdk::{contracttype, Address, String};

/// Seconds in one day of campaign duration.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Length of the refund claim window that follows every deadline.
pub const CLAIM_WINDOW_SECS: u64 = 15 * SECONDS_PER_DAY;

/// Lifecycle phase of a campaign at a given instant.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignPhase {
    /// `now <= deadline`; contributions accepted.
    Open,
    /// Deadline passed, goal reached, claim window still running.
    Ended,
    /// Deadline passed, goal missed, claim window still running.
    RefundWindow,
    /// Claim window over; the creator may sweep once.
    Withdrawable,
    /// Creator has withdrawn.
    Closed,
}

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub goal: i128,
    pub deadline: u64,
}

/// Mutable campaign accounting.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CampaignState {
    /// Cumulative amount ever contributed.
    pub funds_raised: i128,
    /// Cumulative amount paid back through `refund`.
    pub total_refunded: i128,
    pub withdrawn: bool,
}

impl CampaignState {
    /// Funds still held by the contract on behalf of the campaign.
    pub fn outstanding(&self) -> i128 {
        self.funds_raised - self.total_refunded
    }
}

/// Full representation of a campaign, reconstructed from config and state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    /// Sequential identifier, starting at 1.
    pub id: u64,
    /// Account that created the campaign and receives the funds.
    pub creator: Address,
    pub title: String,
    pub description: String,
    /// Target amount, always positive.
    pub goal: i128,
    /// Cumulative amount contributed.
    pub funds_raised: i128,
    /// Amount already returned to contributors of a failed campaign.
    pub total_refunded: i128,
    /// Ledger timestamp after which contributions are rejected.
    pub deadline: u64,
    /// Set once, when the creator withdraws.
    pub withdrawn: bool,
}

impl Campaign {
    pub fn from_parts(config: CampaignConfig, state: CampaignState) -> Self {
        Campaign {
            id: config.id,
            creator: config.creator,
            title: config.title,
            description: config.description,
            goal: config.goal,
            funds_raised: state.funds_raised,
            total_refunded: state.total_refunded,
            deadline: config.deadline,
            withdrawn: state.withdrawn,
        }
    }

    /// Funds still held by the contract on behalf of this campaign.
    pub fn outstanding(&self) -> i128 {
        self.funds_raised - self.total_refunded
    }

    pub fn phase(&self, now: u64) -> CampaignPhase {
        phase_at(
            self.deadline,
            self.funds_raised >= self.goal,
            self.withdrawn,
            now,
        )
    }
}

/// Last instant (inclusive) at which a failed campaign may be refunded.
pub fn claim_window_end(deadline: u64) -> u64 {
    deadline.saturating_add(CLAIM_WINDOW_SECS)
}

/// Pure phase function shared by the public query and the entry points.
pub fn phase_at(deadline: u64, succeeded: bool, withdrawn: bool, now: u64) -> CampaignPhase {
    if withdrawn {
        CampaignPhase::Closed
    } else if now <= deadline {
        CampaignPhase::Open
    } else if now > claim_window_end(deadline) {
        CampaignPhase::Withdrawable
    } else if succeeded {
        CampaignPhase::Ended
    } else {
        CampaignPhase::RefundWindow
    }
}
