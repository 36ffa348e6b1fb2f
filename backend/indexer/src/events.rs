//! Canonical event types emitted by the crowdfund ledger contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/crowdfund_ledger/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the ledger contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A campaign was created (`created` topic).
    CampaignCreated,
    /// A contribution was made to a campaign (`funded` topic).
    CampaignFunded,
    /// A contributor earned a reward token (`reward` topic).
    RewardIssued,
    /// A contributor reclaimed funds from a failed campaign (`refunded` topic).
    Refunded,
    /// The creator swept a campaign's funds (`withdrawn` topic).
    FundsWithdrawn,
    /// Allow-list membership changed (`allowed` topic).
    AllowedChanged,
    /// The reward threshold changed (`threshold` topic).
    ThresholdChanged,
    /// Contract ownership moved (`owner` topic).
    OwnershipTransferred,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::CampaignCreated,
            "funded" => Self::CampaignFunded,
            "reward" => Self::RewardIssued,
            "refunded" => Self::Refunded,
            "withdrawn" => Self::FundsWithdrawn,
            "allowed" => Self::AllowedChanged,
            "threshold" => Self::ThresholdChanged,
            "owner" => Self::OwnershipTransferred,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated => "campaign_created",
            Self::CampaignFunded => "campaign_funded",
            Self::RewardIssued => "reward_issued",
            Self::Refunded => "refunded",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::AllowedChanged => "allowed_changed",
            Self::ThresholdChanged => "threshold_changed",
            Self::OwnershipTransferred => "ownership_transferred",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the event's second topic is a campaign id.
    pub fn is_campaign_scoped(&self) -> bool {
        matches!(
            self,
            Self::CampaignCreated
                | Self::CampaignFunded
                | Self::RewardIssued
                | Self::Refunded
                | Self::FundsWithdrawn
        )
    }
}

/// A fully decoded ledger event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub token_id: Option<String>,
    /// Allow-list membership carried by `allowed_changed` events.
    pub allowed: Option<bool>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub token_id: Option<String>,
    /// Allow-list membership carried by `allowed_changed` events.
    pub allowed: Option<bool>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
