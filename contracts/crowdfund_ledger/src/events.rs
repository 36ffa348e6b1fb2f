//! # Events
//!
//! Every state change publishes exactly one event shaped as
//! `(topic_symbol[, campaign_id]) => data struct`. The off-chain indexer keys
//! on the leading symbol, so these names are part of the public interface.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowedChanged {
    pub account: Address,
    pub allowed: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThresholdChanged {
    pub previous: i128,
    pub threshold: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub creator: Address,
    pub title: String,
    pub goal: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignFunded {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardIssued {
    pub contributor: Address,
    pub token_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Refunded {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsWithdrawn {
    pub campaign_id: u64,
    pub amount: i128,
}

pub fn emit_allowed_changed(env: &Env, account: Address, allowed: bool) {
    env.events().publish(
        (symbol_short!("allowed"),),
        AllowedChanged { account, allowed },
    );
}

pub fn emit_threshold_changed(env: &Env, previous: i128, threshold: i128) {
    env.events().publish(
        (symbol_short!("threshold"),),
        ThresholdChanged {
            previous,
            threshold,
        },
    );
}

pub fn emit_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("owner"),),
        OwnershipTransferred {
            previous_owner,
            new_owner,
        },
    );
}

pub fn emit_campaign_created(
    env: &Env,
    campaign_id: u64,
    creator: Address,
    title: String,
    goal: i128,
    deadline: u64,
) {
    env.events().publish(
        (symbol_short!("created"), campaign_id),
        CampaignCreated {
            campaign_id,
            creator,
            title,
            goal,
            deadline,
        },
    );
}

pub fn emit_campaign_funded(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("funded"), campaign_id),
        CampaignFunded {
            campaign_id,
            contributor,
            amount,
        },
    );
}

pub fn emit_reward_issued(env: &Env, campaign_id: u64, contributor: Address, token_id: u64) {
    env.events().publish(
        (symbol_short!("reward"), campaign_id),
        RewardIssued {
            contributor,
            token_id,
        },
    );
}

pub fn emit_refunded(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("refunded"), campaign_id),
        Refunded {
            campaign_id,
            contributor,
            amount,
        },
    );
}

pub fn emit_funds_withdrawn(env: &Env, campaign_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"), campaign_id),
        FundsWithdrawn {
            campaign_id,
            amount,
        },
    );
}
