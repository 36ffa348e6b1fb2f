//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the ledger.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type      | Description                           |
//! |-----------------|-----------|---------------------------------------|
//! | `CampaignCount` | `u64`     | Highest campaign id assigned so far   |
//! | `Token`         | `Address` | Currency token for all value transfer |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                       | Type             | Description                        |
//! |---------------------------|------------------|------------------------------------|
//! | `CampaignIds`             | `Vec<u64>`       | Every campaign id, creation order  |
//! | `CampConfig(id)`          | `CampaignConfig` | Immutable campaign configuration   |
//! | `CampState(id)`           | `CampaignState`  | Mutable campaign accounting        |
//! | `Contribution(id, addr)`  | `i128`           | Contribution ledger entry          |
//! | `RewardFlag(id, addr)`    | `u64`            | Reward token issued to the pair    |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Access-control keys live in [`crate::access`], reward-token keys in
//! [`crate::reward`]; both reuse the bump helpers defined here.

use soroban_sdk::{contracttype, Address, Env, IntoVal, Val, Vec};

use crate::types::{Campaign, CampaignConfig, CampaignState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Highest campaign id handed out (Instance).
    CampaignCount,
    /// Currency token address (Instance).
    Token,
    /// Enumerable list of campaign ids (Persistent).
    CampaignIds,
    /// Immutable campaign configuration keyed by id (Persistent).
    CampConfig(u64),
    /// Mutable campaign accounting keyed by id (Persistent).
    CampState(u64),
    /// Running contribution total per (campaign, contributor) (Persistent).
    Contribution(u64, Address),
    /// Reward token id issued per (campaign, contributor) (Persistent).
    RewardFlag(u64, Address),
}

// ── TTL Helpers ──────────────────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Extend the TTL for a persistent storage key.
pub(crate) fn bump_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Reserve the next campaign id. Ids start at 1; 0 is never assigned.
pub fn next_campaign_id(env: &Env) -> Result<u64, Error> {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0);
    let next = current.checked_add(1).ok_or(Error::Overflow)?;
    env.storage().instance().set(&DataKey::CampaignCount, &next);
    Ok(next)
}

pub fn campaign_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    bump_instance(env);
}

/// Currency token configured at `init`.
pub fn get_token(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

// ── Campaign Records ─────────────────────────────────────────────────

/// Persist a freshly created campaign and append its id to the listing.
pub fn save_new_campaign(env: &Env, config: &CampaignConfig) {
    let config_key = DataKey::CampConfig(config.id);
    let state_key = DataKey::CampState(config.id);

    env.storage().persistent().set(&config_key, config);
    env.storage()
        .persistent()
        .set(&state_key, &CampaignState::default());
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);

    let mut ids = campaign_ids(env);
    ids.push_back(config.id);
    env.storage().persistent().set(&DataKey::CampaignIds, &ids);
    bump_persistent(env, &DataKey::CampaignIds);
}

pub fn campaign_ids(env: &Env) -> Vec<u64> {
    let key = DataKey::CampaignIds;
    match env.storage().persistent().get(&key) {
        Some(ids) => {
            bump_persistent(env, &key);
            ids
        }
        None => Vec::new(env),
    }
}

pub fn load_campaign_config(env: &Env, id: u64) -> Result<CampaignConfig, Error> {
    let key = DataKey::CampConfig(id);
    let config: CampaignConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::CampaignNotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

pub fn load_campaign_state(env: &Env, id: u64) -> Result<CampaignState, Error> {
    let key = DataKey::CampState(id);
    let state: CampaignState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::CampaignNotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

/// Load config and state together, for entry points that need both.
pub fn load_campaign_pair(env: &Env, id: u64) -> Result<(CampaignConfig, CampaignState), Error> {
    let config = load_campaign_config(env, id)?;
    let state = load_campaign_state(env, id)?;
    Ok((config, state))
}

pub fn load_campaign(env: &Env, id: u64) -> Result<Campaign, Error> {
    let (config, state) = load_campaign_pair(env, id)?;
    Ok(Campaign::from_parts(config, state))
}

pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::CampState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

// ── Contribution Ledger ──────────────────────────────────────────────

pub fn get_contribution(env: &Env, id: u64, contributor: &Address) -> i128 {
    let key = DataKey::Contribution(id, contributor.clone());
    match env.storage().persistent().get(&key) {
        Some(amount) => {
            bump_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Add `amount` to the contributor's entry and return the new running total.
pub fn add_contribution(
    env: &Env,
    id: u64,
    contributor: &Address,
    amount: i128,
) -> Result<i128, Error> {
    let key = DataKey::Contribution(id, contributor.clone());
    let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    let updated = current.checked_add(amount).ok_or(Error::Overflow)?;
    env.storage().persistent().set(&key, &updated);
    bump_persistent(env, &key);
    Ok(updated)
}

/// Zero the contributor's entry and return what it held.
pub fn take_contribution(env: &Env, id: u64, contributor: &Address) -> i128 {
    let key = DataKey::Contribution(id, contributor.clone());
    let amount: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    if amount != 0 {
        env.storage().persistent().set(&key, &0i128);
        bump_persistent(env, &key);
    }
    amount
}

// ── Reward Flags ─────────────────────────────────────────────────────

pub fn get_reward_flag(env: &Env, id: u64, contributor: &Address) -> Option<u64> {
    let key = DataKey::RewardFlag(id, contributor.clone());
    let flag = env.storage().persistent().get(&key);
    if flag.is_some() {
        bump_persistent(env, &key);
    }
    flag
}

pub fn set_reward_flag(env: &Env, id: u64, contributor: &Address, token_id: u64) {
    let key = DataKey::RewardFlag(id, contributor.clone());
    env.storage().persistent().set(&key, &token_id);
    bump_persistent(env, &key);
}
