//! # Access Control
//!
//! Owner-managed allow-list of campaign creators and the global reward
//! threshold. This module has no dependency on campaign state.
//!
//! ## Storage layout
//!
//! | Key                | Tier       | Type      | Description                    |
//! |--------------------|------------|-----------|--------------------------------|
//! | `Owner`            | Instance   | `Address` | Contract owner                 |
//! | `RewardThreshold`  | Instance   | `i128`    | Cumulative amount for a reward |
//! | `Allowed(address)` | Persistent | `bool`    | May create campaigns           |
//!
//! The threshold is read at contribution time, never snapshotted per
//! campaign: changing it affects future contributions on every campaign.

use soroban_sdk::{contracttype, Address, Env};

use crate::events;
use crate::storage::{bump_instance, bump_persistent};
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessKey {
    Owner,
    RewardThreshold,
    Allowed(Address),
}

// ── Bootstrap ────────────────────────────────────────────────────────

/// Record the owner and the initial threshold. Fails if already set.
pub fn init(env: &Env, owner: &Address, reward_threshold: i128) -> Result<(), Error> {
    if env.storage().instance().has(&AccessKey::Owner) {
        return Err(Error::AlreadyInitialized);
    }
    validate_threshold(reward_threshold)?;
    env.storage().instance().set(&AccessKey::Owner, owner);
    env.storage()
        .instance()
        .set(&AccessKey::RewardThreshold, &reward_threshold);
    bump_instance(env);
    Ok(())
}

pub fn owner(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&AccessKey::Owner)
        .ok_or(Error::NotInitialized)
}

/// Authenticate `caller` and check it is the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != owner(env)? {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

pub fn transfer_ownership(env: &Env, caller: &Address, new_owner: &Address) -> Result<(), Error> {
    require_owner(env, caller)?;
    env.storage().instance().set(&AccessKey::Owner, new_owner);
    bump_instance(env);
    events::emit_ownership_transferred(env, caller.clone(), new_owner.clone());
    Ok(())
}

// ── Allow-list ───────────────────────────────────────────────────────

/// Set allow-list membership. Emits even when the value does not change.
pub fn set_allowed(
    env: &Env,
    caller: &Address,
    account: &Address,
    allowed: bool,
) -> Result<(), Error> {
    require_owner(env, caller)?;
    let key = AccessKey::Allowed(account.clone());
    if allowed {
        env.storage().persistent().set(&key, &true);
        bump_persistent(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
    events::emit_allowed_changed(env, account.clone(), allowed);
    Ok(())
}

pub fn is_allowed(env: &Env, account: &Address) -> bool {
    let key = AccessKey::Allowed(account.clone());
    let allowed = env.storage().persistent().get(&key).unwrap_or(false);
    if allowed {
        bump_persistent(env, &key);
    }
    allowed
}

/// Gate for campaign creation.
pub fn require_allowed(env: &Env, account: &Address) -> Result<(), Error> {
    if !is_allowed(env, account) {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

// ── Reward threshold ─────────────────────────────────────────────────

pub fn reward_threshold(env: &Env) -> Result<i128, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&AccessKey::RewardThreshold)
        .ok_or(Error::NotInitialized)
}

pub fn set_reward_threshold(env: &Env, caller: &Address, amount: i128) -> Result<(), Error> {
    require_owner(env, caller)?;
    validate_threshold(amount)?;
    let previous = reward_threshold(env)?;
    env.storage()
        .instance()
        .set(&AccessKey::RewardThreshold, &amount);
    events::emit_threshold_changed(env, previous, amount);
    Ok(())
}

// Zero is accepted and rewards every contribution.
fn validate_threshold(amount: i128) -> Result<(), Error> {
    if amount < 0 {
        return Err(Error::InvalidThreshold);
    }
    Ok(())
}
