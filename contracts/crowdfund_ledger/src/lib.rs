//! # Crowdfund Ledger Contract
//!
//! A single Soroban contract, `CrowdfundLedger`, that keeps a registry of
//! allow-listed funding campaigns, a per-contributor contribution ledger, a
//! refund window for failed campaigns, and a one-time reward token for every
//! contributor whose cumulative stake in a campaign reaches the threshold.
//!
//! | Phase         | Entry Point(s)                                          |
//! |---------------|---------------------------------------------------------|
//! | Bootstrap     | [`CrowdfundLedger::init`]                               |
//! | Access admin  | `set_allowed`, `set_reward_threshold`, `transfer_ownership`, `set_base_uri` |
//! | Registration  | [`CrowdfundLedger::create_campaign`]                    |
//! | Funding       | [`CrowdfundLedger::contribute`]                         |
//! | Failure path  | [`CrowdfundLedger::refund`]                             |
//! | Payout        | [`CrowdfundLedger::withdraw_funds`]                     |
//! | Queries       | `get_campaign`, `get_campaigns`, `get_funds_raised`, `get_contribution`, `get_phase`, `balance_of`, `reward_token_of`, ... |
//!
//! ## Timing
//!
//! With `d` the campaign deadline and `W` the 15-day claim window:
//!
//! ```text
//! contribute      now <= d
//! refund          d < now <= d + W      (goal missed only)
//! withdraw_funds  now > d + W           (creator, once)
//! ```
//!
//! The refund and withdrawal windows never overlap and leave no gap.
//!
//! ## Architecture
//!
//! Authorization and the reward threshold live in [`access`], storage in
//! [`storage`], reward token bookkeeping behind the [`reward::RewardIssuer`]
//! capability, and event shapes in [`events`]. Value leaves the contract only
//! after every bookkeeping write of the same call has been made.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, String, Vec};

pub mod access;
pub mod events;
pub mod reward;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_rewards;

use reward::{RewardIssuer, RewardToken};
use storage::{
    add_contribution, get_contribution, get_reward_flag, get_token, load_campaign,
    load_campaign_pair, load_campaign_state, next_campaign_id, save_campaign_state,
    save_new_campaign, set_reward_flag, take_contribution,
};
pub use types::{
    claim_window_end, Campaign, CampaignConfig, CampaignPhase, CampaignState, CLAIM_WINDOW_SECS,
    SECONDS_PER_DAY,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Authorization
    Unauthorized = 1,
    NotAuthorized = 2,
    NotCreator = 3,
    // Input validation
    InvalidGoal = 4,
    InvalidDuration = 5,
    ZeroContribution = 6,
    // Reference
    CampaignNotFound = 7,
    // Timing
    CampaignEnded = 8,
    CampaignStillActive = 9,
    ClaimWindowOpen = 10,
    RefundWindowExpired = 11,
    // Business rules
    CampaignSucceeded = 12,
    NoFundsToRefund = 13,
    AlreadyWithdrawn = 14,
    // Contract lifecycle and reward token
    AlreadyInitialized = 15,
    NotInitialized = 16,
    InvalidThreshold = 17,
    TokenNotFound = 18,
    InvalidUri = 19,
    Overflow = 20,
}

#[contract]
pub struct CrowdfundLedger;

#[contractimpl]
impl CrowdfundLedger {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract.
    ///
    /// - `owner` manages the allow-list and the reward threshold, and must sign.
    /// - `token` is the currency every contribution, refund and withdrawal moves.
    /// - `reward_threshold` is the initial cumulative amount earning a reward.
    ///
    /// Subsequent calls fail with `Error::AlreadyInitialized`.
    pub fn init(env: Env, owner: Address, token: Address, reward_threshold: i128) -> Result<(), Error> {
        owner.require_auth();
        access::init(&env, &owner, reward_threshold)?;
        storage::set_token(&env, &token);
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        access::owner(&env)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        get_token(&env)
    }

    /// Hand the owner capability to `new_owner`.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        access::transfer_ownership(&env, &caller, &new_owner)
    }

    // ─────────────────────────────────────────────────────────
    // Access control
    // ─────────────────────────────────────────────────────────

    /// Add `account` to, or remove it from, the creator allow-list.
    ///
    /// Owner only. Emits `allowed` on every call, including no-op updates.
    pub fn set_allowed(env: Env, caller: Address, account: Address, allowed: bool) -> Result<(), Error> {
        access::set_allowed(&env, &caller, &account, allowed)
    }

    pub fn is_allowed(env: Env, account: Address) -> bool {
        access::is_allowed(&env, &account)
    }

    /// Replace the global reward threshold. Owner only.
    ///
    /// Applies to every later contribution on every campaign.
    pub fn set_reward_threshold(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        access::set_reward_threshold(&env, &caller, amount)
    }

    pub fn reward_threshold(env: Env) -> Result<i128, Error> {
        access::reward_threshold(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Campaign lifecycle
    // ─────────────────────────────────────────────────────────

    /// Create a campaign ending `duration_days` days from now.
    ///
    /// `creator` must be on the allow-list. Returns the new campaign id.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        title: String,
        description: String,
        goal: i128,
        duration_days: u32,
    ) -> Result<u64, Error> {
        creator.require_auth();
        access::owner(&env)?;
        access::require_allowed(&env, &creator)?;

        if goal <= 0 {
            return Err(Error::InvalidGoal);
        }
        if duration_days == 0 {
            return Err(Error::InvalidDuration);
        }

        let duration = u64::from(duration_days)
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(Error::Overflow)?;
        let deadline = env
            .ledger()
            .timestamp()
            .checked_add(duration)
            .ok_or(Error::Overflow)?;

        let id = next_campaign_id(&env)?;
        let config = CampaignConfig {
            id,
            creator: creator.clone(),
            title: title.clone(),
            description,
            goal,
            deadline,
        };
        save_new_campaign(&env, &config);

        events::emit_campaign_created(&env, id, creator, title, goal, deadline);
        Ok(id)
    }

    /// Contribute `amount` of the currency token to an open campaign.
    ///
    /// The first contribution that lifts the contributor's running total for
    /// this campaign to the reward threshold or above mints one reward token.
    pub fn contribute(env: Env, campaign_id: u64, contributor: Address, amount: i128) -> Result<(), Error> {
        contributor.require_auth();

        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;
        if amount <= 0 {
            return Err(Error::ZeroContribution);
        }
        if env.ledger().timestamp() > config.deadline {
            return Err(Error::CampaignEnded);
        }
        let token = get_token(&env)?;

        state.funds_raised = state
            .funds_raised
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let running_total = add_contribution(&env, campaign_id, &contributor, amount)?;
        save_campaign_state(&env, campaign_id, &state);

        token::Client::new(&env, &token).transfer(
            &contributor,
            &env.current_contract_address(),
            &amount,
        );
        events::emit_campaign_funded(&env, campaign_id, contributor.clone(), amount);

        issue_reward_if_eligible(&env, &RewardToken, campaign_id, &contributor, running_total)?;
        Ok(())
    }

    /// Return a contributor's full stake in a failed campaign.
    ///
    /// Only valid during the claim window `(deadline, deadline + 15 days]`.
    /// Returns the amount sent back.
    pub fn refund(env: Env, campaign_id: u64, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();

        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;
        let now = env.ledger().timestamp();
        if now <= config.deadline {
            return Err(Error::CampaignStillActive);
        }
        if state.funds_raised >= config.goal {
            return Err(Error::CampaignSucceeded);
        }
        if now > claim_window_end(config.deadline) {
            return Err(Error::RefundWindowExpired);
        }
        if get_contribution(&env, campaign_id, &contributor) <= 0 {
            return Err(Error::NoFundsToRefund);
        }
        let token = get_token(&env)?;

        // Effects first: the entry is zeroed before any value leaves.
        let amount = take_contribution(&env, campaign_id, &contributor);
        state.total_refunded = state
            .total_refunded
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        save_campaign_state(&env, campaign_id, &state);

        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &contributor,
            &amount,
        );
        events::emit_refunded(&env, campaign_id, contributor, amount);
        Ok(amount)
    }

    /// Sweep the campaign's outstanding funds to its creator, once.
    ///
    /// Only valid after the claim window has closed, whatever the outcome.
    /// Returns the amount sent.
    pub fn withdraw_funds(env: Env, campaign_id: u64, caller: Address) -> Result<i128, Error> {
        caller.require_auth();

        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;
        if caller != config.creator {
            return Err(Error::NotCreator);
        }
        if state.withdrawn {
            return Err(Error::AlreadyWithdrawn);
        }
        let now = env.ledger().timestamp();
        if now <= config.deadline {
            return Err(Error::CampaignStillActive);
        }
        if now <= claim_window_end(config.deadline) {
            return Err(Error::ClaimWindowOpen);
        }
        let token = get_token(&env)?;

        let amount = state.outstanding();
        state.withdrawn = true;
        save_campaign_state(&env, campaign_id, &state);

        if amount > 0 {
            token::Client::new(&env, &token).transfer(
                &env.current_contract_address(),
                &config.creator,
                &amount,
            );
        }
        events::emit_funds_withdrawn(&env, campaign_id, amount);
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Campaign queries
    // ─────────────────────────────────────────────────────────

    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<Campaign, Error> {
        load_campaign(&env, campaign_id)
    }

    /// All campaign ids in creation order.
    pub fn get_campaigns(env: Env) -> Vec<u64> {
        storage::campaign_ids(&env)
    }

    pub fn get_campaign_count(env: Env) -> u64 {
        storage::campaign_count(&env)
    }

    /// Cumulative amount ever contributed to the campaign.
    pub fn get_funds_raised(env: Env, campaign_id: u64) -> Result<i128, Error> {
        Ok(load_campaign_state(&env, campaign_id)?.funds_raised)
    }

    pub fn get_contribution(env: Env, campaign_id: u64, contributor: Address) -> Result<i128, Error> {
        load_campaign_state(&env, campaign_id)?;
        Ok(get_contribution(&env, campaign_id, &contributor))
    }

    /// Lifecycle phase at the current ledger time.
    pub fn get_phase(env: Env, campaign_id: u64) -> Result<CampaignPhase, Error> {
        let campaign = load_campaign(&env, campaign_id)?;
        Ok(campaign.phase(env.ledger().timestamp()))
    }

    // ─────────────────────────────────────────────────────────
    // Reward token
    // ─────────────────────────────────────────────────────────

    pub fn balance_of(env: Env, account: Address) -> u32 {
        reward::balance_of(&env, &account)
    }

    pub fn owner_of(env: Env, token_id: u64) -> Result<Address, Error> {
        reward::owner_of(&env, token_id)
    }

    pub fn total_minted(env: Env) -> u64 {
        reward::total_minted(&env)
    }

    /// Token id rewarded to `contributor` for `campaign_id`, if any.
    pub fn reward_token_of(env: Env, campaign_id: u64, contributor: Address) -> Result<Option<u64>, Error> {
        load_campaign_state(&env, campaign_id)?;
        Ok(get_reward_flag(&env, campaign_id, &contributor))
    }

    pub fn has_reward(env: Env, campaign_id: u64, contributor: Address) -> Result<bool, Error> {
        Ok(Self::reward_token_of(env, campaign_id, contributor)?.is_some())
    }

    /// Set the metadata prefix for reward tokens. Owner only.
    pub fn set_base_uri(env: Env, caller: Address, uri: String) -> Result<(), Error> {
        access::require_owner(&env, &caller)?;
        reward::set_base_uri(&env, &uri)
    }

    pub fn base_uri(env: Env) -> String {
        reward::base_uri(&env)
    }

    pub fn token_uri(env: Env, token_id: u64) -> Result<String, Error> {
        reward::token_uri(&env, token_id)
    }
}

/// Mint a reward if the pair has none yet and `running_total` reaches the
/// current threshold. Returns the new token id when one was issued.
fn issue_reward_if_eligible<I: RewardIssuer>(
    env: &Env,
    issuer: &I,
    campaign_id: u64,
    contributor: &Address,
    running_total: i128,
) -> Result<Option<u64>, Error> {
    if get_reward_flag(env, campaign_id, contributor).is_some() {
        return Ok(None);
    }
    if running_total < access::reward_threshold(env)? {
        return Ok(None);
    }

    let token_id = issuer.mint_next(env, contributor)?;
    set_reward_flag(env, campaign_id, contributor, token_id);
    events::emit_reward_issued(env, campaign_id, contributor.clone(), token_id);
    Ok(Some(token_id))
}
