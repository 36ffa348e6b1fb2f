//! # Reward Token
//!
//! Non-fungible contributor rewards. The ledger only sees the
//! [`RewardIssuer`] capability; token identity, ownership and metadata
//! bookkeeping stay in this module.
//!
//! Token ids are assigned from a single counter starting at 0, shared by all
//! campaigns. Rewards are soulbound: there is no transfer surface.

use soroban_sdk::{contracttype, Address, Env, String};

use crate::storage::{bump_instance, bump_persistent};
use crate::Error;

/// Longest base URI accepted by [`set_base_uri`].
pub const MAX_BASE_URI_LEN: u32 = 200;

/// Decimal digits in `u64::MAX`.
const MAX_ID_DIGITS: usize = 20;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RewardKey {
    /// Id the next mint will receive (Instance).
    NextTokenId,
    /// Metadata prefix for `token_uri` (Instance).
    BaseUri,
    /// Owner of a minted token (Persistent).
    TokenOwner(u64),
    /// Number of tokens held by an account (Persistent).
    Balance(Address),
}

/// Capability the ledger holds for issuing rewards.
pub trait RewardIssuer {
    /// Mint the next token to `to` and return its id.
    fn mint_next(&self, env: &Env, to: &Address) -> Result<u64, Error>;
}

/// Reward collection stored inside the ledger contract.
pub struct RewardToken;

impl RewardIssuer for RewardToken {
    fn mint_next(&self, env: &Env, to: &Address) -> Result<u64, Error> {
        let token_id = total_minted(env);
        let next = token_id.checked_add(1).ok_or(Error::Overflow)?;
        env.storage().instance().set(&RewardKey::NextTokenId, &next);
        bump_instance(env);

        let owner_key = RewardKey::TokenOwner(token_id);
        env.storage().persistent().set(&owner_key, to);
        bump_persistent(env, &owner_key);

        let balance_key = RewardKey::Balance(to.clone());
        let balance = balance_of(env, to)
            .checked_add(1)
            .ok_or(Error::Overflow)?;
        env.storage().persistent().set(&balance_key, &balance);
        bump_persistent(env, &balance_key);

        Ok(token_id)
    }
}

// ── Queries ──────────────────────────────────────────────────────────

/// Number of tokens minted so far, which is also the next id.
pub fn total_minted(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&RewardKey::NextTokenId)
        .unwrap_or(0)
}

pub fn balance_of(env: &Env, account: &Address) -> u32 {
    let key = RewardKey::Balance(account.clone());
    match env.storage().persistent().get(&key) {
        Some(balance) => {
            bump_persistent(env, &key);
            balance
        }
        None => 0,
    }
}

pub fn owner_of(env: &Env, token_id: u64) -> Result<Address, Error> {
    let key = RewardKey::TokenOwner(token_id);
    let owner = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::TokenNotFound)?;
    bump_persistent(env, &key);
    Ok(owner)
}

// ── Metadata ─────────────────────────────────────────────────────────

pub fn base_uri(env: &Env) -> String {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&RewardKey::BaseUri)
        .unwrap_or_else(|| String::from_str(env, ""))
}

/// Caller authorisation is checked by the entry point.
pub fn set_base_uri(env: &Env, uri: &String) -> Result<(), Error> {
    if uri.len() > MAX_BASE_URI_LEN {
        return Err(Error::InvalidUri);
    }
    env.storage().instance().set(&RewardKey::BaseUri, uri);
    bump_instance(env);
    Ok(())
}

/// Base URI immediately followed by the decimal token id.
pub fn token_uri(env: &Env, token_id: u64) -> Result<String, Error> {
    owner_of(env, token_id)?;

    let base = base_uri(env);
    let base_len = base.len() as usize;
    let mut buf = [0u8; MAX_BASE_URI_LEN as usize + MAX_ID_DIGITS];
    base.copy_into_slice(&mut buf[..base_len]);

    let digits = write_decimal(token_id, &mut buf[base_len..]);
    Ok(String::from_bytes(env, &buf[..base_len + digits]))
}

/// Write `value` in base 10 at the start of `out`, returning the digit count.
fn write_decimal(mut value: u64, out: &mut [u8]) -> usize {
    let mut scratch = [0u8; MAX_ID_DIGITS];
    let mut start = MAX_ID_DIGITS;
    loop {
        start -= 1;
        scratch[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    let digits = &scratch[start..];
    out[..digits.len()].copy_from_slice(digits);
    digits.len()
}
