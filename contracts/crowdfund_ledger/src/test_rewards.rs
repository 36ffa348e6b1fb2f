extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Env, String};

use crate::{CrowdfundLedger, CrowdfundLedgerClient, Error};

const UNIT: i128 = 10_000_000;

fn setup() -> (Env, CrowdfundLedgerClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(token_admin)
        .address();
    let contract_id = env.register(CrowdfundLedger, ());
    let client = CrowdfundLedgerClient::new(&env, &contract_id);
    client.init(&owner, &token, &UNIT);
    (env, client, owner, token)
}

fn create_campaign(env: &Env, client: &CrowdfundLedgerClient, owner: &Address) -> u64 {
    let creator = Address::generate(env);
    client.set_allowed(owner, &creator, &true);
    client.create_campaign(
        &creator,
        &String::from_str(env, "Firefighter Fund"),
        &String::from_str(env, "Helping firefighters with funding"),
        &(100 * UNIT),
        &30,
    )
}

fn contributor(env: &Env, token: &Address) -> Address {
    let account = Address::generate(env);
    token::StellarAssetClient::new(env, token).mint(&account, &(100 * UNIT));
    account
}

#[test]
fn test_no_reward_below_threshold() {
    let (env, client, owner, token) = setup();
    let id = create_campaign(&env, &client, &owner);
    let alice = contributor(&env, &token);

    client.contribute(&id, &alice, &(UNIT - 1));

    assert_eq!(client.reward_token_of(&id, &alice), None);
    assert!(!client.has_reward(&id, &alice));
    assert_eq!(client.balance_of(&alice), 0);
    assert_eq!(client.total_minted(), 0);
}

#[test]
fn test_reward_at_exact_threshold() {
    let (env, client, owner, token) = setup();
    let id = create_campaign(&env, &client, &owner);
    let alice = contributor(&env, &token);

    client.contribute(&id, &alice, &UNIT);

    assert_eq!(client.reward_token_of(&id, &alice), Some(0));
    assert_eq!(client.balance_of(&alice), 1);
    assert_eq!(client.owner_of(&0), alice);
}

#[test]
fn test_reward_issued_once_across_split_contributions() {
    let (env, client, owner, token) = setup();
    let id = create_campaign(&env, &client, &owner);
    let alice = contributor(&env, &token);

    // 0.6 + 0.5 + 0.5: the reward lands on the second contribution only.
    client.contribute(&id, &alice, &(UNIT * 6 / 10));
    assert_eq!(client.reward_token_of(&id, &alice), None);

    client.contribute(&id, &alice, &(UNIT / 2));
    assert_eq!(client.reward_token_of(&id, &alice), Some(0));
    assert_eq!(client.total_minted(), 1);

    client.contribute(&id, &alice, &(UNIT / 2));
    assert_eq!(client.reward_token_of(&id, &alice), Some(0));
    assert_eq!(client.balance_of(&alice), 1);
    assert_eq!(client.total_minted(), 1);
    assert_eq!(client.get_contribution(&id, &alice), UNIT * 16 / 10);
}

#[test]
fn test_reward_scoped_per_campaign() {
    let (env, client, owner, token) = setup();
    let first = create_campaign(&env, &client, &owner);
    let second = create_campaign(&env, &client, &owner);
    let alice = contributor(&env, &token);

    client.contribute(&first, &alice, &(2 * UNIT));
    client.contribute(&second, &alice, &(UNIT / 2));
    assert_eq!(client.reward_token_of(&second, &alice), None);

    client.contribute(&second, &alice, &(UNIT / 2));
    assert_eq!(client.reward_token_of(&first, &alice), Some(0));
    assert_eq!(client.reward_token_of(&second, &alice), Some(1));
    assert_eq!(client.balance_of(&alice), 2);
}

#[test]
fn test_token_ids_shared_across_campaigns_and_contributors() {
    let (env, client, owner, token) = setup();
    let first = create_campaign(&env, &client, &owner);
    let second = create_campaign(&env, &client, &owner);
    let alice = contributor(&env, &token);
    let bob = contributor(&env, &token);

    client.contribute(&second, &bob, &UNIT);
    client.contribute(&first, &alice, &UNIT);
    client.contribute(&second, &alice, &UNIT);

    assert_eq!(client.reward_token_of(&second, &bob), Some(0));
    assert_eq!(client.reward_token_of(&first, &alice), Some(1));
    assert_eq!(client.reward_token_of(&second, &alice), Some(2));
    assert_eq!(client.owner_of(&0), bob);
    assert_eq!(client.owner_of(&2), alice);
    assert_eq!(client.total_minted(), 3);
}

#[test]
fn test_zero_threshold_rewards_first_contribution() {
    let (env, client, owner, token) = setup();
    client.set_reward_threshold(&owner, &0);
    let id = create_campaign(&env, &client, &owner);
    let alice = contributor(&env, &token);

    client.contribute(&id, &alice, &1);
    assert_eq!(client.reward_token_of(&id, &alice), Some(0));
}

#[test]
fn test_raised_threshold_blocks_later_reward() {
    let (env, client, owner, token) = setup();
    let id = create_campaign(&env, &client, &owner);
    let alice = contributor(&env, &token);

    client.contribute(&id, &alice, &(UNIT / 2));
    client.set_reward_threshold(&owner, &(10 * UNIT));
    client.contribute(&id, &alice, &(UNIT / 2));

    assert_eq!(client.reward_token_of(&id, &alice), None);
}

#[test]
fn test_reward_queries_on_unknown_campaign() {
    let (env, client, _, _) = setup();
    let alice = Address::generate(&env);
    assert_eq!(
        client.try_reward_token_of(&7, &alice),
        Err(Ok(Error::CampaignNotFound))
    );
    assert_eq!(
        client.try_has_reward(&7, &alice),
        Err(Ok(Error::CampaignNotFound))
    );
}

#[test]
fn test_unminted_token_lookups_fail() {
    let (_, client, _, _) = setup();
    assert_eq!(client.try_owner_of(&0), Err(Ok(Error::TokenNotFound)));
    assert_eq!(client.try_token_uri(&0), Err(Ok(Error::TokenNotFound)));
}

#[test]
fn test_token_uri_appends_id_to_base() {
    let (env, client, owner, token) = setup();
    let id = create_campaign(&env, &client, &owner);
    let alice = contributor(&env, &token);
    client.contribute(&id, &alice, &UNIT);

    assert_eq!(client.base_uri(), String::from_str(&env, ""));
    assert_eq!(client.token_uri(&0), String::from_str(&env, "0"));

    let base = String::from_str(&env, "ipfs://bafybeigdyrzt/");
    client.set_base_uri(&owner, &base);
    assert_eq!(client.base_uri(), base);
    assert_eq!(
        client.token_uri(&0),
        String::from_str(&env, "ipfs://bafybeigdyrzt/0")
    );
}

#[test]
fn test_base_uri_length_limit() {
    let (env, client, owner, _) = setup();
    let long = std::string::String::from("x").repeat(201);
    assert_eq!(
        client.try_set_base_uri(&owner, &String::from_str(&env, &long)),
        Err(Ok(Error::InvalidUri))
    );

    let max = std::string::String::from("y").repeat(200);
    client.set_base_uri(&owner, &String::from_str(&env, &max));
    assert_eq!(client.base_uri().len(), 200);
}
