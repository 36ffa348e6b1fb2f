extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events, Ledger},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{
    AllowedChanged, CampaignCreated, CampaignFunded, FundsWithdrawn, OwnershipTransferred,
    Refunded, RewardIssued, ThresholdChanged,
};
use crate::{claim_window_end, CrowdfundLedger, CrowdfundLedgerClient, SECONDS_PER_DAY};

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

fn setup_with_campaign(goal: i128) -> (Env, CrowdfundLedgerClient<'static>, Address, Address, u64) {
    let (env, client, owner, token) = setup();
    let creator = Address::generate(&env);
    client.set_allowed(&owner, &creator, &true);
    let id = client.create_campaign(
        &creator,
        &String::from_str(&env, "Firefighter Fund"),
        &String::from_str(&env, "Helping firefighters with funding"),
        &goal,
        &1,
    );
    (env, client, token, creator, id)
}

fn mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, token).mint(to, &amount);
}

#[test]
fn test_allowed_event_emitted_on_every_update() {
    let (env, client, owner, _) = setup();
    let account = Address::generate(&env);

    for _ in 0..2 {
        client.set_allowed(&owner, &account, &true);

        let all_events = env.events().all();
        let last_event = all_events.last().expect("No events found");
        assert_eq!(last_event.0, client.address);
        assert_eq!(
            last_event.1,
            vec![&env, symbol_short!("allowed").into_val(&env)]
        );
        let data: AllowedChanged = last_event.2.try_into_val(&env).unwrap();
        assert_eq!(
            data,
            AllowedChanged {
                account: account.clone(),
                allowed: true,
            }
        );
    }

    client.set_allowed(&owner, &account, &false);
    let last_event = env.events().all().last().expect("No events found");
    let data: AllowedChanged = last_event.2.try_into_val(&env).unwrap();
    assert!(!data.allowed);
}

#[test]
fn test_threshold_and_owner_events() {
    let (env, client, owner, _) = setup();

    client.set_reward_threshold(&owner, &(2 * UNIT));
    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("threshold").into_val(&env)]
    );
    let data: ThresholdChanged = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        ThresholdChanged {
            previous: UNIT,
            threshold: 2 * UNIT,
        }
    );

    let successor = Address::generate(&env);
    client.transfer_ownership(&owner, &successor);
    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.1, vec![&env, symbol_short!("owner").into_val(&env)]);
    let data: OwnershipTransferred = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        OwnershipTransferred {
            previous_owner: owner,
            new_owner: successor,
        }
    );
}

#[test]
fn test_campaign_created_event() {
    let (env, client, _, creator, id) = setup_with_campaign(5 * UNIT);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), campaign_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("created").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CampaignCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignCreated {
            campaign_id: 1,
            creator,
            title: String::from_str(&env, "Firefighter Fund"),
            goal: 5 * UNIT,
            deadline: env.ledger().timestamp() + SECONDS_PER_DAY,
        }
    );
}

#[test]
fn test_campaign_funded_event() {
    let (env, client, token, _, id) = setup_with_campaign(5 * UNIT);
    let contributor = Address::generate(&env);
    mint(&env, &token, &contributor, UNIT);

    client.contribute(&id, &contributor, &(UNIT / 2));

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Below the threshold, so the funding event is the last one.
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("funded").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CampaignFunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CampaignFunded {
            campaign_id: id,
            contributor,
            amount: UNIT / 2,
        }
    );
}

#[test]
fn test_reward_issued_event_follows_funding() {
    let (env, client, token, _, id) = setup_with_campaign(5 * UNIT);
    let contributor = Address::generate(&env);
    mint(&env, &token, &contributor, 2 * UNIT);

    client.contribute(&id, &contributor, &(2 * UNIT));

    let all_events = env.events().all();
    let n = all_events.len();
    assert!(n >= 2);

    let funded = all_events.get(n - 2).unwrap();
    assert_eq!(
        funded.1,
        vec![&env, symbol_short!("funded").into_val(&env), id.into_val(&env)]
    );

    let reward = all_events.get(n - 1).unwrap();
    assert_eq!(reward.0, client.address);
    assert_eq!(
        reward.1,
        vec![&env, symbol_short!("reward").into_val(&env), id.into_val(&env)]
    );
    let event_data: RewardIssued = reward.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        RewardIssued {
            contributor,
            token_id: 0,
        }
    );
}

#[test]
fn test_refunded_event() {
    let (env, client, token, _, id) = setup_with_campaign(5 * UNIT);
    let contributor = Address::generate(&env);
    mint(&env, &token, &contributor, 2 * UNIT);
    client.contribute(&id, &contributor, &(2 * UNIT));

    let deadline = client.get_campaign(&id).deadline;
    env.ledger().set_timestamp(deadline + 1);
    client.refund(&id, &contributor);

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("refunded").into_val(&env), id.into_val(&env)]
    );
    let event_data: Refunded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        Refunded {
            campaign_id: id,
            contributor,
            amount: 2 * UNIT,
        }
    );
}

#[test]
fn test_withdrawn_event_carries_funds_raised() {
    let (env, client, token, creator, id) = setup_with_campaign(5 * UNIT);
    let contributor = Address::generate(&env);
    mint(&env, &token, &contributor, 6 * UNIT);
    client.contribute(&id, &contributor, &(6 * UNIT));

    let deadline = client.get_campaign(&id).deadline;
    env.ledger().set_timestamp(claim_window_end(deadline) + 1);
    client.withdraw_funds(&id, &creator);

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    assert_eq!(
        last_event.1,
        vec![&env, symbol_short!("withdrawn").into_val(&env), id.into_val(&env)]
    );
    let event_data: FundsWithdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            campaign_id: id,
            amount: client.get_funds_raised(&id),
        }
    );
}
