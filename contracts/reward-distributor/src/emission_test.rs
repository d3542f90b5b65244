#![cfg(test)]

//! Rate-emission policy tests. A mock oracle stands in for the staking
//! system that reports active supply.

use super::*;
use crate::test::{mint, BASE_TIME, EPOCH};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::token::Client as TokenClient;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env};

/// 2,100,000,000.0000 units of active supply in minor units.
const ACTIVE_SUPPLY: i128 = 21_000_000_000_000;

/// 1.5% annual rate.
const RATE_BPS: u32 = 150;

/// Emission for one 600 s epoch at the constants above:
/// 21e12 × 150 × 600 / (10,000 × 31,536,000) = 5,993,150 (floored).
const EPOCH_EMISSION: i128 = 5_993_150;

#[contract]
pub struct MockSupplyOracle;

#[contractimpl]
impl MockSupplyOracle {
    pub fn set_supply(env: Env, supply: i128) {
        env.storage().instance().set(&symbol_short!("supply"), &supply);
    }

    pub fn active_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&symbol_short!("supply"))
            .unwrap_or(0)
    }
}

/// Register the contract under the rate-emission policy with a mock oracle
/// reporting `ACTIVE_SUPPLY`. Returns (env, client, admin, token, oracle).
fn setup_emission() -> (
    Env,
    RewardDistributorContractClient<'static>,
    Address,
    Address,
    Address,
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(BASE_TIME);

    let contract_id = env.register(RewardDistributorContract, ());
    let client = RewardDistributorContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token_admin = Address::generate(&env);
    let token_id = env.register_stellar_asset_contract_v2(token_admin.clone());

    let oracle_id = env.register(MockSupplyOracle, ());
    MockSupplyOracleClient::new(&env, &oracle_id).set_supply(&ACTIVE_SUPPLY);

    client.initialize(
        &admin,
        &token_id.address(),
        &EPOCH,
        &FundingPolicy::RateEmission(RATE_BPS),
    );
    client.set_supply_oracle(&oracle_id);

    (env, client, admin, token_id.address(), oracle_id)
}

// ════════════════════════════════════════════════════════════════════
//  Emission Amount Tests
// ════════════════════════════════════════════════════════════════════

#[test]
fn test_emission_single_strategy() {
    let (env, client, _admin, token, _oracle) = setup_emission();

    let recipient = Address::generate(&env);
    client.set_strategy(&recipient, &10_000);

    // The pool holds far more than one epoch's emission; only the emission
    // amount may leave.
    let funded = 3_500_000_000_000i128;
    mint(&env, &token, &client.address, funded);
    client.distribute();

    let token_client = TokenClient::new(&env, &token);
    assert_eq!(token_client.balance(&recipient), EPOCH_EMISSION);
    assert_eq!(token_client.balance(&client.address), funded - EPOCH_EMISSION);
}

#[test]
fn test_emission_90_10_split() {
    let (env, client, _admin, token, _oracle) = setup_emission();

    let first = Address::generate(&env);
    let second = Address::generate(&env);
    client.set_strategy(&first, &90);
    client.set_strategy(&second, &10);

    mint(&env, &token, &client.address, 3_500_000_000_000);
    client.distribute();

    let token_client = TokenClient::new(&env, &token);
    assert_eq!(token_client.balance(&first), EPOCH_EMISSION * 90 / 100);
    assert_eq!(token_client.balance(&second), EPOCH_EMISSION * 10 / 100);
}

#[test]
fn test_emission_accrues_per_epoch() {
    let (env, client, _admin, token, _oracle) = setup_emission();

    let recipient = Address::generate(&env);
    client.set_strategy(&recipient, &10_000);

    mint(&env, &token, &client.address, 3_500_000_000_000);
    client.distribute();

    env.ledger().set_timestamp(BASE_TIME + EPOCH);
    client.distribute();

    let token_client = TokenClient::new(&env, &token);
    assert_eq!(token_client.balance(&recipient), 2 * EPOCH_EMISSION);
}

// ════════════════════════════════════════════════════════════════════
//  Precondition Tests
// ════════════════════════════════════════════════════════════════════

#[test]
#[should_panic(expected = "supply oracle not configured")]
fn test_emission_without_oracle_panics() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(BASE_TIME);

    let contract_id = env.register(RewardDistributorContract, ());
    let client = RewardDistributorContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    client.initialize(&admin, &token, &EPOCH, &FundingPolicy::RateEmission(RATE_BPS));
    client.set_strategy(&Address::generate(&env), &100);

    client.distribute();
}

#[test]
#[should_panic(expected = "no emission to distribute")]
fn test_emission_zero_supply_panics() {
    let (env, client, _admin, _token, oracle) = setup_emission();

    client.set_strategy(&Address::generate(&env), &100);
    MockSupplyOracleClient::new(&env, &oracle).set_supply(&0);

    client.distribute();
}

#[test]
#[should_panic(expected = "rate must be greater than 0")]
fn test_initialize_zero_rate_panics() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(RewardDistributorContract, ());
    let client = RewardDistributorContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    client.initialize(&admin, &token, &EPOCH, &FundingPolicy::RateEmission(0));
}

#[test]
#[should_panic(expected = "rate exceeds 10000 bps")]
fn test_initialize_rate_above_bps_panics() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(RewardDistributorContract, ());
    let client = RewardDistributorContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token = Address::generate(&env);
    client.initialize(&admin, &token, &EPOCH, &FundingPolicy::RateEmission(10_001));
}
