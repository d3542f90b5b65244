#![no_std]

//! # Reward Distribution Contract
//!
//! Periodically splits a pool of tokens held by the contract among a
//! configurable set of weighted recipients. Distribution is gated by a
//! fixed-length epoch and may be triggered by any account once the epoch
//! has elapsed.
//!
//! ## Distribution Model
//!
//! The contract maintains an ordered list of strategies, each pairing a
//! recipient with an integer weight. When rewards are distributed:
//!
//! 1. Determines the distributable total from the configured funding policy
//! 2. Calculates each recipient's share: `amount = total × weight / weight_sum`
//! 3. Transfers tokens to each recipient, skipping zero amounts
//! 4. Advances the epoch gate to `now + epoch_length`
//!
//! Shares use integer floor division, so the sum of payouts never exceeds
//! the total. The undistributed remainder (always smaller than the weight
//! sum) stays in the contract balance and is swept by a later epoch.
//!
//! ## Funding Policies
//!
//! - `BalanceDrain`: distributes the contract's entire token balance
//! - `RateEmission`: distributes an annualized fraction of the active supply
//!   reported by a configured oracle, pro-rated to the epoch length
//!
//! ## Access Model
//!
//! - Admin-only: strategy, registry, and oracle configuration
//! - Permissionless: `distribute` — any account may trigger a due payout

use soroban_sdk::{
    contract, contractclient, contractimpl, contracttype, token, Address, Env, Vec,
};

pub mod events;

/// Maximum weight of a single strategy.
pub const MAX_WEIGHT: u32 = 65_535;

/// Maximum number of strategies.
pub const MAX_STRATEGIES: u32 = 50;

/// Basis point denominator for rate-emission math.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Seconds in a 365-day year, used to pro-rate annual emission rates.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Supply oracle consumed by rate-emission deployments. Any contract that
/// exposes `active_supply` can back it, e.g. a staking system reporting the
/// actively staked amount.
#[contractclient(name = "SupplyOracleClient")]
pub trait SupplyOracle {
    fn active_supply(env: Env) -> i128;
}

// ════════════════════════════════════════════════════════════════════
//  Storage types
// ════════════════════════════════════════════════════════════════════

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract administrator
    Admin,
    /// Singleton configuration and epoch state
    Config,
    /// Ordered vector of strategies
    Strategies,
    /// Optional recipient allow-list
    Registry,
    /// Supply oracle for rate-emission deployments
    SupplyOracle,
    /// Distribution record by sequence number
    Distribution(u64),
    /// Number of distributions executed
    DistributionCount,
}

/// A reward strategy: one recipient and its relative weight.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    /// Recipient address
    pub recipient: Address,
    /// Relative weight, 1..=65,535
    pub weight: u32,
}

/// How the distributable total is determined each epoch.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum FundingPolicy {
    /// Drain the contract's full token balance.
    BalanceDrain,
    /// Emit `active_supply × rate_bps / 10,000`, pro-rated from a year down
    /// to one epoch. The rate is in annual basis points.
    RateEmission(u32),
}

/// Singleton configuration, written once at initialization. Only
/// `next_distribution` changes afterward, and only via `distribute`.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Token distributed as rewards
    pub token: Address,
    /// Seconds between allowed distributions
    pub epoch_length: u64,
    /// Funding policy selected at initialization
    pub funding: FundingPolicy,
    /// Earliest timestamp at which the next distribution may run
    pub next_distribution: u64,
}

/// Audit record of one executed distribution.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionRecord {
    /// Distributable total for this epoch
    pub total: i128,
    /// Sum of all strategy weights at execution time
    pub weight_sum: u32,
    /// Ledger timestamp of execution
    pub timestamp: u64,
    /// Per-strategy payout amounts, in table order
    pub amounts: Vec<i128>,
}

// ════════════════════════════════════════════════════════════════════
//  Contract
// ════════════════════════════════════════════════════════════════════

#[contract]
pub struct RewardDistributorContract;

#[contractimpl]
impl RewardDistributorContract {
    // ── Initialization ──────────────────────────────────────────────

    /// Initialize the contract.
    ///
    /// # Arguments
    /// * `admin` - Administrator allowed to change strategies and registry
    /// * `token` - Token contract used for reward transfers
    /// * `epoch_length` - Seconds between allowed distributions
    /// * `funding` - Funding policy, fixed for the lifetime of the contract
    ///
    /// The epoch gate starts at the current ledger timestamp, so the first
    /// `distribute` call is eligible immediately.
    ///
    /// # Panics
    /// - If already initialized
    /// - If `epoch_length` is zero
    /// - If a rate-emission rate is zero or above 10,000 bps
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        epoch_length: u64,
        funding: FundingPolicy,
    ) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic!("already initialized");
        }
        admin.require_auth();
        assert!(epoch_length > 0, "epoch length must be positive");
        if let FundingPolicy::RateEmission(rate_bps) = &funding {
            assert!(*rate_bps > 0, "rate must be greater than 0");
            assert!(*rate_bps <= 10_000, "rate exceeds 10000 bps");
        }

        let config = Config {
            token,
            epoch_length,
            funding,
            next_distribution: env.ledger().timestamp(),
        };
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage()
            .instance()
            .set(&DataKey::DistributionCount, &0u64);
    }

    // ── Admin: Strategy Configuration ───────────────────────────────

    /// Insert a strategy or update the weight of an existing one.
    ///
    /// Order is preserved: a new recipient is appended, an existing one is
    /// updated in place.
    ///
    /// # Arguments
    /// * `recipient` - Reward recipient address
    /// * `weight` - Relative weight, 1..=65,535
    ///
    /// # Panics
    /// - If caller is not admin
    /// - If `weight` is zero or above 65,535
    /// - If a registry is configured and `recipient` is not on it
    /// - If inserting would exceed the strategy limit
    pub fn set_strategy(env: Env, recipient: Address, weight: u32) {
        Self::require_admin(&env);
        assert!(weight > 0, "weight must be greater than 0");
        assert!(weight <= MAX_WEIGHT, "weight exceeds maximum");

        if let Some(registry) = env
            .storage()
            .instance()
            .get::<_, Vec<Address>>(&DataKey::Registry)
        {
            assert!(registry.contains(&recipient), "recipient not registered");
        }

        let mut strategies = Self::load_strategies(&env);
        match Self::find_strategy(&strategies, &recipient) {
            Some(i) => {
                strategies.set(
                    i,
                    Strategy {
                        recipient: recipient.clone(),
                        weight,
                    },
                );
            }
            None => {
                assert!(
                    strategies.len() < MAX_STRATEGIES,
                    "cannot exceed 50 strategies"
                );
                strategies.push_back(Strategy {
                    recipient: recipient.clone(),
                    weight,
                });
            }
        }
        env.storage().instance().set(&DataKey::Strategies, &strategies);

        events::emit_strategy_set(&env, &recipient, weight);
    }

    /// Delete a strategy.
    ///
    /// # Panics
    /// - If caller is not admin
    /// - If no strategy exists for `recipient`
    pub fn del_strategy(env: Env, recipient: Address) {
        Self::require_admin(&env);

        let mut strategies = Self::load_strategies(&env);
        let i = Self::find_strategy(&strategies, &recipient).expect("strategy not found");
        strategies.remove(i);
        env.storage().instance().set(&DataKey::Strategies, &strategies);

        events::emit_strategy_deleted(&env, &recipient);
    }

    // ── Admin: Recipient Registry ───────────────────────────────────

    /// Set the recipient allow-list. While a registry is set, `set_strategy`
    /// only accepts recipients on it. Existing strategies are unaffected.
    ///
    /// # Panics
    /// - If caller is not admin
    /// - If `recipients` is empty
    pub fn set_registry(env: Env, recipients: Vec<Address>) {
        Self::require_admin(&env);
        assert!(!recipients.is_empty(), "registry must not be empty");
        env.storage().instance().set(&DataKey::Registry, &recipients);

        events::emit_registry_set(&env, recipients.len());
    }

    /// Remove the recipient allow-list; any recipient is accepted again.
    ///
    /// # Panics
    /// - If caller is not admin
    pub fn clear_registry(env: Env) {
        Self::require_admin(&env);
        env.storage().instance().remove(&DataKey::Registry);

        events::emit_registry_cleared(&env);
    }

    /// Set the supply oracle consulted by rate-emission deployments.
    ///
    /// # Panics
    /// - If caller is not admin
    pub fn set_supply_oracle(env: Env, oracle: Address) {
        Self::require_admin(&env);
        env.storage().instance().set(&DataKey::SupplyOracle, &oracle);
    }

    // ── Distribution Execution ──────────────────────────────────────

    /// Distribute rewards to all configured strategies.
    ///
    /// No auth is required on the caller: distribution is a public utility
    /// and any account may trigger it once the epoch has elapsed.
    ///
    /// # Process
    /// 1. Checks the epoch gate against the ledger clock
    /// 2. Determines the distributable total per the funding policy
    /// 3. Splits the total across strategies by weight, floor division
    /// 4. Transfers each nonzero share from the contract to its recipient
    /// 5. Advances the gate and records the distribution
    ///
    /// The remainder of the floor division is not paid out; it remains in
    /// the contract balance until a later epoch sweeps it.
    ///
    /// # Panics
    /// - If not initialized
    /// - If the epoch has not finished
    /// - If the distributable total is zero
    /// - If no strategies are configured
    /// - If any token transfer fails
    pub fn distribute(env: Env) {
        let mut config: Config = env
            .storage()
            .instance()
            .get(&DataKey::Config)
            .expect("not initialized");

        let now = env.ledger().timestamp();
        assert!(now >= config.next_distribution, "epoch not finished");

        let self_addr = env.current_contract_address();
        let token_client = token::Client::new(&env, &config.token);

        let total: i128 = match &config.funding {
            FundingPolicy::BalanceDrain => {
                let balance = token_client.balance(&self_addr);
                assert!(balance > 0, "no balance to distribute");
                balance
            }
            FundingPolicy::RateEmission(rate_bps) => {
                let emission = Self::epoch_emission(&env, *rate_bps, config.epoch_length);
                assert!(emission > 0, "no emission to distribute");
                emission
            }
        };

        let strategies = Self::load_strategies(&env);
        assert!(!strategies.is_empty(), "no strategies configured");

        let mut weight_sum = 0u32;
        for i in 0..strategies.len() {
            weight_sum += strategies.get(i).unwrap().weight;
        }

        let mut amounts = Vec::new(&env);
        for i in 0..strategies.len() {
            let strategy = strategies.get(i).unwrap();
            let amount = total * (strategy.weight as i128) / (weight_sum as i128);
            amounts.push_back(amount);
        }

        for i in 0..strategies.len() {
            let amount = amounts.get(i).unwrap();
            if amount > 0 {
                let strategy = strategies.get(i).unwrap();
                token_client.transfer(&self_addr, &strategy.recipient, &amount);
            }
        }

        config.next_distribution = now + config.epoch_length;
        env.storage().instance().set(&DataKey::Config, &config);

        let seq: u64 = env
            .storage()
            .instance()
            .get(&DataKey::DistributionCount)
            .unwrap_or(0);
        let record = DistributionRecord {
            total,
            weight_sum,
            timestamp: now,
            amounts,
        };
        env.storage().instance().set(&DataKey::Distribution(seq), &record);
        env.storage()
            .instance()
            .set(&DataKey::DistributionCount, &(seq + 1));

        events::emit_distributed(
            &env,
            total,
            weight_sum,
            strategies.len(),
            now,
            config.next_distribution,
        );
    }

    // ── Read-only Queries ───────────────────────────────────────────

    /// Get all strategies in table order.
    pub fn get_strategies(env: Env) -> Vec<Strategy> {
        Self::load_strategies(&env)
    }

    /// Get the strategy for a recipient, if any.
    pub fn get_strategy(env: Env, recipient: Address) -> Option<Strategy> {
        let strategies = Self::load_strategies(&env);
        Self::find_strategy(&strategies, &recipient).map(|i| strategies.get(i).unwrap())
    }

    /// Get the total weight of all strategies.
    pub fn get_total_weight(env: Env) -> u32 {
        let strategies = Self::load_strategies(&env);
        let mut total = 0u32;
        for i in 0..strategies.len() {
            total += strategies.get(i).unwrap().weight;
        }
        total
    }

    /// Get the contract configuration.
    pub fn get_config(env: Env) -> Config {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .expect("not initialized")
    }

    /// Get the earliest timestamp at which the next distribution may run.
    pub fn get_next_distribution(env: Env) -> u64 {
        Self::get_config(env).next_distribution
    }

    /// Get the contract admin.
    pub fn get_admin(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("not initialized")
    }

    /// Get the recipient allow-list, if one is set.
    pub fn get_registry(env: Env) -> Option<Vec<Address>> {
        env.storage().instance().get(&DataKey::Registry)
    }

    /// Get a distribution record by sequence number.
    pub fn get_distribution(env: Env, seq: u64) -> Option<DistributionRecord> {
        env.storage().instance().get(&DataKey::Distribution(seq))
    }

    /// Get the number of distributions executed.
    pub fn get_distribution_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::DistributionCount)
            .unwrap_or(0)
    }

    // ── Internal Helpers ────────────────────────────────────────────

    fn require_admin(env: &Env) -> Address {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("not initialized");
        admin.require_auth();
        admin
    }

    fn load_strategies(env: &Env) -> Vec<Strategy> {
        env.storage()
            .instance()
            .get(&DataKey::Strategies)
            .unwrap_or_else(|| Vec::new(env))
    }

    fn find_strategy(strategies: &Vec<Strategy>, recipient: &Address) -> Option<u32> {
        for i in 0..strategies.len() {
            if strategies.get(i).unwrap().recipient == *recipient {
                return Some(i);
            }
        }
        None
    }

    /// Epoch emission under the rate policy: the annual rate applied to the
    /// oracle's active supply, pro-rated to one epoch. Multiplications run
    /// before the division so no precision is lost below the final floor.
    fn epoch_emission(env: &Env, rate_bps: u32, epoch_length: u64) -> i128 {
        let oracle: Address = env
            .storage()
            .instance()
            .get(&DataKey::SupplyOracle)
            .expect("supply oracle not configured");
        let supply = SupplyOracleClient::new(env, &oracle).active_supply();
        supply * (rate_bps as i128) * (epoch_length as i128)
            / (BPS_DENOMINATOR * SECONDS_PER_YEAR as i128)
    }
}



#[cfg(test)]
mod emission_test;
