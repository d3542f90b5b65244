//! # Structured Event Emissions
//!
//! Defines and emits indexable events for the reward distribution lifecycle.
//!
//! ## Event Types
//!
//! | Event           | Description                                       |
//! |-----------------|---------------------------------------------------|
//! | StrategySet     | Emitted when a strategy is inserted or updated    |
//! | StrategyDeleted | Emitted when a strategy is removed                |
//! | RegistrySet     | Emitted when the recipient allow-list is replaced |
//! | RegistryCleared | Emitted when the recipient allow-list is removed  |
//! | Distributed     | Emitted after a successful distribution           |
//!
//! Each event carries a short topic symbol for filtering plus a structured
//! payload with the relevant fields.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ════════════════════════════════════════════════════════════════════
//  Event Topics
// ════════════════════════════════════════════════════════════════════

/// Topic for strategy insert/update events
pub const TOPIC_STRATEGY_SET: Symbol = symbol_short!("strat_set");
/// Topic for strategy deletion events
pub const TOPIC_STRATEGY_DELETED: Symbol = symbol_short!("strat_del");
/// Topic for registry replacement events
pub const TOPIC_REGISTRY_SET: Symbol = symbol_short!("reg_set");
/// Topic for registry removal events
pub const TOPIC_REGISTRY_CLEARED: Symbol = symbol_short!("reg_clr");
/// Topic for distribution events
pub const TOPIC_DISTRIBUTED: Symbol = symbol_short!("dist");

// ════════════════════════════════════════════════════════════════════
//  Event Data Structures
// ════════════════════════════════════════════════════════════════════

/// Event data for a strategy insert or update
#[contracttype]
#[derive(Clone, Debug)]
pub struct StrategySetEvent {
    /// Recipient whose strategy changed
    pub recipient: Address,
    /// New weight
    pub weight: u32,
}

/// Event data for a strategy deletion
#[contracttype]
#[derive(Clone, Debug)]
pub struct StrategyDeletedEvent {
    /// Recipient whose strategy was removed
    pub recipient: Address,
}

/// Event data for a registry replacement
#[contracttype]
#[derive(Clone, Debug)]
pub struct RegistrySetEvent {
    /// Number of addresses on the new allow-list
    pub size: u32,
}

/// Event data for a completed distribution
#[contracttype]
#[derive(Clone, Debug)]
pub struct DistributedEvent {
    /// Distributable total for this epoch
    pub total: i128,
    /// Sum of all strategy weights at execution time
    pub weight_sum: u32,
    /// Number of strategies paid
    pub recipients: u32,
    /// Ledger timestamp of execution
    pub timestamp: u64,
    /// Earliest timestamp of the next distribution
    pub next_distribution: u64,
}

// ════════════════════════════════════════════════════════════════════
//  Emission Helpers
// ════════════════════════════════════════════════════════════════════

/// Emit a strategy set event.
pub fn emit_strategy_set(env: &Env, recipient: &Address, weight: u32) {
    let event = StrategySetEvent {
        recipient: recipient.clone(),
        weight,
    };
    env.events()
        .publish((TOPIC_STRATEGY_SET, recipient.clone()), event);
}

/// Emit a strategy deleted event.
pub fn emit_strategy_deleted(env: &Env, recipient: &Address) {
    let event = StrategyDeletedEvent {
        recipient: recipient.clone(),
    };
    env.events()
        .publish((TOPIC_STRATEGY_DELETED, recipient.clone()), event);
}

/// Emit a registry set event.
pub fn emit_registry_set(env: &Env, size: u32) {
    env.events()
        .publish((TOPIC_REGISTRY_SET,), RegistrySetEvent { size });
}

/// Emit a registry cleared event.
pub fn emit_registry_cleared(env: &Env) {
    env.events().publish((TOPIC_REGISTRY_CLEARED,), ());
}

/// Emit a distribution event.
///
/// Indexers can reconstruct per-recipient payouts from the stored
/// `DistributionRecord`; the event carries the epoch-level summary.
pub fn emit_distributed(
    env: &Env,
    total: i128,
    weight_sum: u32,
    recipients: u32,
    timestamp: u64,
    next_distribution: u64,
) {
    let event = DistributedEvent {
        total,
        weight_sum,
        recipients,
        timestamp,
        next_distribution,
    };
    env.events().publish((TOPIC_DISTRIBUTED,), event);
}
