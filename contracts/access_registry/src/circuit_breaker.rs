use crate::{events, require_admin, ContractError};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Types ─────────────────────────────────────────────────────

/// Defines the scope of the pause mechanism
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts every state-changing registry operation
    Global,
    /// Halts a single operation, identified by its short symbol
    Function(Symbol),
}

// ── Scopes used by the registry ──────────────────────────────

pub fn request_access_scope() -> PauseScope {
    PauseScope::Function(symbol_short!("REQ_ACC"))
}

pub fn respond_scope() -> PauseScope {
    PauseScope::Function(symbol_short!("RESP_REQ"))
}

pub fn revoke_scope() -> PauseScope {
    PauseScope::Function(symbol_short!("REV_ACC"))
}

pub fn extend_scope() -> PauseScope {
    PauseScope::Function(symbol_short!("EXT_ACC"))
}

pub fn add_record_scope() -> PauseScope {
    PauseScope::Function(symbol_short!("ADD_REC"))
}

// ── Storage Keys ─────────────────────────────────────────────

pub fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

pub fn function_pause_key(func: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), func.clone())
}

// ── Core Logistics ───────────────────────────────────────────

/// Returns `true` if `scope` is halted. A global pause halts every function scope.
pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    if env
        .storage()
        .instance()
        .get(&global_pause_key())
        .unwrap_or(false)
    {
        return true;
    }

    match scope {
        PauseScope::Global => false,
        PauseScope::Function(func_name) => env
            .storage()
            .instance()
            .get(&function_pause_key(func_name))
            .unwrap_or(false),
    }
}

/// Fails with `Paused` if `scope` (or the whole contract) is halted.
pub fn require_not_paused(env: &Env, scope: &PauseScope) -> Result<(), ContractError> {
    if is_paused(env, scope) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

fn set_flag(env: &Env, scope: &PauseScope, paused: bool) {
    match scope {
        PauseScope::Global => {
            env.storage().instance().set(&global_pause_key(), &paused);
        }
        PauseScope::Function(func_name) => {
            env.storage()
                .instance()
                .set(&function_pause_key(func_name), &paused);
        }
    }
}

/// Engages a circuit breaker for the specified scope. Admin only.
pub fn pause_contract(env: &Env, caller: &Address, scope: PauseScope) -> Result<(), ContractError> {
    require_admin(env, caller)?;
    set_flag(env, &scope, true);
    events::publish_contract_paused(env, caller.clone(), scope);
    Ok(())
}

/// Releases a circuit breaker for the specified scope. Admin only.
pub fn resume_contract(
    env: &Env,
    caller: &Address,
    scope: PauseScope,
) -> Result<(), ContractError> {
    require_admin(env, caller)?;
    set_flag(env, &scope, false);
    events::publish_contract_resumed(env, caller.clone(), scope);
    Ok(())
}
