#![no_std]

pub mod circuit_breaker;
pub mod errors;
pub mod events;
pub mod storage;
pub mod validation;

use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, Address, Env, Map, String, Symbol,
    Vec,
};

use registry_common::{expiry, RateLimiterConfig, RateLimiterState};

pub use circuit_breaker::PauseScope;
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use validation::ZERO_ACCOUNT;

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const RATE_CFG: Symbol = symbol_short!("RL_CFG");

/// Lifecycle of a single access request.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RequestStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
}

impl RequestStatus {
    /// Raw status code as rendered by client applications.
    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn label(&self) -> &'static str {
        registry_common::status_label(self.code())
    }
}

/// One request for time-bounded access to a patient's records.
///
/// `granted_at` and `expires_at` stay zero unless the request is approved.
/// They describe the grant as issued; the live grant may since have been
/// extended or revoked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequest {
    pub requester: Address,
    pub requested_at: u64,
    pub status: RequestStatus,
    pub duration_hours: u32,
    pub granted_at: u64,
    pub expires_at: u64,
}

/// Pointer to a file held by the off-chain content-addressed store.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub content_id: String,
    pub display_name: String,
    pub uploader: Address,
    pub created_at: u64,
}

/// A requester whose live grant is currently valid.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActiveAccessor {
    pub requester: Address,
    pub expires_at: u64,
}

/// Fails unless `caller` is the configured admin.
pub(crate) fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

#[contract]
pub struct AccessRegistryContract;

#[contractimpl]
impl AccessRegistryContract {
    fn enforce_rate_limit(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let cfg: Option<(u64, u64)> = env.storage().instance().get(&RATE_CFG);
        let cfg = match cfg {
            Some(c) => RateLimiterConfig::from(c),
            None => return Ok(()), // No config set -> unlimited
        };

        if !cfg.is_enabled() {
            return Ok(());
        }

        let now = env.ledger().timestamp();
        let mut state = RateLimiterState::from(storage::rate_limit_state(env, caller, now));

        if !state.record_hit(now, &cfg) {
            return Err(ContractError::RateLimitExceeded);
        }

        storage::set_rate_limit_state(env, caller, &state.to_parts());

        Ok(())
    }

    // ======================== Lifecycle ========================

    /// Initialize the contract with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage()
            .instance()
            .extend_ttl(storage::TTL_THRESHOLD, storage::TTL_EXTEND_TO);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    /// Configure per-address rate limiting for request filing and record uploads.
    pub fn set_rate_limit_config(
        env: Env,
        caller: Address,
        max_requests_per_window: u64,
        window_duration_seconds: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        if max_requests_per_window == 0 || window_duration_seconds == 0 {
            return Err(ContractError::InvalidInput);
        }

        require_admin(&env, &caller)?;

        env.storage().instance().set(
            &RATE_CFG,
            &(max_requests_per_window, window_duration_seconds),
        );

        Ok(())
    }

    /// Return the current rate limiting configuration, if any.
    pub fn get_rate_limit_config(env: Env) -> Option<(u64, u64)> {
        env.storage().instance().get(&RATE_CFG)
    }

    pub fn pause_contract(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        caller.require_auth();
        circuit_breaker::pause_contract(&env, &caller, scope)
    }

    pub fn resume_contract(
        env: Env,
        caller: Address,
        scope: PauseScope,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        circuit_breaker::resume_contract(&env, &caller, scope)
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        circuit_breaker::is_paused(&env, &scope)
    }

    // ======================== Access requests ========================

    /// File a request for `duration_hours` of access to `patient`'s records.
    /// Returns the request's index in the patient's history.
    ///
    /// Any address may file against any patient and histories are never
    /// pruned. Deployments open to the public should configure
    /// `set_rate_limit_config`, since `get_requests` and
    /// `get_active_accessors` read the whole history.
    pub fn request_access(
        env: Env,
        patient: Address,
        requester: Address,
        duration_hours: u32,
    ) -> Result<u64, ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::request_access_scope())?;
        requester.require_auth();

        validation::validate_patient(&env, &patient)?;
        validation::validate_duration(duration_hours)?;
        if requester == patient {
            return Err(ContractError::SelfRequest);
        }

        Self::enforce_rate_limit(&env, &requester)?;

        let request = AccessRequest {
            requester: requester.clone(),
            requested_at: env.ledger().timestamp(),
            status: RequestStatus::Pending,
            duration_hours,
            granted_at: 0,
            expires_at: 0,
        };
        let request_id = storage::push_request(&env, &patient, &request);

        log!(&env, "access requested", request_id, duration_hours);
        events::publish_access_requested(&env, patient, requester, request_id, duration_hours);

        Ok(request_id)
    }

    /// Full request history for `patient`, oldest first. Patient only.
    pub fn get_requests(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<AccessRequest>, ContractError> {
        caller.require_auth();
        if caller != patient {
            return Err(ContractError::Unauthorized);
        }
        Ok(storage::all_requests(&env, &patient))
    }

    /// A single request from `patient`'s history. Patient only.
    pub fn get_request(
        env: Env,
        caller: Address,
        patient: Address,
        request_id: u64,
    ) -> Result<AccessRequest, ContractError> {
        caller.require_auth();
        if caller != patient {
            return Err(ContractError::Unauthorized);
        }
        Self::load_request(&env, &patient, request_id)
    }

    pub fn get_request_count(env: Env, patient: Address) -> u64 {
        storage::request_count(&env, &patient)
    }

    fn load_request(
        env: &Env,
        patient: &Address,
        request_id: u64,
    ) -> Result<AccessRequest, ContractError> {
        if request_id >= storage::request_count(env, patient) {
            return Err(ContractError::InvalidRequestId);
        }
        storage::get_request(env, patient, request_id).ok_or(ContractError::InvalidRequest)
    }

    /// Approve or reject a pending request. Approval overwrites the live
    /// grant for the requester with a fresh expiry.
    pub fn respond_to_request(
        env: Env,
        patient: Address,
        request_id: u64,
        approve: bool,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::respond_scope())?;
        patient.require_auth();

        let mut request = Self::load_request(&env, &patient, request_id)?;
        if request.status != RequestStatus::Pending {
            return Err(ContractError::AlreadyResolved);
        }

        let now = env.ledger().timestamp();
        if approve {
            let expires_at = expiry::grant_expiry(now, request.duration_hours);
            request.status = RequestStatus::Approved;
            request.granted_at = now;
            request.expires_at = expires_at;
            storage::set_grant(&env, &patient, &request.requester, expires_at);
        } else {
            request.status = RequestStatus::Rejected;
        }
        storage::set_request(&env, &patient, request_id, &request);

        log!(&env, "request resolved", request_id, approve);
        events::publish_request_resolved(
            &env,
            patient,
            request.requester,
            request_id,
            approve,
            request.expires_at,
        );

        Ok(())
    }

    // ======================== Live grants ========================

    /// Revoke `requester`'s grant immediately, whatever time it had left.
    pub fn revoke_access(env: Env, patient: Address, requester: Address) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::revoke_scope())?;
        patient.require_auth();

        if storage::grant(&env, &patient, &requester) == 0 {
            return Err(ContractError::NoActiveGrant);
        }
        storage::clear_grant(&env, &patient, &requester);

        events::publish_access_revoked(&env, patient, requester);

        Ok(())
    }

    /// Push `requester`'s expiry out by `additional_hours`, counted from now if
    /// the grant already lapsed. The result may not lie more than one year
    /// past the current ledger time.
    pub fn extend_access(
        env: Env,
        patient: Address,
        requester: Address,
        additional_hours: u32,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::extend_scope())?;
        patient.require_auth();

        if additional_hours == 0 {
            return Err(ContractError::InvalidDuration);
        }

        let current = storage::grant(&env, &patient, &requester);
        if current == 0 {
            return Err(ContractError::NoExistingGrant);
        }

        let now = env.ledger().timestamp();
        let new_expires_at = expiry::extended_expiry(now, current, additional_hours)
            .ok_or(ContractError::ExceedsMaxHorizon)?;
        storage::set_grant(&env, &patient, &requester, new_expires_at);

        log!(&env, "access extended", new_expires_at);
        events::publish_access_extended(&env, patient, requester, new_expires_at);

        Ok(())
    }

    /// Check whether `requester` may currently read or add `patient`'s records.
    pub fn has_access(env: Env, patient: Address, requester: Address) -> bool {
        if requester == patient {
            return true;
        }
        let expires_at = storage::grant(&env, &patient, &requester);
        expiry::is_active(env.ledger().timestamp(), expires_at)
    }

    /// Raw live expiry; `u64::MAX` for the patient themself, `0` without a grant.
    pub fn get_access_expiry(env: Env, patient: Address, requester: Address) -> u64 {
        if requester == patient {
            return expiry::UNLIMITED;
        }
        storage::grant(&env, &patient, &requester)
    }

    /// Seconds of access left for `requester`.
    pub fn get_remaining_access(env: Env, patient: Address, requester: Address) -> u64 {
        if requester == patient {
            return expiry::UNLIMITED;
        }
        let expires_at = storage::grant(&env, &patient, &requester);
        expiry::remaining(env.ledger().timestamp(), expires_at)
    }

    /// Requesters holding a currently valid grant, most recently requested
    /// first, one entry per requester. Patient only.
    pub fn get_active_accessors(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<ActiveAccessor>, ContractError> {
        caller.require_auth();
        if caller != patient {
            return Err(ContractError::Unauthorized);
        }

        let now = env.ledger().timestamp();
        let mut seen: Map<Address, bool> = Map::new(&env);
        let mut active = Vec::new(&env);

        for request_id in (0..storage::request_count(&env, &patient)).rev() {
            let Some(request) = storage::get_request(&env, &patient, request_id) else {
                continue;
            };
            if seen.contains_key(request.requester.clone()) {
                continue;
            }
            seen.set(request.requester.clone(), true);

            let expires_at = storage::grant(&env, &patient, &request.requester);
            if expiry::is_active(now, expires_at) {
                active.push_back(ActiveAccessor {
                    requester: request.requester,
                    expires_at,
                });
            }
        }

        Ok(active)
    }

    // ======================== Records ========================

    /// Append a record pointer to `patient`'s list. The file itself must
    /// already be in the off-chain store under `content_id`.
    pub fn add_record(
        env: Env,
        caller: Address,
        patient: Address,
        content_id: String,
        display_name: String,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::add_record_scope())?;
        caller.require_auth();

        if !Self::has_access(env.clone(), patient.clone(), caller.clone()) {
            return Err(ContractError::Unauthorized);
        }

        validation::validate_content_id(&content_id)?;
        validation::validate_display_name(&display_name)?;

        Self::enforce_rate_limit(&env, &caller)?;

        let record = Record {
            content_id: content_id.clone(),
            display_name,
            uploader: caller.clone(),
            created_at: env.ledger().timestamp(),
        };
        let index = storage::push_record(&env, &patient, &record);

        log!(&env, "record added", index);
        events::publish_record_added(&env, patient, content_id, caller);

        Ok(())
    }

    /// Every record for `patient` in append order.
    pub fn get_records(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<Record>, ContractError> {
        caller.require_auth();

        if !Self::has_access(env.clone(), patient.clone(), caller.clone()) {
            return Err(ContractError::Unauthorized);
        }

        Ok(storage::all_records(&env, &patient))
    }

    pub fn get_record_count(env: Env, patient: Address) -> u64 {
        storage::record_count(&env, &patient)
    }
}
