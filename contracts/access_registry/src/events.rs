use crate::circuit_breaker::PauseScope;
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a requester files a new access request.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequestedEvent {
    pub patient: Address,
    pub requester: Address,
    pub request_id: u64,
    pub duration_hours: u32,
    pub timestamp: u64,
}

/// Event published when a patient approves or rejects a request.
/// `expires_at` is zero for rejections.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRequestResolvedEvent {
    pub patient: Address,
    pub requester: Address,
    pub request_id: u64,
    pub approved: bool,
    pub expires_at: u64,
    pub timestamp: u64,
}

/// Event published when access is revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub patient: Address,
    pub requester: Address,
    pub timestamp: u64,
}

/// Event published when a grant is extended.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessExtendedEvent {
    pub patient: Address,
    pub requester: Address,
    pub new_expires_at: u64,
    pub timestamp: u64,
}

/// Event published when a record pointer is added.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub patient: Address,
    pub content_id: String,
    pub uploader: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new access request is filed.
/// Topics carry the patient and requester so indexers can filter per party.
pub fn publish_access_requested(
    env: &Env,
    patient: Address,
    requester: Address,
    request_id: u64,
    duration_hours: u32,
) {
    let topics = (symbol_short!("ACC_REQ"), patient.clone(), requester.clone());
    let data = AccessRequestedEvent {
        patient,
        requester,
        request_id,
        duration_hours,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a request is approved or rejected.
pub fn publish_request_resolved(
    env: &Env,
    patient: Address,
    requester: Address,
    request_id: u64,
    approved: bool,
    expires_at: u64,
) {
    let topics = (symbol_short!("REQ_RES"), patient.clone(), requester.clone());
    let data = AccessRequestResolvedEvent {
        patient,
        requester,
        request_id,
        approved,
        expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a patient revokes a requester's grant.
pub fn publish_access_revoked(env: &Env, patient: Address, requester: Address) {
    let topics = (symbol_short!("ACC_REV"), patient.clone(), requester.clone());
    let data = AccessRevokedEvent {
        patient,
        requester,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a patient extends a requester's grant.
pub fn publish_access_extended(
    env: &Env,
    patient: Address,
    requester: Address,
    new_expires_at: u64,
) {
    let topics = (symbol_short!("ACC_EXT"), patient.clone(), requester.clone());
    let data = AccessExtendedEvent {
        patient,
        requester,
        new_expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a record pointer is appended to a patient's list.
pub fn publish_record_added(env: &Env, patient: Address, content_id: String, uploader: Address) {
    let topics = (symbol_short!("REC_ADD"), patient.clone(), uploader.clone());
    let data = RecordAddedEvent {
        patient,
        content_id,
        uploader,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_paused(env: &Env, caller: Address, scope: PauseScope) {
    let topics = (symbol_short!("PAUSED"), caller.clone());
    let data = PauseChangedEvent {
        caller,
        scope,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_resumed(env: &Env, caller: Address, scope: PauseScope) {
    let topics = (symbol_short!("RESUMED"), caller.clone());
    let data = PauseChangedEvent {
        caller,
        scope,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
