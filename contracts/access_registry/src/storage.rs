//! Persistent storage layout.
//!
//! Requests and records are stored one entry per index under a per-patient
//! counter, so appending never rewrites history and each entry stays small.
//!
//! | Key                                   | Value           |
//! |---------------------------------------|-----------------|
//! | `("REQ_CNT", patient)`                | `u64`           |
//! | `("REQUEST", patient, request_id)`    | `AccessRequest` |
//! | `("GRANT", patient, requester)`       | `u64` expiry    |
//! | `("REC_CNT", patient)`                | `u64`           |
//! | `("RECORD", patient, index)`          | `Record`        |
//! | `("RL_TRK", caller)`                  | `(u64, u64)`    |

use crate::{AccessRequest, Record};
use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

const REQUEST_COUNT: Symbol = symbol_short!("REQ_CNT");
const REQUEST: Symbol = symbol_short!("REQUEST");
const GRANT: Symbol = symbol_short!("GRANT");
const RECORD_COUNT: Symbol = symbol_short!("REC_CNT");
const RECORD: Symbol = symbol_short!("RECORD");
const RATE_TRACK: Symbol = symbol_short!("RL_TRK");

pub(crate) const TTL_THRESHOLD: u32 = 518_400;
pub(crate) const TTL_EXTEND_TO: u32 = 3_110_400;

/// Extends the time-to-live (TTL) for a per-patient counter or tracker key.
fn extend_ttl_address_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for an indexed request or record key.
fn extend_ttl_indexed_key(env: &Env, key: &(Symbol, Address, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for a grant key.
fn extend_ttl_grant_key(env: &Env, key: &(Symbol, Address, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Access requests ──────────────────────────────────────────

pub fn request_count(env: &Env, patient: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&(REQUEST_COUNT, patient.clone()))
        .unwrap_or(0)
}

pub fn get_request(env: &Env, patient: &Address, request_id: u64) -> Option<AccessRequest> {
    env.storage()
        .persistent()
        .get(&(REQUEST, patient.clone(), request_id))
}

/// Overwrites the request stored at `request_id`.
pub fn set_request(env: &Env, patient: &Address, request_id: u64, request: &AccessRequest) {
    let key = (REQUEST, patient.clone(), request_id);
    env.storage().persistent().set(&key, request);
    extend_ttl_indexed_key(env, &key);
}

/// Appends `request` to the patient's history and returns its index.
pub fn push_request(env: &Env, patient: &Address, request: &AccessRequest) -> u64 {
    let request_id = request_count(env, patient);
    set_request(env, patient, request_id, request);

    let count_key = (REQUEST_COUNT, patient.clone());
    env.storage()
        .persistent()
        .set(&count_key, &request_id.saturating_add(1));
    extend_ttl_address_key(env, &count_key);

    request_id
}

/// Loads the full request history, oldest first. Missing slots are skipped.
pub fn all_requests(env: &Env, patient: &Address) -> Vec<AccessRequest> {
    let mut requests = Vec::new(env);
    for request_id in 0..request_count(env, patient) {
        if let Some(request) = get_request(env, patient, request_id) {
            requests.push_back(request);
        }
    }
    requests
}

// ── Live grants ──────────────────────────────────────────────

/// Current expiry for `(patient, requester)`, or `0` when there is no grant.
pub fn grant(env: &Env, patient: &Address, requester: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&(GRANT, patient.clone(), requester.clone()))
        .unwrap_or(0)
}

pub fn set_grant(env: &Env, patient: &Address, requester: &Address, expires_at: u64) {
    let key = (GRANT, patient.clone(), requester.clone());
    env.storage().persistent().set(&key, &expires_at);
    extend_ttl_grant_key(env, &key);
}

pub fn clear_grant(env: &Env, patient: &Address, requester: &Address) {
    let key = (GRANT, patient.clone(), requester.clone());
    env.storage().persistent().remove(&key);
}

// ── Records ──────────────────────────────────────────────────

pub fn record_count(env: &Env, patient: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&(RECORD_COUNT, patient.clone()))
        .unwrap_or(0)
}

pub fn push_record(env: &Env, patient: &Address, record: &Record) -> u64 {
    let index = record_count(env, patient);
    let key = (RECORD, patient.clone(), index);
    env.storage().persistent().set(&key, record);
    extend_ttl_indexed_key(env, &key);

    let count_key = (RECORD_COUNT, patient.clone());
    env.storage()
        .persistent()
        .set(&count_key, &index.saturating_add(1));
    extend_ttl_address_key(env, &count_key);

    index
}

/// Loads every record for `patient` in append order.
pub fn all_records(env: &Env, patient: &Address) -> Vec<Record> {
    let mut records = Vec::new(env);
    for index in 0..record_count(env, patient) {
        let key = (RECORD, patient.clone(), index);
        if let Some(record) = env.storage().persistent().get::<_, Record>(&key) {
            records.push_back(record);
        }
    }
    records
}

// ── Rate limiting ────────────────────────────────────────────

pub fn rate_limit_state(env: &Env, caller: &Address, now: u64) -> (u64, u64) {
    env.storage()
        .persistent()
        .get(&(RATE_TRACK, caller.clone()))
        .unwrap_or((0, now))
}

pub fn set_rate_limit_state(env: &Env, caller: &Address, state: &(u64, u64)) {
    let key = (RATE_TRACK, caller.clone());
    env.storage().persistent().set(&key, state);
    extend_ttl_address_key(env, &key);
}
