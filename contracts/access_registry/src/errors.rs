use soroban_sdk::contracttype;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: invalid input parameters or identities
    Validation = 1,
    /// Authorization errors: caller may not act on this patient's data
    Authorization = 2,
    /// Not found errors: lookups outside the stored range
    NotFound = 3,
    /// State conflict errors: the request or grant is not in the required state
    StateConflict = 4,
    /// Transient errors: temporary failures that may succeed on retry
    Transient = 5,
    /// System errors: contract-level issues like pausing
    System = 6,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: caller mistakes, nothing to investigate
    Low = 1,
    /// Medium severity: denied or conflicting operations worth surfacing
    Medium = 2,
    /// High severity: the stored state is not what the contract expects
    High = 3,
    /// Critical severity: the registry is halted
    Critical = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidPatient = 4,
    InvalidDuration = 5,
    SelfRequest = 6,
    InvalidRequestId = 7,
    InvalidRequest = 8,
    AlreadyResolved = 9,
    NoActiveGrant = 10,
    NoExistingGrant = 11,
    ExceedsMaxHorizon = 12,
    InvalidContentId = 13,
    InvalidDisplayName = 14,
    InvalidInput = 15,
    Paused = 16,
    RateLimitExceeded = 17,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidPatient
            | ContractError::InvalidDuration
            | ContractError::SelfRequest
            | ContractError::ExceedsMaxHorizon
            | ContractError::InvalidContentId
            | ContractError::InvalidDisplayName
            | ContractError::InvalidInput => ErrorCategory::Validation,
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::InvalidRequestId => ErrorCategory::NotFound,
            ContractError::InvalidRequest
            | ContractError::AlreadyResolved
            | ContractError::NoActiveGrant
            | ContractError::NoExistingGrant => ErrorCategory::StateConflict,
            ContractError::RateLimitExceeded => ErrorCategory::Transient,
            ContractError::Paused => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidPatient
            | ContractError::InvalidDuration
            | ContractError::SelfRequest
            | ContractError::InvalidRequestId
            | ContractError::ExceedsMaxHorizon
            | ContractError::InvalidContentId
            | ContractError::InvalidDisplayName
            | ContractError::InvalidInput => ErrorSeverity::Low,
            ContractError::Unauthorized
            | ContractError::AlreadyResolved
            | ContractError::NoActiveGrant
            | ContractError::NoExistingGrant
            | ContractError::RateLimitExceeded => ErrorSeverity::Medium,
            ContractError::InvalidRequest => ErrorSeverity::High,
            ContractError::Paused => ErrorSeverity::Critical,
        }
    }

    /// Returns whether resubmitting the same call later may succeed.
    /// Every other error is a permanent rejection of the call as submitted.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::RateLimitExceeded)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::InvalidPatient => "Patient address is not a valid identity",
            ContractError::InvalidDuration => "Duration must be between 1 and 8760 hours",
            ContractError::SelfRequest => "Patients cannot request access to their own records",
            ContractError::InvalidRequestId => "Request id is out of range",
            ContractError::InvalidRequest => "Request entry is missing from storage",
            ContractError::AlreadyResolved => "Request has already been resolved",
            ContractError::NoActiveGrant => "No active grant to revoke",
            ContractError::NoExistingGrant => "No existing grant to extend",
            ContractError::ExceedsMaxHorizon => "Access cannot extend beyond one year from now",
            ContractError::InvalidContentId => "Invalid content identifier",
            ContractError::InvalidDisplayName => "Invalid display name",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::Paused => "Contract operations are currently paused",
            ContractError::RateLimitExceeded => "Rate limit exceeded, please retry later",
        }
    }
}
