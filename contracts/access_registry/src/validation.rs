use soroban_sdk::{Address, Env, String};

use crate::ContractError;

/// Strkey of the all-zero ed25519 account. Front-ends fall back to it when no
/// wallet is connected, so it never identifies a real patient.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

const MAX_CONTENT_ID_LEN: u32 = 256;
const MAX_DISPLAY_NAME_LEN: u32 = 256;

/// Returns the zero identity as an `Address`.
pub fn zero_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
}

/// Rejects the zero identity and the registry's own address as patients.
pub fn validate_patient(env: &Env, patient: &Address) -> Result<(), ContractError> {
    if *patient == zero_address(env) || *patient == env.current_contract_address() {
        return Err(ContractError::InvalidPatient);
    }
    Ok(())
}

/// Validate a requested or additional duration in hours.
pub fn validate_duration(duration_hours: u32) -> Result<(), ContractError> {
    if !registry_common::is_valid_duration(duration_hours) {
        return Err(ContractError::InvalidDuration);
    }
    Ok(())
}

/// Validate a content identifier handed over by the off-chain store.
/// The identifier is opaque; only its length is bounded.
pub fn validate_content_id(content_id: &String) -> Result<(), ContractError> {
    let len = content_id.len();
    if len == 0 || len > MAX_CONTENT_ID_LEN {
        return Err(ContractError::InvalidContentId);
    }
    Ok(())
}

/// Validate a record's display name. Any UTF-8 is accepted except ASCII
/// control characters.
pub fn validate_display_name(display_name: &String) -> Result<(), ContractError> {
    let len = display_name.len();
    if len == 0 || len > MAX_DISPLAY_NAME_LEN {
        return Err(ContractError::InvalidDisplayName);
    }

    let mut buf = [0u8; MAX_DISPLAY_NAME_LEN as usize];
    display_name.copy_into_slice(&mut buf[..len as usize]);

    if buf[..len as usize].iter().any(|b| b.is_ascii_control()) {
        return Err(ContractError::InvalidDisplayName);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn test_validate_duration() {
        assert_eq!(validate_duration(1), Ok(()));
        assert_eq!(validate_duration(24), Ok(()));
        assert_eq!(validate_duration(8760), Ok(()));

        assert_eq!(validate_duration(0), Err(ContractError::InvalidDuration));
        assert_eq!(validate_duration(8761), Err(ContractError::InvalidDuration));
    }

    #[test]
    fn test_validate_content_id() {
        let env = Env::default();

        let cid_v0 = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";
        assert_eq!(validate_content_id(&String::from_str(&env, cid_v0)), Ok(()));

        let cid_v1 = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
        assert_eq!(validate_content_id(&String::from_str(&env, cid_v1)), Ok(()));

        assert_eq!(
            validate_content_id(&String::from_str(&env, "")),
            Err(ContractError::InvalidContentId)
        );

        let uri = "ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG/scan 01.pdf";
        assert_eq!(validate_content_id(&String::from_str(&env, uri)), Ok(()));

        let longest = "a".repeat(256);
        assert_eq!(validate_content_id(&String::from_str(&env, &longest)), Ok(()));

        let long = "a".repeat(257);
        assert_eq!(
            validate_content_id(&String::from_str(&env, &long)),
            Err(ContractError::InvalidContentId)
        );
    }

    #[test]
    fn test_validate_display_name() {
        let env = Env::default();

        assert_eq!(
            validate_display_name(&String::from_str(&env, "blood-panel 2024.pdf")),
            Ok(())
        );
        assert_eq!(
            validate_display_name(&String::from_str(&env, "radiografía tórax.png")),
            Ok(())
        );

        assert_eq!(
            validate_display_name(&String::from_str(&env, "")),
            Err(ContractError::InvalidDisplayName)
        );
        assert_eq!(
            validate_display_name(&String::from_str(&env, "scan\n.pdf")),
            Err(ContractError::InvalidDisplayName)
        );

        let long = "n".repeat(257);
        assert_eq!(
            validate_display_name(&String::from_str(&env, &long)),
            Err(ContractError::InvalidDisplayName)
        );
    }

    #[test]
    fn test_validate_patient() {
        let env = Env::default();
        let contract_id = env.register(crate::AccessRegistryContract, ());

        env.as_contract(&contract_id, || {
            assert_eq!(
                validate_patient(&env, &zero_address(&env)),
                Err(ContractError::InvalidPatient)
            );
            assert_eq!(
                validate_patient(&env, &contract_id),
                Err(ContractError::InvalidPatient)
            );
            assert_eq!(validate_patient(&env, &Address::generate(&env)), Ok(()));
        });
    }
}
