//! # Ledger Property Tests
//!
//! Randomized checks of the authorization, identifier, verification, and
//! disclosure guarantees the ledger makes to its callers.

use proptest::prelude::*;

use credledger_core::{CredentialHash, CredentialId, DisclosureField, Principal, Timestamp};
use credledger_state::{CredentialLedger, LedgerConfig, LedgerError};

const OWNER: &str = "contract-owner";

fn p(s: &str) -> Principal {
    Principal::new(s).unwrap()
}

fn ts() -> Timestamp {
    Timestamp::parse("2026-01-15T12:00:00Z").unwrap()
}

fn ledger() -> CredentialLedger {
    CredentialLedger::new(LedgerConfig::new(p(OWNER))).unwrap()
}

fn identity() -> impl Strategy<Value = Principal> {
    "[a-z][a-z0-9]{0,11}".prop_map(|s| Principal::new(s).unwrap())
}

fn hash() -> impl Strategy<Value = CredentialHash> {
    "[0-9a-f]{8,16}".prop_map(|s| CredentialHash::new(s).unwrap())
}

/// One step of a random ledger history.
#[derive(Debug, Clone)]
enum Step {
    Register { caller: usize, institution: usize },
    Issue { caller: usize, recipient: usize },
    Revoke { caller: usize, id: u64 },
}

const CAST: [&str; 5] = [OWNER, "university1", "university2", "student1", "student2"];

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..CAST.len(), 0..CAST.len())
            .prop_map(|(caller, institution)| Step::Register { caller, institution }),
        (0..CAST.len(), 0..CAST.len()).prop_map(|(caller, recipient)| Step::Issue { caller, recipient }),
        (0..CAST.len(), 1u64..8).prop_map(|(caller, id)| Step::Revoke { caller, id }),
    ]
}

proptest! {
    #[test]
    fn non_owner_registration_rejected(caller in identity(), institution in identity()) {
        prop_assume!(caller.as_str() != OWNER);
        let mut l = ledger();
        let err = l.register_institution(&caller, institution.clone()).unwrap_err();
        let is_unauthorized = matches!(err, LedgerError::Unauthorized { .. });
        prop_assert!(is_unauthorized, "unexpected error: {}", err);
        prop_assert_eq!(err.code(), 103);
        prop_assert!(!l.is_institution(&institution));
        prop_assert_eq!(l.institutions().count(), 0);
    }

    #[test]
    fn unregistered_issuer_does_not_advance_counter(
        caller in identity(),
        recipient in identity(),
        h in hash(),
    ) {
        let mut l = ledger();
        l.register_institution(&p(OWNER), p("university1")).unwrap();
        prop_assume!(caller.as_str() != "university1");

        let before = l.clone();
        let err = l.issue_credential(&caller, recipient, h, ts()).unwrap_err();
        let is_institution_error = matches!(err, LedgerError::NotAuthorizedInstitution { .. });
        prop_assert!(is_institution_error, "unexpected error: {}", err);
        prop_assert_eq!(l.last_credential_id(), 0);
        prop_assert_eq!(l, before);
    }

    #[test]
    fn identifiers_increase_without_gaps(steps in proptest::collection::vec(step(), 1..40)) {
        let mut l = ledger();
        let mut issued = Vec::new();
        for step in steps {
            let before = l.clone();
            let result = match step {
                Step::Register { caller, institution } => l
                    .register_institution(&p(CAST[caller]), p(CAST[institution]))
                    .map(|_| ()),
                Step::Issue { caller, recipient } => l
                    .issue_credential(
                        &p(CAST[caller]),
                        p(CAST[recipient]),
                        CredentialHash::new("h").unwrap(),
                        ts(),
                    )
                    .map(|id| issued.push(id.get())),
                Step::Revoke { caller, id } => l
                    .revoke_credential(&p(CAST[caller]), CredentialId::new(id).unwrap())
                    .map(|_| ()),
            };
            if result.is_err() {
                prop_assert_eq!(&l, &before, "failed step mutated state");
            }
        }
        let expected: Vec<u64> = (1..=issued.len() as u64).collect();
        prop_assert_eq!(&issued, &expected);
        prop_assert_eq!(l.last_credential_id(), issued.len() as u64);
        prop_assert!(l.check_integrity().is_ok());
    }

    #[test]
    fn verify_truth_table(stored in hash(), presented in hash(), revoke in any::<bool>()) {
        let mut l = ledger();
        l.register_institution(&p(OWNER), p("university1")).unwrap();
        let id = l
            .issue_credential(&p("university1"), p("student1"), stored.clone(), ts())
            .unwrap();
        if revoke {
            l.revoke_credential(&p("university1"), id).unwrap();
        }
        let expected = presented == stored && !revoke;
        prop_assert_eq!(l.verify_credential(id, &presented).unwrap(), expected);

        let unissued = id.next().unwrap();
        let err = l.verify_credential(unissued, &presented).unwrap_err();
        prop_assert_eq!(err.code(), 101);
    }

    #[test]
    fn disclosure_is_recipient_scoped(caller in identity(), value in ".{0,16}") {
        prop_assume!(caller.as_str() != "student1");
        let mut l = ledger();
        l.register_institution(&p(OWNER), p("university1")).unwrap();
        let id = l
            .issue_credential(&p("university1"), p("student1"), CredentialHash::new("hash123").unwrap(), ts())
            .unwrap();
        let gpa = DisclosureField::new("gpa");
        l.add_selective_disclosure(&p("student1"), id, gpa.clone(), "3.8".into()).unwrap();

        let before = l.clone();
        let err = l.add_selective_disclosure(&caller, id, gpa.clone(), value).unwrap_err();
        let is_recipient_error = matches!(err, LedgerError::NotAuthorizedRecipient { .. });
        prop_assert!(is_recipient_error);
        prop_assert_eq!(l.get_selective_disclosure(id, &gpa), Some("3.8"));
        prop_assert_eq!(l, before);
    }

    #[test]
    fn any_field_name_round_trips(field in ".{0,12}", value in ".{0,16}") {
        let mut l = ledger();
        l.register_institution(&p(OWNER), p("university1")).unwrap();
        let id = l
            .issue_credential(&p("university1"), p("student1"), CredentialHash::new("hash123").unwrap(), ts())
            .unwrap();
        let field = DisclosureField::new(field);
        prop_assert!(l.add_selective_disclosure(&p("student1"), id, field.clone(), value.clone()).unwrap());
        prop_assert_eq!(l.get_selective_disclosure(id, &field), Some(value.as_str()));
    }

    #[test]
    fn revocation_is_idempotent(times in 1usize..5) {
        let mut l = ledger();
        l.register_institution(&p(OWNER), p("university1")).unwrap();
        let id = l
            .issue_credential(&p("university1"), p("student1"), CredentialHash::new("hash123").unwrap(), ts())
            .unwrap();
        for _ in 0..times {
            prop_assert!(l.revoke_credential(&p("university1"), id).unwrap());
            prop_assert!(l.get_credential_info(id).unwrap().is_revoked());
        }
        // No operation un-revokes; a fresh issue gets a new id instead.
        let again = l
            .issue_credential(&p("university1"), p("student1"), CredentialHash::new("hash123").unwrap(), ts())
            .unwrap();
        prop_assert_ne!(again, id);
        prop_assert!(l.get_credential_info(id).unwrap().is_revoked());
    }
}
