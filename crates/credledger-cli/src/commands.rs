//! # Ledger Subcommands
//!
//! One handler per ledger operation. Mutating handlers take the ledger
//! lock, load the snapshot, apply exactly one operation, and save only if
//! it succeeded. Identity
//! comes from `--caller`; the CLI trusts it, as the ledger trusts its host.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;

use credledger_core::{CredentialHash, CredentialId, DisclosureField, Principal, Timestamp};
use credledger_state::CredentialLedger;

use crate::config::resolve_config;
use crate::report_rejection;
use crate::store::{load_ledger, save_ledger, with_ledger_lock};

/// Arguments for `credledger init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Contract owner identity (overrides the config file's owner).
    #[arg(long)]
    pub owner: Option<String>,
}

/// Arguments for `credledger register`.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Calling identity (must be the owner).
    #[arg(long)]
    pub caller: Principal,
    /// Institution to register.
    #[arg(long)]
    pub institution: Principal,
}

/// Arguments for `credledger issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Issuing institution.
    #[arg(long)]
    pub caller: Principal,
    /// Credential recipient.
    #[arg(long)]
    pub recipient: Principal,
    /// Hash of the off-chain credential content.
    #[arg(long)]
    pub hash: CredentialHash,
    /// Issuance time (RFC 3339, UTC `Z`); defaults to now.
    #[arg(long)]
    pub at: Option<Timestamp>,
}

/// Arguments for `credledger revoke`.
#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// Revoking institution (must be the issuer).
    #[arg(long)]
    pub caller: Principal,
    /// Credential to revoke.
    #[arg(long)]
    pub id: CredentialId,
}

/// Arguments for `credledger disclose`.
#[derive(Args, Debug)]
pub struct DiscloseArgs {
    /// Disclosing identity (must be the recipient).
    #[arg(long)]
    pub caller: Principal,
    /// Credential to annotate.
    #[arg(long)]
    pub id: CredentialId,
    /// Field name.
    #[arg(long)]
    pub field: DisclosureField,
    /// Disclosed value.
    #[arg(long)]
    pub value: String,
}

/// Arguments for `credledger verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Credential to verify.
    #[arg(long)]
    pub id: CredentialId,
    /// Presented content hash.
    #[arg(long)]
    pub hash: CredentialHash,
}

/// Arguments for `credledger show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Credential to display.
    #[arg(long)]
    pub id: CredentialId,
}

/// Arguments for `credledger disclosure`.
#[derive(Args, Debug)]
pub struct DisclosureArgs {
    /// Credential to query.
    #[arg(long)]
    pub id: CredentialId,
    /// A single field; all fields are listed when omitted.
    #[arg(long)]
    pub field: Option<DisclosureField>,
}

/// Create an empty ledger snapshot.
pub fn run_init(args: &InitArgs, state: &Path, config_path: Option<&Path>) -> Result<u8> {
    let config = resolve_config(config_path, args.owner.as_deref())?;
    let ledger = CredentialLedger::new(config)?;
    with_ledger_lock(state, || {
        if state.exists() {
            bail!("ledger already exists at {}", state.display());
        }
        save_ledger(state, &ledger)
    })?;
    println!(
        "OK: initialized ledger at {} (owner {})",
        state.display(),
        ledger.owner()
    );
    Ok(0)
}

/// Register an institution.
pub fn run_register(args: &RegisterArgs, state: &Path) -> Result<u8> {
    mutate(state, |ledger| {
        ledger
            .register_institution(&args.caller, args.institution.clone())
            .map(|ok| format!("OK: registered institution {} ({ok})", args.institution))
    })
}

/// Issue a credential and print its identifier.
pub fn run_issue(args: &IssueArgs, state: &Path) -> Result<u8> {
    let issued_at = args.at.unwrap_or_else(Timestamp::now);
    mutate(state, |ledger| {
        ledger
            .issue_credential(
                &args.caller,
                args.recipient.clone(),
                args.hash.clone(),
                issued_at,
            )
            .map(|id| id.to_string())
    })
}

/// Revoke a credential.
pub fn run_revoke(args: &RevokeArgs, state: &Path) -> Result<u8> {
    mutate(state, |ledger| {
        ledger
            .revoke_credential(&args.caller, args.id)
            .map(|ok| format!("OK: revoked credential {} ({ok})", args.id))
    })
}

/// Disclose a field of a credential.
pub fn run_disclose(args: &DiscloseArgs, state: &Path) -> Result<u8> {
    mutate(state, |ledger| {
        ledger
            .add_selective_disclosure(
                &args.caller,
                args.id,
                args.field.clone(),
                args.value.clone(),
            )
            .map(|ok| format!("OK: disclosed {} on credential {} ({ok})", args.field, args.id))
    })
}

/// Verify a credential against a hash; prints `VALID` or `INVALID`.
pub fn run_verify(args: &VerifyArgs, state: &Path) -> Result<u8> {
    let ledger = load_ledger(state)?;
    match ledger.verify_credential(args.id, &args.hash) {
        Ok(true) => {
            println!("VALID");
            Ok(0)
        }
        Ok(false) => {
            println!("INVALID");
            Ok(0)
        }
        Err(e) => Ok(report_rejection(&e)),
    }
}

/// Print a credential record as JSON.
pub fn run_show(args: &ShowArgs, state: &Path) -> Result<u8> {
    let ledger = load_ledger(state)?;
    let Some(credential) = ledger.get_credential_info(args.id) else {
        println!("credential {} not found", args.id);
        return Ok(1);
    };
    let mut json = serde_json::to_value(credential)?;
    json["status"] = serde_json::Value::String(credential.status().to_string());
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(0)
}

/// Print one disclosed value, or every disclosed field of a credential.
pub fn run_disclosure(args: &DisclosureArgs, state: &Path) -> Result<u8> {
    let ledger = load_ledger(state)?;
    match &args.field {
        Some(field) => match ledger.get_selective_disclosure(args.id, field) {
            Some(value) => {
                println!("{value}");
                Ok(0)
            }
            None => {
                println!("no disclosure {field} on credential {}", args.id);
                Ok(1)
            }
        },
        None => {
            let fields = ledger.disclosures(args.id);
            if fields.is_empty() {
                println!("No disclosures for credential {}.", args.id);
            }
            for (field, value) in fields {
                println!("{field}: {value}");
            }
            Ok(0)
        }
    }
}

/// Under the ledger lock: load, apply one operation, and persist only on
/// success.
fn mutate<F>(state: &Path, op: F) -> Result<u8>
where
    F: FnOnce(&mut CredentialLedger) -> Result<String, credledger_state::LedgerError>,
{
    with_ledger_lock(state, || {
        let mut ledger = load_ledger(state)?;
        match op(&mut ledger) {
            Ok(message) => {
                save_ledger(state, &ledger)?;
                println!("{message}");
                Ok(0)
            }
            Err(e) => Ok(report_rejection(&e)),
        }
    })
}
