use std::collections::{HashMap, HashSet};

use crate::config::{Mode, Settings};
use crate::matcher;
use crate::model::{OutputRecord, Scalar, SingleKeyRecord};
use crate::resolve::{coerce_int, normalize, resolve};

// Input-side field names (new-system export).
const ACCOUNT_NUMBER: &str = "zuora_account_number_for_client";
const SUB_CREATED_1: &str = "subscription_number_created_1";
const SUB_CREATED_2: &str = "subscription_number_created_2";

// Admin-side field names (legacy export).
const CLIENT_BUSINESS_ID: &str = "client_business_id";
const SUB_ID: &str = "sub_id";
const OLD_ACCOUNT_NUMBER: &str = "zuora_account_number";
const OLD_SUB_NUMBER: &str = "zuora_subscription_number";

/// Run one reconciliation pass over the two exports.
///
/// Input records are scanned in order; each is matched against the admin
/// export first-match-wins. An input key with no admin match contributes no
/// row and no error. Output order equals input scan order.
///
/// All pass state (the accounts dedup memory and the per-key subscription
/// occurrence counters) is owned by this call and discarded with it, so
/// repeated invocations with identical inputs yield identical output.
pub fn reconcile(
    input_records: &[SingleKeyRecord],
    admin_records: &[SingleKeyRecord],
    settings: &Settings,
    mode: Mode,
) -> Vec<OutputRecord> {
    let mut rows = Vec::new();
    // Accounts-only dedup: a key produces at most one account row per pass.
    let mut seen_accounts: HashSet<String> = HashSet::new();
    // Per-key count of subscription numbers successfully allocated so far.
    let mut sub_occurrences: HashMap<String, u32> = HashMap::new();

    for record in input_records {
        let Some(admin) = matcher::find(admin_records, &record.key) else {
            // No admin match: the input row is dropped silently by design.
            continue;
        };

        let ident = canonical(&record.key);

        if mode == Mode::Accounts && seen_accounts.contains(&ident) {
            continue;
        }

        let mut row = OutputRecord::new(record.key.render());

        if mode.includes_accounts() {
            row.client_business_id = coerce_int(resolve(admin, CLIENT_BUSINESS_ID));
            row.zuora_account_number = normalize(resolve(&record.fields, ACCOUNT_NUMBER));
            if settings.include_old_data {
                row.old_zuora_account_number = normalize(resolve(admin, OLD_ACCOUNT_NUMBER));
            }
            if mode == Mode::Accounts {
                seen_accounts.insert(ident.clone());
            }
        }

        if mode.includes_subscriptions() {
            row.sub_id = coerce_int(resolve(admin, SUB_ID));
            if settings.include_old_data {
                row.old_zuora_subscription_number = normalize(resolve(admin, OLD_SUB_NUMBER));
            }

            // First successful occurrence of a key takes the first-created
            // subscription number, every later one the second-created. Only
            // occurrences that actually yield a value advance the counter.
            let occurrences = sub_occurrences.entry(ident).or_insert(0);
            let field = if *occurrences == 0 { SUB_CREATED_1 } else { SUB_CREATED_2 };
            let number = normalize(resolve(&record.fields, field));
            if number.is_some() {
                *occurrences += 1;
            }
            row.zuora_subscription_number = number;
        }

        rows.push(row);
    }

    rows
}

/// Key identity for pass-local counters: symbol-rendered and plain forms of
/// the same identifier must share one counter.
fn canonical(key: &Scalar) -> String {
    match key {
        Scalar::Text(s) => s.strip_prefix(':').unwrap_or(s).to_string(),
        other => other.render(),
    }
}
