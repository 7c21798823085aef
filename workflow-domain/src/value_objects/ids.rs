// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Id generation helpers.
//!
//! Every identifier in this system is a plain `String` in a fixed, documented
//! format rather than a wrapper type -- the formats are part of the external
//! contract (see the routing table and persistence layer) and are generated
//! once, at the point a stage or the runtime mints them, not threaded through
//! a parsed newtype.

fn random_hex(nibbles: usize) -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    raw.chars().take(nibbles).collect()
}

/// `wf_<invoice_id>_<8-hex>`
pub fn workflow_id(invoice_id: &str) -> String {
    format!("wf_{invoice_id}_{}", random_hex(8))
}

/// `cp_<workflow_id>_<8-hex>`
pub fn checkpoint_id(workflow_id: &str) -> String {
    format!("cp_{workflow_id}_{}", random_hex(8))
}

/// `raw_<16-hex>`
pub fn raw_invoice_id() -> String {
    format!("raw_{}", random_hex(16))
}

/// `ERP-TXN_<8-hex>`
pub fn erp_txn_id() -> String {
    format!("ERP-TXN_{}", random_hex(8))
}

/// `PAY_<8-hex>`
pub fn scheduled_payment_id() -> String {
    format!("PAY_{}", random_hex(8))
}

/// `JE-<invoice_id>-001`, `JE-<invoice_id>-002` -- the debit and credit entry
/// ids RECONCILE always mints together.
pub fn journal_entry_ids(invoice_id: &str) -> (String, String) {
    (format!("JE-{invoice_id}-001"), format!("JE-{invoice_id}-002"))
}

/// `rt_<8-hex>` -- minted by HITL_DECISION so a resumed run can be traced
/// back to the decision that unblocked it.
pub fn resume_token() -> String {
    format!("rt_{}", random_hex(8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_id_has_expected_shape() {
        let id = workflow_id("INV-1");
        assert!(id.starts_with("wf_INV-1_"));
        assert_eq!(id.rsplit('_').next().unwrap().len(), 8);
    }

    #[test]
    fn raw_invoice_id_uses_sixteen_hex_chars() {
        let id = raw_invoice_id();
        let suffix = id.strip_prefix("raw_").unwrap();
        assert_eq!(suffix.len(), 16);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn journal_entry_ids_follow_debit_credit_convention() {
        let (debit, credit) = journal_entry_ids("INV-2");
        assert_eq!(debit, "JE-INV-2-001");
        assert_eq!(credit, "JE-INV-2-002");
    }

    #[test]
    fn ids_are_unique_across_calls() {
        assert_ne!(workflow_id("INV-1"), workflow_id("INV-1"));
    }
}
