// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use rust_decimal::Decimal;
use workflow_domain::state::{AccountingEntry, ReconcileOutputs, ReconciliationReport, StageDelta, WorkflowState};
use workflow_domain::value_objects::journal_entry_ids;
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(_ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let amount = state
        .raw_payload
        .get("amount")
        .and_then(|v| v.as_f64())
        .and_then(|v| Decimal::try_from(v).ok())
        .unwrap_or(Decimal::ZERO);

    let (debit_id, credit_id) = journal_entry_ids(&state.invoice_id);
    let entries = vec![
        AccountingEntry { entry_id: debit_id, account: "2100-Accounts Payable".into(), debit: amount, credit: Decimal::ZERO },
        AccountingEntry { entry_id: credit_id, account: "5000-Expenses".into(), debit: Decimal::ZERO, credit: amount },
    ];
    let balanced = entries.iter().map(|e| e.debit).sum::<Decimal>() == entries.iter().map(|e| e.credit).sum::<Decimal>();

    Ok(StageDelta::Reconcile(ReconcileOutputs {
        accounting_entries: entries.clone(),
        reconciliation_report: ReconciliationReport { entries, balanced },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::AbilityRouter;
    use crate::tools::{Selector, ToolRegistry};
    use std::sync::Arc;

    fn ctx() -> StageContext {
        StageContext {
            router: Arc::new(AbilityRouter::new()),
            selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), None)),
            settings: Arc::new(crate::config::WorkflowSettings::default()),
        }
    }

    #[tokio::test]
    async fn entries_balance_and_use_invoice_id_in_their_ids() {
        let state = WorkflowState::new("wf_1", "INV-9", serde_json::json!({"amount": 500.0}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Reconcile(out) => {
                assert!(out.reconciliation_report.balanced);
                assert_eq!(out.accounting_entries[0].entry_id, "JE-INV-9-001");
                assert_eq!(out.accounting_entries[1].entry_id, "JE-INV-9-002");
            }
            _ => panic!("wrong delta variant"),
        }
    }
}
