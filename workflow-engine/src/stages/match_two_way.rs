// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use rust_decimal::Decimal;
use workflow_domain::services::compute_match_score;
use workflow_domain::state::{MatchOutputs, StageDelta, WorkflowState};
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let invoice_amount = state.raw_payload.get("amount").and_then(|v| v.as_f64()).and_then(|v| Decimal::try_from(v).ok()).unwrap_or(Decimal::ZERO);
    let po_amounts: Vec<Decimal> = state
        .retrieve
        .as_ref()
        .map(|r| r.matched_pos.iter().map(|po| po.amount).collect())
        .unwrap_or_default();

    let (score, match_result, evidence) =
        compute_match_score(invoice_amount, &po_amounts, ctx.settings.match_threshold, ctx.settings.two_way_tolerance_pct);

    Ok(StageDelta::MatchTwoWay(MatchOutputs {
        match_score: score,
        match_result,
        tolerance_pct: ctx.settings.two_way_tolerance_pct,
        match_evidence: evidence,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::AbilityRouter;
    use crate::tools::{Selector, ToolRegistry};
    use std::sync::Arc;
    use workflow_domain::state::{PurchaseOrder, RetrieveOutputs};
    use workflow_domain::value_objects::MatchResult;

    fn ctx() -> StageContext {
        StageContext {
            router: Arc::new(AbilityRouter::new()),
            selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), None)),
            settings: Arc::new(crate::config::WorkflowSettings::default()),
        }
    }

    fn po(amount: i64) -> PurchaseOrder {
        PurchaseOrder {
            po_id: "PO-1".into(),
            vendor: "Acme".into(),
            amount: Decimal::new(amount, 0),
            currency: "USD".into(),
            status: "open".into(),
            created_date: None,
        }
    }

    #[tokio::test]
    async fn exact_amount_match_is_matched() {
        let mut state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"amount": 10000.0}));
        state.retrieve = Some(RetrieveOutputs {
            matched_pos: vec![po(10000)],
            matched_grns: vec![],
            history: serde_json::json!({}),
            erp_connector_used: "mock_erp".into(),
        });
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::MatchTwoWay(out) => assert_eq!(out.match_result, MatchResult::Matched),
            _ => panic!("wrong delta variant"),
        }
    }

    #[tokio::test]
    async fn twenty_percent_diff_is_failed() {
        let mut state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"amount": 50000.0}));
        state.retrieve = Some(RetrieveOutputs {
            matched_pos: vec![po(40000)],
            matched_grns: vec![],
            history: serde_json::json!({}),
            erp_connector_used: "mock_erp".into(),
        });
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::MatchTwoWay(out) => assert_eq!(out.match_result, MatchResult::Failed),
            _ => panic!("wrong delta variant"),
        }
    }
}
