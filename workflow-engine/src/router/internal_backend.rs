// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The ten internal abilities: pure, deterministic transformations of the
//! parameter map. No I/O, no provider dependency.

use rust_decimal::Decimal;
use workflow_domain::services::{apply_approval_policy, compute_flags, compute_match_score, normalize_vendor};
use workflow_domain::value_objects::Ability;

use super::param_str;

pub(super) fn dispatch(ability: Ability, params: &serde_json::Value) -> serde_json::Value {
    match ability {
        Ability::ValidateSchema => validate_schema(params),
        Ability::PersistRawInvoice => persist_raw_invoice(params),
        Ability::ParseLineItems => parse_line_items(params),
        Ability::NormalizeVendor => normalize_vendor_ability(params),
        Ability::ComputeFlags => compute_flags_ability(params),
        Ability::ComputeMatchScore => compute_match_score_ability(params),
        Ability::SaveCheckpoint => acknowledge(params),
        Ability::BuildAccountingEntries => acknowledge(params),
        Ability::ApplyApprovalPolicy => apply_approval_policy_ability(params),
        Ability::OutputFinalPayload => acknowledge(params),
        _ => unreachable!("internal_backend::dispatch called with an external ability"),
    }
}

const REQUIRED_FIELDS: [&str; 3] = ["invoice_id", "vendor_name", "amount"];

fn validate_schema(params: &serde_json::Value) -> serde_json::Value {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !params.get(field).map(|v| !v.is_null()).unwrap_or(false))
        .collect();
    serde_json::json!({ "valid": missing.is_empty(), "missing_fields": missing })
}

fn persist_raw_invoice(params: &serde_json::Value) -> serde_json::Value {
    acknowledge(params)
}

fn parse_line_items(params: &serde_json::Value) -> serde_json::Value {
    let text = param_str(params, "invoice_text").unwrap_or("");
    let detected_pos: Vec<String> = text
        .split_whitespace()
        .filter(|tok| tok.to_uppercase().starts_with("PO"))
        .map(|tok| tok.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .collect();
    serde_json::json!({
        "line_items": params.get("line_items").cloned().unwrap_or_else(|| serde_json::json!([])),
        "detected_pos": detected_pos,
    })
}

fn normalize_vendor_ability(params: &serde_json::Value) -> serde_json::Value {
    let name = param_str(params, "vendor_name").unwrap_or("");
    serde_json::json!({ "normalized_name": normalize_vendor(name) })
}

fn compute_flags_ability(params: &serde_json::Value) -> serde_json::Value {
    let missing_info: Vec<String> = params
        .get("missing_info")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    let amount = params
        .get("amount")
        .and_then(|v| v.as_f64())
        .and_then(|v| Decimal::try_from(v).ok())
        .unwrap_or(Decimal::ZERO);
    let risk_score = compute_flags(&missing_info, amount);
    serde_json::json!({ "missing_info": missing_info, "risk_score": risk_score })
}

fn compute_match_score_ability(params: &serde_json::Value) -> serde_json::Value {
    let invoice_amount = params
        .get("invoice_amount")
        .and_then(|v| v.as_f64())
        .and_then(|v| Decimal::try_from(v).ok())
        .unwrap_or(Decimal::ZERO);
    let po_amounts: Vec<Decimal> = params
        .get("po_amounts")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_f64()).filter_map(|v| Decimal::try_from(v).ok()).collect())
        .unwrap_or_default();
    let threshold = params.get("threshold").and_then(|v| v.as_f64()).unwrap_or(0.90);
    let tolerance_pct = params.get("tolerance_pct").and_then(|v| v.as_f64()).unwrap_or(5.0);

    let (score, match_result, evidence) = compute_match_score(invoice_amount, &po_amounts, threshold, tolerance_pct);
    serde_json::json!({
        "score": score,
        "match_result": match_result,
        "match_evidence": evidence,
    })
}

fn apply_approval_policy_ability(params: &serde_json::Value) -> serde_json::Value {
    let amount = params
        .get("amount")
        .and_then(|v| v.as_f64())
        .and_then(|v| Decimal::try_from(v).ok())
        .unwrap_or(Decimal::ZERO);
    let risk_score = params.get("risk_score").and_then(|v| v.as_f64()).unwrap_or(0.0);
    let auto_approve_threshold = params
        .get("auto_approve_threshold")
        .and_then(|v| v.as_f64())
        .and_then(|v| Decimal::try_from(v).ok())
        .unwrap_or_else(|| Decimal::new(1_000_000, 2));

    let (status, approver_id) = apply_approval_policy(amount, risk_score, auto_approve_threshold);
    serde_json::json!({ "approval_status": status, "approver_id": approver_id })
}

/// Every other internal ability acknowledges and echoes back identifying
/// fields plus a confirmation flag.
fn acknowledge(params: &serde_json::Value) -> serde_json::Value {
    let mut out = serde_json::Map::new();
    for key in ["workflow_id", "invoice_id", "checkpoint_id"] {
        if let Some(v) = params.get(key) {
            out.insert(key.to_string(), v.clone());
        }
    }
    out.insert("confirmed".to_string(), serde_json::Value::Bool(true));
    serde_json::Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_schema_flags_missing_fields() {
        let result = validate_schema(&serde_json::json!({"invoice_id": "INV-1"}));
        assert_eq!(result["valid"], false);
        let missing = result["missing_fields"].as_array().unwrap();
        assert!(missing.iter().any(|v| v == "vendor_name"));
        assert!(missing.iter().any(|v| v == "amount"));
    }

    #[test]
    fn validate_schema_passes_with_all_required_fields() {
        let result = validate_schema(&serde_json::json!({"invoice_id": "INV-1", "vendor_name": "Acme", "amount": 10.0}));
        assert_eq!(result["valid"], true);
    }

    #[test]
    fn parse_line_items_detects_po_tokens() {
        let result = parse_line_items(&serde_json::json!({"invoice_text": "ref PO-1234 thanks"}));
        let detected = result["detected_pos"].as_array().unwrap();
        assert!(detected.iter().any(|v| v == "PO-1234"));
    }
}
