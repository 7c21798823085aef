// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Invoice
//!
//! The immutable input to a workflow run. An `Invoice` is validated once, at
//! submission, and never mutated afterward -- all downstream processing
//! accumulates in the `Workflow`'s state, not on the invoice itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::WorkflowError;

/// One line of an invoice's itemization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub desc: String,
    pub qty: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Immutable invoice payload submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub vendor_name: String,
    pub vendor_tax_id: Option<String>,
    pub invoice_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub amount: Decimal,
    pub currency: String,
    pub line_items: Vec<LineItem>,
    pub attachments: Vec<String>,
}

/// A non-rejecting observation surfaced alongside a validated invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceWarning {
    LineItemTotalMismatch { line_item_total: String, amount: String },
}

impl Invoice {
    /// Constructs and validates an invoice, rejecting it at the boundary on
    /// malformed required fields.
    ///
    /// Returns any soft warnings alongside the constructed invoice; callers
    /// typically log these rather than treat them as failures (see S4 for the
    /// boundary-rejection case this does NOT cover: that happens before an
    /// `Invoice` value can even be constructed, at payload deserialization).
    pub fn new(
        invoice_id: impl Into<String>,
        vendor_name: impl Into<String>,
        amount: Decimal,
        currency: impl Into<String>,
        line_items: Vec<LineItem>,
        attachments: Vec<String>,
    ) -> Result<(Self, Vec<InvoiceWarning>), WorkflowError> {
        let invoice_id = invoice_id.into();
        let vendor_name = vendor_name.into();

        if invoice_id.trim().is_empty() {
            return Err(WorkflowError::validation("invoice_id must not be empty"));
        }
        if vendor_name.trim().is_empty() {
            return Err(WorkflowError::validation("vendor_name must not be empty"));
        }
        if amount.is_sign_negative() {
            return Err(WorkflowError::validation("amount must be non-negative"));
        }

        let invoice = Invoice {
            invoice_id,
            vendor_name,
            vendor_tax_id: None,
            invoice_date: None,
            due_date: None,
            amount,
            currency: currency.into(),
            line_items,
            attachments,
        };

        let warnings = invoice.soft_warnings();
        Ok((invoice, warnings))
    }

    /// Required-field check used by the `validate_schema` internal ability.
    pub fn missing_required_fields(
        invoice_id: Option<&str>,
        vendor_name: Option<&str>,
        amount: Option<&Decimal>,
    ) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if invoice_id.map(str::trim).unwrap_or_default().is_empty() {
            missing.push("invoice_id");
        }
        if vendor_name.map(str::trim).unwrap_or_default().is_empty() {
            missing.push("vendor_name");
        }
        if amount.is_none() {
            missing.push("amount");
        }
        missing
    }

    /// Soft (non-rejecting) warnings: line-item totals should sum within
    /// $0.01 of `amount` when line items are present.
    pub fn soft_warnings(&self) -> Vec<InvoiceWarning> {
        if self.line_items.is_empty() {
            return Vec::new();
        }
        let sum: Decimal = self.line_items.iter().map(|li| li.total).sum();
        let tolerance = Decimal::new(1, 2); // 0.01
        if (sum - self.amount).abs() > tolerance {
            vec![InvoiceWarning::LineItemTotalMismatch {
                line_item_total: sum.to_string(),
                amount: self.amount.to_string(),
            }]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_item(total: &str) -> LineItem {
        LineItem {
            desc: "widget".into(),
            qty: Decimal::new(1, 0),
            unit_price: total.parse().unwrap(),
            total: total.parse().unwrap(),
        }
    }

    #[test]
    fn rejects_blank_vendor_name() {
        let err = Invoice::new("INV-1", "  ", Decimal::new(100, 0), "USD", vec![], vec![])
            .unwrap_err();
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn rejects_negative_amount() {
        let err = Invoice::new("INV-1", "Acme", Decimal::new(-1, 0), "USD", vec![], vec![])
            .unwrap_err();
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn line_item_mismatch_is_a_warning_not_a_rejection() {
        let (invoice, warnings) = Invoice::new(
            "INV-1",
            "Acme",
            Decimal::new(10000, 2),
            "USD",
            vec![line_item("50.00")],
            vec![],
        )
        .unwrap();
        assert_eq!(invoice.invoice_id, "INV-1");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn matching_line_items_produce_no_warning() {
        let (_invoice, warnings) = Invoice::new(
            "INV-1",
            "Acme",
            Decimal::new(10000, 2),
            "USD",
            vec![line_item("100.00")],
            vec![],
        )
        .unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_required_fields_lists_all_absent() {
        let missing = Invoice::missing_required_fields(None, None, None);
        assert_eq!(missing, vec!["invoice_id", "vendor_name", "amount"]);
    }
}
