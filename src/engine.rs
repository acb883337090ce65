//! Request dispatch and batch evaluation.
//!
//! The `engine` module turns a [`CalculationRequest`] into a
//! [`CalculationResponse`] by routing it to the matching calculator.
//! Batches are evaluated with the [`rayon`] crate across multiple CPU
//! cores.  The calculators are pure functions over `'static` tables, so
//! nothing needs to be shared or locked between threads.

use crate::models::{
    PpnInput, PpnResult, PpnSettlement, PpnSettlementInput, Pph21Input, Pph21Result, Pph23Input,
    Pph23Result, PphBadanInput, PphBadanResult, PphFinalInput, PphFinalResult,
    TransactionSettlement, TransactionSettlementInput,
};
use crate::{pph21, pph23, pph_badan, pph_final, ppn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A single calculation, tagged by `kind` in JSON, e.g.
/// `{"kind": "pph23", "income_type": "bunga", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationRequest {
    Pph21(Pph21Input),
    Pph23(Pph23Input),
    PphFinal(PphFinalInput),
    PphBadan(PphBadanInput),
    Ppn(PpnInput),
    PpnSettlement(PpnSettlementInput),
    PpnTransactions(TransactionSettlementInput),
}

/// The result of one [`CalculationRequest`], tagged the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationResponse {
    Pph21(Pph21Result),
    Pph23(Pph23Result),
    PphFinal(PphFinalResult),
    PphBadan(PphBadanResult),
    Ppn(PpnResult),
    PpnSettlement(PpnSettlement),
    PpnTransactions(TransactionSettlement),
}

impl CalculationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            CalculationRequest::Pph21(_) => "pph21",
            CalculationRequest::Pph23(_) => "pph23",
            CalculationRequest::PphFinal(_) => "pph_final",
            CalculationRequest::PphBadan(_) => "pph_badan",
            CalculationRequest::Ppn(_) => "ppn",
            CalculationRequest::PpnSettlement(_) => "ppn_settlement",
            CalculationRequest::PpnTransactions(_) => "ppn_transactions",
        }
    }
}

/// Runs one request through its calculator.
pub fn evaluate(request: &CalculationRequest) -> CalculationResponse {
    match request {
        CalculationRequest::Pph21(input) => CalculationResponse::Pph21(pph21::calculate_pph21(input)),
        CalculationRequest::Pph23(input) => CalculationResponse::Pph23(pph23::calculate_pph23(input)),
        CalculationRequest::PphFinal(input) => {
            CalculationResponse::PphFinal(pph_final::calculate_pph_final(input))
        }
        CalculationRequest::PphBadan(input) => {
            CalculationResponse::PphBadan(pph_badan::calculate_pph_badan(input))
        }
        CalculationRequest::Ppn(input) => CalculationResponse::Ppn(ppn::calculate_ppn(input)),
        CalculationRequest::PpnSettlement(input) => CalculationResponse::PpnSettlement(
            ppn::calculate_ppn_settlement(input.output_vat, input.input_vat),
        ),
        CalculationRequest::PpnTransactions(input) => {
            CalculationResponse::PpnTransactions(ppn::settle_transactions(input))
        }
    }
}

/// Evaluates every request in parallel.  The output is in input order.
pub fn evaluate_batch(requests: &[CalculationRequest]) -> Vec<CalculationResponse> {
    tracing::debug!(count = requests.len(), "evaluating calculation batch");
    requests.par_iter().map(evaluate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SettlementStatus, VatDirection};
    use crate::rates::{FilingStatus, IncomeType};
    use serde_json::json;

    #[test]
    fn tagged_requests_deserialize() {
        let request: CalculationRequest = serde_json::from_value(json!({
            "kind": "pph23",
            "income_type": "jasa_teknik",
            "transaction_value": 10_000_000.0,
            "has_npwp": false
        }))
        .unwrap();
        assert_eq!(request.kind(), "pph23");
        match evaluate(&request) {
            CalculationResponse::Pph23(result) => assert_eq!(result.tax, 400_000.0),
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        let parsed = serde_json::from_value::<CalculationRequest>(json!({
            "kind": "pph21",
            "filing_status": "K/9"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn batch_preserves_order() {
        let requests = vec![
            CalculationRequest::Ppn(PpnInput {
                amount: 10_000_000.0,
                vat_inclusive: false,
                direction: VatDirection::Output,
            }),
            CalculationRequest::Pph21(Pph21Input {
                base_salary: 10_000_000.0,
                allowances: 2_000_000.0,
                bonus: 12_000_000.0,
                filing_status: FilingStatus::Tk0,
                health_insurance: true,
                employment_insurance: true,
            }),
            CalculationRequest::Pph23(Pph23Input {
                income_type: IncomeType::Dividen,
                transaction_value: 1_000_000.0,
                has_npwp: true,
            }),
            CalculationRequest::PpnSettlement(PpnSettlementInput {
                output_vat: 100.0,
                input_vat: 100.0,
            }),
        ];

        let responses = evaluate_batch(&requests);
        assert_eq!(responses.len(), 4);
        assert!(matches!(&responses[0], CalculationResponse::Ppn(r) if r.vat == 1_100_000.0));
        assert!(matches!(&responses[1], CalculationResponse::Pph21(r) if r.annual_tax == 7_571_239.0));
        assert!(matches!(&responses[2], CalculationResponse::Pph23(r) if r.tax == 150_000.0));
        assert!(matches!(
            &responses[3],
            CalculationResponse::PpnSettlement(r) if r.status == SettlementStatus::Nil
        ));
    }

    #[test]
    fn responses_carry_their_kind_tag() {
        let response = evaluate(&CalculationRequest::PphBadan(PphBadanInput {
            gross_income: 100.0,
            operating_cost: 0.0,
            annual_turnover: 0.0,
        }));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["kind"], "pph_badan");
        assert_eq!(value["total_tax"], 22.0);
    }
}
