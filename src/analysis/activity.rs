//! Per-account activity across projection periods

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::accounts::AccountId;
use crate::projection::{FlowRecord, ProjectionDataPoint};

/// Accounts with non-dormant flows in a period, in account id order
pub fn active_flows<'a>(
    data_point: &'a ProjectionDataPoint,
) -> impl Iterator<Item = (AccountId, &'a FlowRecord)> + 'a {
    data_point
        .flows
        .iter()
        .filter(|(_, flows)| !flows.is_dormant())
        .map(|(id, flows)| (*id, flows))
}

/// Flow totals for one account accumulated over many periods
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowTotals {
    pub account_id: AccountId,
    pub active_periods: u32,
    pub dormant_periods: u32,
    pub flows: FlowRecord,
}

impl FlowTotals {
    fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            ..Default::default()
        }
    }

    fn add(&mut self, flows: &FlowRecord) {
        if flows.is_dormant() {
            self.dormant_periods += 1;
        } else {
            self.active_periods += 1;
        }

        let total = &mut self.flows;
        total.income += flows.income;
        total.tax += flows.tax;
        total.cgt += flows.cgt;
        total.employer_contribution += flows.employer_contribution;
        total.costs += flows.costs;
        total.transfers_in += flows.transfers_in;
        total.transfers_out += flows.transfers_out;
        total.mortgage_payments_out += flows.mortgage_payments_out;
        total.mortgage_repayments_in += flows.mortgage_repayments_in;
        total.interest += flows.interest;
        total.events += flows.events;
    }
}

/// Sum every account's flows across all periods, in account id order
pub fn aggregate_flows(data_points: &[ProjectionDataPoint]) -> Vec<FlowTotals> {
    let mut totals: BTreeMap<AccountId, FlowTotals> = BTreeMap::new();

    for dp in data_points {
        for (id, flows) in &dp.flows {
            totals.entry(*id).or_insert_with(|| FlowTotals::new(*id)).add(flows);
        }
    }

    totals.into_values().collect()
}
