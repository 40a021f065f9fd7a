use crate::models::{AuditSummary, ShipmentRecord, TypeSummary};
use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;

/// 分组累加器 - 跟踪单个运输类型的累计值
#[derive(Debug, Clone)]
struct GroupTotals {
    shipments: u64,
    total_difference: BigDecimal,
    total_actual: BigDecimal,
    total_agreed: BigDecimal,
}

impl GroupTotals {
    fn new() -> Self {
        Self {
            shipments: 0,
            total_difference: BigDecimal::zero(),
            total_actual: BigDecimal::zero(),
            total_agreed: BigDecimal::zero(),
        }
    }

    fn add(&mut self, record: &ShipmentRecord) {
        let total_price = record.total_price();
        self.total_difference += &total_price - &record.agreed_price;
        self.total_actual += total_price;
        self.total_agreed += &record.agreed_price;
        self.shipments += 1;
    }

    fn finish(self) -> TypeSummary {
        TypeSummary::from_totals(
            self.shipments,
            self.total_difference,
            self.total_actual,
            self.total_agreed,
        )
    }
}

/// 价格差异分析
///
/// 按原始 `type` 字符串分组 (不做大小写或空白归一化), 组顺序为首次出现顺序。
/// 空输入返回空汇总。
#[derive(Debug, Clone, Default)]
pub struct DiscrepancyAnalyzer;

impl DiscrepancyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[ShipmentRecord]) -> AuditSummary {
        if records.is_empty() {
            tracing::warn!("[Analyze] 输入为空, 返回空汇总");
            return AuditSummary::new();
        }

        let mut groups: IndexMap<&str, GroupTotals> = IndexMap::new();
        for record in records {
            groups
                .entry(record.shipment_type.as_str())
                .or_insert_with(GroupTotals::new)
                .add(record);
        }

        let summary: AuditSummary = groups
            .into_iter()
            .map(|(shipment_type, totals)| {
                let summary = totals.finish();
                tracing::debug!(
                    "[Analyze] {}: {} 单, 差额合计 {}",
                    shipment_type, summary.shipments, summary.total_difference
                );
                (shipment_type.to_string(), summary)
            })
            .collect();

        tracing::info!(
            "[Analyze] 分析完成: {} 条记录, {} 个类型",
            records.len(),
            summary.len()
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn record(t: &str, agreed: &str, actual: &str, surcharge: &str) -> ShipmentRecord {
        ShipmentRecord::new(t, dec(agreed), dec(actual), dec(surcharge))
    }

    #[test]
    fn empty_input_gives_empty_summary() {
        let summary = DiscrepancyAnalyzer::new().analyze(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total_shipments(), 0);
        assert!(summary.potential_savings().is_zero());
    }

    #[test]
    fn standard_overcharge_scenario() {
        let records = vec![
            record("standard", "5.99", "6.99", "0"),
            record("standard", "5.99", "5.99", "1.00"),
        ];
        let summary = DiscrepancyAnalyzer::new().analyze(&records);

        let standard = summary.get("standard").unwrap();
        assert_eq!(standard.shipments, 2);
        assert_eq!(standard.total_difference, dec("2.00"));
        assert_eq!(standard.avg_difference, dec("1.00"));
        assert_eq!(standard.total_actual, dec("13.98"));
        assert_eq!(standard.total_agreed, dec("11.98"));
        assert_eq!(standard.potential_savings, dec("2.00"));
    }

    #[test]
    fn undercharged_group_has_no_savings() {
        let records = vec![
            record("express", "12.99", "11.99", "0"),
            record("express", "12.99", "12.49", "0"),
        ];
        let summary = DiscrepancyAnalyzer::new().analyze(&records);

        let express = summary.get("express").unwrap();
        assert_eq!(express.total_difference, dec("-1.50"));
        assert_eq!(express.avg_difference, dec("-0.75"));
        assert!(express.potential_savings.is_zero());
    }

    #[test]
    fn groups_by_raw_type_in_first_appearance_order() {
        let records = vec![
            record("overnight", "24.99", "25.99", "0"),
            record("Standard", "5.99", "5.99", "0"),
            record("standard", "5.99", "5.99", "0"),
            record("overnight", "24.99", "24.99", "0"),
        ];
        let summary = DiscrepancyAnalyzer::new().analyze(&records);

        let keys: Vec<&str> = summary.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["overnight", "Standard", "standard"]);
        assert_eq!(summary.get("overnight").unwrap().shipments, 2);
    }

    #[test]
    fn sum_invariant_holds_per_group() {
        let records = vec![
            record("international", "35.99", "38.12", "1.10"),
            record("international", "35.99", "35.00", "0"),
            record("express", "12.99", "16.50", "0.40"),
        ];
        let summary = DiscrepancyAnalyzer::new().analyze(&records);

        for (_, group) in summary.iter() {
            assert_eq!(
                group.total_difference,
                &group.total_actual - &group.total_agreed
            );
        }
        assert_eq!(summary.total_shipments(), records.len() as u64);
    }
}
