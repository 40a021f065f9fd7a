use bigdecimal::{BigDecimal, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shipplug_audit::models::{savings_of, AuditSummary, ShipmentRecord};
use shipplug_audit::{
    load_records, AuditError, AuditService, AuditTrigger, DiscrepancyAnalyzer, ReportPresenter,
    SampleDataGenerator,
};
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn audit_csv(bytes: &[u8]) -> shipplug_audit::Result<AuditSummary> {
    AuditService::new(ReportPresenter::default(), 10_000)
        .summarize(AuditTrigger::Upload(bytes.to_vec()), &mut StdRng::seed_from_u64(0))
}

fn sample(seed: u64, count: usize) -> Vec<ShipmentRecord> {
    SampleDataGenerator::new().generate(&mut StdRng::seed_from_u64(seed), count)
}

#[test]
fn aggregation_is_deterministic() {
    let records = sample(11, 5_000);
    let analyzer = DiscrepancyAnalyzer::new();
    assert_eq!(analyzer.analyze(&records), analyzer.analyze(&records));
}

#[test]
fn aggregation_ignores_record_order() {
    let records = sample(12, 1_000);
    let mut reversed = records.clone();
    reversed.reverse();

    let analyzer = DiscrepancyAnalyzer::new();
    let forward = analyzer.analyze(&records);
    let backward = analyzer.analyze(&reversed);

    assert_eq!(forward.len(), backward.len());
    for (shipment_type, group) in forward.iter() {
        assert_eq!(backward.get(shipment_type), Some(group));
    }
}

#[test]
fn group_invariants_hold_on_sample_data() {
    let records = sample(13, 10_000);
    let summary = DiscrepancyAnalyzer::new().analyze(&records);

    assert_eq!(summary.total_shipments(), 10_000);
    for (_, group) in summary.iter() {
        assert_eq!(group.total_difference, &group.total_actual - &group.total_agreed);
        assert_eq!(group.potential_savings, savings_of(&group.total_difference));
        assert!(group.potential_savings >= BigDecimal::zero());
    }
    assert!(summary.potential_savings() >= BigDecimal::zero());
}

#[test]
fn sample_audit_is_overcharged_on_average() {
    // 浮动区间 [-1, 4) 加附加费, 每组平均差额约 1.8
    let summary = DiscrepancyAnalyzer::new().analyze(&sample(14, 10_000));
    for (shipment_type, group) in summary.iter() {
        assert!(
            group.avg_difference > dec("1.5") && group.avg_difference < dec("2.1"),
            "{shipment_type}: {}",
            group.avg_difference
        );
    }
}

#[test]
fn empty_input_renders_zero_totals() {
    let summary = DiscrepancyAnalyzer::new().analyze(&[]);
    assert!(summary.is_empty());

    let report = ReportPresenter::default().present(&summary);
    let text = report.to_string();
    assert!(text.contains("Total Shipments: 0"));
    assert!(text.contains("Total Difference: $0.00"));
    assert!(text.contains("Potential Savings: $0.00"));
}

#[test]
fn header_only_upload_is_an_empty_audit() {
    let summary = audit_csv(b"type,agreed_price,actual_price,surcharge\n").unwrap();
    assert!(summary.is_empty());
}

#[test]
fn two_standard_shipments_scenario() {
    let csv = "type,agreed_price,actual_price,surcharge\n\
               standard,5.99,6.99,0\n\
               standard,5.99,5.99,1.00\n";
    let summary = audit_csv(csv.as_bytes()).unwrap();

    let standard = summary.get("standard").unwrap();
    assert_eq!(standard.shipments, 2);
    assert_eq!(standard.total_difference, dec("2.00"));
    assert_eq!(standard.avg_difference, dec("1.00"));
    assert_eq!(standard.potential_savings, dec("2.00"));

    let report = ReportPresenter::default().present(&summary);
    assert_eq!(report.totals.lines()[0], "Total Shipments: 2");
    assert_eq!(report.totals.lines()[2], "Potential Savings: $2.00");
}

#[test]
fn missing_agreed_price_column_fails() {
    let csv = "type,actual_price,surcharge\nstandard,6.99,0\n";
    let err = audit_csv(csv.as_bytes()).unwrap_err();

    assert!(matches!(err, AuditError::MissingColumn(ref c) if c == "agreed_price"));
    assert!(err.to_string().contains("agreed_price"));
}

#[test]
fn mixed_case_types_form_separate_groups() {
    let csv = "type,agreed_price,actual_price,surcharge\n\
               Standard,5.99,6.99,0\n\
               standard,5.99,6.99,0\n";
    let records = load_records(csv.as_bytes()).unwrap();
    let summary = DiscrepancyAnalyzer::new().analyze(&records);

    assert_eq!(summary.len(), 2);
    assert_eq!(summary.get("Standard").unwrap().shipments, 1);
}
