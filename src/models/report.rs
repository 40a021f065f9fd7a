use super::TypeSummary;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 汇总表的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "type")]
    pub shipment_type: String,
    #[serde(flatten)]
    pub summary: TypeSummary,
}

/// 柱状图中的一根柱子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

/// 按运输类型的差额柱状图, y 轴范围固定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_range: [f64; 2],
    pub y_ticks: Vec<f64>,
    pub bars: Vec<ChartBar>,
}

/// 全部类型的三项合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallTotals {
    pub total_shipments: u64,
    pub total_difference: BigDecimal,
    pub potential_savings: BigDecimal,
}

/// 呈现结果: 汇总表 + 柱状图 + 合计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub table: Vec<SummaryRow>,
    pub chart: BarChart,
    pub totals: OverallTotals,
}
