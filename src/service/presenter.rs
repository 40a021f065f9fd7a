use crate::error::{AuditError, Result};
use crate::models::{
    AuditSummary, BarChart, ChartBar, OverallTotals, RenderedReport, SummaryRow,
};
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::Utc;
use std::fmt;

pub const REPORT_TITLE: &str = "ShipPlug Fulfillment Pricing Audit";
pub const CHART_TITLE: &str = "Total Difference by Shipping Type";

/// 汇总表列名
pub const TABLE_COLUMNS: [&str; 7] = [
    "type",
    "shipments",
    "total_difference",
    "avg_difference",
    "total_actual",
    "total_agreed",
    "potential_savings",
];

/// 文本柱状图的宽度 (字符)
const BAR_WIDTH: usize = 40;
/// 刻度数量上限, 防止步长过小时刻度爆炸
const MAX_TICKS: usize = 100;

/// 柱状图 y 轴配置, 范围固定不随数据缩放
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    y_min: f64,
    y_max: f64,
    tick_step: f64,
}

impl ChartConfig {
    pub fn new(y_min: f64, y_max: f64, tick_step: f64) -> Result<Self> {
        if !(y_min.is_finite() && y_max.is_finite()) || y_max <= y_min {
            return Err(AuditError::InvalidArgument(format!(
                "chart y-axis range [{y_min}, {y_max}] is empty"
            )));
        }
        if !tick_step.is_finite() || tick_step <= 0.0 {
            return Err(AuditError::InvalidArgument(format!(
                "chart tick step {tick_step} must be positive"
            )));
        }
        Ok(Self {
            y_min,
            y_max,
            tick_step,
        })
    }

    pub fn y_range(&self) -> [f64; 2] {
        [self.y_min, self.y_max]
    }

    /// y_min 之上每隔 tick_step 一个刻度, 直到 y_max
    pub fn ticks(&self) -> Vec<f64> {
        (1..=MAX_TICKS)
            .map(|k| self.y_min + self.tick_step * k as f64)
            .take_while(|t| *t <= self.y_max + f64::EPSILON)
            .collect()
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            y_min: 0.0,
            y_max: 6000.0,
            tick_step: 500.0,
        }
    }
}

/// 报表呈现: 汇总表 + 柱状图 + 三项合计
#[derive(Debug, Clone, Default)]
pub struct ReportPresenter {
    chart: ChartConfig,
}

impl ReportPresenter {
    pub fn new(chart: ChartConfig) -> Self {
        Self { chart }
    }

    pub fn present(&self, summary: &AuditSummary) -> RenderedReport {
        // 表格按类型名排序
        let mut table: Vec<SummaryRow> = summary
            .iter()
            .map(|(shipment_type, s)| SummaryRow {
                shipment_type: shipment_type.clone(),
                summary: s.clone(),
            })
            .collect();
        table.sort_by(|a, b| a.shipment_type.cmp(&b.shipment_type));

        let bars = table
            .iter()
            .map(|row| ChartBar {
                label: row.shipment_type.clone(),
                value: row.summary.total_difference.to_f64().unwrap_or(0.0),
            })
            .collect();

        let chart = BarChart {
            title: CHART_TITLE.to_string(),
            x_label: "Shipping Type".to_string(),
            y_label: "Total Difference ($)".to_string(),
            y_range: self.chart.y_range(),
            y_ticks: self.chart.ticks(),
            bars,
        };

        let totals = OverallTotals {
            total_shipments: summary.total_shipments(),
            total_difference: summary.total_difference(),
            potential_savings: summary.potential_savings(),
        };

        tracing::info!(
            "[Report] 类型 {} 个, 总单量 {}, 差额合计 {}, 可追回 {}",
            table.len(),
            totals.total_shipments,
            format_money(&totals.total_difference),
            format_money(&totals.potential_savings)
        );

        RenderedReport {
            title: REPORT_TITLE.to_string(),
            generated_at: Utc::now(),
            table,
            chart,
            totals,
        }
    }
}

/// 金额保留两位小数
pub fn format_money(value: &BigDecimal) -> String {
    value.round(2).with_scale(2).to_string()
}

impl OverallTotals {
    /// "Total Shipments / Total Difference / Potential Savings" 三行
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Total Shipments: {}", self.total_shipments),
            format!("Total Difference: ${}", format_money(&self.total_difference)),
            format!("Potential Savings: ${}", format_money(&self.potential_savings)),
        ]
    }
}

impl SummaryRow {
    fn cells(&self) -> [String; 7] {
        let s = &self.summary;
        [
            self.shipment_type.clone(),
            s.shipments.to_string(),
            format_money(&s.total_difference),
            format_money(&s.avg_difference),
            format_money(&s.total_actual),
            format_money(&s.total_agreed),
            format_money(&s.potential_savings),
        ]
    }
}

impl BarChart {
    /// 按固定 y 轴范围计算柱长; 超出上限时截断并标记
    fn bar(&self, value: f64) -> (usize, bool) {
        let [min, max] = self.y_range;
        let fraction = ((value - min) / (max - min)).clamp(0.0, 1.0);
        let filled = (fraction * BAR_WIDTH as f64).round() as usize;
        (filled, value > max)
    }
}

impl fmt::Display for RenderedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f)?;

        writeln!(f, "Summary Table")?;
        let rows: Vec<[String; 7]> = self.table.iter().map(SummaryRow::cells).collect();
        let mut widths = TABLE_COLUMNS.map(str::len);
        for cells in &rows {
            for (w, cell) in widths.iter_mut().zip(cells.iter()) {
                *w = (*w).max(cell.len());
            }
        }
        for (i, column) in TABLE_COLUMNS.iter().enumerate() {
            let sep = if i == 0 { "" } else { "  " };
            write!(f, "{sep}{column:<width$}", width = widths[i])?;
        }
        writeln!(f)?;
        let rule = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        writeln!(f, "{}", "-".repeat(rule))?;
        if rows.is_empty() {
            writeln!(f, "(no shipments)")?;
        }
        for cells in &rows {
            for (i, cell) in cells.iter().enumerate() {
                // 首列左对齐, 数值列右对齐
                if i == 0 {
                    write!(f, "{cell:<width$}", width = widths[i])?;
                } else {
                    write!(f, "  {cell:>width$}", width = widths[i])?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        let chart = &self.chart;
        writeln!(f, "{}", chart.title)?;
        writeln!(
            f,
            "{}: ${} .. ${}",
            chart.y_label, chart.y_range[0], chart.y_range[1]
        )?;
        if !chart.y_ticks.is_empty() {
            let ticks: Vec<String> = chart.y_ticks.iter().map(|t| format!("${t}")).collect();
            writeln!(f, "ticks: {}", ticks.join(" "))?;
        }
        if chart.bars.is_empty() {
            writeln!(f, "(no data)")?;
        }
        let label_width = chart.bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
        for bar in &chart.bars {
            let (filled, clipped) = chart.bar(bar.value);
            let mut body = "#".repeat(filled);
            body.push_str(&" ".repeat(BAR_WIDTH - filled));
            let end = if clipped { '>' } else { '|' };
            writeln!(
                f,
                "{:<label_width$} |{}{} ${:.2}",
                bar.label, body, end, bar.value
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Overall Summary")?;
        for line in self.totals.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
