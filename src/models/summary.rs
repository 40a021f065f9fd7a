use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 按运输类型汇总的差额统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub shipments: u64,
    pub total_difference: BigDecimal,
    pub avg_difference: BigDecimal,
    pub total_actual: BigDecimal,   // 实际总价合计
    pub total_agreed: BigDecimal,   // 协议价合计
    pub potential_savings: BigDecimal,  // max(total_difference, 0)
}

impl TypeSummary {
    /// 由累计值构建, 平均差额与可追回金额在此派生
    pub fn from_totals(
        shipments: u64,
        total_difference: BigDecimal,
        total_actual: BigDecimal,
        total_agreed: BigDecimal,
    ) -> Self {
        let avg_difference = if shipments == 0 {
            BigDecimal::zero()
        } else {
            total_difference.clone() / BigDecimal::from(shipments)
        };
        let potential_savings = savings_of(&total_difference);

        Self {
            shipments,
            total_difference,
            avg_difference,
            total_actual,
            total_agreed,
            potential_savings,
        }
    }
}

/// 只有多收部分可追回, 少收记为 0
pub fn savings_of(total_difference: &BigDecimal) -> BigDecimal {
    if *total_difference > BigDecimal::zero() {
        total_difference.clone()
    } else {
        BigDecimal::zero()
    }
}

/// 审计汇总: 运输类型 -> 统计, 保留首次出现顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditSummary {
    groups: IndexMap<String, TypeSummary>,
}

impl AuditSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shipment_type: String, summary: TypeSummary) {
        self.groups.insert(shipment_type, summary);
    }

    pub fn get(&self, shipment_type: &str) -> Option<&TypeSummary> {
        self.groups.get(shipment_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeSummary)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_shipments(&self) -> u64 {
        self.groups.values().map(|s| s.shipments).sum()
    }

    pub fn total_difference(&self) -> BigDecimal {
        self.groups
            .values()
            .fold(BigDecimal::zero(), |acc, s| acc + &s.total_difference)
    }

    /// 各组可追回金额之和 (逐组取下限 0 后再求和)
    pub fn potential_savings(&self) -> BigDecimal {
        self.groups
            .values()
            .fold(BigDecimal::zero(), |acc, s| acc + &s.potential_savings)
    }
}

impl FromIterator<(String, TypeSummary)> for AuditSummary {
    fn from_iter<I: IntoIterator<Item = (String, TypeSummary)>>(iter: I) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}
