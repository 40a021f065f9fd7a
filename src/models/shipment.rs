use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 运单定价记录 (上传 CSV 的一行或样例数据)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    #[serde(rename = "type")]
    pub shipment_type: String,  // 运输类型, 原样作为分组键
    pub agreed_price: BigDecimal,  // 协议价
    pub actual_price: BigDecimal,  // 实收价 (不含附加费)
    pub surcharge: BigDecimal,     // 附加费
}

impl ShipmentRecord {
    pub fn new(
        shipment_type: impl Into<String>,
        agreed_price: BigDecimal,
        actual_price: BigDecimal,
        surcharge: BigDecimal,
    ) -> Self {
        Self {
            shipment_type: shipment_type.into(),
            agreed_price,
            actual_price,
            surcharge,
        }
    }

    /// 实际总价 = 实收价 + 附加费
    pub fn total_price(&self) -> BigDecimal {
        &self.actual_price + &self.surcharge
    }

    /// 差额 = 实际总价 - 协议价 (正数表示多收)
    pub fn difference(&self) -> BigDecimal {
        self.total_price() - &self.agreed_price
    }
}
