use crate::models::ShipmentRecord;
use bigdecimal::{BigDecimal, FromPrimitive, Zero};
use rand::Rng;
use std::str::FromStr;

/// 样例数据默认条数
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;

/// 协议价目表: 运输类型 -> 协议价
pub const AGREED_PRICING: [(&str, &str); 4] = [
    ("standard", "5.99"),
    ("express", "12.99"),
    ("overnight", "24.99"),
    ("international", "35.99"),
];

/// 实收价相对协议价的浮动区间 [-1, 4)
const PRICE_DRIFT: std::ops::Range<f64> = -1.0..4.0;
/// 附加费出现概率
const SURCHARGE_PROBABILITY: f64 = 0.3;
/// 附加费区间 [0, 2)
const SURCHARGE_RANGE: std::ops::Range<f64> = 0.0..2.0;

/// 样例运单生成器
///
/// 随机源由调用方传入, 测试时可用固定种子。
#[derive(Debug, Clone)]
pub struct SampleDataGenerator {
    catalog: Vec<(String, BigDecimal)>,
}

impl SampleDataGenerator {
    pub fn new() -> Self {
        let catalog = AGREED_PRICING
            .iter()
            .filter_map(|(name, price)| {
                BigDecimal::from_str(price)
                    .ok()
                    .map(|p| (name.to_string(), p))
            })
            .collect();
        Self { catalog }
    }

    /// 价目表中的运输类型
    pub fn shipment_types(&self) -> impl Iterator<Item = &str> {
        self.catalog.iter().map(|(name, _)| name.as_str())
    }

    /// 查询某类型的协议价
    pub fn agreed_price(&self, shipment_type: &str) -> Option<&BigDecimal> {
        self.catalog
            .iter()
            .find(|(name, _)| name == shipment_type)
            .map(|(_, price)| price)
    }

    /// 生成 count 条样例记录, 按生成顺序返回
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<ShipmentRecord> {
        let mut records = Vec::with_capacity(count);
        if self.catalog.is_empty() {
            return records;
        }

        for _ in 0..count {
            let (shipment_type, agreed_price) = &self.catalog[rng.gen_range(0..self.catalog.len())];
            let drift = rng.gen_range(PRICE_DRIFT);
            let actual_price = agreed_price.clone() + decimal(drift);
            let surcharge = if rng.gen_bool(SURCHARGE_PROBABILITY) {
                decimal(rng.gen_range(SURCHARGE_RANGE))
            } else {
                BigDecimal::zero()
            };

            records.push(ShipmentRecord::new(
                shipment_type.clone(),
                agreed_price.clone(),
                actual_price,
                surcharge,
            ));
        }

        tracing::info!("[Sample] 生成样例数据 {} 条", records.len());
        records
    }
}

impl Default for SampleDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn decimal(value: f64) -> BigDecimal {
    BigDecimal::from_f64(value).unwrap_or_else(BigDecimal::zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(SampleDataGenerator::new().generate(&mut rng, 0).is_empty());
    }

    #[test]
    fn records_follow_catalog_and_ranges() {
        let generator = SampleDataGenerator::new();
        let mut rng = StdRng::seed_from_u64(42);
        let records = generator.generate(&mut rng, 2_000);

        assert_eq!(records.len(), 2_000);
        let zero = BigDecimal::zero();
        let two = BigDecimal::from(2);
        for record in &records {
            let agreed = generator
                .agreed_price(&record.shipment_type)
                .expect("type from catalog");
            assert_eq!(&record.agreed_price, agreed);

            let drift = &record.actual_price - agreed;
            assert!(drift >= BigDecimal::from(-1));
            assert!(drift < BigDecimal::from(4));

            assert!(record.surcharge >= zero);
            assert!(record.surcharge < two);
        }
    }

    #[test]
    fn every_type_and_some_surcharges_appear() {
        let generator = SampleDataGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);
        let records = generator.generate(&mut rng, 1_000);

        for shipment_type in generator.shipment_types() {
            assert!(records.iter().any(|r| r.shipment_type == shipment_type));
        }

        let with_surcharge = records.iter().filter(|r| !r.surcharge.is_zero()).count();
        // 期望约 300 条
        assert!((200..400).contains(&with_surcharge), "got {with_surcharge}");
    }

    #[test]
    fn same_seed_same_data() {
        let generator = SampleDataGenerator::new();
        let a = generator.generate(&mut StdRng::seed_from_u64(9), 50);
        let b = generator.generate(&mut StdRng::seed_from_u64(9), 50);
        assert_eq!(a, b);
    }
}
