use crate::error::{AuditError, Result};
use crate::models::ShipmentRecord;
use bigdecimal::BigDecimal;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::str::FromStr;

pub const COL_TYPE: &str = "type";
pub const COL_AGREED_PRICE: &str = "agreed_price";
pub const COL_ACTUAL_PRICE: &str = "actual_price";
pub const COL_SURCHARGE: &str = "surcharge";

/// 价格文本最大长度 (字符)
const MAX_PRICE_LEN: usize = 40;
/// 价格小数位/指数绝对值上限, 超出的值在对齐小数位时代价不可控
const MAX_PRICE_SCALE: i64 = 18;

/// 各必需列在表头中的位置
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    shipment_type: usize,
    agreed_price: usize,
    actual_price: usize,
    surcharge: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AuditError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            shipment_type: find(COL_TYPE)?,
            agreed_price: find(COL_AGREED_PRICE)?,
            actual_price: find(COL_ACTUAL_PRICE)?,
            surcharge: find(COL_SURCHARGE)?,
        })
    }
}

/// 从 CSV 读取运单记录
///
/// 需要表头行; 多余的列忽略。任一必需列缺失、单元格为空或价格无法解析,
/// 整个文件失败, 不做部分分析。
pub fn load_records<R: Read>(reader: R) -> Result<Vec<ShipmentRecord>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;
    tracing::debug!("CSV表头: {:?}", headers);

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row?;
        // 表头占第 1 行
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);

        let shipment_type = cell(&row, columns.shipment_type, COL_TYPE, line)?;
        let agreed_price = price(&row, columns.agreed_price, COL_AGREED_PRICE, line)?;
        let actual_price = price(&row, columns.actual_price, COL_ACTUAL_PRICE, line)?;
        let surcharge = price(&row, columns.surcharge, COL_SURCHARGE, line)?;

        records.push(ShipmentRecord::new(
            shipment_type,
            agreed_price,
            actual_price,
            surcharge,
        ));
    }

    tracing::info!("CSV加载完成: {} 条记录", records.len());
    Ok(records)
}

/// 从内存中的上传内容读取
pub fn load_records_from_bytes(bytes: &[u8]) -> Result<Vec<ShipmentRecord>> {
    load_records(bytes)
}

/// 原样取值, 只有空单元格算缺失
fn cell<'r>(row: &'r StringRecord, idx: usize, column: &str, line: u64) -> Result<&'r str> {
    match row.get(idx) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing(column, line)),
    }
}

fn price(row: &StringRecord, idx: usize, column: &str, line: u64) -> Result<BigDecimal> {
    let raw = cell(row, idx, column, line)?;
    let text = raw.trim();
    if text.is_empty() {
        return Err(missing(column, line));
    }

    let non_numeric = || AuditError::NonNumeric {
        row: line,
        column: column.to_string(),
        value: raw.to_string(),
    };
    if text.len() > MAX_PRICE_LEN {
        return Err(non_numeric());
    }
    let value = BigDecimal::from_str(text).map_err(|_| non_numeric())?;
    let (_, scale) = value.as_bigint_and_exponent();
    if !(-MAX_PRICE_SCALE..=MAX_PRICE_SCALE).contains(&scale) {
        return Err(non_numeric());
    }
    Ok(value)
}

fn missing(column: &str, line: u64) -> AuditError {
    AuditError::MissingValue {
        row: line,
        column: column.to_string(),
    }
}
