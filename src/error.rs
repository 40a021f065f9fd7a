/// 审计流水线错误
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("row {row}: missing value in column `{column}`")]
    MissingValue { row: u64, column: String },

    #[error("row {row}: column `{column}` value {value:?} is not numeric")]
    NonNumeric {
        row: u64,
        column: String,
        value: String,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl AuditError {
    /// 是否属于字段结构问题 (缺列 / 缺值 / 非数字)
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            AuditError::MissingColumn(_)
                | AuditError::MissingValue { .. }
                | AuditError::NonNumeric { .. }
        )
    }

    /// 出错的列名 (若可定位)
    pub fn column(&self) -> Option<&str> {
        match self {
            AuditError::MissingColumn(column)
            | AuditError::MissingValue { column, .. }
            | AuditError::NonNumeric { column, .. } => Some(column),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
