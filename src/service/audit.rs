use super::{DiscrepancyAnalyzer, ReportPresenter, SampleDataGenerator};
use crate::error::{AuditError, Result};
use crate::loader;
use crate::models::{AuditSummary, RenderedReport, ShipmentRecord};
use rand::Rng;
use std::time::Instant;

/// 一次审计的触发方式, 每次只会走其中一条路径
#[derive(Debug, Clone)]
pub enum AuditTrigger {
    /// 上传的 CSV 内容
    Upload(Vec<u8>),
    /// 生成样例数据, 条数
    GenerateSample(usize),
}

/// 审计服务: 取数 -> 分析 -> 呈现
pub struct AuditService {
    generator: SampleDataGenerator,
    analyzer: DiscrepancyAnalyzer,
    presenter: ReportPresenter,
    max_sample_size: usize,
}

impl AuditService {
    pub fn new(presenter: ReportPresenter, max_sample_size: usize) -> Self {
        Self {
            generator: SampleDataGenerator::new(),
            analyzer: DiscrepancyAnalyzer::new(),
            presenter,
            max_sample_size,
        }
    }

    /// 执行一次审计; 没有触发时保持空闲, 返回 None
    pub fn run(&self, trigger: Option<AuditTrigger>) -> Result<Option<RenderedReport>> {
        self.run_with_rng(trigger, &mut rand::thread_rng())
    }

    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        trigger: Option<AuditTrigger>,
        rng: &mut R,
    ) -> Result<Option<RenderedReport>> {
        let Some(trigger) = trigger else {
            tracing::debug!("[Audit] 未触发, 保持空闲");
            return Ok(None);
        };

        let start = Instant::now();
        let summary = self.summarize(trigger, rng)?;
        let report = self.presenter.present(&summary);
        tracing::info!("[Audit] 审计完成, 耗时: {:?}", start.elapsed());

        Ok(Some(report))
    }

    /// 取数并分析, 返回汇总
    pub fn summarize<R: Rng + ?Sized>(
        &self,
        trigger: AuditTrigger,
        rng: &mut R,
    ) -> Result<AuditSummary> {
        let records = self.records_for(trigger, rng)?;
        Ok(self.analyzer.analyze(&records))
    }

    fn records_for<R: Rng + ?Sized>(
        &self,
        trigger: AuditTrigger,
        rng: &mut R,
    ) -> Result<Vec<ShipmentRecord>> {
        match trigger {
            AuditTrigger::Upload(bytes) => {
                tracing::info!("[Audit] 读取上传文件, {} 字节", bytes.len());
                loader::load_records_from_bytes(&bytes).inspect_err(|e| {
                    tracing::warn!("[Audit] 上传文件无法分析: {}", e);
                })
            }
            AuditTrigger::GenerateSample(count) => {
                if count > self.max_sample_size {
                    return Err(AuditError::InvalidArgument(format!(
                        "sample size {} exceeds limit {}",
                        count, self.max_sample_size
                    )));
                }
                Ok(self.generator.generate(rng, count))
            }
        }
    }
}
