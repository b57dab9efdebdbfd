// ==========================================
// 产品目录对账系统 - 目录复核转换器
// ==========================================
// 职责: 供应商目录批次的单条处理策略
// 批次准备: 缺失的 CatalogNumber / ProductNumber 由前缀与料号拼装
// 流程(单条):
// 1) Possible Duplicate 记录直接不通过（需人工复核）
// 2) 计量单位标准化（缺失时默认 EA 并提示 Default UOI）
// 3) 数量与停产标志校验
// 4) 通过的记录进入写入缓冲
// ==========================================

use crate::domain::fields;
use crate::domain::record::{Record, RecordSet};
use crate::domain::types::{Channel, Outcome};
use crate::engine::error::TransformError;
use crate::engine::reporter::Reporter;
use crate::engine::transformer::RecordTransformer;
use crate::engine::viability::FieldRequirements;
use crate::importer::data_cleaner::{DataCleaner, NumberCheck, DEFAULT_UNIT};
use crate::repository::error::RepositoryResult;
use crate::repository::write_buffer::{RecordSink, WriteBuffer};
use tracing::debug;

/// 重复记录的失败提示
pub const DUPLICATE_REVIEW_MESSAGE: &str = "Duplicate ProductNumber requires manual review";

/// 产品号含重复单位的提示
pub const DUPLICATE_UNIT_MESSAGE: &str = "Please check for duplicate units in ProductNumber";

pub struct CatalogReviewTransformer<S: RecordSink> {
    buffer: WriteBuffer<S>,
    cleaner: DataCleaner,
}

impl<S: RecordSink> CatalogReviewTransformer<S> {
    /// # 参数
    /// - sink: 通过记录的写出目标
    /// - load_limit: 写入缓冲批量上限
    pub fn new(sink: S, load_limit: usize) -> Self {
        Self {
            buffer: WriteBuffer::new(sink, load_limit),
            cleaner: DataCleaner,
        }
    }

    pub fn buffer(&self) -> &WriteBuffer<S> {
        &self.buffer
    }

    pub fn into_sink(self) -> S {
        self.buffer.into_sink()
    }

    /// 记录上已标准化的单位（缺失为 EA）
    fn unit_of(&self, record: &Record) -> String {
        match record.get(fields::UNIT_OF_ISSUE).map(str::trim) {
            Some(unit) if !unit.is_empty() => self.cleaner.normalize_unit(unit),
            _ => DEFAULT_UNIT.to_string(),
        }
    }

    /// 补全单条记录的目录号与产品号
    ///
    /// # 返回
    /// - (目录号是否拼装, 产品号是否拼装)
    fn fill_part_numbers(&self, record: &mut Record) -> (bool, bool) {
        let mut built_catalog = false;
        if !record.is_present(fields::CATALOG_NUMBER)
            && record.is_present(fields::MANUFACTURER_PREFIX)
            && record.is_present(fields::MANUFACTURER_PART_NUMBER)
        {
            let catalog_number = self.cleaner.make_catalog_number(
                record.value(fields::MANUFACTURER_PREFIX),
                record.value(fields::MANUFACTURER_PART_NUMBER),
            );
            record.set(fields::CATALOG_NUMBER, catalog_number);
            built_catalog = true;
        }

        let mut built_product = false;
        if !record.is_present(fields::PRODUCT_NUMBER) && record.is_present(fields::CATALOG_NUMBER) {
            let unit = self.unit_of(record);
            let product_number = self
                .cleaner
                .build_product_number(record.value(fields::CATALOG_NUMBER), &unit);
            record.set(fields::PRODUCT_NUMBER, product_number);
            built_product = true;
        }
        (built_catalog, built_product)
    }

    fn clean_unit_of_issue(&self, record: &mut Record, reporter: &mut Reporter) {
        match record.get(fields::UNIT_OF_ISSUE).map(str::trim) {
            Some(unit) if !unit.is_empty() => {
                let normalized = self.cleaner.normalize_unit(unit);
                record.set(fields::UNIT_OF_ISSUE, normalized);
            }
            _ => {
                record.set(fields::UNIT_OF_ISSUE, DEFAULT_UNIT);
                reporter.report_default_unit_of_issue();
            }
        }
    }
}

impl<S: RecordSink> RecordTransformer for CatalogReviewTransformer<S> {
    fn name(&self) -> &str {
        "Catalog Review"
    }

    fn requirements(&self) -> FieldRequirements {
        FieldRequirements::new(
            [
                fields::CATALOG_NUMBER,
                fields::VENDOR_NAME,
                fields::VENDOR_PART_NUMBER,
            ],
            [
                fields::MANUFACTURER_NAME,
                fields::MANUFACTURER_PART_NUMBER,
                fields::PRODUCT_NUMBER,
            ],
        )
    }

    fn prepare(&mut self, batch: &mut RecordSet) {
        let mut built_catalog = 0;
        let mut built_product = 0;
        for record in batch.records_mut() {
            let (catalog, product) = self.fill_part_numbers(record);
            built_catalog += usize::from(catalog);
            built_product += usize::from(product);
        }

        if built_catalog > 0 {
            batch.add_column(fields::CATALOG_NUMBER);
        }
        if built_product > 0 {
            batch.add_column(fields::PRODUCT_NUMBER);
        }
        if built_catalog + built_product > 0 {
            debug!(built_catalog, built_product, "批次料号已补全");
        }
    }

    fn uses_cascade(&self) -> bool {
        true
    }

    fn transform(
        &mut self,
        record: &mut Record,
        reporter: &mut Reporter,
    ) -> Result<bool, TransformError> {
        if record.value(fields::FILTER) == Outcome::PossibleDuplicate.as_str() {
            reporter.record(Channel::Fail, DUPLICATE_REVIEW_MESSAGE);
            return Ok(false);
        }

        self.clean_unit_of_issue(record, reporter);

        let unit = record.value(fields::UNIT_OF_ISSUE).to_string();
        let catalog_number = record.value(fields::CATALOG_NUMBER);
        if self.cleaner.has_duplicate_unit(catalog_number, &unit)
            && record.value(fields::PRODUCT_NUMBER)
                == self.cleaner.build_product_number(catalog_number, &unit)
        {
            reporter.record(Channel::Alert, DUPLICATE_UNIT_MESSAGE);
        }

        if let Some(quantity) = record.get(fields::UNIT_OF_ISSUE_QUANTITY) {
            match self.cleaner.check_number(quantity) {
                NumberCheck::Valid(_) => {}
                NumberCheck::Negative(_) => {
                    return Err(TransformError::Record(format!(
                        "{} must be a positive number.",
                        fields::UNIT_OF_ISSUE_QUANTITY
                    )));
                }
                NumberCheck::NotANumber => {
                    reporter.record(
                        Channel::Alert,
                        &format!("Review {}", fields::UNIT_OF_ISSUE_QUANTITY),
                    );
                }
            }
        }

        // 只有匹配到参考条目的记录带停产标志
        if let Some(flag) = record.get(fields::DB_IS_DISCONTINUED) {
            self.cleaner
                .check_flag_field(fields::DB_IS_DISCONTINUED, Some(flag), reporter);
        }

        self.buffer.push(record.clone())?;
        debug!(
            catalog_number = record.value(fields::CATALOG_NUMBER),
            filter = record.value(fields::FILTER),
            pending = self.buffer.pending_len(),
            "记录进入写入缓冲"
        );
        Ok(true)
    }

    fn finish(&mut self) -> RepositoryResult<()> {
        self.buffer.flush_remaining().map(|_| ())
    }
}
