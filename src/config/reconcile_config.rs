// ==========================================
// 产品目录对账系统 - 对账配置快照
// ==========================================
// 职责: 一次批处理使用的已解析配置（批处理期间不变）
// ==========================================

use crate::config::config_manager::defaults;
use crate::config::reconcile_config_trait::ReconcileConfigReader;
use crate::repository::error::RepositoryResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    pub staged_base_price_sentinel: String,
    pub pending_product_price_sentinel: String,
    pub discontinued_marker: String,
    pub write_buffer_load_limit: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            staged_base_price_sentinel: defaults::STAGED_BASE_PRICE_SENTINEL.to_string(),
            pending_product_price_sentinel: defaults::PENDING_PRODUCT_PRICE_SENTINEL.to_string(),
            discontinued_marker: defaults::DISCONTINUED_MARKER.to_string(),
            write_buffer_load_limit: defaults::WRITE_BUFFER_LOAD_LIMIT,
        }
    }
}

impl ReconcileConfig {
    /// 从配置读取器解析完整配置
    pub fn from_reader(reader: &dyn ReconcileConfigReader) -> RepositoryResult<Self> {
        Ok(Self {
            staged_base_price_sentinel: reader.get_staged_base_price_sentinel()?,
            pending_product_price_sentinel: reader.get_pending_product_price_sentinel()?,
            discontinued_marker: reader.get_discontinued_marker()?,
            write_buffer_load_limit: reader.get_write_buffer_load_limit()?,
        })
    }

    /// 判断原始停用标记是否表示“已停用”（忽略大小写与首尾空白）
    pub fn is_discontinued(&self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(self.discontinued_marker.trim())
    }
}
