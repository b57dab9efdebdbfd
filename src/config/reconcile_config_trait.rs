// ==========================================
// 产品目录对账系统 - 对账配置读取 Trait
// ==========================================
// 职责: 定义对账引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::repository::error::RepositoryResult;

// ==========================================
// ReconcileConfigReader Trait
// ==========================================
// 用途: 哨兵值 / 写入批量 / 停用标记
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ReconcileConfigReader {
    // ===== 参考目录分区 =====

    /// 获取 BaseProductPriceId 的待定价哨兵
    ///
    /// # 默认值
    /// - "Load Pricing"
    fn get_staged_base_price_sentinel(&self) -> RepositoryResult<String>;

    /// 获取 ProductPriceId 的记录价格待定哨兵（第 2 轮区分 Partial / BasePricing）
    ///
    /// # 默认值
    /// - "Load Product Price"
    fn get_pending_product_price_sentinel(&self) -> RepositoryResult<String>;

    /// 获取参考目录停用标记值
    ///
    /// # 默认值
    /// - "Y"
    fn get_discontinued_marker(&self) -> RepositoryResult<String>;

    // ===== 写入缓冲 =====

    /// 获取写入缓冲的批量上限
    ///
    /// # 默认值
    /// - 50
    fn get_write_buffer_load_limit(&self) -> RepositoryResult<usize>;
}
