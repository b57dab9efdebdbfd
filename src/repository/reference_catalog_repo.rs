// ==========================================
// 产品目录对账系统 - 参考目录 Provider Trait
// ==========================================
// 职责: 定义参考目录读取接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据读取
// ==========================================

use crate::domain::catalog::ReferenceCatalog;
use crate::repository::error::RepositoryResult;

// ==========================================
// ReferenceCatalogProvider Trait
// ==========================================
// 实现者:
// - ReferenceCatalogRepositoryImpl（SQLite product_action_review 表）
// - ReferenceCatalog 自身（内存快照）
pub trait ReferenceCatalogProvider {
    /// 拉取一次批处理所用的参考目录快照
    ///
    /// # 返回
    /// - Ok(ReferenceCatalog): 已按待定价哨兵分区的目录
    /// - Err: 读取失败（批处理中止，错误原样上抛）
    fn fetch_reference_catalog(&self) -> RepositoryResult<ReferenceCatalog>;
}

impl ReferenceCatalogProvider for ReferenceCatalog {
    fn fetch_reference_catalog(&self) -> RepositoryResult<ReferenceCatalog> {
        Ok(self.clone())
    }
}
