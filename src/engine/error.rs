// ==========================================
// 产品目录对账系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定:
// - 结构性失败（缺表头、无记录通过）体现在 BatchResult 中，不是 Err
// - 协作方失败（参考目录读取、写入缓冲写出）原样上抛
// - 运行入口失败（数据库打开、配置读取、批次文件）由 app::run_file 映射
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 单条记录转换错误
#[derive(Error, Debug)]
pub enum TransformError {
    // ===== 记录级错误（写入 Fail 通道，继续处理下一条）=====
    #[error("{0}")]
    Record(String),

    // ===== 协作方错误（中止批次）=====
    #[error("协作方调用失败: {0}")]
    Collaborator(#[from] RepositoryError),
}

/// 批次对账错误
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("参考目录读取失败: {0}")]
    ReferenceCatalog(#[source] RepositoryError),

    #[error("记录写出失败: {0}")]
    WriteBuffer(#[source] RepositoryError),

    #[error("配置读取失败: {0}")]
    Config(#[source] RepositoryError),

    #[error("批次文件处理失败: {0}")]
    Import(#[from] ImportError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ReconcileResult<T> = Result<T, ReconcileError>;
