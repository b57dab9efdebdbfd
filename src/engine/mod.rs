// ==========================================
// 产品目录对账系统 - 引擎层
// ==========================================
// 职责: 对账分类规则与逐条处理循环,不拼 SQL
// 红线: Engine 不拼 SQL, 每条记录必须带分类与报告
// ==========================================

pub mod cascade;
pub mod column_reconciler;
pub mod duplicate;
pub mod error;
pub mod line_processor;
pub mod orchestrator;
pub mod predicate;
pub mod priority;
pub mod reporter;
pub mod transformer;
pub mod viability;

// 重导出核心引擎
pub use cascade::{MatchCascade, RoundOutput};
pub use column_reconciler::ColumnReconciler;
pub use duplicate::DuplicateResolver;
pub use error::{ReconcileError, ReconcileResult, TransformError};
pub use line_processor::{LineOutcome, LineProcessor};
pub use orchestrator::ReconcileOrchestrator;
pub use predicate::{resolve, AttributeEquality, Resolution, RuleSet};
pub use priority::{PriorityRanker, RankedRecord};
pub use reporter::Reporter;
pub use transformer::{NoProcessTransformer, RecordTransformer};
pub use viability::{FieldRequirements, ViabilityReport};
