// ==========================================
// 产品目录对账系统 - 领域类型定义
// ==========================================
// 职责: 分类结果 / 优先级字母 / 临时用例码 / 报告通道
// 红线: 对账完成后每条记录恰好属于一个 Outcome
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 分类结果 (Outcome)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Ready,             // 已提交参考条目完全匹配
    BasePricing,       // 待定价参考条目完全匹配
    Partial,           // 部分匹配，需更新流程
    New,               // 无任何匹配
    PossibleDuplicate, // 产品号冲突或疑似覆盖
}

impl Outcome {
    /// Filter 列使用的展示名
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ready => "Ready",
            Outcome::BasePricing => "Base Pricing",
            Outcome::Partial => "Partial",
            Outcome::New => "New",
            Outcome::PossibleDuplicate => "Possible Duplicate",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ready" => Ok(Outcome::Ready),
            "Base Pricing" => Ok(Outcome::BasePricing),
            "Partial" => Ok(Outcome::Partial),
            "New" => Ok(Outcome::New),
            "Possible Duplicate" => Ok(Outcome::PossibleDuplicate),
            _ => Err(format!("未知的分类结果: {}", s)),
        }
    }
}

// ==========================================
// 优先级字母 (Priority Code)
// ==========================================
// 排序: A < B < C < D < V < W < Z（派生 Ord 依赖声明顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityCode {
    A, // Ready
    B, // BasePricing
    C, // Partial
    D, // New
    V, // 供应商料号变更
    W, // 配置变更
    Z, // 疑似重复
}

impl PriorityCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityCode::A => "A",
            PriorityCode::B => "B",
            PriorityCode::C => "C",
            PriorityCode::D => "D",
            PriorityCode::V => "V",
            PriorityCode::W => "W",
            PriorityCode::Z => "Z",
        }
    }
}

impl fmt::Display for PriorityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriorityCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(PriorityCode::A),
            "B" => Ok(PriorityCode::B),
            "C" => Ok(PriorityCode::C),
            "D" => Ok(PriorityCode::D),
            "V" => Ok(PriorityCode::V),
            "W" => Ok(PriorityCode::W),
            "Z" => Ok(PriorityCode::Z),
            _ => Err(format!("未知的优先级字母: {}", s)),
        }
    }
}

// ==========================================
// 临时用例码 (Case Code)
// ==========================================
// case_1..case_4: 第 3 轮（制造商/供应商规则集）
// case_5..case_8: 第 4 轮（目录规则集）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CaseCode {
    Case1,
    Case2,
    Case3,
    Case4,
    Case5,
    Case6,
    Case7,
    Case8,
}

impl CaseCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseCode::Case1 => "case_1",
            CaseCode::Case2 => "case_2",
            CaseCode::Case3 => "case_3",
            CaseCode::Case4 => "case_4",
            CaseCode::Case5 => "case_5",
            CaseCode::Case6 => "case_6",
            CaseCode::Case7 => "case_7",
            CaseCode::Case8 => "case_8",
        }
    }
}

impl fmt::Display for CaseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 匹配标签 (Match Label)
// ==========================================
// 级联各轮输出的临时标签，经 resolve 折叠为 Outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchLabel {
    Ready,
    BasePricing,
    Partial,
    Case(CaseCode),
    Other,
    New,
    PossibleDuplicate,
}

impl fmt::Display for MatchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchLabel::Ready => write!(f, "Ready"),
            MatchLabel::BasePricing => write!(f, "Base Pricing"),
            MatchLabel::Partial => write!(f, "Partial"),
            MatchLabel::Case(code) => write!(f, "{}", code),
            MatchLabel::Other => write!(f, "other"),
            MatchLabel::New => write!(f, "New"),
            MatchLabel::PossibleDuplicate => write!(f, "Possible Duplicate"),
        }
    }
}

// ==========================================
// 报告通道 (Channel)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Pass,
    Alert,
    Fail,
}

impl Channel {
    /// 对应的报告列名
    pub fn column(&self) -> &'static str {
        match self {
            Channel::Pass => crate::domain::fields::PASS,
            Channel::Alert => crate::domain::fields::ALERT,
            Channel::Fail => crate::domain::fields::FAIL,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}
