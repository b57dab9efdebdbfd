// ==========================================
// 产品目录对账系统 - 字段可行性检查
// ==========================================
// 职责: 判定批次表头 / 单条记录是否具备处理所需字段
// 规则:
// 1) 声明了必需字段: 必需字段全部存在，且（若声明了支撑字段）至少一个支撑字段存在
// 2) 仅声明支撑字段: 至少一个支撑字段存在
// 3) 均未声明: 恒为可行
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// FieldRequirements - 字段需求声明
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRequirements {
    required: Vec<String>,
    supporting: Vec<String>,
}

/// 可行性检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViabilityReport {
    pub viable: bool,
    /// 缺失的必需字段（按声明顺序）
    pub missing_required: Vec<String>,
    /// 支撑字段条件是否满足（未声明支撑字段时为 true）
    pub supporting_satisfied: bool,
}

impl FieldRequirements {
    pub fn new<R, S, T, U>(required: R, supporting: S) -> Self
    where
        R: IntoIterator<Item = T>,
        S: IntoIterator<Item = U>,
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            supporting: supporting.into_iter().map(Into::into).collect(),
        }
    }

    /// 无任何字段需求
    pub fn none() -> Self {
        Self::default()
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn supporting(&self) -> &[String] {
        &self.supporting
    }

    /// 按规则检查可用字段
    ///
    /// # 参数
    /// - available: 可用字段名（批次表头或记录的非空列）
    pub fn check<S: AsRef<str>>(&self, available: &[S]) -> ViabilityReport {
        let has = |name: &str| available.iter().any(|a| a.as_ref() == name);

        let missing_required: Vec<String> = self
            .required
            .iter()
            .filter(|f| !has(f.as_str()))
            .cloned()
            .collect();
        let supporting_satisfied =
            self.supporting.is_empty() || self.supporting.iter().any(|f| has(f.as_str()));

        let viable = match (self.required.is_empty(), self.supporting.is_empty()) {
            (false, _) => missing_required.is_empty() && supporting_satisfied,
            (true, false) => supporting_satisfied,
            (true, true) => true,
        };

        ViabilityReport {
            viable,
            missing_required,
            supporting_satisfied,
        }
    }

    pub fn is_viable<S: AsRef<str>>(&self, available: &[S]) -> bool {
        self.check(available).viable
    }

    /// 缺失的必需字段（按声明顺序）
    pub fn missing<S: AsRef<str>>(&self, available: &[S]) -> Vec<String> {
        self.check(available).missing_required
    }
}

/// 批次级缺失提示
///
/// # 返回
/// - 恰好缺 1 个: "The file is missing a product field: <f>"
/// - 缺多个: "The file is missing product fields: <first> and <N-1> more"
/// - 必需字段齐全但不可行: "The file is missing at least 1 supporting field."
/// - 可行: None
pub fn batch_missing_message(report: &ViabilityReport) -> Option<String> {
    if report.viable {
        return None;
    }
    Some(match report.missing_required.as_slice() {
        [] => "The file is missing at least 1 supporting field.".to_string(),
        [only] => format!("The file is missing a product field: {}", only),
        [first, rest @ ..] => format!(
            "The file is missing product fields: {} and {} more",
            first,
            rest.len()
        ),
    })
}

/// 记录级缺失提示（写入 Fail 通道）
pub fn record_missing_message(report: &ViabilityReport) -> String {
    if report.missing_required.is_empty() {
        "Missing Data: at least 1 supporting field.".to_string()
    } else {
        format!("Missing Data: {}.", report.missing_required.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_supporting() {
        let req = FieldRequirements::new(["A", "B"], ["S1", "S2"]);

        assert!(req.is_viable(&["A", "B", "S2"]));
        assert!(!req.is_viable(&["A", "B"]));
        assert!(!req.is_viable(&["A", "S1"]));
    }

    #[test]
    fn test_supporting_only() {
        let req = FieldRequirements::new(Vec::<String>::new(), ["S1", "S2"]);
        assert!(req.is_viable(&["S1"]));
        assert!(!req.is_viable(&["X"]));
    }

    #[test]
    fn test_no_requirements_always_viable() {
        let req = FieldRequirements::none();
        let empty: [&str; 0] = [];
        assert!(req.is_viable(&empty));
    }

    #[test]
    fn test_missing_in_declared_order() {
        let req = FieldRequirements::new(["C", "A", "B"], Vec::<String>::new());
        assert_eq!(req.missing(&["A"]), vec!["C".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_batch_messages() {
        let req = FieldRequirements::new(["A", "B", "C"], ["S"]);

        let one = req.check(&["A", "B", "S"]);
        assert_eq!(
            batch_missing_message(&one).unwrap(),
            "The file is missing a product field: C"
        );

        let many = req.check(&["S"]);
        assert_eq!(
            batch_missing_message(&many).unwrap(),
            "The file is missing product fields: A and 2 more"
        );

        let supporting = req.check(&["A", "B", "C"]);
        assert_eq!(
            batch_missing_message(&supporting).unwrap(),
            "The file is missing at least 1 supporting field."
        );

        assert!(batch_missing_message(&req.check(&["A", "B", "C", "S"])).is_none());
    }

    #[test]
    fn test_record_message() {
        let req = FieldRequirements::new(["A", "B"], Vec::<String>::new());
        assert_eq!(record_missing_message(&req.check(&["X"])), "Missing Data: A, B.");
    }
}
