// ==========================================
// 产品目录对账系统 - 谓词分类器
// ==========================================
// 职责: 依据属性相等模式给部分匹配记录打用例码，并折叠为最终分类
// 规则: 规则表按顺序求值，首个命中者胜出；均未命中取残余标签
// 输入: 连接后的记录（<a>_x / <a>_y 成对列）
// 输出: MatchLabel；resolve 将 MatchLabel 折叠为 (Outcome, 提示, 优先级)
// ==========================================

use crate::domain::fields;
use crate::domain::record::Record;
use crate::domain::types::{CaseCode, MatchLabel, Outcome, PriorityCode};
use serde::{Deserialize, Serialize};

// ==========================================
// AttributeEquality - 属性相等模式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEquality {
    pub vendor_name: bool,
    pub manufacturer_name: bool,
    pub manufacturer_part_number: bool,
    pub vendor_part_number: bool,
    pub product_number: bool,
}

impl AttributeEquality {
    /// 从连接后的记录计算相等模式
    ///
    /// 连接键属性不会产生后缀列，按相等处理
    pub fn from_joined(record: &Record) -> Self {
        Self {
            vendor_name: Self::pair_equal(record, fields::VENDOR_NAME),
            manufacturer_name: Self::pair_equal(record, fields::MANUFACTURER_NAME),
            manufacturer_part_number: Self::pair_equal(record, fields::MANUFACTURER_PART_NUMBER),
            vendor_part_number: Self::pair_equal(record, fields::VENDOR_PART_NUMBER),
            product_number: Self::pair_equal(record, fields::PRODUCT_NUMBER),
        }
    }

    fn pair_equal(record: &Record, attribute: &str) -> bool {
        let incoming = format!("{}{}", attribute, fields::INCOMING_SUFFIX);
        let reference = format!("{}{}", attribute, fields::REFERENCE_SUFFIX);
        match (record.get(&incoming), record.get(&reference)) {
            (Some(x), Some(y)) => x == y,
            _ => true,
        }
    }
}

// ==========================================
// PredicateRule - 单条规则
// ==========================================
// None 表示该属性不参与判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateRule {
    pub case: CaseCode,
    pub vendor_name: Option<bool>,
    pub manufacturer_name: Option<bool>,
    pub manufacturer_part_number: Option<bool>,
    pub vendor_part_number: Option<bool>,
    pub product_number: Option<bool>,
}

impl PredicateRule {
    pub fn matches(&self, eq: &AttributeEquality) -> bool {
        fn check(expected: Option<bool>, actual: bool) -> bool {
            expected.map(|e| e == actual).unwrap_or(true)
        }

        check(self.vendor_name, eq.vendor_name)
            && check(self.manufacturer_name, eq.manufacturer_name)
            && check(self.manufacturer_part_number, eq.manufacturer_part_number)
            && check(self.vendor_part_number, eq.vendor_part_number)
            && check(self.product_number, eq.product_number)
    }
}

const fn rule(
    case: CaseCode,
    vendor_name: Option<bool>,
    manufacturer_name: Option<bool>,
    manufacturer_part_number: Option<bool>,
    vendor_part_number: Option<bool>,
    product_number: Option<bool>,
) -> PredicateRule {
    PredicateRule {
        case,
        vendor_name,
        manufacturer_name,
        manufacturer_part_number,
        vendor_part_number,
        product_number,
    }
}

const Y: Option<bool> = Some(true);
const N: Option<bool> = Some(false);
const ANY: Option<bool> = None;

/// 第 3 轮: 制造商/供应商规则集（VN, MN, MPN, VPN, PN）
pub const MANUFACTURER_VENDOR_RULES: [PredicateRule; 4] = [
    rule(CaseCode::Case1, Y, Y, ANY, N, Y),
    rule(CaseCode::Case2, N, Y, ANY, ANY, Y),
    rule(CaseCode::Case3, Y, Y, ANY, ANY, Y),
    rule(CaseCode::Case4, Y, Y, ANY, Y, N),
];

/// 第 4 轮: 目录规则集（VN, MN, MPN, VPN, PN）
pub const CATALOG_RULES: [PredicateRule; 4] = [
    rule(CaseCode::Case5, Y, ANY, N, N, Y),
    rule(CaseCode::Case6, N, ANY, Y, N, Y),
    rule(CaseCode::Case7, Y, ANY, Y, Y, N),
    rule(CaseCode::Case8, N, ANY, Y, N, N),
];

// ==========================================
// RuleSet - 规则集
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    ManufacturerVendor,
    Catalog,
}

impl RuleSet {
    pub fn rules(&self) -> &'static [PredicateRule] {
        match self {
            RuleSet::ManufacturerVendor => &MANUFACTURER_VENDOR_RULES,
            RuleSet::Catalog => &CATALOG_RULES,
        }
    }

    /// 未命中任何规则时的残余标签
    pub fn residual(&self) -> MatchLabel {
        match self {
            RuleSet::ManufacturerVendor => MatchLabel::Partial,
            RuleSet::Catalog => MatchLabel::Other,
        }
    }

    /// 首个命中规则的用例码，均未命中取残余标签
    pub fn classify(&self, eq: &AttributeEquality) -> MatchLabel {
        self.rules()
            .iter()
            .find(|r| r.matches(eq))
            .map(|r| MatchLabel::Case(r.case))
            .unwrap_or_else(|| self.residual())
    }
}

// ==========================================
// Resolution - 折叠结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub alert: &'static str,
    pub priority: PriorityCode,
    /// Filter 列取值
    pub filter: &'static str,
}

/// 用例码折叠（唯一的解析入口）
pub fn resolve(label: MatchLabel) -> Resolution {
    let (outcome, alert, priority, filter) = match label {
        MatchLabel::Ready => (
            Outcome::Ready,
            "Ready to update/contract",
            PriorityCode::A,
            Outcome::Ready.as_str(),
        ),
        MatchLabel::BasePricing => (
            Outcome::BasePricing,
            "These go through update base pricing",
            PriorityCode::B,
            Outcome::BasePricing.as_str(),
        ),
        MatchLabel::Partial => (
            Outcome::Partial,
            "These can go through update step 1.5",
            PriorityCode::C,
            Outcome::Partial.as_str(),
        ),
        MatchLabel::Case(CaseCode::Case1) => (
            Outcome::Partial,
            "Vendor Part Number Change",
            PriorityCode::V,
            CaseCode::Case1.as_str(),
        ),
        MatchLabel::Case(CaseCode::Case2) | MatchLabel::Case(CaseCode::Case6) => (
            Outcome::Partial,
            "New Vendor for Existing Configuration(step 1.5)",
            PriorityCode::C,
            Outcome::Partial.as_str(),
        ),
        MatchLabel::Case(CaseCode::Case3) => (
            Outcome::Partial,
            "New Vendor for New Configuration(step 1.5)",
            PriorityCode::C,
            Outcome::Partial.as_str(),
        ),
        MatchLabel::Case(CaseCode::Case4) => (
            Outcome::Partial,
            "Configuration change-4",
            PriorityCode::W,
            CaseCode::Case4.as_str(),
        ),
        MatchLabel::Case(CaseCode::Case7) => (
            Outcome::Partial,
            "Configuration change-7",
            PriorityCode::W,
            CaseCode::Case4.as_str(),
        ),
        MatchLabel::Case(CaseCode::Case5) => (
            Outcome::PossibleDuplicate,
            "Possible Override/Duplicate",
            PriorityCode::Z,
            Outcome::PossibleDuplicate.as_str(),
        ),
        MatchLabel::Case(CaseCode::Case8) => (
            Outcome::Partial,
            "New Vendor Existing product(step 1.5)",
            PriorityCode::C,
            Outcome::Partial.as_str(),
        ),
        MatchLabel::Other => (
            Outcome::Partial,
            "Unclassified partial match",
            PriorityCode::C,
            Outcome::Partial.as_str(),
        ),
        MatchLabel::New => (
            Outcome::New,
            "New product",
            PriorityCode::D,
            Outcome::New.as_str(),
        ),
        MatchLabel::PossibleDuplicate => (
            Outcome::PossibleDuplicate,
            "Possible Duplicate",
            PriorityCode::Z,
            Outcome::PossibleDuplicate.as_str(),
        ),
    };

    Resolution {
        outcome,
        alert,
        priority,
        filter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_equality(vn: bool, mn: bool, mpn: bool, vpn: bool, pn: bool) -> AttributeEquality {
        AttributeEquality {
            vendor_name: vn,
            manufacturer_name: mn,
            manufacturer_part_number: mpn,
            vendor_part_number: vpn,
            product_number: pn,
        }
    }

    #[test]
    fn test_manufacturer_vendor_cases() {
        let rs = RuleSet::ManufacturerVendor;
        assert_eq!(
            rs.classify(&create_test_equality(true, true, true, false, true)),
            MatchLabel::Case(CaseCode::Case1)
        );
        assert_eq!(
            rs.classify(&create_test_equality(false, true, true, true, true)),
            MatchLabel::Case(CaseCode::Case2)
        );
        assert_eq!(
            rs.classify(&create_test_equality(true, true, true, true, true)),
            MatchLabel::Case(CaseCode::Case3)
        );
        assert_eq!(
            rs.classify(&create_test_equality(true, true, true, true, false)),
            MatchLabel::Case(CaseCode::Case4)
        );
        assert_eq!(
            rs.classify(&create_test_equality(false, false, true, false, false)),
            MatchLabel::Partial
        );
    }

    #[test]
    fn test_first_match_wins_when_two_rules_apply() {
        // VN=, MN=, VPN≠, PN= 同时满足 case_1 与 case_3，表序靠前的 case_1 胜出
        let eq = create_test_equality(true, true, true, false, true);
        assert!(MANUFACTURER_VENDOR_RULES[0].matches(&eq));
        assert!(MANUFACTURER_VENDOR_RULES[2].matches(&eq));
        assert_eq!(
            RuleSet::ManufacturerVendor.classify(&eq),
            MatchLabel::Case(CaseCode::Case1)
        );
    }

    #[test]
    fn test_catalog_cases() {
        let rs = RuleSet::Catalog;
        assert_eq!(
            rs.classify(&create_test_equality(true, true, false, false, true)),
            MatchLabel::Case(CaseCode::Case5)
        );
        assert_eq!(
            rs.classify(&create_test_equality(false, true, true, false, true)),
            MatchLabel::Case(CaseCode::Case6)
        );
        assert_eq!(
            rs.classify(&create_test_equality(true, true, true, true, false)),
            MatchLabel::Case(CaseCode::Case7)
        );
        assert_eq!(
            rs.classify(&create_test_equality(false, true, true, false, false)),
            MatchLabel::Case(CaseCode::Case8)
        );
        assert_eq!(
            rs.classify(&create_test_equality(true, true, false, true, false)),
            MatchLabel::Other
        );
    }

    #[test]
    fn test_equality_from_joined_pairs() {
        let record = Record::from_pairs([
            ("CatalogNumber", "C1"),
            ("VendorName_x", "A"),
            ("VendorName_y", "B"),
            ("ProductNumber_x", "P1"),
            ("ProductNumber_y", "P1"),
        ]);
        let eq = AttributeEquality::from_joined(&record);

        assert!(!eq.vendor_name);
        assert!(eq.product_number);
        // 未后缀（连接键）属性视为相等
        assert!(eq.manufacturer_name);
    }

    #[test]
    fn test_resolve_folds() {
        let case7 = resolve(MatchLabel::Case(CaseCode::Case7));
        assert_eq!(case7.outcome, Outcome::Partial);
        assert_eq!(case7.priority, PriorityCode::W);
        assert_eq!(case7.filter, "case_4");
        assert_eq!(case7.alert, "Configuration change-7");

        let case5 = resolve(MatchLabel::Case(CaseCode::Case5));
        assert_eq!(case5.outcome, Outcome::PossibleDuplicate);
        assert_eq!(case5.priority, PriorityCode::Z);

        let case1 = resolve(MatchLabel::Case(CaseCode::Case1));
        assert_eq!(case1.filter, "case_1");
        assert_eq!(case1.priority, PriorityCode::V);

        assert_eq!(resolve(MatchLabel::Ready).alert, "Ready to update/contract");
        assert_eq!(resolve(MatchLabel::New).priority, PriorityCode::D);
        assert_eq!(resolve(MatchLabel::Other).outcome, Outcome::Partial);
        assert_eq!(
            resolve(MatchLabel::Case(CaseCode::Case2)).alert,
            resolve(MatchLabel::Case(CaseCode::Case6)).alert
        );
    }
}
