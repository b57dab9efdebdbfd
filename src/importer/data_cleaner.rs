// ==========================================
// 产品目录对账系统 - 数据清洗器实现
// ==========================================
// 职责: 计量单位标准化 / 数值校验 / Y/N 标志解析 / 料号拼装
// 约定: 校验失败不抛错，由调用方决定写入 Alert 还是 Fail
// ==========================================

use crate::domain::types::Channel;
use crate::engine::reporter::Reporter;

/// 计量单位同义词表（键为大写）
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("BOTTLE", "BT"),
    ("BOTTLES", "BT"),
    ("BOX", "BX"),
    ("BOXES", "BX"),
    ("CARTON", "CT"),
    ("CARTONS", "CT"),
    ("CASE", "CS"),
    ("CASES", "CS"),
    ("EACH", "EA"),
    ("EACHES", "EA"),
    ("ITEM", "EA"),
    ("ITEMS", "EA"),
    ("TEST", "EA"),
    ("TESTS", "EA"),
    ("TST", "EA"),
    ("TSTS", "EA"),
    ("JAR", "JR"),
    ("JARS", "JR"),
    ("KIT", "KT"),
    ("KITS", "KT"),
    ("PAK", "PK"),
    ("PAKS", "PK"),
    ("PACK", "PK"),
    ("PACKS", "PK"),
    ("PACKAGE", "PK"),
    ("PACKAGES", "PK"),
    ("PAIR", "PR"),
    ("PAIRS", "PR"),
    ("ROLL", "RL"),
    ("ROLLS", "RL"),
    ("SET", "ST"),
    ("SETS", "ST"),
];

/// 默认计量单位
pub const DEFAULT_UNIT: &str = "EA";

/// 料号清洗时剔除的字符（空白另行剔除）
const PART_NUMBER_STRIP_CHARS: &[char] = &[
    '-', '.', ',', '/', '+', '&', '_', '"', '\'', '#', '=', '$', '\\', '(', ')',
];

/// 数值校验结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCheck {
    Valid(f64),
    Negative(f64),
    NotANumber,
}

pub struct DataCleaner;

impl DataCleaner {
    /// 计量单位标准化（先转大写，再查同义词表；未知单位原样大写返回）
    pub fn normalize_unit(&self, value: &str) -> String {
        let upper = value.trim().to_uppercase();
        UNIT_SYNONYMS
            .iter()
            .find(|(name, _)| *name == upper)
            .map(|(_, code)| code.to_string())
            .unwrap_or(upper)
    }

    /// 非负数值校验
    pub fn check_number(&self, value: &str) -> NumberCheck {
        match value.trim().parse::<f64>() {
            Ok(n) if n.is_nan() => NumberCheck::NotANumber,
            Ok(n) if n < 0.0 => NumberCheck::Negative(n),
            Ok(n) => NumberCheck::Valid(n),
            Err(_) => NumberCheck::NotANumber,
        }
    }

    /// Y/N 标志解析（1/0、Y/N、YES/NO，大小写不敏感）
    pub fn parse_flag(&self, value: &str) -> Option<bool> {
        match value.trim().to_uppercase().as_str() {
            "1" | "Y" | "YES" => Some(true),
            "0" | "N" | "NO" => Some(false),
            _ => None,
        }
    }

    /// 料号清洗: 去掉分隔符与空白
    pub fn clean_part_number(&self, value: &str) -> String {
        value
            .chars()
            .filter(|c| !c.is_whitespace() && !PART_NUMBER_STRIP_CHARS.contains(c))
            .collect()
    }

    /// 目录号: <前缀>-<清洗后的制造商料号大写>
    pub fn make_catalog_number(&self, prefix: &str, manufacturer_part_number: &str) -> String {
        format!(
            "{}-{}",
            prefix.trim(),
            self.clean_part_number(manufacturer_part_number).to_uppercase()
        )
    }

    /// 产品号: 目录号，非 EA 单位时追加 " <单位>"
    pub fn build_product_number(&self, catalog_number: &str, unit: &str) -> String {
        let catalog_number = catalog_number.trim();
        if unit == DEFAULT_UNIT {
            catalog_number.to_string()
        } else {
            format!("{} {}", catalog_number, unit)
        }
    }

    /// 目录号已以单位结尾，拼装后的产品号会出现重复单位
    pub fn has_duplicate_unit(&self, catalog_number: &str, unit: &str) -> bool {
        unit != DEFAULT_UNIT && !unit.is_empty() && catalog_number.trim().ends_with(unit)
    }

    /// 标志列校验并报告
    ///
    /// # 返回
    /// - Some(flag): 解析成功
    /// - None: 列缺失（Alert "{列} missing"）或值无效（Alert "Review {列}"）
    pub fn check_flag_field(
        &self,
        column: &str,
        value: Option<&str>,
        reporter: &mut Reporter,
    ) -> Option<bool> {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            reporter.record(Channel::Alert, &format!("{} missing", column));
            return None;
        };
        let parsed = self.parse_flag(value);
        if parsed.is_none() {
            reporter.record(Channel::Alert, &format!("Review {}", column));
        }
        parsed
    }
}
