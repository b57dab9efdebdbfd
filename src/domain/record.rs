// ==========================================
// 产品目录对账系统 - 记录与记录集
// ==========================================
// 职责: 有序的 列名 -> 字符串值 行结构，以及保持列顺序的记录集
// 约定: 空串或纯空白视为“缺失”（不参与可行性判定）
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ==========================================
// Record - 单条记录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// 由 (列名, 值) 序列构造，重复列名保留第一次出现
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (column, value) in pairs {
            let column = column.into();
            if !record.contains(&column) {
                record.fields.push((column, value.into()));
            }
        }
        record
    }

    /// 读取列值（列不存在返回 None，空串原样返回）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// 读取列值，缺失时返回空串
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    /// 列存在且值非空白
    pub fn is_present(&self, column: &str) -> bool {
        self.get(column).map(|v| !v.trim().is_empty()).unwrap_or(false)
    }

    /// 写入列值：已存在则原位替换，否则追加到末尾
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((column, value)),
        }
    }

    /// 在指定位置插入列（先移除同名列；位置越界则追加）
    pub fn insert_at(&mut self, index: usize, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        self.remove(&column);
        let index = index.min(self.fields.len());
        self.fields.insert(index, (column, value.into()));
    }

    pub fn remove(&mut self, column: &str) -> Option<String> {
        let pos = self.fields.iter().position(|(name, _)| name == column)?;
        Some(self.fields.remove(pos).1)
    }

    /// 重命名列（目标列已存在时先移除目标列）
    pub fn rename(&mut self, from: &str, to: &str) {
        if from == to || !self.contains(from) {
            return;
        }
        self.remove(to);
        if let Some(slot) = self.fields.iter_mut().find(|(name, _)| name == from) {
            slot.0 = to.to_string();
        }
    }

    /// 删除所有空白值列
    pub fn drop_blank(&mut self) {
        self.fields.retain(|(_, value)| !value.trim().is_empty());
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// 值非空白的列名（保持顺序）
    pub fn present_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 转换为 JSON 对象（用于写入落库）
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}

// ==========================================
// RecordSet - 有序记录集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    /// 以给定表头创建空记录集（重复表头保留第一次出现）
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for column in columns {
            set.add_column(column);
        }
        set
    }

    /// 由记录列表构造，列顺序按首次出现
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut set = Self::default();
        for record in records {
            set.push(record);
        }
        set
    }

    /// 追加记录，记录中的新列追加到表头末尾
    pub fn push(&mut self, record: Record) {
        for column in record.columns() {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push(column.to_string());
            }
        }
        self.records.push(record);
    }

    pub fn add_column(&mut self, column: impl Into<String>) {
        let column = column.into();
        if !self.columns.contains(&column) {
            self.columns.push(column);
        }
    }

    /// 在指定位置放置列名（已存在则移动）
    pub fn place_column(&mut self, index: usize, column: &str) {
        self.columns.retain(|c| c != column);
        let index = index.min(self.columns.len());
        self.columns.insert(index, column.to_string());
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按表头顺序取一行的值，缺失列为空串
    pub fn row_values(&self, index: usize) -> Option<Vec<&str>> {
        let record = self.records.get(index)?;
        Some(self.columns.iter().map(|c| record.value(c)).collect())
    }
}
