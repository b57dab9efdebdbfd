// ==========================================
// 产品目录对账系统 - 写入缓冲
// ==========================================
// 职责: 将逐条产出的记录攒成小批写入 RecordSink
// 规则: 缓冲达到 load_limit 即写出；批次结束调用 flush_remaining 写出余量
// 红线: 写入失败原样上抛，未写出的记录保留在缓冲中
// ==========================================

use crate::domain::record::Record;
use crate::repository::error::RepositoryResult;
use tracing::debug;

// ==========================================
// RecordSink Trait
// ==========================================
// 实现者:
// - SqliteRecordSink（reconciled_record 表）
// - MemoryRecordSink（内存收集）
pub trait RecordSink {
    /// 写出一个小批
    ///
    /// # 返回
    /// - Ok(usize): 写出的条数
    fn write_batch(&mut self, records: &[Record]) -> RepositoryResult<usize>;
}

// ==========================================
// WriteBuffer
// ==========================================
pub struct WriteBuffer<S: RecordSink> {
    sink: S,
    load_limit: usize,
    pending: Vec<Record>,
    flushed: usize,
}

impl<S: RecordSink> WriteBuffer<S> {
    /// # 参数
    /// - sink: 写出目标
    /// - load_limit: 批量上限（0 按 1 处理）
    pub fn new(sink: S, load_limit: usize) -> Self {
        let load_limit = load_limit.max(1);
        Self {
            sink,
            load_limit,
            pending: Vec::with_capacity(load_limit),
            flushed: 0,
        }
    }

    /// 追加一条记录，达到上限时写出
    pub fn push(&mut self, record: Record) -> RepositoryResult<()> {
        self.pending.push(record);
        if self.pending.len() >= self.load_limit {
            self.flush()?;
        }
        Ok(())
    }

    /// 写出缓冲中的剩余记录
    ///
    /// # 返回
    /// - Ok(usize): 本次写出的条数（缓冲为空时为 0）
    pub fn flush_remaining(&mut self) -> RepositoryResult<usize> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        self.flush()
    }

    fn flush(&mut self) -> RepositoryResult<usize> {
        let written = self.sink.write_batch(&self.pending)?;
        debug!(written, load_limit = self.load_limit, "写入缓冲已写出");
        self.pending.clear();
        self.flushed += written;
        Ok(written)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// 累计写出条数
    pub fn flushed_count(&self) -> usize {
        self.flushed
    }

    pub fn load_limit(&self) -> usize {
        self.load_limit
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

// ==========================================
// MemoryRecordSink - 内存收集
// ==========================================
#[derive(Debug, Default)]
pub struct MemoryRecordSink {
    batches: Vec<Vec<Record>>,
}

impl MemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次写出的批
    pub fn batches(&self) -> &[Vec<Record>] {
        &self.batches
    }

    pub fn total_records(&self) -> usize {
        self.batches.iter().map(|b| b.len()).sum()
    }
}

impl RecordSink for MemoryRecordSink {
    fn write_batch(&mut self, records: &[Record]) -> RepositoryResult<usize> {
        self.batches.push(records.to_vec());
        Ok(records.len())
    }
}
