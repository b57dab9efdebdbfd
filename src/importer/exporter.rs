// ==========================================
// 产品目录对账系统 - 结果文件导出
// ==========================================
// 职责: 将记录集按表头顺序写出为 CSV
// ==========================================

use crate::domain::record::RecordSet;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::RecordExporter;
use csv::Writer;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub struct CsvExporter;

impl CsvExporter {
    /// 写出到任意 Writer
    pub fn write_to<W: Write>(&self, records: &RecordSet, writer: W) -> ImportResult<usize> {
        let mut csv_writer = Writer::from_writer(writer);
        csv_writer.write_record(records.columns())?;

        let mut written = 0;
        for index in 0..records.len() {
            if let Some(row) = records.row_values(index) {
                csv_writer.write_record(&row)?;
                written += 1;
            }
        }

        csv_writer
            .flush()
            .map_err(|e| ImportError::FileWriteError(e.to_string()))?;
        Ok(written)
    }
}

impl RecordExporter for CsvExporter {
    fn export(&self, records: &RecordSet, file_path: &Path) -> ImportResult<usize> {
        let file = std::fs::File::create(file_path)
            .map_err(|e| ImportError::FileWriteError(format!("{}: {}", file_path.display(), e)))?;
        let written = self.write_to(records, file)?;
        info!(path = %file_path.display(), rows = written, "结果文件已导出");
        Ok(written)
    }
}
