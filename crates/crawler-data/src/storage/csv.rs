//! Append-only CSV 저장소.
//!
//! 호출 한 번에 한 행을 기록합니다. 헤더는 쓰지 않으며 파일 스키마는 소스별로 고정입니다.
//! 같은 파일에 대한 동시 쓰기는 동기화하지 않으므로 호출 측에서 파일당 writer를 하나로 유지해야 합니다.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::error::{DataError, Result};

/// 파일 끝에 한 행 추가.
///
/// 파일이 없으면 생성하지만 상위 디렉토리는 만들지 않습니다 (없으면 `Persist` 에러).
/// 반환 전에 버퍼를 flush하고 디스크에 동기화합니다.
pub fn append_row<P, I, T>(path: P, fields: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(fields)?;
    writer.flush()?;

    let file = writer
        .into_inner()
        .map_err(|e| DataError::Persist(e.to_string()))?;
    file.sync_all()?;

    Ok(())
}

/// 출력 디렉토리 기준 CSV 기록기
#[derive(Debug, Clone)]
pub struct CsvAppender {
    dir: PathBuf,
}

impl CsvAppender {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 파일 경로 (예: `data/bitcoin.csv`)
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// `{dir}/{file_name}`에 한 행 추가
    pub fn append<I, T>(&self, file_name: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let path = self.path_for(file_name);
        append_row(&path, fields)?;
        tracing::debug!(path = %path.display(), "CSV 행 기록");
        Ok(())
    }
}
