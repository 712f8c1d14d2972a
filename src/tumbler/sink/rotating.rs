use super::{render_lock, LockSink};
use crate::error::{Result, TumblerError};
use crate::model::LockConfiguration;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Quiet-mode sink writing `<base>_locks_<n>.txt` files, `n` counting from 1,
/// each holding at most `records_per_file` locks.
///
/// A file is only opened when a lock is ready for it, so a run never leaves an
/// empty trailing file. Dropping the sink flushes the open file.
pub struct RotatingFileSink {
    dir: PathBuf,
    base: String,
    records_per_file: u64,
    current: Option<(PathBuf, BufWriter<File>)>,
    in_current: u64,
    files: Vec<PathBuf>,
}

impl RotatingFileSink {
    pub fn new(dir: impl Into<PathBuf>, base: impl Into<String>, records_per_file: u64) -> Self {
        Self {
            dir: dir.into(),
            base: base.into(),
            records_per_file: records_per_file.max(1),
            current: None,
            in_current: 0,
            files: Vec::new(),
        }
    }

    pub fn records_per_file(&self) -> u64 {
        self.records_per_file
    }

    /// Path of file number `segment` (1-based).
    pub fn segment_path(&self, segment: usize) -> PathBuf {
        segment_path(&self.dir, &self.base, segment)
    }

    fn rotate(&mut self) -> Result<()> {
        self.close()?;
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| TumblerError::resource(&self.dir, e))?;
        }

        let path = self.segment_path(self.files.len() + 1);
        let file = File::create(&path).map_err(|e| TumblerError::resource(&path, e))?;
        info!("Writing {}", path.display());
        self.files.push(path.clone());
        self.current = Some((path, BufWriter::new(file)));
        self.in_current = 0;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some((path, mut writer)) = self.current.take() {
            writer
                .flush()
                .map_err(|e| TumblerError::resource(&path, e))?;
            debug!("Closed {} after {} locks", path.display(), self.in_current);
        }
        Ok(())
    }
}

pub fn segment_path(dir: &Path, base: &str, segment: usize) -> PathBuf {
    dir.join(format!("{}_locks_{}.txt", base, segment))
}

impl LockSink for RotatingFileSink {
    fn write_lock(&mut self, index: u64, config: &LockConfiguration<'_>) -> Result<()> {
        if self.current.is_none() || self.in_current >= self.records_per_file {
            self.rotate()?;
        }
        if let Some((path, writer)) = self.current.as_mut() {
            render_lock(writer, index, config).map_err(|e| TumblerError::resource(&*path, e))?;
        }
        self.in_current += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.close()
    }

    fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
