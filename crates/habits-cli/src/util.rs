use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use habits_analysis::dataset::DataTable;

/// Destination of a rendered report.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<&Path>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.finish()
    }

    pub fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write report to {}", self.display_path()))?;
        self.finish()
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Loads and cleans the dataset, failing the whole command on error.
pub fn read_data_file(path: &Path) -> anyhow::Result<DataTable> {
    DataTable::from_path(path)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))
}
