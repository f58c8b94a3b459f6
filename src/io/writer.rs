use std::io::{self, Write};

use crate::types::QueryResult;

/// Writes resolved queries as TSV rows, one per line, in the order given.
pub struct ResultWriter<W: Write> {
    out: W,
    rows: usize,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, rows: 0 }
    }

    pub fn write(&mut self, result: &QueryResult) -> io::Result<()> {
        writeln!(self.out, "{result}")?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_rows<'a>(
        &mut self,
        results: impl IntoIterator<Item = &'a QueryResult>,
    ) -> io::Result<()> {
        for result in results {
            self.write(result)?;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
