use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::entities::session::MergeSession;
use crate::infra::fs::files::write_output;
use crate::usecase::ports::codec::{CodecError, EncodeOptions, GridEncoder};

pub struct ExportService<E> {
    encoder: Arc<E>,
    sheet_name: String,
}

impl<E: GridEncoder> ExportService<E> {
    pub fn new(encoder: Arc<E>, sheet_name: impl Into<String>) -> Self {
        Self {
            encoder,
            sheet_name: sheet_name.into(),
        }
    }

    /// Encodes the session's merge table. An empty session gives an empty sheet.
    pub fn render(&self, session: &MergeSession) -> Result<Vec<u8>, CodecError> {
        let grid = session.table().to_grid();
        self.encoder.encode(
            &grid,
            &EncodeOptions {
                sheet_name: self.sheet_name.clone(),
                created_at: session.created_at(),
            },
        )
    }

    /// Writes the encoded workbook to `path` and returns its size in bytes.
    pub fn export_to(&self, session: &MergeSession, path: &Path) -> Result<usize> {
        let bytes = self
            .render(session)
            .context("failed to encode merged workbook")?;
        write_output(path, &bytes)?;
        info!(
            path = %path.display(),
            bytes = bytes.len(),
            rows = session.table().row_count(),
            "exported merged workbook"
        );
        Ok(bytes.len())
    }
}
