use anyhow::{Context, Result};
use chatsweep_runtime::{
    Config, EventSender, ResolvedPaths, StoreBackend, Workbench,
};

use crate::args::OutputFormat;
use crate::presentation::ConsoleRenderer;

/// Everything a handler needs besides its own arguments.
pub struct HandlerContext {
    pub paths: ResolvedPaths,
    pub config: Config,
    pub format: OutputFormat,
}

impl HandlerContext {
    pub fn new(paths: ResolvedPaths, config: Config, format: OutputFormat) -> Self {
        Self {
            paths,
            config,
            format,
        }
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn renderer(&self) -> ConsoleRenderer {
        ConsoleRenderer::new(self.json())
    }

    pub fn workbench(&self) -> Result<Workbench<StoreBackend>> {
        Ok(Workbench::new(self.backend()?))
    }

    pub fn workbench_with_events(&self, events: EventSender) -> Result<Workbench<StoreBackend>> {
        Ok(Workbench::with_events(self.backend()?, events))
    }

    fn backend(&self) -> Result<StoreBackend> {
        let backend = StoreBackend::open(&self.paths).with_context(|| {
            format!(
                "Failed to open trash database at {}",
                self.paths.trash_db.display()
            )
        })?;
        Ok(backend.with_native_batch(self.config.native_batch))
    }
}
