use crate::io::{parse_ledger, render_ledger};
use crate::ledger::Ledger;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub trait Storage {
    /// Charge un registre depuis un support.
    fn load(&self) -> anyhow::Result<Ledger>;
    /// Sauvegarde de manière atomique.
    fn save(&self, ledger: &Ledger) -> anyhow::Result<()>;
}

/// Registre au format texte `|` (par défaut `./support.txt`).
pub struct TextStorage {
    path: PathBuf,
}

impl TextStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for TextStorage {
    fn load(&self) -> anyhow::Result<Ledger> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let ledger =
            parse_ledger(&text).with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> anyhow::Result<()> {
        let text = render_ledger(ledger);
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(text.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        info!(path = %self.path.display(), size = ledger.size(), "ledger saved");
        Ok(())
    }
}
