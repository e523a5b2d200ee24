//! Reading and writing one `timekeep` block of a markdown file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tk_core::{Codeblock, Timekeep, entry_hash, find_codeblocks, replace_codeblock};

/// A tracker loaded from a file, remembering where it came from.
#[derive(Debug)]
pub struct TrackerFile {
    path: PathBuf,
    index: usize,
    fingerprint: Vec<i64>,
    pub timekeep: Timekeep,
}

impl TrackerFile {
    /// Loads block `index` of the file at `path`.
    pub fn open(path: &Path, index: usize) -> Result<Self> {
        let document = read_document(path)?;
        let block = locate(path, &document, index)?;
        let timekeep = block
            .load()
            .with_context(|| format!("failed to load block {index} of {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            index,
            entries = timekeep.entries.len(),
            "loaded tracker"
        );

        Ok(Self {
            path: path.to_path_buf(),
            index,
            fingerprint: fingerprint(&timekeep),
            timekeep,
        })
    }

    /// Writes `timekeep` back into the block it was loaded from.
    ///
    /// Refuses to write if the block changed on disk since it was opened.
    /// Text around the block may have changed; it is kept as found.
    pub fn save(&self, timekeep: &Timekeep) -> Result<()> {
        let document = read_document(&self.path)?;
        let block = locate(&self.path, &document, self.index)?;

        let on_disk = block.load().with_context(|| {
            format!("failed to reload block {} of {}", self.index, self.path.display())
        })?;
        if fingerprint(&on_disk) != self.fingerprint {
            bail!(
                "block {} of {} changed on disk since it was read; not overwriting",
                self.index,
                self.path.display()
            );
        }

        let updated = replace_codeblock(timekeep, &document, block.line_start, block.line_end)?;
        fs::write(&self.path, updated)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), index = self.index, "saved tracker");
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn locate(path: &Path, document: &str, index: usize) -> Result<Codeblock> {
    let mut blocks = find_codeblocks(document);
    let count = blocks.len();
    if index >= count {
        bail!(
            "{} has {count} timekeep block(s); there is no block {index}",
            path.display()
        );
    }
    Ok(blocks.swap_remove(index))
}

fn fingerprint(timekeep: &Timekeep) -> Vec<i64> {
    timekeep.entries.iter().map(|entry| entry_hash(entry)).collect()
}
