use std::future::Future;
use std::io;
use std::path::PathBuf;

use fxhash::FxHashMap;

use sieve_core::utils::decode_input;

///
/// Retrieves the text of a named input. Every call is a suspension point of the
/// pipeline; a fetch that never completes is cut short by cancellation or by the
/// configured timeout.
///
pub trait InputFetcher {
    fn fetch(&self, name: &str) -> impl Future<Output = io::Result<String>>;
}

///
/// Reads inputs from a directory on disk. Names ending in `.gz` are gunzipped.
///
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsFetcher { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl InputFetcher for FsFetcher {
    async fn fetch(&self, name: &str) -> io::Result<String> {
        let path = self.root.join(name);
        let bytes = tokio::fs::read(&path).await.map_err(|err| {
            io::Error::new(err.kind(), format!("{}: {}", path.display(), err))
        })?;
        decode_input(&path, bytes)
    }
}

///
/// Serves inputs held in memory, keyed by name.
///
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    inputs: FxHashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), text.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.inputs.insert(name.into(), text.into());
    }
}

impl InputFetcher for MemoryFetcher {
    async fn fetch(&self, name: &str) -> io::Result<String> {
        self.inputs.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no input named {}", name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[tokio::test]
    async fn test_memory_fetcher() {
        let fetcher = MemoryFetcher::new().with_input("ref.fasta", ">ref\nMKV\n");
        assert_eq!(fetcher.fetch("ref.fasta").await.unwrap(), ">ref\nMKV\n");
        assert_eq!(
            fetcher.fetch("missing.csv").await.unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_fs_fetcher() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pvalues.csv"), "pvalue\n0.5\n").unwrap();

        let fetcher = FsFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("pvalues.csv").await.unwrap(), "pvalue\n0.5\n");
        assert!(fetcher.fetch("absent.csv").await.is_err());
    }
}
