use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::{Mode, ParseReport};
use crate::parser::parse_reader_with_source;

/// Parse a dotenv file from a specific path in lenient mode.
pub fn from_path(path: impl AsRef<Path>) -> Result<ParseReport, Error> {
    EnvLoader::new().path(path).load()
}

/// Parse a dotenv file from a specific path using a specific mode.
pub fn from_path_with_mode(path: impl AsRef<Path>, mode: Mode) -> Result<ParseReport, Error> {
    EnvLoader::new().path(path).mode(mode).load()
}

/// Builder-style dotenv file reader.
///
/// Every path is parsed independently with its own map and issue lists.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    paths: Vec<PathBuf>,
    mode: Mode,
}

impl EnvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.paths.push(path.as_ref().to_path_buf());
        self
    }

    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.paths
            .extend(paths.into_iter().map(|path| path.as_ref().to_path_buf()));
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn strict(self, strict: bool) -> Self {
        self.mode(Mode::from(strict))
    }

    /// Parse the single configured path, or `.env` when none was given.
    ///
    /// Fails with [`Error::MultiplePaths`] when more than one path is
    /// configured; use [`EnvLoader::load_all`] for those.
    pub fn load(&self) -> Result<ParseReport, Error> {
        match self.paths.as_slice() {
            [] => parse_file(Path::new(".env"), self.mode),
            [path] => parse_file(path, self.mode),
            paths => Err(Error::MultiplePaths { count: paths.len() }),
        }
    }

    /// Parse every configured path, in order.
    ///
    /// Files are parsed on separate threads; a failure to read any of them
    /// fails the whole call.
    pub fn load_all(&self) -> Result<Vec<(PathBuf, ParseReport)>, Error> {
        let mode = self.mode;
        let paths = self.effective_paths();

        std::thread::scope(|scope| {
            let handles: Vec<_> = paths
                .iter()
                .map(|path| scope.spawn(move || parse_file(path, mode)))
                .collect();

            paths
                .iter()
                .zip(handles)
                .map(|(path, handle)| {
                    let report = match handle.join() {
                        Ok(result) => result?,
                        Err(panic) => std::panic::resume_unwind(panic),
                    };
                    Ok((path.clone(), report))
                })
                .collect()
        })
    }

    fn effective_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".env")]
        } else {
            self.paths.clone()
        }
    }
}

fn parse_file(path: &Path, mode: Mode) -> Result<ParseReport, Error> {
    tracing::debug!(path = %path.display(), ?mode, "reading dotenv file");
    let read_error = |source: std::io::Error| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    parse_reader_with_source(BufReader::new(file), Some(path), mode).map_err(|err| match err {
        Error::Io(source) => read_error(source),
        other => other,
    })
}
