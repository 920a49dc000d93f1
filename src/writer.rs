use std::collections::HashSet;
use std::fs::{self};
use std::io::{self, Write};
use std::path::{Component, Path};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unable to write {path}: {source}")]
    FileError { path: String, source: io::Error },

    #[error("More than one account module would be written to {0}")]
    DuplicateFile(String),

    #[error("{0:?} is not a plain file name")]
    InvalidFileName(String),

    #[error("Unable to write to standard output: {0}")]
    StdoutError(#[from] io::Error),
}

/// One rendered account module.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file_name: String,
    pub contents: String,
}

/// Writes every document to `output_dir`, or to standard output when no
/// directory is configured.
pub fn write(documents: &[Document], output_dir: Option<&Path>) -> Result<(), Error> {
    match output_dir {
        Some(dir) => write_files(dir, documents),
        None => write_stream(&mut io::stdout().lock(), documents),
    }
}

fn write_stream(out: &mut impl Write, documents: &[Document]) -> Result<(), Error> {
    for document in documents {
        writeln!(out, "{}", document.contents)?;
    }
    out.flush()?;

    return Ok(());
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();

    return !name.starts_with('.')
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none();
}

/// Every document must land in its own file directly under the output
/// directory. Checked up front so a bad name leaves nothing half written.
fn check_file_names(documents: &[Document]) -> Result<(), Error> {
    let mut seen = HashSet::new();

    for document in documents {
        if !is_plain_file_name(&document.file_name) {
            return Err(Error::InvalidFileName(document.file_name.clone()));
        }
        if !seen.insert(document.file_name.as_str()) {
            return Err(Error::DuplicateFile(document.file_name.clone()));
        }
    }

    return Ok(());
}

fn write_files(dir: &Path, documents: &[Document]) -> Result<(), Error> {
    check_file_names(documents)?;

    let file_error = |path: &Path, source: io::Error| Error::FileError {
        path: path.display().to_string(),
        source,
    };

    fs::create_dir_all(dir).map_err(|source| file_error(dir, source))?;

    for document in documents {
        let path = dir.join(&document.file_name);
        fs::write(&path, &document.contents).map_err(|source| file_error(&path, source))?;
        tracing::info!(path = %path.display(), "wrote account module");
    }

    return Ok(());
}
