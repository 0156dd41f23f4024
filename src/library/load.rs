use super::{Library, ScanResult};
use anyhow::Result;
use std::path::Path;
use tracing::info;

/// Opens the library and runs an initial scan so startup reports what the data
/// directory actually contains.
pub fn open_library<P: AsRef<Path>>(path: P) -> Result<Library> {
    let library = Library::open(path.as_ref())?;
    let ScanResult { songs, problems } = library.scan()?;

    if !problems.is_empty() {
        info!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            info!("- {:?}", problem);
        }
    }
    match problems.is_empty() {
        true => info!("Library checked, no issues found."),
        false => info!(
            "Library was scanned, but check the {} non-fatal issues above.",
            problems.len()
        ),
    }
    info!("Library has {} songs", songs.len());

    Ok(library)
}
