use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::ArchiveError;

/// `<parent-directory-name>/<file-name>`, or just the file name when there
/// is no parent directory name.
pub fn entry_name(path: &Path) -> Result<String, ArchiveError> {
    let file = path.file_name()
        .ok_or_else(|| ArchiveError::NoFileName(path.to_path_buf()))?
        .to_string_lossy();
    match path.parent().and_then(|p| p.file_name()) {
        Some(dir) => Ok(format!("{}/{}", dir.to_string_lossy(), file)),
        None => Ok(file.into_owned()),
    }
}

/// Pack `files`, in order, into `<target_dir>/<job_id>.zip`. The archive is
/// assembled in a temporary file next to its destination and only renamed
/// into place once complete, so a failed build leaves no `<job_id>.zip`.
pub fn build_archive<P: AsRef<Path>>(
    job_id: &str,
    files: &[P],
    target_dir: &Path,
) -> Result<PathBuf, ArchiveError> {
    fs::create_dir_all(target_dir)?;
    let archive_path = target_dir.join(format!("{}.zip", job_id));

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(NamedTempFile::new_in(target_dir)?);
    for file in files {
        let file = file.as_ref();
        let name = entry_name(file)?;
        debug!("Adding {} as {}", file.display(), name);
        zip.start_file(name, options)?;
        io::copy(&mut File::open(file)?, &mut zip)?;
    }
    zip.finish()?
        .persist(&archive_path)
        .map_err(|e| e.error)?;

    Ok(archive_path)
}
