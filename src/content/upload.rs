use crate::content::error::{ContentError, ContentErrorType};
use crate::content::filename::{clean, unique_filename, unique_filename_within};
use crate::request::RequestParams;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use log::{debug, info};
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tokio::task::spawn_blocking;
use tracing::instrument;

const TEMP_FILE_PREFIX: &str = "mt-upload-";

fn bad_request(err: MultipartError) -> ContentError {
    ContentError::new(ContentErrorType::BadRequest, Some(err.body_text()))
}

fn io_error(err: std::io::Error) -> ContentError {
    ContentError::new(ContentErrorType::Io, Some(err.to_string()))
}

/// File received by the current request, spooled to a temp file
///
/// Only [`RequestUploads::from_multipart`] creates these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    field: String,
    original_name: String,
    tmp_path: PathBuf,
    size: u64,
}

impl UploadedFile {
    /// Multipart field the file came in
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Filename declared by the client, not sanitized
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn tmp_path(&self) -> &Path {
        &self.tmp_path
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

struct SpooledUpload {
    file: UploadedFile,
    /// Removes the temp file with the request, unless it was moved away
    _temp: TempPath,
}

/// Files uploaded with the current request
#[derive(Default)]
pub struct RequestUploads {
    uploads: Vec<SpooledUpload>,
}

impl RequestUploads {
    /// Reads a multipart body. File parts are spooled into `tmp_dir` (system
    /// temp dir by default), text parts are added to `params`.
    pub async fn from_multipart(
        multipart: &mut Multipart,
        tmp_dir: Option<&Path>,
        params: &mut RequestParams,
    ) -> Result<Self, ContentError> {
        let mut uploads = RequestUploads::default();

        while let Some(mut field) = multipart.next_field().await.map_err(bad_request)? {
            let name = field.name().unwrap_or_default().to_string();
            let original_name = field.file_name().map(str::to_string);

            let Some(original_name) = original_name else {
                let value = field.text().await.map_err(bad_request)?;
                params.insert(name, value);
                continue;
            };
            // browsers send an empty file part for a file input left empty
            if original_name.is_empty() {
                continue;
            }

            let mut builder = tempfile::Builder::new();
            builder.prefix(TEMP_FILE_PREFIX);
            let temp = match tmp_dir {
                Some(dir) => builder.tempfile_in(dir),
                None => builder.tempfile(),
            }
            .map_err(io_error)?;
            let (file, temp_path) = temp.into_parts();
            let mut file = tokio::fs::File::from_std(file);

            let mut size = 0u64;
            while let Some(chunk) = field.chunk().await.map_err(bad_request)? {
                size += chunk.len() as u64;
                file.write_all(&chunk).await.map_err(io_error)?;
            }
            file.flush().await.map_err(io_error)?;

            debug!(
                "Spooled upload {:?} of field {} ({} bytes)",
                original_name, name, size
            );
            uploads.uploads.push(SpooledUpload {
                file: UploadedFile {
                    field: name,
                    original_name,
                    tmp_path: temp_path.to_path_buf(),
                    size,
                },
                _temp: temp_path,
            });
        }

        Ok(uploads)
    }

    pub fn files(&self) -> impl Iterator<Item = &UploadedFile> {
        self.uploads.iter().map(|upload| &upload.file)
    }

    fn contains(&self, file: &UploadedFile) -> bool {
        self.files().any(|upload| upload == file)
    }
}

/// Renames `from` to `to`, copying across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match std::fs::rename(from, to) {
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            debug!("{} is on another filesystem, copying", from.display());
            copy_and_remove(from, to)
        }
        moved => moved,
    }
}

fn copy_and_remove(from: &Path, to: &Path) -> io::Result<()> {
    if let Err(err) = std::fs::copy(from, to) {
        let _ = std::fs::remove_file(to);
        return Err(err);
    }
    std::fs::remove_file(from)
}

/// Moves uploaded files to their final place
pub struct UploadRelocator {
    /// Cap of probes for a free name, unbounded when missing
    unique_attempts: Option<NonZeroUsize>,
}

impl UploadRelocator {
    pub fn new(unique_attempts: Option<NonZeroUsize>) -> Self {
        UploadRelocator { unique_attempts }
    }

    /// Moves `file` into `destination` under its cleaned name and returns that name.
    ///
    /// Unless `overwrite` is set, the name gets a `-N` suffix when taken. A failed
    /// move is not rolled back, the temp file stays wherever the OS left it.
    #[instrument(skip(self, uploads, file), fields(upload = %file.original_name))]
    pub async fn relocate(
        &self,
        uploads: &RequestUploads,
        file: &UploadedFile,
        destination: &Path,
        overwrite: bool,
    ) -> Result<String, ContentError> {
        let is_spooled = tokio::fs::metadata(&file.tmp_path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !uploads.contains(file) || !is_spooled {
            return Err(ContentError::new(ContentErrorType::InvalidUpload, None));
        }

        let is_dir = tokio::fs::metadata(destination)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(ContentError::new(
                ContentErrorType::InvalidDestination,
                Some(format!(
                    "Destination \"{}\" must be an existing directory",
                    destination.display()
                )),
            ));
        }

        let filename = clean(&file.original_name);
        if matches!(filename.as_str(), "" | "." | "..") {
            return Err(ContentError::new(
                ContentErrorType::InvalidUpload,
                Some(format!(
                    "Uploaded file name \"{}\" is not usable",
                    file.original_name
                )),
            ));
        }

        let tmp_path = file.tmp_path.clone();
        let destination = destination.to_path_buf();
        let unique_attempts = self.unique_attempts;
        let moved = spawn_blocking(move || -> Result<String, ContentError> {
            let filename = match (overwrite, unique_attempts) {
                (true, _) => filename,
                (false, None) => unique_filename(&filename, &destination),
                (false, Some(attempts)) => {
                    unique_filename_within(&filename, &destination, attempts).ok_or_else(|| {
                        ContentError::new(
                            ContentErrorType::RelocationFailed,
                            Some(format!(
                                "No free name for \"{}\" in \"{}\" after {} attempts",
                                filename,
                                destination.display(),
                                attempts
                            )),
                        )
                    })?
                }
            };

            move_file(&tmp_path, &destination.join(&filename)).map_err(|err| {
                ContentError::new(
                    ContentErrorType::RelocationFailed,
                    Some(format!(
                        "Error moving uploaded file \"{}\" to \"{}\": {}",
                        filename,
                        destination.display(),
                        err
                    )),
                )
            })?;
            Ok(filename)
        })
        .await
        .map_err(|err| ContentError::new(ContentErrorType::Io, Some(err.to_string())))?;

        if let Ok(filename) = &moved {
            info!("Moved uploaded file to {}", filename);
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn spool(uploads: &mut RequestUploads, dir: &Path, name: &str, body: &[u8]) -> UploadedFile {
        let mut temp = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .tempfile_in(dir)
            .unwrap();
        temp.write_all(body).unwrap();
        let temp_path = temp.into_temp_path();
        let file = UploadedFile {
            field: "file".to_string(),
            original_name: name.to_string(),
            tmp_path: temp_path.to_path_buf(),
            size: body.len() as u64,
        };
        uploads.uploads.push(SpooledUpload {
            file: file.clone(),
            _temp: temp_path,
        });
        file
    }

    struct Dirs {
        tmp: tempfile::TempDir,
        dest: tempfile::TempDir,
    }

    fn dirs() -> Dirs {
        Dirs {
            tmp: tempfile::tempdir().unwrap(),
            dest: tempfile::tempdir().unwrap(),
        }
    }

    #[tokio::test]
    async fn moves_file_under_cleaned_name() {
        let dirs = dirs();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, dirs.tmp.path(), "q1: sales?.csv", b"a,b");

        let relocator = UploadRelocator::new(None);
        let name = relocator
            .relocate(&uploads, &file, dirs.dest.path(), false)
            .await
            .unwrap();

        assert_eq!(name, "q1- sales.csv");
        assert_eq!(fs::read(dirs.dest.path().join(&name)).unwrap(), b"a,b");
        assert!(!file.tmp_path().exists());
    }

    #[test]
    fn copy_fallback_moves_content() {
        let dirs = dirs();
        let from = dirs.tmp.path().join("upload");
        let to = dirs.dest.path().join("report.csv");
        fs::write(&from, b"a,b").unwrap();

        copy_and_remove(&from, &to).unwrap();

        assert_eq!(fs::read(&to).unwrap(), b"a,b");
        assert!(!from.exists());
    }

    #[test]
    fn copy_fallback_keeps_source_on_failure() {
        let dirs = dirs();
        let from = dirs.tmp.path().join("upload");
        fs::write(&from, b"a,b").unwrap();

        let missing_dir = dirs.dest.path().join("missing").join("report.csv");
        assert!(copy_and_remove(&from, &missing_dir).is_err());
        assert!(from.exists());
    }

    #[tokio::test]
    async fn moves_across_filesystems() {
        // tmpfs on most linux hosts, often another device than the temp dir
        let shm = Path::new("/dev/shm");
        if !shm.is_dir() {
            return;
        }
        let tmp = tempfile::tempdir_in(shm).unwrap();
        let dest = tempfile::tempdir().unwrap();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, tmp.path(), "report.pdf", b"%PDF");

        let name = UploadRelocator::new(None)
            .relocate(&uploads, &file, dest.path(), false)
            .await
            .unwrap();

        assert_eq!(fs::read(dest.path().join(&name)).unwrap(), b"%PDF");
        assert!(!file.tmp_path().exists());
    }

    #[tokio::test]
    async fn colliding_name_is_uniquified() {
        let dirs = dirs();
        fs::write(dirs.dest.path().join("report.pdf"), b"old").unwrap();
        fs::write(dirs.dest.path().join("report-1.pdf"), b"older").unwrap();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, dirs.tmp.path(), "report.pdf", b"new");

        let name = UploadRelocator::new(None)
            .relocate(&uploads, &file, dirs.dest.path(), false)
            .await
            .unwrap();

        assert_eq!(name, "report-2.pdf");
        assert_eq!(fs::read(dirs.dest.path().join("report.pdf")).unwrap(), b"old");
        assert_eq!(fs::read(dirs.dest.path().join("report-2.pdf")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn overwrite_replaces_existing_file() {
        let dirs = dirs();
        fs::write(dirs.dest.path().join("report.pdf"), b"old").unwrap();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, dirs.tmp.path(), "report.pdf", b"new");

        let name = UploadRelocator::new(None)
            .relocate(&uploads, &file, dirs.dest.path(), true)
            .await
            .unwrap();

        assert_eq!(name, "report.pdf");
        assert_eq!(fs::read(dirs.dest.path().join("report.pdf")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn forged_handle_is_invalid_upload() {
        let dirs = dirs();
        let victim = dirs.tmp.path().join("secret.txt");
        fs::write(&victim, b"secret").unwrap();
        let forged = UploadedFile {
            field: "file".to_string(),
            original_name: "secret.txt".to_string(),
            tmp_path: victim.clone(),
            size: 6,
        };

        let err = UploadRelocator::new(None)
            .relocate(&RequestUploads::default(), &forged, dirs.dest.path(), false)
            .await
            .unwrap_err();
        assert_eq!(err.err_type, ContentErrorType::InvalidUpload);
        assert!(victim.exists());
    }

    #[tokio::test]
    async fn handle_of_other_request_is_invalid_upload() {
        let dirs = dirs();
        let mut other = RequestUploads::default();
        let file = spool(&mut other, dirs.tmp.path(), "a.txt", b"a");

        let err = UploadRelocator::new(None)
            .relocate(&RequestUploads::default(), &file, dirs.dest.path(), false)
            .await
            .unwrap_err();
        assert_eq!(err.err_type, ContentErrorType::InvalidUpload);
    }

    #[tokio::test]
    async fn moved_file_can_not_be_moved_again() {
        let dirs = dirs();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, dirs.tmp.path(), "a.txt", b"a");
        let relocator = UploadRelocator::new(None);

        relocator
            .relocate(&uploads, &file, dirs.dest.path(), false)
            .await
            .unwrap();
        let err = relocator
            .relocate(&uploads, &file, dirs.dest.path(), false)
            .await
            .unwrap_err();
        assert_eq!(err.err_type, ContentErrorType::InvalidUpload);
    }

    #[tokio::test]
    async fn destination_must_be_directory() {
        let dirs = dirs();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, dirs.tmp.path(), "a.txt", b"a");
        let not_dir = dirs.dest.path().join("plain");
        fs::write(&not_dir, b"").unwrap();
        let relocator = UploadRelocator::new(None);

        for destination in [not_dir, dirs.dest.path().join("missing")] {
            let err = relocator
                .relocate(&uploads, &file, &destination, false)
                .await
                .unwrap_err();
            assert_eq!(err.err_type, ContentErrorType::InvalidDestination);
        }
        assert!(file.tmp_path().exists());
    }

    #[tokio::test]
    async fn unusable_name_is_invalid_upload() {
        let dirs = dirs();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, dirs.tmp.path(), "..", b"a");

        let err = UploadRelocator::new(None)
            .relocate(&uploads, &file, dirs.dest.path(), true)
            .await
            .unwrap_err();
        assert_eq!(err.err_type, ContentErrorType::InvalidUpload);
    }

    #[tokio::test]
    async fn attempts_cap_fails_relocation() {
        let dirs = dirs();
        fs::write(dirs.dest.path().join("a.txt"), b"").unwrap();
        fs::write(dirs.dest.path().join("a-1.txt"), b"").unwrap();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, dirs.tmp.path(), "a.txt", b"a");

        let err = UploadRelocator::new(NonZeroUsize::new(2))
            .relocate(&uploads, &file, dirs.dest.path(), false)
            .await
            .unwrap_err();
        assert_eq!(err.err_type, ContentErrorType::RelocationFailed);
        assert!(file.tmp_path().exists());
    }

    #[test]
    fn dropping_uploads_removes_unmoved_temp_files() {
        let dirs = dirs();
        let mut uploads = RequestUploads::default();
        let file = spool(&mut uploads, dirs.tmp.path(), "a.txt", b"a");
        assert!(file.tmp_path().exists());

        drop(uploads);
        assert!(!file.tmp_path().exists());
    }
}
