use crate::config::StructureSettings;
use crate::error::{CliError, Result};
use directories::ProjectDirs;
use episcan::core::io::pdb::PdbFile;
use episcan::structure::{StructureError, StructureId};
use futures_util::StreamExt;
use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

const PATH_CONFIG_FILE: &str = "structure-path.conf";
/// Upper bound on a downloaded structure file.
const MAX_STRUCTURE_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub enum FetchProgress {
    DownloadStarted { total_size: Option<u64> },
    Downloading { downloaded: u64 },
}

/// Local cache of structure files backed by a remote PDB archive.
#[derive(Debug)]
pub struct StructureStore {
    base_path: PathBuf,
    base_url: String,
    timeout: Duration,
}

impl StructureStore {
    pub fn new(settings: &StructureSettings) -> Result<Self> {
        let path = match &settings.cache_dir {
            Some(dir) => dir.clone(),
            None => Self::determine_cache_path()?,
        };
        debug!("StructureStore initialized with path: {:?}", &path);
        Ok(Self::with_custom_path(path, settings))
    }

    pub fn with_custom_path(path: PathBuf, settings: &StructureSettings) -> Self {
        Self {
            base_path: path,
            base_url: settings.base_url.clone(),
            timeout: settings.timeout,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.base_path
    }

    pub fn cached_file(&self, id: &StructureId) -> PathBuf {
        self.base_path.join(id.pdb_file_name())
    }

    pub fn structure_url(&self, id: &StructureId) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            id.pdb_file_name()
        )
    }

    /// Returns the structure text, downloading it unless a cached copy exists.
    ///
    /// Downloaded text is only cached once it parses as a PDB file.
    pub async fn fetch(
        &self,
        id: &StructureId,
        force: bool,
        mut progress_callback: impl FnMut(FetchProgress),
    ) -> std::result::Result<String, StructureError> {
        let cached = self.cached_file(id);
        if !force && cached.is_file() {
            info!("Using cached structure {} from {:?}", id, &cached);
            return Ok(fs::read_to_string(&cached)?);
        }

        let download = self.download(id, &mut progress_callback);
        let text = match tokio::time::timeout(self.timeout, download).await {
            Ok(result) => result?,
            Err(_) => return Err(self.timeout_error(id)),
        };

        let structure = PdbFile::parse(&text)?;
        debug!(
            "Downloaded structure {} has {} atoms.",
            id, structure.atom_count
        );

        fs::create_dir_all(&self.base_path)?;
        fs::write(&cached, &text)?;
        info!("Cached structure {} at {:?}", id, &cached);
        Ok(text)
    }

    async fn download(
        &self,
        id: &StructureId,
        progress_callback: &mut impl FnMut(FetchProgress),
    ) -> std::result::Result<String, StructureError> {
        let url = self.structure_url(id);
        info!("Sending request to {}", url);

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.request_error(id, e))?;
        check_status(id, response.status())?;

        let total_size = response.content_length();
        if let Some(size) = total_size.filter(|&size| size > MAX_STRUCTURE_BYTES) {
            return Err(too_large(id, size));
        }
        progress_callback(FetchProgress::DownloadStarted { total_size });

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::with_capacity(total_size.unwrap_or(0) as usize);

        while let Some(item) = stream.next().await {
            let chunk = item.map_err(|e| self.request_error(id, e))?;
            downloaded += chunk.len() as u64;
            if downloaded > MAX_STRUCTURE_BYTES {
                return Err(too_large(id, downloaded));
            }
            buffer.extend_from_slice(&chunk);
            progress_callback(FetchProgress::Downloading { downloaded });
        }

        String::from_utf8(buffer).map_err(|e| StructureError::Network {
            id: id.to_string(),
            message: format!("response is not valid UTF-8: {}", e),
        })
    }

    fn request_error(&self, id: &StructureId, error: reqwest::Error) -> StructureError {
        if error.is_timeout() {
            self.timeout_error(id)
        } else {
            StructureError::Network {
                id: id.to_string(),
                message: error.to_string(),
            }
        }
    }

    fn timeout_error(&self, id: &StructureId) -> StructureError {
        StructureError::Timeout {
            id: id.to_string(),
            seconds: self.timeout.as_secs(),
        }
    }

    /// Removes every cached `.pdb` file and returns how many were deleted.
    pub fn clear(&self) -> Result<usize> {
        if !self.base_path.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "pdb") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        info!("Removed {} cached structure(s).", removed);
        Ok(removed)
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        if !path.is_absolute() {
            return Err(CliError::Argument(format!(
                "Cache path must be absolute: {:?}",
                path
            )));
        }
        let path_str = path.to_str().ok_or_else(|| {
            CliError::Argument(format!("Cache path is not valid UTF-8: {:?}", path))
        })?;

        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, path_str).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    fn determine_cache_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => {
                read_custom_path(&config_path)?.map_or_else(Self::get_default_cache_path, Ok)
            }
            _ => Self::get_default_cache_path(),
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("org", "episcan", "episcan").ok_or_else(|| {
            CliError::Data("Could not determine the user's home directory.".to_string())
        })
    }

    fn get_path_config_file() -> Result<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(PATH_CONFIG_FILE))
    }

    fn get_default_cache_path() -> Result<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.cache_dir().join("structures"))
    }
}

fn read_custom_path(config_path: &Path) -> Result<Option<PathBuf>> {
    let custom_path_str = fs::read_to_string(config_path)?.trim().to_string();
    if custom_path_str.is_empty() {
        warn!("Custom path config file is empty, falling back to default path.");
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(custom_path_str)))
    }
}

fn too_large(id: &StructureId, size: u64) -> StructureError {
    StructureError::Network {
        id: id.to_string(),
        message: format!(
            "response of {} bytes exceeds the {} byte limit",
            size, MAX_STRUCTURE_BYTES
        ),
    }
}

fn check_status(id: &StructureId, status: StatusCode) -> std::result::Result<(), StructureError> {
    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return Err(StructureError::NotFound { id: id.to_string() });
    }
    if !status.is_success() {
        return Err(StructureError::Network {
            id: id.to_string(),
            message: format!("server responded with HTTP {}", status),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PDB: &str = "ATOM      1  CA  GLY A   1       0.000   0.000   0.000  1.00  0.00           C\nEND\n";

    fn settings(base_url: &str, timeout: Duration) -> StructureSettings {
        StructureSettings {
            base_url: base_url.to_string(),
            timeout,
            cache_dir: None,
        }
    }

    fn id(raw: &str) -> StructureId {
        StructureId::parse(raw).unwrap()
    }

    /// Answers a single HTTP request with the given status line and body.
    async fn serve_once(status_line: &'static str, body: &'static str, delay: Duration) -> String {
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        serve_raw(response, delay).await
    }

    /// Answers a single HTTP request with a verbatim response.
    async fn serve_raw(response: String, delay: Duration) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            tokio::time::sleep(delay).await;
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{}", addr)
    }

    #[test]
    fn structure_url_joins_base_and_file_name() {
        let store = StructureStore::with_custom_path(
            PathBuf::from("/tmp"),
            &settings("https://files.rcsb.org/download/", Duration::from_secs(30)),
        );
        assert_eq!(
            store.structure_url(&id("1tup")),
            "https://files.rcsb.org/download/1TUP.pdb"
        );
        assert_eq!(store.cached_file(&id("1tup")), PathBuf::from("/tmp/1TUP.pdb"));
    }

    #[test]
    fn new_prefers_configured_cache_dir() {
        let dir = tempdir().unwrap();
        let mut cfg = settings("http://localhost", Duration::from_secs(1));
        cfg.cache_dir = Some(dir.path().to_path_buf());
        let store = StructureStore::new(&cfg).unwrap();
        assert_eq!(store.cache_path(), dir.path());
    }

    #[test]
    fn status_codes_are_classified() {
        let pdb = id("9ZZZ");
        assert!(check_status(&pdb, StatusCode::OK).is_ok());
        assert!(matches!(
            check_status(&pdb, StatusCode::NOT_FOUND),
            Err(StructureError::NotFound { .. })
        ));
        assert!(matches!(
            check_status(&pdb, StatusCode::INTERNAL_SERVER_ERROR),
            Err(StructureError::Network { .. })
        ));
    }

    #[test]
    fn empty_path_config_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join(PATH_CONFIG_FILE);
        fs::write(&conf, "  \n").unwrap();
        assert_eq!(read_custom_path(&conf).unwrap(), None);

        fs::write(&conf, "/data/structures\n").unwrap();
        assert_eq!(
            read_custom_path(&conf).unwrap(),
            Some(PathBuf::from("/data/structures"))
        );
    }

    #[test]
    fn relative_custom_path_is_rejected() {
        let result = StructureStore::set_custom_path(Path::new("relative/dir"));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[tokio::test]
    async fn cached_structure_is_returned_without_network() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1TUP.pdb"), PDB).unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().to_path_buf(),
            &settings("http://127.0.0.1:9", Duration::from_secs(5)),
        );

        let mut events = 0;
        let text = store.fetch(&id("1tup"), false, |_| events += 1).await.unwrap();
        assert_eq!(text, PDB);
        assert_eq!(events, 0);
    }

    #[tokio::test]
    async fn download_is_cached_and_reports_progress() {
        let base_url = serve_once("200 OK", PDB, Duration::ZERO).await;
        let dir = tempdir().unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().join("cache"),
            &settings(&base_url, Duration::from_secs(5)),
        );

        let mut total = None;
        let mut last = 0;
        let text = store
            .fetch(&id("1TUP"), false, |progress| match progress {
                FetchProgress::DownloadStarted { total_size } => total = total_size,
                FetchProgress::Downloading { downloaded } => last = downloaded,
            })
            .await
            .unwrap();

        assert_eq!(text, PDB);
        assert_eq!(total, Some(PDB.len() as u64));
        assert_eq!(last, PDB.len() as u64);
        assert_eq!(
            fs::read_to_string(dir.path().join("cache/1TUP.pdb")).unwrap(),
            PDB
        );
    }

    #[tokio::test]
    async fn missing_entry_maps_to_not_found() {
        let base_url = serve_once("404 Not Found", "", Duration::ZERO).await;
        let dir = tempdir().unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().to_path_buf(),
            &settings(&base_url, Duration::from_secs(5)),
        );

        let result = store.fetch(&id("9ZZZ"), false, |_| {}).await;
        assert!(matches!(result, Err(StructureError::NotFound { ref id }) if id == "9ZZZ"));
        assert!(!dir.path().join("9ZZZ.pdb").exists());
    }

    #[tokio::test]
    async fn server_error_maps_to_network() {
        let base_url = serve_once("503 Service Unavailable", "", Duration::ZERO).await;
        let dir = tempdir().unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().to_path_buf(),
            &settings(&base_url, Duration::from_secs(5)),
        );

        let result = store.fetch(&id("1TUP"), true, |_| {}).await;
        assert!(matches!(result, Err(StructureError::Network { .. })));
    }

    #[tokio::test]
    async fn slow_server_maps_to_timeout() {
        let base_url = serve_once("200 OK", PDB, Duration::from_secs(3)).await;
        let dir = tempdir().unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().to_path_buf(),
            &settings(&base_url, Duration::from_millis(200)),
        );

        let result = store.fetch(&id("1TUP"), false, |_| {}).await;
        assert!(matches!(result, Err(StructureError::Timeout { .. })));
    }

    #[tokio::test]
    async fn oversized_content_length_is_rejected_before_reading() {
        let response = "HTTP/1.1 200 OK\r\nContent-Length: 9000000000000000\r\nConnection: close\r\n\r\nATOM"
            .to_string();
        let base_url = serve_raw(response, Duration::ZERO).await;
        let dir = tempdir().unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().to_path_buf(),
            &settings(&base_url, Duration::from_secs(5)),
        );

        let mut started = false;
        let result = store
            .fetch(&id("1TUP"), false, |p| {
                if matches!(p, FetchProgress::DownloadStarted { .. }) {
                    started = true;
                }
            })
            .await;

        assert!(
            matches!(result, Err(StructureError::Network { ref message, .. }) if message.contains("exceeds"))
        );
        assert!(!started);
        assert!(!dir.path().join("1TUP.pdb").exists());
    }

    #[tokio::test]
    async fn non_structure_body_is_not_cached() {
        let base_url = serve_once("200 OK", "<html>maintenance</html>", Duration::ZERO).await;
        let dir = tempdir().unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().to_path_buf(),
            &settings(&base_url, Duration::from_secs(5)),
        );

        let result = store.fetch(&id("1TUP"), false, |_| {}).await;
        assert!(matches!(result, Err(StructureError::Parse(_))));
        assert!(!dir.path().join("1TUP.pdb").exists());
    }

    #[test]
    fn clear_removes_only_structure_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1TUP.pdb"), PDB).unwrap();
        fs::write(dir.path().join("2F5B.pdb"), PDB).unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().to_path_buf(),
            &settings("http://localhost", Duration::from_secs(1)),
        );

        assert_eq!(store.clear().unwrap(), 2);
        assert!(dir.path().join("notes.txt").exists());
        assert!(!dir.path().join("1TUP.pdb").exists());
    }

    #[test]
    fn clear_on_missing_directory_is_a_no_op() {
        let dir = tempdir().unwrap();
        let store = StructureStore::with_custom_path(
            dir.path().join("absent"),
            &settings("http://localhost", Duration::from_secs(1)),
        );
        assert_eq!(store.clear().unwrap(), 0);
    }
}
