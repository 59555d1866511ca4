use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, error};
use reqwest::blocking::Client;
use url::Url;

use crate::m3u_channels_error::{create_m3u_channels_error_result, info_err, str_to_io_error, M3uChannelsError};
use crate::utils::compression::compression_utils::bytes_to_text;
use crate::utils::debug_if_enabled;
use crate::utils::file::file_utils::{get_file_path, persist_file};
use crate::utils::CONSTANTS;

static SANITIZE_SENSITIVE_INFO: AtomicBool = AtomicBool::new(true);

pub fn set_sanitize_sensitive_info(value: bool) {
    SANITIZE_SENSITIVE_INFO.store(value, Ordering::Relaxed);
}

pub fn sanitize_sensitive_info(query: &str) -> String {
    if SANITIZE_SENSITIVE_INFO.load(Ordering::Relaxed) {
        let masked_query = CONSTANTS.re_username.replace_all(query, "$1***");
        let masked_query = CONSTANTS.re_password.replace_all(&masked_query, "$1***");
        let masked_query = CONSTANTS.re_token.replace_all(&masked_query, "$1***");
        masked_query.to_string()
    } else {
        query.to_string()
    }
}

pub fn create_client(timeout: Duration) -> Result<Client, M3uChannelsError> {
    match Client::builder().timeout(timeout).build() {
        Ok(client) => Ok(client),
        Err(err) => create_m3u_channels_error_result!("cant create http client: {}", err),
    }
}

fn parse_remote_url(url_str: &str) -> Option<Url> {
    url_str.parse::<Url>().ok().filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Reads the playlist from a remote url or from a file relative to the working dir.
/// A non success status or a missing file fails the run.
pub fn get_input_text_content(client: &Client, working_dir: &Path, url_str: &str, persist_filepath: Option<&Path>) -> Result<String, M3uChannelsError> {
    debug_if_enabled!("getting input text content working_dir: {:?}, url: {}", working_dir, sanitize_sensitive_info(url_str));

    if let Some(url) = parse_remote_url(url_str) {
        match download_text_content(client, &url) {
            Ok(content) => {
                persist_file(persist_filepath, &content);
                Ok(content)
            }
            Err(e) => {
                error!("cant download input url: {}  => {}", sanitize_sensitive_info(url_str), sanitize_sensitive_info(e.to_string().as_str()));
                create_m3u_channels_error_result!("Failed to download {}: {}", sanitize_sensitive_info(url_str), sanitize_sensitive_info(e.to_string().as_str()))
            }
        }
    } else {
        let filepath = get_file_path(working_dir, url_str);
        match get_local_file_content(&filepath) {
            Ok(content) => {
                if persist_filepath.is_some_and(|p| p != filepath.as_path()) {
                    persist_file(persist_filepath, &content);
                }
                Ok(content)
            }
            Err(err) => {
                error!("cant read input file: {}", err);
                Err(info_err!("cant read input file: {}", err))
            }
        }
    }
}

fn get_local_file_content(file_path: &Path) -> Result<String, Error> {
    if file_path.is_file() {
        let content = fs::read(file_path)?;
        return bytes_to_text(&content);
    }
    let file_str = file_path.to_str().unwrap_or("?");
    Err(Error::new(ErrorKind::NotFound, format!("Cant find file {file_str}")))
}

fn download_text_content(client: &Client, url: &Url) -> Result<String, Error> {
    let start_time = Instant::now();
    match client.get(url.clone()).send() {
        Ok(response) => {
            if response.status().is_success() {
                match response.bytes() {
                    Ok(bytes) => {
                        let text = bytes_to_text(&bytes)?;
                        debug!("downloaded {} bytes in {} ms", bytes.len(), start_time.elapsed().as_millis());
                        Ok(text)
                    }
                    Err(err) => Err(str_to_io_error(&format!("failed to read response body: {err}"))),
                }
            } else {
                Err(str_to_io_error(&format!("Request failed with status {}", response.status())))
            }
        }
        Err(err) => Err(str_to_io_error(&format!("Request failed: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;
    use reqwest::blocking::Client;
    use crate::utils::network::request::{create_client, get_input_text_content, parse_remote_url, sanitize_sensitive_info};
    use crate::utils::network::test_server::serve_once;

    fn local_client() -> Client {
        Client::builder().no_proxy().timeout(Duration::from_secs(5)).build().unwrap()
    }

    #[test]
    fn test_url_mask() {
        let query = "http://host/get.php?username=alice&password=secret&type=m3u";
        assert_eq!(sanitize_sensitive_info(query), "http://host/get.php?username=***&password=***&type=m3u");
    }

    #[test]
    fn test_remote_url_detection() {
        assert!(parse_remote_url("https://raw.example.com/Master.m3u").is_some());
        assert!(parse_remote_url("Master.m3u").is_none());
        assert!(parse_remote_url("file:///tmp/Master.m3u").is_none());
    }

    #[test]
    fn test_local_input() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Master.m3u"), "#EXTM3U\n").unwrap();
        let client = create_client(std::time::Duration::from_secs(1)).unwrap();
        let persist = dir.path().join("copy.m3u");

        let content = get_input_text_content(&client, dir.path(), "Master.m3u", Some(persist.as_path())).unwrap();
        assert_eq!(content, "#EXTM3U\n");
        assert_eq!(fs::read_to_string(&persist).unwrap(), "#EXTM3U\n");

        assert!(get_input_text_content(&client, dir.path(), "missing.m3u", None).is_err());
    }

    #[test]
    fn test_remote_input() {
        let dir = tempfile::tempdir().unwrap();
        let url = serve_once("200 OK", "#EXTM3U\n#EXTINF:-1,A\nhttp://a\n");
        let persist = dir.path().join("Master.m3u");
        let content = get_input_text_content(&local_client(), dir.path(), &url, Some(persist.as_path())).unwrap();
        assert_eq!(content, "#EXTM3U\n#EXTINF:-1,A\nhttp://a\n");
        assert_eq!(fs::read_to_string(&persist).unwrap(), content);
    }

    #[test]
    fn test_remote_input_error_status() {
        let dir = tempfile::tempdir().unwrap();
        let url = serve_once("404 Not Found", "not found");
        let persist = dir.path().join("Master.m3u");
        assert!(get_input_text_content(&local_client(), dir.path(), &url, Some(persist.as_path())).is_err());
        assert!(!persist.exists());
    }
}
