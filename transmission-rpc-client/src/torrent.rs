//! Torrent methods
//!
//! `ids: None` addresses every torrent the daemon knows about; the `ids` key
//! is then left out of the request.

use crate::TransmissionClient;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use transmission_rpc_core::{method, NoArguments, Result, RpcRequest};

/// Fields requested by [`TransmissionClient::torrent_get`]
pub const TORRENT_FIELDS: &[&str] = &[
    "id",
    "name",
    "hashString",
    "status",
    "percentDone",
    "totalSize",
    "rateDownload",
    "rateUpload",
    "eta",
    "error",
    "errorString",
    "downloadDir",
    "addedDate",
];

/// Activity state reported in a torrent's `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TorrentStatus {
    /// Paused
    #[default]
    Stopped,
    /// Queued for a data check
    CheckWait,
    /// Checking local data
    Check,
    /// Queued for download
    DownloadWait,
    /// Downloading
    Download,
    /// Queued for seeding
    SeedWait,
    /// Seeding
    Seed,
    /// A value newer daemons may send
    Unknown(i64),
}

impl From<i64> for TorrentStatus {
    fn from(value: i64) -> Self {
        match value {
            0 => TorrentStatus::Stopped,
            1 => TorrentStatus::CheckWait,
            2 => TorrentStatus::Check,
            3 => TorrentStatus::DownloadWait,
            4 => TorrentStatus::Download,
            5 => TorrentStatus::SeedWait,
            6 => TorrentStatus::Seed,
            other => TorrentStatus::Unknown(other),
        }
    }
}

impl From<TorrentStatus> for i64 {
    fn from(status: TorrentStatus) -> Self {
        match status {
            TorrentStatus::Stopped => 0,
            TorrentStatus::CheckWait => 1,
            TorrentStatus::Check => 2,
            TorrentStatus::DownloadWait => 3,
            TorrentStatus::Download => 4,
            TorrentStatus::SeedWait => 5,
            TorrentStatus::Seed => 6,
            TorrentStatus::Unknown(other) => other,
        }
    }
}

/// One entry of a `torrent-get` response
///
/// Fields the daemon leaves out keep their default value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Torrent {
    /// Daemon-local id, stable for the daemon's lifetime
    pub id: i64,
    /// Display name
    pub name: String,
    /// Info hash, hex encoded
    pub hash_string: String,
    /// Activity state
    pub status: TorrentStatus,
    /// 0.0 to 1.0
    pub percent_done: f64,
    /// Bytes
    pub total_size: i64,
    /// Bytes per second
    pub rate_download: i64,
    /// Bytes per second
    pub rate_upload: i64,
    /// Seconds remaining; negative when unknown
    pub eta: i64,
    /// Error class; 0 when healthy
    pub error: i64,
    /// Error description; empty when healthy
    pub error_string: String,
    /// Directory the data is written to
    pub download_dir: String,
    /// Unix timestamp
    pub added_date: i64,
}

#[derive(Debug, Default, Deserialize)]
struct TorrentList {
    #[serde(default)]
    torrents: Vec<Torrent>,
}

fn with_ids(request: RpcRequest, ids: Option<&[i64]>) -> RpcRequest {
    match ids {
        Some(ids) => request.argument("ids", ids.to_vec()),
        None => request,
    }
}

impl TransmissionClient {
    /// Start torrents
    ///
    /// Returns whether the daemon reported success.
    pub async fn torrent_start(&self, ids: Option<&[i64]>) -> Result<bool> {
        tracing::info!(ids = ?ids, "Starting torrents");
        let request = with_ids(RpcRequest::new(method::TORRENT_START), ids);
        Ok(self.execute::<NoArguments>(&request).await?.is_success())
    }

    /// Stop torrents
    ///
    /// Returns whether the daemon reported success.
    pub async fn torrent_stop(&self, ids: Option<&[i64]>) -> Result<bool> {
        tracing::info!(ids = ?ids, "Stopping torrents");
        let request = with_ids(RpcRequest::new(method::TORRENT_STOP), ids);
        Ok(self.execute::<NoArguments>(&request).await?.is_success())
    }

    /// Add a torrent from base64-encoded metainfo
    pub async fn torrent_add(&self, metainfo: &str) -> Result<bool> {
        tracing::info!(metainfo_len = metainfo.len(), "Adding torrent");
        let request = RpcRequest::new(method::TORRENT_ADD).argument("metainfo", metainfo);
        Ok(self.execute::<NoArguments>(&request).await?.is_success())
    }

    /// Add a torrent from the raw bytes of a `.torrent` file
    pub async fn torrent_add_file(&self, torrent: &[u8]) -> Result<bool> {
        self.torrent_add(&STANDARD.encode(torrent)).await
    }

    /// Add a torrent by URL or magnet link
    pub async fn torrent_add_url(&self, url: &str) -> Result<bool> {
        tracing::info!(url = %url, "Adding torrent by url");
        let request = RpcRequest::new(method::TORRENT_ADD).argument("filename", url);
        Ok(self.execute::<NoArguments>(&request).await?.is_success())
    }

    /// Read torrents
    ///
    /// # Errors
    ///
    /// Returns `Error::Rpc` if the daemon reports a failure.
    pub async fn torrent_get(&self, ids: Option<&[i64]>) -> Result<Vec<Torrent>> {
        tracing::debug!(ids = ?ids, "Getting torrents");
        let request = with_ids(
            RpcRequest::new(method::TORRENT_GET).argument("fields", TORRENT_FIELDS.to_vec()),
            ids,
        );
        let list: TorrentList = self.execute(&request).await?.into_arguments()?;
        Ok(list.torrents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_number() {
        assert_eq!(TorrentStatus::from(0), TorrentStatus::Stopped);
        assert_eq!(TorrentStatus::from(4), TorrentStatus::Download);
        assert_eq!(TorrentStatus::from(6), TorrentStatus::Seed);
        assert_eq!(TorrentStatus::from(42), TorrentStatus::Unknown(42));
        assert_eq!(i64::from(TorrentStatus::SeedWait), 5);
    }

    #[test]
    fn test_torrent_decodes_camel_case() {
        let torrent: Torrent = serde_json::from_value(json!({
            "id": 7,
            "name": "debian.iso",
            "hashString": "abcdef",
            "status": 4,
            "percentDone": 0.5,
            "totalSize": 1024,
            "rateDownload": 300,
            "errorString": "",
            "addedDate": 1700000000
        }))
        .unwrap();

        assert_eq!(torrent.id, 7);
        assert_eq!(torrent.hash_string, "abcdef");
        assert_eq!(torrent.status, TorrentStatus::Download);
        assert_eq!(torrent.percent_done, 0.5);
        assert_eq!(torrent.rate_upload, 0);
        assert_eq!(torrent.download_dir, "");
        assert_eq!(torrent.added_date, 1700000000);
    }

    #[test]
    fn test_ids_omitted_for_all_torrents() {
        let request = with_ids(RpcRequest::new(method::TORRENT_START), None);
        assert!(!request.arguments.contains_key("ids"));

        let request = with_ids(RpcRequest::new(method::TORRENT_START), Some(&[1, 2][..]));
        assert_eq!(request.arguments["ids"], json!([1, 2]));
    }

    #[test]
    fn test_empty_id_list_is_sent() {
        let request = with_ids(RpcRequest::new(method::TORRENT_STOP), Some(&[][..]));
        assert_eq!(request.arguments["ids"], json!([]));
    }

    #[test]
    fn test_fields_match_torrent_keys() {
        let value = serde_json::to_value(Torrent::default()).unwrap();
        let keys = value.as_object().unwrap();

        assert_eq!(keys.len(), TORRENT_FIELDS.len());
        for field in TORRENT_FIELDS {
            assert!(keys.contains_key(*field), "{field}");
        }
    }
}
