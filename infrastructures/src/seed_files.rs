use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use secrecy::Secret;
use serde::Deserialize;

use domains::models::spotify_tokens::SpotifyToken;

/// シードファイルのパス
///
/// カレントディレクトリからの相対パスで解決される。
pub const SEED_FILE: &str = "seed.json";

#[derive(Debug, thiserror::Error)]
pub enum SeedFileError {
    #[error("{}を読み込めませんでした(cwd={cwd})。{source}", .path.display())]
    ReadError {
        path: PathBuf,
        cwd: String,
        source: io::Error,
    },
    #[error("{}をJSONとして解析できませんでした。{source}", .path.display())]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// シードファイルに記録されたSpotifyトークン
///
/// 記録されていないフィールドは、空文字列または0になる。
#[derive(Default, Deserialize)]
#[serde(default)]
struct SpotifyTokenRecord {
    access_token: String,
    token_type: String,
    expires_in: i64,
    refresh_token: String,
    scope: String,
    expires_at: i64,
}

impl From<SpotifyTokenRecord> for SpotifyToken {
    fn from(record: SpotifyTokenRecord) -> Self {
        Self {
            access_token: Secret::new(record.access_token),
            token_type: record.token_type,
            expires_in: record.expires_in,
            refresh_token: Secret::new(record.refresh_token),
            scope: record.scope,
            expires_at: record.expires_at,
        }
    }
}

/// シードファイルからSpotifyトークンを読み込む。
///
/// シードファイルはSpotifyトークンを要素とするJSON配列でなければならない。
/// 要素が1つとは限らないため、ファイルに記録された順番ですべてのトークンを返却する。
/// JSONが`null`の場合は、トークンを返却しない。
///
/// # Arguments
///
/// * `path` - シードファイルのパス。
///
/// # Returns
///
/// Spotifyトークンを格納したベクタ。
pub fn load_seed_data<P: AsRef<Path>>(path: P) -> Result<Vec<SpotifyToken>, SeedFileError> {
    let path = path.as_ref();
    // 絶対パスはログ出力にだけ使用する
    let absolute = match absolute_path(path) {
        Ok(absolute) => absolute.display().to_string(),
        Err(e) => {
            tracing::warn!(
                "Could not get absolute path for {}: {}",
                path.display(),
                e
            );
            String::new()
        }
    };
    tracing::info!("Loading seed file: {} (abs: {})", path.display(), absolute);

    let data = fs::read(path).map_err(|source| SeedFileError::ReadError {
        path: path.to_owned(),
        cwd: env::current_dir()
            .map(|cwd| cwd.display().to_string())
            .unwrap_or_default(),
        source,
    })?;
    let records: Option<Vec<SpotifyTokenRecord>> =
        serde_json::from_slice(&data).map_err(|source| SeedFileError::ParseError {
            path: path.to_owned(),
            source,
        })?;

    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(SpotifyToken::from)
        .collect())
}

fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    Ok(env::current_dir()?.join(path))
}
