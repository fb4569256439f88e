use std::path::Path;

use domains::models::spotify_tokens::SpotifyToken;
use domains::repositories::spotify_tokens::SpotifyTokenRepository;
use infrastructures::seed_files::{load_seed_data, SeedFileError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("シードデータを読み込めませんでした。{0}")]
    LoadError(#[from] SeedFileError),
    #[error("{0}にシードデータがありません。")]
    NoSeedData(String),
    #[error("Spotifyトークンを登録するときにエラーが発生しました。{0:#}")]
    InsertError(anyhow::Error),
}

/// シードファイルの先頭のSpotifyトークンを登録する。
///
/// シードファイルに複数のトークンが記録されていても、登録するのは先頭の1件だけである。
/// 登録の重複は確認しない。
///
/// # Arguments
///
/// * `seed_file` - シードファイルのパス。
/// * `repository` - Spotifyトークンリポジトリ。
///
/// # Returns
///
/// 登録したSpotifyトークン。
#[tracing::instrument(skip(repository), name = "Seed spotify token")]
pub async fn seed_spotify_token<R>(
    seed_file: &Path,
    repository: &mut R,
) -> Result<SpotifyToken, SeedError>
where
    R: SpotifyTokenRepository + Send,
{
    let token = load_seed_data(seed_file)?
        .into_iter()
        .next()
        .ok_or_else(|| SeedError::NoSeedData(seed_file.display().to_string()))?;
    tracing::info!(
        "Loaded Spotify token (expires_in={}, scope={:?}, expires_at={})",
        token.expires_in,
        token.scope,
        token.expires_at
    );

    repository
        .insert(&token)
        .await
        .map_err(SeedError::InsertError)?;

    Ok(token)
}
