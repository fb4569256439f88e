use async_trait::async_trait;

use crate::models::spotify_tokens::SpotifyToken;

/// Spotifyトークンリポジトリ
#[async_trait]
pub trait SpotifyTokenRepository {
    /// Spotifyトークンを1件登録する。
    ///
    /// 重複は確認しない。
    async fn insert(&mut self, token: &SpotifyToken) -> anyhow::Result<()>;
}
