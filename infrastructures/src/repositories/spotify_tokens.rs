use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgConnection;

use domains::models::spotify_tokens::SpotifyToken;
use domains::repositories::spotify_tokens::SpotifyTokenRepository;

#[derive(Debug, thiserror::Error)]
pub enum SpotifyTokenRepositoryError {
    #[error(transparent)]
    UnexpectedError(anyhow::Error),
    #[error("Spotifyトークンを登録できませんでした。")]
    InsertError,
}

/// PostgreSQLのspotify_tokensテーブルを操作するリポジトリ
pub struct PgSpotifyTokenRepository<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgSpotifyTokenRepository<'c> {
    /// リポジトリを構築する。
    ///
    /// # Arguments
    ///
    /// * `conn` - データベースコネクション。
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> SpotifyTokenRepository for PgSpotifyTokenRepository<'c> {
    /// Spotifyトークンを登録する。
    ///
    /// トランザクションは開始せず、1つのINSERT文を実行する。
    ///
    /// # Arguments
    ///
    /// * `token` - 登録するSpotifyトークン。
    async fn insert(&mut self, token: &SpotifyToken) -> anyhow::Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO spotify_tokens (
                access_token, token_type, expires_in, refresh_token, scope, expires_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6
            )
            "#,
        )
        .bind(token.access_token.expose_secret().as_str())
        .bind(token.token_type.as_str())
        .bind(token.expires_in)
        .bind(token.refresh_token.expose_secret().as_str())
        .bind(token.scope.as_str())
        .bind(token.expires_at)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| SpotifyTokenRepositoryError::UnexpectedError(e.into()))?;
        if result.rows_affected() != 1 {
            return Err(SpotifyTokenRepositoryError::InsertError.into());
        }

        Ok(())
    }
}
