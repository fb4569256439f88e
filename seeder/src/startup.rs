use std::path::{Path, PathBuf};

use sqlx::{Connection, PgConnection};

use configurations::{DatabaseSettings, DatabaseSettingsError, Settings};
use domains::models::spotify_tokens::SpotifyToken;
use infrastructures::repositories::spotify_tokens::PgSpotifyTokenRepository;
use infrastructures::seed_files::SEED_FILE;
use usecases::seeding::{seed_spotify_token, SeedError};

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("データベースの接続設定が不正です。{0}")]
    InvalidSettings(#[from] DatabaseSettingsError),
    #[error("データベースに接続できませんでした。{0}")]
    ConnectError(sqlx::Error),
    #[error("データベースの疎通確認に失敗しました。{0}")]
    PingError(sqlx::Error),
}

/// シーダー構造体
pub struct Seeder {
    /// 疎通確認済みのデータベースコネクション
    conn: PgConnection,
    /// シードファイルのパス
    seed_file: PathBuf,
}

impl Seeder {
    /// データベースに接続してシーダーを構築する。
    ///
    /// シードファイルはカレントディレクトリの`seed.json`を使用する。
    ///
    /// # Arguments
    ///
    /// * `settings` - 設定インスタンス。
    ///
    /// # Returns
    ///
    /// シーダーインスタンス。
    pub async fn build(settings: Settings) -> Result<Self, ConnectionError> {
        let Settings { db } = settings;
        let conn = connect(&db).await?;

        Ok(Self {
            conn,
            seed_file: PathBuf::from(SEED_FILE),
        })
    }

    /// シードファイルのパスを変更する。
    pub fn with_seed_file<P: AsRef<Path>>(mut self, seed_file: P) -> Self {
        self.seed_file = seed_file.as_ref().to_owned();

        self
    }

    /// シードファイルの先頭のSpotifyトークンを登録する。
    ///
    /// 登録の成否にかかわらず、データベースコネクションを閉じてから結果を返却する。
    ///
    /// # Returns
    ///
    /// 登録したSpotifyトークン。
    pub async fn run(self) -> Result<SpotifyToken, SeedError> {
        let Self {
            mut conn,
            seed_file,
        } = self;
        let result = {
            let mut repository = PgSpotifyTokenRepository::new(&mut conn);
            seed_spotify_token(&seed_file, &mut repository).await
        };
        close(conn).await;

        result
    }
}

/// データベースに接続して、疎通を確認する。
///
/// 再試行はしない。
///
/// # Arguments
///
/// * `settings` - データベース設定。
///
/// # Returns
///
/// データベースコネクション。
pub async fn connect(settings: &DatabaseSettings) -> Result<PgConnection, ConnectionError> {
    let options = settings.with_db()?;
    tracing::info!(
        host = %settings.host,
        port = %settings.port,
        database = %settings.database_name,
        "Connect to database..."
    );
    let mut conn = PgConnection::connect_with(&options)
        .await
        .map_err(ConnectionError::ConnectError)?;
    if let Err(e) = conn.ping().await {
        close(conn).await;
        return Err(ConnectionError::PingError(e));
    }
    tracing::info!("Successfully connected to database.");

    Ok(conn)
}

async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }
}
