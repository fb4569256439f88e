use std::env;

use secrecy::{ExposeSecret, Secret};
use sqlx::{
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions,
};

/// データベースのホスト名を設定する環境変数とデフォルト値
pub const DB_HOST_KEY: &str = "DB_HOST";
pub const DEFAULT_DB_HOST: &str = "localhost";
/// データベースのポート番号を設定する環境変数とデフォルト値
pub const DB_PORT_KEY: &str = "DB_PORT";
pub const DEFAULT_DB_PORT: &str = "5433";
/// データベースのユーザー名を設定する環境変数とデフォルト値
pub const DB_USER_KEY: &str = "DB_USER";
pub const DEFAULT_DB_USER: &str = "user";
/// データベースのパスワードを設定する環境変数とデフォルト値
pub const DB_PASSWORD_KEY: &str = "DB_PASSWORD";
pub const DEFAULT_DB_PASSWORD: &str = "password";
/// データベース名を設定する環境変数とデフォルト値
pub const DB_NAME_KEY: &str = "DB_NAME";
pub const DEFAULT_DB_NAME: &str = "devdb";

/// 設定構造体
#[derive(Debug, Clone)]
pub struct Settings {
    /// データベース設定
    pub db: DatabaseSettings,
}

/// 環境変数から設定を取得する。
///
/// `.env`ファイルは読み込まない。呼び出し元で先に読み込んでおくこと。
///
/// # Returns
///
/// 設定インスタンス。
pub fn get_settings() -> Settings {
    Settings {
        db: DatabaseSettings::from_env(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSettingsError {
    #[error("ポート番号({0})を数値として認識できません。")]
    InvalidPort(String),
}

/// データベース設定構造体
///
/// 値の検証はしない。ポート番号は接続オプションを構築するときに数値に変換する。
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: Secret<String>,
    pub database_name: String,
}

impl DatabaseSettings {
    /// 環境変数からデータベース設定を構築する。
    ///
    /// # Returns
    ///
    /// データベース設定インスタンス。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 指定した関数で設定値を検索して、データベース設定を構築する。
    ///
    /// 検索できなかった設定値にはデフォルト値を使用して、その旨をログに出力する。
    /// 空文字列は設定されているものとして扱う。
    ///
    /// # Arguments
    ///
    /// * `lookup` - 環境変数名から値を検索する関数。
    ///
    /// # Returns
    ///
    /// データベース設定インスタンス。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: string_or_default(&lookup, DB_HOST_KEY, DEFAULT_DB_HOST),
            port: string_or_default(&lookup, DB_PORT_KEY, DEFAULT_DB_PORT),
            username: string_or_default(&lookup, DB_USER_KEY, DEFAULT_DB_USER),
            password: Secret::new(string_or_default(
                &lookup,
                DB_PASSWORD_KEY,
                DEFAULT_DB_PASSWORD,
            )),
            database_name: string_or_default(&lookup, DB_NAME_KEY, DEFAULT_DB_NAME),
        }
    }

    /// データベース名を指定せずに接続するオプションを返却する。
    ///
    /// TLSは使用しない。
    ///
    /// # Returns
    ///
    /// データベース接続オプションインスタンス。
    pub fn without_db(&self) -> Result<PgConnectOptions, DatabaseSettingsError> {
        let port: u16 = self
            .port
            .parse()
            .map_err(|_| DatabaseSettingsError::InvalidPort(self.port.clone()))?;

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(port)
            .username(&self.username)
            .password(self.password.expose_secret())
            .ssl_mode(PgSslMode::Disable))
    }

    /// シード対象のデータベースに接続するオプションを返却する。
    ///
    /// # Returns
    ///
    /// データベース接続オプションインスタンス。
    pub fn with_db(&self) -> Result<PgConnectOptions, DatabaseSettingsError> {
        let mut options = self.without_db()?.database(&self.database_name);
        options.log_statements(log::LevelFilter::Trace);

        Ok(options)
    }
}

fn string_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value,
        None => {
            tracing::info!(
                "Environment variable {} not set, using default {:?}",
                key,
                default
            );
            default.to_owned()
        }
    }
}
