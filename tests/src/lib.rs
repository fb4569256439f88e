use std::fs;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use sqlx::{postgres::PgPool, Connection, Executor, PgConnection};
use tempfile::TempDir;
use uuid::Uuid;

use configurations::telemetries::{get_subscriber, init_subscriber};
use configurations::{get_settings, DatabaseSettings, Settings};

/// 環境変数にTEST_LOGがあった場合、トレースを標準出力に出力して、それ以外の場合はstd::io::sinkに出力する。
static TRACING: Lazy<()> = Lazy::new(|| {
    let name = "test".to_string();
    let level = "info".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, level.into(), std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, level.into(), std::io::sink);
        init_subscriber(subscriber);
    };
});

/// 先頭の要素だけが登録されるシードファイルの内容
pub const SEED_JSON: &str = r#"[
    {"access_token":"abc","token_type":"Bearer","expires_in":3600,"refresh_token":"xyz","scope":"user-read","expires_at":1700000000},
    {"access_token":"def","token_type":"Bearer","expires_in":60,"refresh_token":"uvw","scope":"user-modify","expires_at":1700000100}
]"#;

/// spotify_tokensテーブルの行
pub type SpotifyTokenRow = (String, String, i64, String, String, i64);

/// テスト用データベース構造体
pub struct TestDatabase {
    /// テスト用データベースに接続する設定
    pub settings: Settings,
    /// テスト用データベースのコネクションプール
    pub pool: PgPool,
    /// シードファイルを格納する一時ディレクトリ
    pub seed_dir: TempDir,
}

impl TestDatabase {
    /// 一時ディレクトリにシードファイルを作成する。
    ///
    /// # Returns
    ///
    /// シードファイルのパス。
    pub fn write_seed_file(&self, contents: &str) -> PathBuf {
        let path = self.seed_dir.path().join("seed.json");
        fs::write(&path, contents).expect("シードファイルの作成に失敗しました。");

        path
    }

    /// spotify_tokensテーブルのすべての行を登録順に取得する。
    pub async fn fetch_spotify_tokens(&self) -> Vec<SpotifyTokenRow> {
        sqlx::query_as::<_, SpotifyTokenRow>(
            r#"
            SELECT access_token, token_type, expires_in, refresh_token, scope, expires_at
            FROM spotify_tokens
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .expect("spotify_tokensテーブルの取得に失敗しました。")
    }

    /// コネクションプール以外からテスト用データベースに接続しているコネクション数を返却する。
    pub async fn count_foreign_connections(&self) -> i64 {
        let connections: i64 = sqlx::query_scalar(
            r#"
            SELECT count(*)
            FROM pg_stat_activity
            WHERE datname = $1 AND pid <> pg_backend_pid()
            "#,
        )
        .bind(self.settings.db.database_name.as_str())
        .fetch_one(&self.pool)
        .await
        .expect("pg_stat_activityの取得に失敗しました。");
        // 問い合わせに使用したコネクションはpg_backend_pid()で除外済み
        let pooled = i64::from(self.pool.size()) - 1;

        connections - pooled
    }
}

/// テスト用データベースを生成する。
///
/// 環境変数の接続先に、ランダムな名前のデータベースを作成してマイグレートする。
pub async fn spawn_database() -> TestDatabase {
    dotenv().ok();

    Lazy::force(&TRACING);

    let settings = {
        let mut s = get_settings();
        s.db.database_name = Uuid::new_v4().to_string(); // 新しいテスト用のデータベース

        s
    };
    let pool = configure_database(&settings.db).await;
    let seed_dir = TempDir::new().expect("一時ディレクトリの作成に失敗しました。");

    TestDatabase {
        settings,
        pool,
        seed_dir,
    }
}

async fn configure_database(settings: &DatabaseSettings) -> PgPool {
    // データベース名を指定しないことで、ユーザー名と同じデータベースに接続
    let options = settings
        .without_db()
        .expect("データベースの接続設定が不正です。");
    let mut connection = PgConnection::connect_with(&options)
        .await
        .expect("Fail to connect to postgres.");
    // テスト用データベースを構築
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, settings.database_name).as_str())
        .await
        .expect("Failed to create test database.");

    // テスト用データベースに接続して、マイグレーションを実行
    let options = settings
        .with_db()
        .expect("データベースの接続設定が不正です。");
    let pool = PgPool::connect_with(options)
        .await
        .expect("Failed to connect to test database.");
    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate the test database.");

    pool
}
