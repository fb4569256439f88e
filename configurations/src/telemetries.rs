use std::path::Path;

use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// トレーシングサブスクライバーを構築する。
///
/// ログはBunyan形式のJSONで`sink`に出力される。
///
/// # Arguments
///
/// * `name` - ログに記録するアプリケーション名。
/// * `env_filter` - 出力するログのフィルタ。
/// * `sink` - ログの出力先。
///
/// # Returns
///
/// トレーシングサブスクライバー。
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: EnvFilter,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let formatting_layer = BunyanFormattingLayer::new(name, sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// トレーシングサブスクライバーをグローバルに登録する。
///
/// `log`クレートで記録されたログもトレーシングに転送する。
/// この関数は1プロセスにつき1回だけ呼び出すこと。
///
/// # Arguments
///
/// * `subscriber` - 登録するトレーシングサブスクライバー。
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    LogTracer::init().expect("ロガーの設定に失敗しました。");
    set_global_default(subscriber).expect("トレーシングサブスクライバーの設定に失敗しました。");
}

/// 環境変数RUST_LOGからログのフィルタを構築する。
///
/// RUST_LOGが設定されていない、または解釈できない場合は`default_directive`を使用する。
pub fn env_filter_or(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// 日付ごとにファイルを切り替えるログファイルを作成する。
///
/// ディレクトリを作成できない場合は、パニックせずにエラーを返却する。
///
/// # Arguments
///
/// * `directory` - ログファイルを作成するディレクトリ。
/// * `prefix` - ログファイル名の接頭辞。
///
/// # Returns
///
/// ログファイル。
pub fn daily_log_file<P: AsRef<Path>>(
    directory: P,
    prefix: &str,
) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .build(directory)
}
