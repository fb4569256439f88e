use std::process::ExitCode;

use dotenvy::dotenv;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use configurations::get_settings;
use configurations::telemetries::{daily_log_file, env_filter_or, get_subscriber, init_subscriber};
use seeder::startup::Seeder;

const APP_NAME: &str = "spotify-token-seeder";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    // トレーシングログを設定
    // ログディレクトリを作成できない場合は、標準出力だけにログを出力
    match daily_log_file("logs", "seed") {
        Ok(log_file) => {
            let subscriber = get_subscriber(
                APP_NAME.into(),
                env_filter_or("info"),
                std::io::stdout.and(log_file), // 標準出力とファイルにログを出力
            );
            init_subscriber(subscriber);
        }
        Err(e) => {
            let subscriber =
                get_subscriber(APP_NAME.into(), env_filter_or("info"), std::io::stdout);
            init_subscriber(subscriber);
            tracing::warn!("Could not create log file, logging to stdout only: {}", e);
        }
    }

    tracing::info!("Starting Spotify token seeding...");
    match run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = get_settings();
    let seeder = Seeder::build(settings).await?;
    seeder.run().await?;
    tracing::info!("Seed completed: Spotify token inserted.");

    Ok(())
}
