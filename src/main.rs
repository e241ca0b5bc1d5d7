use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use zecode_catalogue::{analyzer, audit, builder, cli, config, error};
use analyzer::{AgeClassifier, CacheFile, GeminiClassifier, OfflineClassifier};
use builder::BuildOptions;
use cli::{Cli, Commands};
use config::Config;
use error::{CatalogueError, Result};

fn init_logging(cli: &Cli) {
    let level = if cli.verbose { "debug" } else { cli.log_level.as_str() };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    let config = Config::load()?;

    match cli.command {
        Commands::Build { garments, poses, output, no_classify, use_cache, concurrency } => {
            println!("🛍️  zecode-catalogue - カタログ生成\n");

            let classifier: Box<dyn AgeClassifier> = if no_classify {
                println!("- 年齢判定なし（全件を大人として扱います）\n");
                Box::new(OfflineClassifier)
            } else {
                Box::new(GeminiClassifier::new(
                    config.get_api_key()?,
                    config.model.clone(),
                    Duration::from_secs(config.timeout_seconds),
                )?)
            };

            let options = BuildOptions {
                garments_dir: garments.unwrap_or_else(|| config.garments_folder.clone().into()),
                poses_dir: poses.unwrap_or_else(|| config.poses_folder.clone().into()),
                output_dir: output,
                use_cache,
                concurrency,
                error_pause: Duration::from_millis(config.error_pause_ms),
                created_at: chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            };

            let report = builder::build_catalogue(&options, classifier.as_ref()).await?;
            builder::print_summary(&report.summary);

            if report.failed_classifications > 0 {
                println!("⚠ 判定失敗: {}件（大人として出力）", report.failed_classifications);
            }
            println!("\n✅ カタログ生成完了");
        }

        Commands::Audit { input, root } => {
            println!("🔍 zecode-catalogue - カタログ検査\n");

            if !input.exists() {
                return Err(CatalogueError::FileNotFound(input.display().to_string()));
            }

            let report = audit::audit_catalogue(&input, root.as_deref())?;
            println!("✔ {}件 / 画像 {}枚を確認", report.checked, report.images_checked);

            if !report.is_ok() {
                println!("\n❌ 問題:");
                for issue in &report.issues {
                    println!("  - {}", issue);
                }
                return Err(CatalogueError::AuditFailed(report.issues.len()));
            }

            println!("\n✅ 問題なし");
        }

        Commands::Config { set_api_key, prompt_api_key, show } => {
            let mut config = config;

            let key = if prompt_api_key {
                let input = dialoguer::Password::new()
                    .with_prompt("GOOGLE_API_KEY")
                    .interact()
                    .map_err(|e| CatalogueError::Config(e.to_string()))?;
                Some(input)
            } else {
                set_api_key
            };

            if let Some(key) = key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  商品画像フォルダ: {}", config.garments_folder);
                println!("  ポーズ画像フォルダ: {}", config.poses_folder);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  失敗後の待ち時間: {}ms", config.error_pause_ms);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| config.garments_folder.clone().into());
            let cache_path = CacheFile::cache_path(&target);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}
