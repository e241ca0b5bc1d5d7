use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zecode-catalogue")]
#[command(about = "商品画像からファッションカタログ（CSV/JSON）を生成するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ログレベル (error/warn/info/debug/trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 商品画像・ポーズ画像からカタログを生成
    Build {
        /// 商品画像フォルダ（デフォルト: 設定の garments_folder）
        #[arg(short, long)]
        garments: Option<PathBuf>,

        /// モデルポーズ画像フォルダ（デフォルト: 設定の poses_folder）
        #[arg(short, long)]
        poses: Option<PathBuf>,

        /// 出力ディレクトリ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// 年齢判定を行わない（全件を大人として扱う）
        #[arg(long)]
        no_classify: bool,

        /// キャッシュを使用（判定済みの画像はAPIを呼ばない）
        #[arg(long)]
        use_cache: bool,

        /// 同時に実行する判定数
        #[arg(short, long, default_value = "1")]
        concurrency: usize,
    },

    /// 生成済みカタログを検査（SKU形式・重複・画像の存在）
    Audit {
        /// カタログJSONファイル
        #[arg(default_value = "product_catalogue.json")]
        input: PathBuf,

        /// 画像パスの基準ディレクトリ（省略時はJSONと同じ場所）
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// APIキーを対話入力で設定
        #[arg(long)]
        prompt_api_key: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 判定キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時は商品画像フォルダ）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_defaults() {
        let cli = Cli::try_parse_from(["zecode-catalogue", "build"]).unwrap();
        match cli.command {
            Commands::Build { garments, output, no_classify, concurrency, .. } => {
                assert!(garments.is_none());
                assert_eq!(output, PathBuf::from("."));
                assert!(!no_classify);
                assert_eq!(concurrency, 1);
            }
            _ => panic!("Expected Build"),
        }
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::try_parse_from([
            "zecode-catalogue", "-v", "build", "-g", "in", "--no-classify", "--use-cache", "-c", "4",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Build { garments, no_classify, use_cache, concurrency, .. } => {
                assert_eq!(garments, Some(PathBuf::from("in")));
                assert!(no_classify);
                assert!(use_cache);
                assert_eq!(concurrency, 4);
            }
            _ => panic!("Expected Build"),
        }
    }

    #[test]
    fn test_parse_audit_default_input() {
        let cli = Cli::try_parse_from(["zecode-catalogue", "audit"]).unwrap();
        match cli.command {
            Commands::Audit { input, root } => {
                assert_eq!(input, PathBuf::from("product_catalogue.json"));
                assert!(root.is_none());
            }
            _ => panic!("Expected Audit"),
        }
    }
}
