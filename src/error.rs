use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。GOOGLE_API_KEY を設定するか `zecode-catalogue config --set-api-key YOUR_KEY` で設定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV出力エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("カタログ検査で{0}件の問題が見つかりました")]
    AuditFailed(usize),

    #[error(transparent)]
    Common(#[from] zecode_catalogue_common::Error),
}

impl From<reqwest::Error> for CatalogueError {
    fn from(e: reqwest::Error) -> Self {
        CatalogueError::ApiCall(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogueError>;
