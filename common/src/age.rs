//! 年齢・性別判定
//!
//! 判定そのものは外部のVision APIが行う。ここではプロンプト、
//! レスポンスのパース、判定結果に基づく属性の書き換えのみを扱う。

use crate::error::{Error, Result};
use crate::types::{AgeAnalysis, AgeCategory, ProductRecord};

/// 年齢判定プロンプト
pub const AGE_PROMPT: &str = r#"Look at this fashion product image. Is the person wearing this a child/kid (under 12 years old) or an adult/teenager?

Return ONLY a JSON object:
{
    "is_kid": true or false,
    "estimated_age_range": "child (2-12)" or "teen/adult (13+)",
    "gender": "male" or "female"
}"#;

/// レスポンスから最初のJSONオブジェクトを抽出
///
/// 最初の `{` から、その後最初の `}` までを返す（入れ子は考慮しない）。
pub fn extract_json_object(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| Error::Parse("JSONオブジェクトが見つかりません".into()))?;
    let end = response[start..]
        .find('}')
        .map(|offset| start + offset)
        .ok_or_else(|| Error::Parse("JSONオブジェクトが閉じていません".into()))?;

    Ok(&response[start..=end])
}

/// 年齢判定レスポンスをパース
pub fn parse_age_response(response: &str) -> Result<AgeAnalysis> {
    let json_str = extract_json_object(response)?;
    serde_json::from_str(json_str)
        .map_err(|e| Error::Parse(format!("年齢判定 JSONパースエラー: {}", e)))
}

/// 判定結果をレコードに反映
///
/// キッズ判定のときだけ書き換える: 年齢区分を kid にし、
/// male → boy / female → girl に置き換える。大人判定では何もしない。
pub fn apply_age_analysis(record: &mut ProductRecord, analysis: &AgeAnalysis) {
    if !analysis.is_kid {
        return;
    }

    record.is_kid = true;
    record.age_category = AgeCategory::Kid;

    match record.gender.to_lowercase().as_str() {
        "male" => record.gender = "boy".to_string(),
        "female" => record.gender = "girl".to_string(),
        _ => {}
    }
}
