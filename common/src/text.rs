//! 表示用テキスト整形

/// 単語の先頭を大文字、それ以外を小文字にする
///
/// 英字以外（空白・ハイフン・数字・アポストロフィ）の直後を単語の先頭とみなす。
///
/// # Examples
/// ```
/// use zecode_catalogue_common::text::title_case;
///
/// assert_eq!(title_case("tie-dye print"), "Tie-Dye Print");
/// assert_eq!(title_case("BLACK"), "Black");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

/// 区切り文字（`-` `_`）を空白にしてからタイトルケース化
pub fn display_token(s: &str) -> String {
    title_case(&s.replace(['-', '_'], " "))
}
