use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 预发布标记: 可选的前导分隔符 + 标记词 + 可选数字 + 分隔符或结尾
    static ref PRERELEASE: Regex = Regex::new(
        r"(?i)(alpha|beta|rc|dev|pre|canary|next|snapshot|preview|nightly|a|b)[-._]?[0-9]*([-._+]|$)"
    )
    .unwrap();
}

/// 判断版本字符串是否为预发布版本
///
/// 这是启发式匹配而不是语义化版本解析：识别常见的预发布标记
/// （alpha/beta/rc/dev/pre/canary/next/snapshot/preview/nightly 及
/// 单字母缩写 a/b）。边缘情况允许误判，例如正式版本号中紧跟数字的
/// 裸 `a`/`b`（"1.0.8a"）会被判为预发布。这是已知限制，不做静默修正。
pub fn is_prerelease(version: &str) -> bool {
    PRERELEASE.is_match(version)
}
