use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    // SSH 形式: [ssh://]user@host:path 或 user@host/path
    static ref SSH_REMOTE: Regex =
        Regex::new(r"^(?:ssh://)?([A-Za-z0-9_.+-]+)@([A-Za-z0-9_.-]+)[:/](.+)$").unwrap();
}

/// 归一化代码仓库URL
///
/// 上游的 repository 字段形态各异：带 `git+` 前缀、`git://` 协议、
/// `.git` 归档后缀、或 SSH 风格的 `user@host:path`。统一改写为 https
/// 地址。该变换是幂等的：对已归一化的URL再次调用得到相同结果。
/// 改写后仍无法解析为URL的输入视为缺失。
pub fn normalize_repository_url(raw: &str) -> Option<String> {
    let mut url = raw.trim().to_string();
    if url.is_empty() {
        return None;
    }

    if let Some(rest) = url.strip_prefix("git+") {
        url = rest.to_string();
    }
    if let Some(rest) = url.strip_prefix("git://") {
        url = format!("https://{}", rest);
    }
    if let Some(caps) = SSH_REMOTE.captures(&url) {
        url = format!("https://{}/{}", &caps[2], &caps[3]);
    }
    if let Some(rest) = url.strip_suffix(".git") {
        url = rest.to_string();
    }

    match Url::parse(&url) {
        Ok(_) => Some(url),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_git_prefix_and_suffix() {
        assert_eq!(
            normalize_repository_url("git+https://github.com/serde-rs/serde.git"),
            Some("https://github.com/serde-rs/serde".to_string())
        );
    }

    #[test]
    fn test_rewrites_git_scheme() {
        assert_eq!(
            normalize_repository_url("git://github.com/lodash/lodash.git"),
            Some("https://github.com/lodash/lodash".to_string())
        );
    }

    #[test]
    fn test_rewrites_ssh_remote() {
        assert_eq!(
            normalize_repository_url("git@github.com:pallets/flask.git"),
            Some("https://github.com/pallets/flask".to_string())
        );
        assert_eq!(
            normalize_repository_url("git+ssh://git@github.com/npm/cli.git"),
            Some("https://github.com/npm/cli".to_string())
        );
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_repository_url("git+https://github.com/rust-lang/cargo.git").unwrap();
        let twice = normalize_repository_url(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_or_unparseable_is_absent() {
        assert_eq!(normalize_repository_url(""), None);
        assert_eq!(normalize_repository_url("   "), None);
        assert_eq!(normalize_repository_url("not a url at all"), None);
    }

    #[test]
    fn test_https_userinfo_untouched() {
        assert_eq!(
            normalize_repository_url("https://git@github.com/expressjs/express"),
            Some("https://git@github.com/expressjs/express".to_string())
        );
    }
}
