pub mod crates_io;
pub mod npm;
pub mod pypi;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RegistryError;
use crate::models::{Deprecation, PackageSummary, ReleaseEntry};

/// 包生态
///
/// 三个固定的注册表生态。集合封闭且不会在运行期扩展，分发用
/// 枚举match而不是动态trait对象。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ecosystem {
    /// JavaScript/TypeScript 包注册表 (registry.npmjs.org)
    #[serde(rename = "npm")]
    Npm,
    /// Python 包索引 (pypi.org)
    #[serde(rename = "pypi")]
    PyPI,
    /// Rust 包注册表 (crates.io)
    #[serde(rename = "crates.io")]
    CratesIo,
}

impl Ecosystem {
    /// 全部受支持的生态
    pub const ALL: [Ecosystem; 3] = [Ecosystem::Npm, Ecosystem::PyPI, Ecosystem::CratesIo];

    /// 包元数据文档的API地址。三种查询共用同一份文档，每次查询恰好
    /// 一次出站请求。
    pub fn package_url(&self, base_url: &str, name: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let encoded = urlencoding::encode(name);
        match self {
            Ecosystem::Npm => format!("{}/{}", base, encoded),
            Ecosystem::PyPI => format!("{}/{}/json", base, encoded),
            Ecosystem::CratesIo => format!("{}/crates/{}", base, encoded),
        }
    }

    /// 包的人类可读主页URL
    pub fn web_url(&self, name: &str) -> String {
        match self {
            Ecosystem::Npm => format!("https://www.npmjs.com/package/{}", name),
            Ecosystem::PyPI => format!("https://pypi.org/project/{}", name),
            Ecosystem::CratesIo => format!("https://crates.io/crates/{}", name),
        }
    }

    /// 从原始注册表文档归一化出包摘要
    pub fn parse_summary(&self, doc: &Value) -> Result<PackageSummary, RegistryError> {
        match self {
            Ecosystem::Npm => npm::parse_summary(doc),
            Ecosystem::PyPI => pypi::parse_summary(doc),
            Ecosystem::CratesIo => crates_io::parse_summary(doc),
        }
    }

    /// 从原始注册表文档提取发布条目（未排序、未截断）
    pub fn parse_releases(&self, doc: &Value) -> Result<Vec<ReleaseEntry>, RegistryError> {
        match self {
            Ecosystem::Npm => npm::parse_releases(doc),
            Ecosystem::PyPI => pypi::parse_releases(doc),
            Ecosystem::CratesIo => crates_io::parse_releases(doc),
        }
    }

    /// 从原始注册表文档提取弃用信号
    pub fn parse_deprecation(&self, doc: &Value) -> Deprecation {
        match self {
            Ecosystem::Npm => npm::parse_deprecation(doc),
            Ecosystem::PyPI => pypi::parse_deprecation(doc),
            Ecosystem::CratesIo => crates_io::parse_deprecation(doc),
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ecosystem::Npm => write!(f, "npm"),
            Ecosystem::PyPI => write!(f, "pypi"),
            Ecosystem::CratesIo => write!(f, "crates.io"),
        }
    }
}

impl FromStr for Ecosystem {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Ecosystem::Npm),
            "pypi" => Ok(Ecosystem::PyPI),
            "crates.io" | "crates" => Ok(Ecosystem::CratesIo),
            other => Err(RegistryError::InvalidInput(format!(
                "未知的生态 {:?}，支持: npm, pypi, crates.io",
                other
            ))),
        }
    }
}

/// 查询前的包名校验：去除首尾空白后必须非空
pub fn validate_package_name(name: &str) -> Result<&str, RegistryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::InvalidInput(
            "包名不能为空".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ecosystem_tag() {
        assert_eq!("npm".parse::<Ecosystem>().unwrap(), Ecosystem::Npm);
        assert_eq!("PyPI".parse::<Ecosystem>().unwrap(), Ecosystem::PyPI);
        assert_eq!("crates.io".parse::<Ecosystem>().unwrap(), Ecosystem::CratesIo);
        assert!("homebrew".parse::<Ecosystem>().is_err());
    }

    #[test]
    fn test_package_urls() {
        assert_eq!(
            Ecosystem::Npm.package_url("https://registry.npmjs.org", "express"),
            "https://registry.npmjs.org/express"
        );
        // scoped 包名整体做路径编码
        assert_eq!(
            Ecosystem::Npm.package_url("https://registry.npmjs.org", "@types/node"),
            "https://registry.npmjs.org/%40types%2Fnode"
        );
        assert_eq!(
            Ecosystem::PyPI.package_url("https://pypi.org/pypi", "requests"),
            "https://pypi.org/pypi/requests/json"
        );
        assert_eq!(
            Ecosystem::CratesIo.package_url("https://crates.io/api/v1/", "serde"),
            "https://crates.io/api/v1/crates/serde"
        );
    }

    #[test]
    fn test_validate_package_name() {
        assert_eq!(validate_package_name("  tokio  ").unwrap(), "tokio");
        assert!(validate_package_name("   ").is_err());
        assert!(validate_package_name("").is_err());
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&Ecosystem::CratesIo).unwrap(), "\"crates.io\"");
        assert_eq!(serde_json::to_string(&Ecosystem::Npm).unwrap(), "\"npm\"");
    }
}
