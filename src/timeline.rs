use crate::models::ReleaseEntry;

/// 未指定limit时的默认条数
pub const DEFAULT_LIMIT: usize = 20;
/// limit的硬上限
pub const LIMIT_CEILING: usize = 100;

/// 装配完成的时间线片段
#[derive(Debug, Clone)]
pub struct AssembledTimeline {
    /// 截断后的发布列表，时间降序
    pub releases: Vec<ReleaseEntry>,
    /// 截断前的全部已知发布数
    pub total_versions: usize,
    /// 截断点之后仍有数据时为limit的字符串形式
    pub cursor: Option<String>,
}

/// 规整请求的limit
///
/// 落在 [1, 上限] 之外的取值先回落到默认值，再做一次上限裁剪。
pub fn clamp_limit(requested: Option<i64>, enforce_ceiling: bool) -> usize {
    let mut limit = requested.unwrap_or(DEFAULT_LIMIT as i64);
    if limit < 1 || (enforce_ceiling && limit > LIMIT_CEILING as i64) {
        limit = DEFAULT_LIMIT as i64;
    }
    let mut limit = limit as usize;
    if enforce_ceiling {
        limit = limit.min(LIMIT_CEILING);
    }
    limit
}

/// 把无序的发布集合装配为有序时间线
///
/// 按时间降序稳定排序（同刻条目保持输入顺序），`total_versions` 统计
/// 截断前的全量，之后按limit截断并生成分页游标。
pub fn assemble(
    mut entries: Vec<ReleaseEntry>,
    requested_limit: Option<i64>,
    enforce_ceiling: bool,
) -> AssembledTimeline {
    let limit = clamp_limit(requested_limit, enforce_ceiling);
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let total_versions = entries.len();
    let cursor = if total_versions > limit {
        Some(limit.to_string())
    } else {
        None
    };
    entries.truncate(limit);

    AssembledTimeline {
        releases: entries,
        total_versions,
        cursor,
    }
}
