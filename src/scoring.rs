use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Rating, ScoreFactors};

/// 近期性判定阈值（天）
const RECENT_DAYS: i64 = 90;
const STALE_DAYS: i64 = 365;
/// 频率判定阈值（次/年）
const FREQUENT_PER_YEAR: f64 = 4.0;
const OCCASIONAL_PER_YEAR: f64 = 1.0;
/// 成熟度判定阈值（版本数）
const MATURE_VERSIONS: usize = 10;
const ESTABLISHED_VERSIONS: usize = 3;
/// 发布史跨度低于约一年的10%时改用外推，避免被近零跨度除爆
const MIN_SPAN_DAYS: f64 = 36.5;
/// 综合加权: 近期性0.5 + 频率0.3 + 成熟度0.2
const RECENCY_WEIGHT: f64 = 0.5;
const FREQUENCY_WEIGHT: f64 = 0.3;
const MATURITY_WEIGHT: f64 = 0.2;

/// 评分计算结果，由引擎装配进 MaintenanceSignals
#[derive(Debug, Clone)]
pub struct MaintenanceComputation {
    /// 距最近一次发布的天数，未知时为 -1
    pub days_since_last_release: i64,
    /// 最近一次发布时间
    pub last_release_date: Option<DateTime<Utc>>,
    /// 年均发布次数，保留两位小数
    pub releases_per_year: f64,
    /// 全部已知版本数
    pub total_versions: usize,
    /// 综合评级
    pub score: Rating,
    /// 子评级明细
    pub factors: ScoreFactors,
}

/// 对完整（未截断）的发布时间集合计算维护评分
///
/// `now` 由调用方显式传入：相同的输入集合与弃用标记总是产出相同的
/// 评级，除近期性所依赖的这个显式时刻外不存在隐藏的时间依赖。
pub fn evaluate(
    release_dates: &[DateTime<Utc>],
    is_deprecated: bool,
    now: DateTime<Utc>,
) -> MaintenanceComputation {
    let last_release_date = release_dates.iter().max().copied();
    let days_since_last_release = match last_release_date {
        Some(last) => (now - last).num_days().max(0),
        None => -1,
    };

    let recency = match last_release_date {
        // 无任何发布时间时按无穷间隔处理
        None => Rating::Poor,
        Some(_) if days_since_last_release < RECENT_DAYS => Rating::Good,
        Some(_) if days_since_last_release < STALE_DAYS => Rating::Fair,
        Some(_) => Rating::Poor,
    };

    let releases_per_year = releases_per_year(release_dates);
    let frequency = if releases_per_year >= FREQUENT_PER_YEAR {
        Rating::Good
    } else if releases_per_year >= OCCASIONAL_PER_YEAR {
        Rating::Fair
    } else {
        Rating::Poor
    };

    let total_versions = release_dates.len();
    let maturity = if total_versions >= MATURE_VERSIONS {
        Rating::Good
    } else if total_versions >= ESTABLISHED_VERSIONS {
        Rating::Fair
    } else {
        Rating::Poor
    };

    let factors = ScoreFactors {
        recency,
        frequency,
        maturity,
    };
    let score = overall(factors, is_deprecated);
    debug!(
        ?score,
        recency = %factors.recency,
        frequency = %factors.frequency,
        maturity = %factors.maturity,
        releases_per_year,
        "维护评分完成"
    );

    MaintenanceComputation {
        days_since_last_release,
        last_release_date,
        releases_per_year,
        total_versions,
        score,
        factors,
    }
}

/// 年均发布次数 = 发布数 ÷ (首末发布间隔天数 ÷ 365)
///
/// 不足两次发布时记为0；跨度不足 36.5 天时改为发布数×10 外推。
/// 该外推在边界处与一般公式不连续，属于既定行为，保留原样。
fn releases_per_year(release_dates: &[DateTime<Utc>]) -> f64 {
    if release_dates.len() < 2 {
        return 0.0;
    }
    let (Some(earliest), Some(latest)) = (release_dates.iter().min(), release_dates.iter().max())
    else {
        return 0.0;
    };
    let span_days = (*latest - *earliest).num_seconds() as f64 / 86_400.0;

    let per_year = if span_days < MIN_SPAN_DAYS {
        release_dates.len() as f64 * 10.0
    } else {
        release_dates.len() as f64 / (span_days / 365.0)
    };
    round2(per_year)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 综合评级：已弃用直接判Poor，否则按 0.5/0.3/0.2 加权后分档
fn overall(factors: ScoreFactors, is_deprecated: bool) -> Rating {
    if is_deprecated {
        return Rating::Poor;
    }
    let weighted = RECENCY_WEIGHT * factors.recency.weight()
        + FREQUENCY_WEIGHT * factors.frequency.weight()
        + MATURITY_WEIGHT * factors.maturity.weight();
    if weighted >= 1.5 {
        Rating::Good
    } else if weighted >= 0.7 {
        Rating::Fair
    } else {
        Rating::Poor
    }
}
