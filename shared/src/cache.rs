use crate::Timestamp;

/// 何时重新获取一个已缓存的资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalenessPolicy {
    /// 每次挂载都重新获取
    #[default]
    Always,
    /// 只在从未加载或结果为空时获取
    IfEmpty,
    /// 超过给定毫秒数后视为过期
    MaxAge(i64),
}

/// 资源是否需要重新获取
///
/// `loaded_at` 为 `None` 表示从未成功加载过，任何策略下都需要获取。
pub fn should_fetch(
    policy: StalenessPolicy,
    loaded_at: Option<Timestamp>,
    empty: bool,
    now: Timestamp,
) -> bool {
    let Some(loaded_at) = loaded_at else {
        return true;
    };
    match policy {
        StalenessPolicy::Always => true,
        StalenessPolicy::IfEmpty => empty,
        StalenessPolicy::MaxAge(max_age) => now.as_millis() - loaded_at.as_millis() >= max_age,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(ms: i64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn never_loaded_always_fetches() {
        for policy in [
            StalenessPolicy::Always,
            StalenessPolicy::IfEmpty,
            StalenessPolicy::MaxAge(60_000),
        ] {
            assert!(should_fetch(policy, None, false, ts(0)));
        }
    }

    #[test]
    fn if_empty_keeps_non_empty_cache() {
        assert!(!should_fetch(StalenessPolicy::IfEmpty, Some(ts(0)), false, ts(10)));
        assert!(should_fetch(StalenessPolicy::IfEmpty, Some(ts(0)), true, ts(10)));
    }

    #[test]
    fn max_age_boundary() {
        let policy = StalenessPolicy::MaxAge(1_000);
        assert!(!should_fetch(policy, Some(ts(5_000)), false, ts(5_999)));
        assert!(should_fetch(policy, Some(ts(5_000)), false, ts(6_000)));
    }

    #[test]
    fn always_refetches() {
        assert!(should_fetch(StalenessPolicy::Always, Some(ts(1)), false, ts(1)));
    }
}
