use super::{AsyncPhase, Fetched, RequestFlags, StoreHandle, kind_of, perform, rejection_of};
use crate::cache::{StalenessPolicy, should_fetch};
use crate::client::BillingApi;
use crate::error::ApiResult;
use crate::protocol::ListPlansRequest;
use crate::transport::HttpClient;
use crate::{Plan, Timestamp};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanState {
    pub plans: Vec<Plan>,
    pub loaded_at: Option<Timestamp>,
    pub flags: RequestFlags,
}

impl PlanState {
    pub fn reduce(&mut self, action: PlanAction) {
        match action {
            PlanAction::FetchAll(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(Fetched { data, at }) => {
                    self.flags.is_loading = false;
                    self.flags.is_success = true;
                    self.plans = data;
                    self.loaded_at = Some(at);
                }
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            // 与其他切片不同，plans 的 reset 会丢弃已加载的数据
            PlanAction::Reset => *self = Self::default(),
        }
    }

    pub fn find(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanAction {
    FetchAll(AsyncPhase<Fetched<Vec<Plan>>>),
    Reset,
}

impl PlanAction {
    pub fn kind(&self) -> String {
        match self {
            PlanAction::FetchAll(p) => kind_of("plans", "getAll", p),
            PlanAction::Reset => "plans/reset".to_string(),
        }
    }

    pub fn rejection(&self) -> Option<&str> {
        match self {
            PlanAction::FetchAll(p) => rejection_of(p),
            PlanAction::Reset => None,
        }
    }
}

// =========================================================
// 异步动作
// =========================================================

pub async fn fetch_plans<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
) -> ApiResult<Vec<Plan>> {
    store.dispatch(PlanAction::FetchAll(AsyncPhase::Pending).into());
    match perform(api, store, "plans.getAll", &ListPlansRequest).await {
        Ok(plans) => {
            let fetched = Fetched {
                data: plans.clone(),
                at: store.now(),
            };
            store.dispatch(PlanAction::FetchAll(AsyncPhase::Fulfilled(fetched)).into());
            Ok(plans)
        }
        Err(e) => {
            store.dispatch(PlanAction::FetchAll(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

/// 按过期策略决定是否重新获取；返回是否发出了请求
pub async fn ensure_plans<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
    policy: StalenessPolicy,
) -> ApiResult<bool> {
    let (loaded_at, empty) = store.with_state(|s| (s.plans.loaded_at, s.plans.plans.is_empty()));
    if !should_fetch(policy, loaded_at, empty, store.now()) {
        return Ok(false);
    }
    fetch_plans(api, store).await.map(|_| true)
}

pub fn reset<S: StoreHandle>(store: &S) {
    store.dispatch(PlanAction::Reset.into());
}
