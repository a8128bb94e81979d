use super::{AsyncPhase, Fetched, RequestFlags, StoreHandle, kind_of, perform, rejection_of};
use crate::client::BillingApi;
use crate::error::ApiResult;
use crate::protocol::{AllPayoutsRequest, ListUsersRequest, PayoutBalanceRequest, PayoutHistoryRequest};
use crate::transport::HttpClient;
use crate::{
    BankDetailsRequest, Confirmation, ManualPayoutRequest, Payout, PayoutBalance, Timestamp, User,
};

pub const BANK_DETAILS_UPDATED: &str = "Bank details updated successfully";
pub const MANUAL_PAYOUT_INITIATED: &str = "Manual payout initiated successfully";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PayoutState {
    /// 个人出款历史或全部出款（管理员），两者共用同一列表
    pub payouts: Vec<Payout>,
    pub payouts_loaded_at: Option<Timestamp>,
    pub users: Vec<User>,
    pub users_loaded_at: Option<Timestamp>,
    pub balance: Option<PayoutBalance>,
    pub balance_loaded_at: Option<Timestamp>,
    pub flags: RequestFlags,
}

impl PayoutState {
    pub fn reduce(&mut self, action: PayoutAction) {
        match action {
            PayoutAction::UpdateBankDetails(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(confirmation) => {
                    let message = confirmation
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| BANK_DETAILS_UPDATED.to_string());
                    self.flags.succeed(message);
                }
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            PayoutAction::FetchHistory(phase) | PayoutAction::FetchAll(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(Fetched { data, at }) => {
                    self.flags.settle();
                    self.payouts = data;
                    self.payouts_loaded_at = Some(at);
                }
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            PayoutAction::FetchBalance(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(Fetched { data, at }) => {
                    self.flags.settle();
                    self.balance = Some(data);
                    self.balance_loaded_at = Some(at);
                }
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            PayoutAction::FetchUsers(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(Fetched { data, at }) => {
                    self.flags.settle();
                    self.users = data;
                    self.users_loaded_at = Some(at);
                }
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            PayoutAction::InitiateManual(phase) => match phase {
                AsyncPhase::Pending => self.flags.start(),
                AsyncPhase::Fulfilled(payout) => {
                    self.flags.succeed(MANUAL_PAYOUT_INITIATED);
                    self.payouts.insert(0, payout);
                }
                AsyncPhase::Rejected(msg) => self.flags.fail(msg),
            },
            PayoutAction::Reset => self.flags.clear(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayoutAction {
    UpdateBankDetails(AsyncPhase<Confirmation>),
    FetchHistory(AsyncPhase<Fetched<Vec<Payout>>>),
    FetchAll(AsyncPhase<Fetched<Vec<Payout>>>),
    FetchBalance(AsyncPhase<Fetched<PayoutBalance>>),
    FetchUsers(AsyncPhase<Fetched<Vec<User>>>),
    InitiateManual(AsyncPhase<Payout>),
    Reset,
}

impl PayoutAction {
    pub fn kind(&self) -> String {
        match self {
            PayoutAction::UpdateBankDetails(p) => kind_of("payout", "updateBankDetails", p),
            PayoutAction::FetchHistory(p) => kind_of("payout", "getHistory", p),
            PayoutAction::FetchAll(p) => kind_of("payout", "getAll", p),
            PayoutAction::FetchBalance(p) => kind_of("payout", "getBalance", p),
            PayoutAction::FetchUsers(p) => kind_of("payout", "getAllUsers", p),
            PayoutAction::InitiateManual(p) => kind_of("payout", "initiateManual", p),
            PayoutAction::Reset => "payout/reset".to_string(),
        }
    }

    pub fn rejection(&self) -> Option<&str> {
        match self {
            PayoutAction::UpdateBankDetails(p) => rejection_of(p),
            PayoutAction::FetchHistory(p) | PayoutAction::FetchAll(p) => rejection_of(p),
            PayoutAction::FetchBalance(p) => rejection_of(p),
            PayoutAction::FetchUsers(p) => rejection_of(p),
            PayoutAction::InitiateManual(p) => rejection_of(p),
            PayoutAction::Reset => None,
        }
    }
}

// =========================================================
// 异步动作
// =========================================================

/// 更新银行信息；`email` 取自当前会话
pub async fn update_bank_details<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
    mut req: BankDetailsRequest,
) -> ApiResult<Confirmation> {
    use PayoutAction::UpdateBankDetails;

    store.dispatch(UpdateBankDetails(AsyncPhase::Pending).into());
    req.email = store.session_email().unwrap_or_default();
    match perform(api, store, "payout.updateBankDetails", &req).await {
        Ok(confirmation) => {
            store.dispatch(UpdateBankDetails(AsyncPhase::Fulfilled(confirmation.clone())).into());
            Ok(confirmation)
        }
        Err(e) => {
            store.dispatch(UpdateBankDetails(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

/// 当前会话用户的出款历史
pub async fn fetch_history<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
) -> ApiResult<Vec<Payout>> {
    use PayoutAction::FetchHistory;

    store.dispatch(FetchHistory(AsyncPhase::Pending).into());
    let req = PayoutHistoryRequest {
        email: store.session_email().unwrap_or_default(),
    };
    match perform(api, store, "payout.getHistory", &req).await {
        Ok(payouts) => {
            let fetched = Fetched {
                data: payouts.clone(),
                at: store.now(),
            };
            store.dispatch(FetchHistory(AsyncPhase::Fulfilled(fetched)).into());
            Ok(payouts)
        }
        Err(e) => {
            store.dispatch(FetchHistory(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub async fn fetch_all<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
) -> ApiResult<Vec<Payout>> {
    use PayoutAction::FetchAll;

    store.dispatch(FetchAll(AsyncPhase::Pending).into());
    match perform(api, store, "payout.getAll", &AllPayoutsRequest).await {
        Ok(payouts) => {
            let fetched = Fetched {
                data: payouts.clone(),
                at: store.now(),
            };
            store.dispatch(FetchAll(AsyncPhase::Fulfilled(fetched)).into());
            Ok(payouts)
        }
        Err(e) => {
            store.dispatch(FetchAll(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub async fn fetch_balance<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
) -> ApiResult<PayoutBalance> {
    use PayoutAction::FetchBalance;

    store.dispatch(FetchBalance(AsyncPhase::Pending).into());
    match perform(api, store, "payout.getBalance", &PayoutBalanceRequest).await {
        Ok(balance) => {
            let fetched = Fetched {
                data: balance.clone(),
                at: store.now(),
            };
            store.dispatch(FetchBalance(AsyncPhase::Fulfilled(fetched)).into());
            Ok(balance)
        }
        Err(e) => {
            store.dispatch(FetchBalance(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub async fn fetch_users<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
) -> ApiResult<Vec<User>> {
    use PayoutAction::FetchUsers;

    store.dispatch(FetchUsers(AsyncPhase::Pending).into());
    match perform(api, store, "payout.getAllUsers", &ListUsersRequest).await {
        Ok(users) => {
            let fetched = Fetched {
                data: users.clone(),
                at: store.now(),
            };
            store.dispatch(FetchUsers(AsyncPhase::Fulfilled(fetched)).into());
            Ok(users)
        }
        Err(e) => {
            store.dispatch(FetchUsers(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub async fn initiate_manual<C: HttpClient, S: StoreHandle>(
    api: &BillingApi<C>,
    store: &S,
    req: ManualPayoutRequest,
) -> ApiResult<Payout> {
    use PayoutAction::InitiateManual;

    store.dispatch(InitiateManual(AsyncPhase::Pending).into());
    match perform(api, store, "payout.initiateManual", &req).await {
        Ok(payout) => {
            store.dispatch(InitiateManual(AsyncPhase::Fulfilled(payout.clone())).into());
            Ok(payout)
        }
        Err(e) => {
            store.dispatch(InitiateManual(AsyncPhase::Rejected(e.message().to_string())).into());
            Err(e)
        }
    }
}

pub fn reset<S: StoreHandle>(store: &S) {
    store.dispatch(PayoutAction::Reset.into());
}
