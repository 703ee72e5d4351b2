//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! kenshin-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! ID は BIGSERIAL と同様に 1 から連番で採番する。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use kenshin_domain::{
    campaign::{Campaign, CampaignId, NewCampaign},
    check_request::{CheckRequest, CheckRequestId, CheckRequestStatus, NewCheckRequest},
    check_result::{CheckResult, CheckResultId, NewCheckResult},
    employee::{Employee, EmployeeId},
};

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    repository::{
        CampaignRepository,
        CheckRequestRepository,
        CheckResultRepository,
        EmployeeRepository,
    },
};

/// BIGSERIAL 相当の連番
#[derive(Clone)]
struct Sequence(Arc<AtomicI64>);

impl Default for Sequence {
    fn default() -> Self {
        Self(Arc::new(AtomicI64::new(1)))
    }
}

impl Sequence {
    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

// ===== MockEmployeeRepository =====

#[derive(Clone, Default)]
pub struct MockEmployeeRepository {
    employees: Arc<Mutex<Vec<Employee>>>,
}

impl MockEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_employee(&self, employee: Employee) {
        self.employees.lock().unwrap().push(employee);
    }

    /// 保存済みの全従業員（テストの検証用）
    pub fn all(&self) -> Vec<Employee> {
        self.employees.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, InfraError> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id() == id)
            .cloned())
    }

    async fn update_last_health_check_date(
        &self,
        _tx: &mut TxContext,
        employee: &Employee,
    ) -> Result<(), InfraError> {
        let mut employees = self.employees.lock().unwrap();
        if let Some(pos) = employees.iter().position(|e| e.id() == employee.id())
            && employees[pos].last_health_check_date() < employee.last_health_check_date()
        {
            employees[pos] = employee.clone();
        }
        Ok(())
    }
}

// ===== MockCampaignRepository =====

#[derive(Clone, Default)]
pub struct MockCampaignRepository {
    campaigns: Arc<Mutex<Vec<Campaign>>>,
    sequence:  Sequence,
}

impl MockCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの全キャンペーン（テストの検証用）
    pub fn all(&self) -> Vec<Campaign> {
        self.campaigns.lock().unwrap().clone()
    }
}

#[async_trait]
impl CampaignRepository for MockCampaignRepository {
    async fn insert(
        &self,
        _tx: &mut TxContext,
        campaign: &NewCampaign,
    ) -> Result<Campaign, InfraError> {
        let created = Campaign::from_db(
            CampaignId::new(self.sequence.next()),
            campaign.details().clone(),
            campaign.status(),
        );
        self.campaigns.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<Campaign>, InfraError> {
        Ok(self.campaigns.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: CampaignId) -> Result<Option<Campaign>, InfraError> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn update_status(
        &self,
        _tx: &mut TxContext,
        campaign: &Campaign,
    ) -> Result<(), InfraError> {
        let mut campaigns = self.campaigns.lock().unwrap();
        if let Some(pos) = campaigns.iter().position(|c| c.id() == campaign.id()) {
            campaigns[pos] = campaign.clone();
        }
        Ok(())
    }
}

// ===== MockCheckRequestRepository =====

#[derive(Clone, Default)]
pub struct MockCheckRequestRepository {
    requests: Arc<Mutex<Vec<CheckRequest>>>,
    sequence: Sequence,
}

impl MockCheckRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの全受診依頼（テストの検証用）
    pub fn all(&self) -> Vec<CheckRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckRequestRepository for MockCheckRequestRepository {
    async fn insert(
        &self,
        _tx: &mut TxContext,
        request: &NewCheckRequest,
    ) -> Result<CheckRequest, InfraError> {
        let created = CheckRequest::from_db(
            CheckRequestId::new(self.sequence.next()),
            request.campaign_id(),
            request.employee_id(),
            request.status(),
            None,
        );
        self.requests.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CheckRequest>, InfraError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.campaign_id() == campaign_id)
            .cloned()
            .collect())
    }

    async fn find_by_status(
        &self,
        status: CheckRequestStatus,
    ) -> Result<Vec<CheckRequest>, InfraError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.status() == status)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        _tx: &mut TxContext,
        request: &CheckRequest,
    ) -> Result<(), InfraError> {
        let mut requests = self.requests.lock().unwrap();
        if let Some(pos) = requests.iter().position(|r| r.id() == request.id()) {
            requests[pos] = request.clone();
        }
        Ok(())
    }
}

// ===== MockCheckResultRepository =====

#[derive(Clone, Default)]
pub struct MockCheckResultRepository {
    results:  Arc<Mutex<Vec<CheckResult>>>,
    sequence: Sequence,
}

impl MockCheckResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みの全受診結果（テストの検証用）
    pub fn all(&self) -> Vec<CheckResult> {
        self.results.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckResultRepository for MockCheckResultRepository {
    async fn insert(
        &self,
        _tx: &mut TxContext,
        result: &NewCheckResult,
    ) -> Result<CheckResult, InfraError> {
        let created = CheckResult::from_db(CheckResultId::new(self.sequence.next()), result.clone());
        self.results.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<CheckResult>, InfraError> {
        let mut results: Vec<_> = self
            .results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.employee_id() == employee_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| {
            b.check_date()
                .cmp(&a.check_date())
                .then(b.id().cmp(&a.id()))
        });
        Ok(results)
    }
}

// ===== MockTransactionManager =====

/// テスト用の TransactionManager
///
/// [`TxContext::mock()`] を返す。コミットは常に成功する。
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::mock())
    }
}
