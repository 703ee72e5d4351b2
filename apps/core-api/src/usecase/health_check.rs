//! # 健康診断キャンペーン ユースケース
//!
//! キャンペーン作成、受診対象者の抽出、従業員登録、HIS 連携、結果取り込みを扱う。
//!
//! 書き込みを伴う操作は 1 トランザクションで完結させる。
//! 参照先の存在確認は最初の書き込みより前に済ませるため、
//! `NotFound` で中断した場合に途中までの行が残ることはない。

use std::sync::Arc;

use chrono::NaiveDate;
use kenshin_domain::{
    campaign::{Campaign, CampaignDetails, CampaignId, NewCampaign},
    check_request::{CheckRequest, CheckRequestStatus, NewCheckRequest},
    check_result::{CheckResult, NewCheckResult},
    clock::Clock,
    employee::{Employee, EmployeeId},
};
use kenshin_infra::{
    db::TransactionManager,
    repository::{
        CampaignRepository,
        CheckRequestRepository,
        CheckResultRepository,
        EmployeeRepository,
    },
};
use kenshin_shared::{event_log::event, log_business_event};

use crate::{error::CoreError, usecase::helpers::FindResultExt};

/// 受診結果取り込みの入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordResultInput {
    pub employee_id:       EmployeeId,
    pub check_date:        NaiveDate,
    pub health_status:     String,
    pub doctor_conclusion: String,
}

/// 健康診断キャンペーン ユースケース
pub struct HealthCheckUseCaseImpl {
    employee_repo: Arc<dyn EmployeeRepository>,
    campaign_repo: Arc<dyn CampaignRepository>,
    request_repo:  Arc<dyn CheckRequestRepository>,
    result_repo:   Arc<dyn CheckResultRepository>,
    clock:         Arc<dyn Clock>,
    tx_manager:    Arc<dyn TransactionManager>,
}

impl HealthCheckUseCaseImpl {
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        campaign_repo: Arc<dyn CampaignRepository>,
        request_repo: Arc<dyn CheckRequestRepository>,
        result_repo: Arc<dyn CheckResultRepository>,
        clock: Arc<dyn Clock>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            employee_repo,
            campaign_repo,
            request_repo,
            result_repo,
            clock,
            tx_manager,
        }
    }

    // ===== キャンペーン =====

    /// キャンペーンを作成する
    ///
    /// ステータスは呼び出し側の指定に関わらず `PLANNING`。
    /// 開始日・終了日の前後関係は検証しない。
    pub async fn create_campaign(&self, details: CampaignDetails) -> Result<Campaign, CoreError> {
        let new_campaign = NewCampaign::new(details);

        let mut tx = self.tx_manager.begin().await?;
        let campaign = self.campaign_repo.insert(&mut tx, &new_campaign).await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::HEALTH_CHECK,
            event.action = event::action::CAMPAIGN_CREATED,
            event.entity_type = event::entity_type::CAMPAIGN,
            event.entity_id = %campaign.id(),
            event.result = event::result::SUCCESS,
            "キャンペーン作成"
        );

        Ok(campaign)
    }

    /// 全キャンペーンを取得する（ページングなし）
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>, CoreError> {
        Ok(self.campaign_repo.find_all().await?)
    }

    /// キャンペーンを 1 件取得する
    pub async fn get_campaign(&self, id: CampaignId) -> Result<Campaign, CoreError> {
        self.campaign_repo
            .find_by_id(id)
            .await
            .or_not_found("Campaign", id)
    }

    // ===== 受診対象者 =====

    /// 受診対象者（未受診、または最終受診から 1 年超）を取得する
    pub async fn list_due_employees(&self) -> Result<Vec<Employee>, CoreError> {
        let today = self.clock.today();
        let employees = self.employee_repo.find_all().await?;

        Ok(employees
            .into_iter()
            .filter(|e| e.is_due_for_check(today))
            .collect())
    }

    // ===== 受診依頼 =====

    /// 従業員をキャンペーンに登録する
    ///
    /// 1 人でも存在しない従業員が含まれていれば、受診依頼を 1 件も作らずに
    /// `NotFound` を返す。同一従業員の重複登録は防がない。
    #[tracing::instrument(skip_all, fields(%campaign_id, count = employee_ids.len()))]
    pub async fn enroll_employees(
        &self,
        campaign_id: CampaignId,
        employee_ids: &[EmployeeId],
    ) -> Result<Vec<CheckRequest>, CoreError> {
        let campaign = self.get_campaign(campaign_id).await?;

        let mut new_requests = Vec::with_capacity(employee_ids.len());
        for &employee_id in employee_ids {
            let employee = self
                .employee_repo
                .find_by_id(employee_id)
                .await
                .or_not_found("Employee", employee_id)?;
            new_requests.push(NewCheckRequest::pending(campaign.id(), employee.id()));
        }

        let mut tx = self.tx_manager.begin().await?;
        let mut created = Vec::with_capacity(new_requests.len());
        for new_request in &new_requests {
            created.push(self.request_repo.insert(&mut tx, new_request).await?);
        }
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::HEALTH_CHECK,
            event.action = event::action::EMPLOYEES_ENROLLED,
            event.entity_type = event::entity_type::CAMPAIGN,
            event.entity_id = %campaign.id(),
            event.result = event::result::SUCCESS,
            enrolled = created.len(),
            "従業員をキャンペーンに登録"
        );

        Ok(created)
    }

    /// キャンペーンを HIS 連携済みにする
    ///
    /// `PENDING` の受診依頼を `SENT_TO_HIS` にし、キャンペーンを `SCHEDULED` にする。
    /// `PENDING` 以外の依頼は変更しない。依頼が 0 件でもキャンペーンは `SCHEDULED` になる。
    #[tracing::instrument(skip_all, fields(%campaign_id))]
    pub async fn mark_campaign_sent(&self, campaign_id: CampaignId) -> Result<Campaign, CoreError> {
        let campaign = self.get_campaign(campaign_id).await?;
        let requests = self.request_repo.find_by_campaign(campaign_id).await?;

        let mut tx = self.tx_manager.begin().await?;
        let mut sent = 0usize;
        for request in requests.iter().filter_map(CheckRequest::sent_to_his) {
            self.request_repo.update_status(&mut tx, &request).await?;
            sent += 1;
        }
        let scheduled = campaign.scheduled();
        self.campaign_repo.update_status(&mut tx, &scheduled).await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::HEALTH_CHECK,
            event.action = event::action::CAMPAIGN_SYNCED_TO_HIS,
            event.entity_type = event::entity_type::CAMPAIGN,
            event.entity_id = %campaign_id,
            event.result = event::result::SUCCESS,
            sent_requests = sent,
            "キャンペーンを HIS 連携済みに更新"
        );

        Ok(scheduled)
    }

    /// キャンペーンの受診依頼一覧を取得する
    pub async fn list_campaign_requests(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CheckRequest>, CoreError> {
        self.get_campaign(campaign_id).await?;
        Ok(self.request_repo.find_by_campaign(campaign_id).await?)
    }

    /// 指定ステータスの受診依頼を取得する
    pub async fn list_requests_by_status(
        &self,
        status: CheckRequestStatus,
    ) -> Result<Vec<CheckRequest>, CoreError> {
        Ok(self.request_repo.find_by_status(status).await?)
    }

    // ===== 受診結果 =====

    /// 受診結果を取り込む
    ///
    /// 受診日が最終受診日より新しい場合（または未受診の場合）のみ最終受診日を進める。
    /// 結果は受診日に関わらず常に 1 件追加する。
    #[tracing::instrument(skip_all, fields(employee_id = %input.employee_id))]
    pub async fn record_result(&self, input: RecordResultInput) -> Result<CheckResult, CoreError> {
        let employee = self
            .employee_repo
            .find_by_id(input.employee_id)
            .await
            .or_not_found("Employee", input.employee_id)?;

        let mut tx = self.tx_manager.begin().await?;
        if let Some(updated) = employee.with_check_recorded(input.check_date) {
            self.employee_repo
                .update_last_health_check_date(&mut tx, &updated)
                .await?;
        }
        let result = self
            .result_repo
            .insert(
                &mut tx,
                &NewCheckResult::unlinked(
                    employee.id(),
                    input.check_date,
                    input.health_status,
                    input.doctor_conclusion,
                ),
            )
            .await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::HEALTH_CHECK,
            event.action = event::action::RESULT_RECORDED,
            event.entity_type = event::entity_type::CHECK_RESULT,
            event.entity_id = %result.id(),
            event.result = event::result::SUCCESS,
            check_date = %result.check_date(),
            "受診結果を取り込み"
        );

        Ok(result)
    }

    /// 従業員の受診結果を新しい順に取得する
    pub async fn list_employee_results(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<CheckResult>, CoreError> {
        self.employee_repo
            .find_by_id(employee_id)
            .await
            .or_not_found("Employee", employee_id)?;
        Ok(self.result_repo.find_by_employee(employee_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use kenshin_domain::{
        campaign::CampaignStatus,
        clock::FixedClock,
        employee::EmployeeProfile,
    };
    use kenshin_infra::mock::{
        MockCampaignRepository,
        MockCheckRequestRepository,
        MockCheckResultRepository,
        MockEmployeeRepository,
        MockTransactionManager,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: i64, last: Option<NaiveDate>) -> Employee {
        Employee::from_db(
            EmployeeId::new(id),
            EmployeeProfile {
                first_name: format!("社員{id}"),
                last_name:  "Tran".to_string(),
                email:      None,
                department: None,
            },
            last,
        )
    }

    fn details(name: &str) -> CampaignDetails {
        CampaignDetails {
            name:        name.to_string(),
            start_date:  Some(date(2026, 3, 1)),
            end_date:    Some(date(2026, 3, 31)),
            description: None,
        }
    }

    struct Fixture {
        employees: MockEmployeeRepository,
        campaigns: MockCampaignRepository,
        requests:  MockCheckRequestRepository,
        results:   MockCheckResultRepository,
        sut:       HealthCheckUseCaseImpl,
    }

    fn fixture(today: NaiveDate) -> Fixture {
        let employees = MockEmployeeRepository::new();
        let campaigns = MockCampaignRepository::new();
        let requests = MockCheckRequestRepository::new();
        let results = MockCheckResultRepository::new();
        let sut = HealthCheckUseCaseImpl::new(
            Arc::new(employees.clone()),
            Arc::new(campaigns.clone()),
            Arc::new(requests.clone()),
            Arc::new(results.clone()),
            Arc::new(FixedClock::on(today)),
            Arc::new(MockTransactionManager),
        );
        Fixture {
            employees,
            campaigns,
            requests,
            results,
            sut,
        }
    }

    // ===== create_campaign =====

    #[tokio::test]
    async fn test_create_campaign_planningで作成される() {
        let f = fixture(date(2026, 1, 10));

        let campaign = f.sut.create_campaign(details("春季")).await.unwrap();

        assert_eq!(campaign.status(), CampaignStatus::Planning);
        assert_eq!(campaign.name(), "春季");
        assert_eq!(f.sut.list_campaigns().await.unwrap(), vec![campaign]);
    }

    #[tokio::test]
    async fn test_get_campaign_存在しない場合はnot_found() {
        let f = fixture(date(2026, 1, 10));

        let err = f.sut.get_campaign(CampaignId::new(9)).await.unwrap_err();

        assert!(matches!(err, CoreError::NotFound(msg) if msg.contains('9')));
    }

    // ===== list_due_employees =====

    #[tokio::test]
    async fn test_list_due_employees_未受診と1年超のみ返す() {
        let f = fixture(date(2026, 10, 18));
        f.employees.add_employee(employee(1, None));
        f.employees.add_employee(employee(2, Some(date(2025, 10, 18))));
        f.employees.add_employee(employee(3, Some(date(2025, 10, 17))));
        f.employees.add_employee(employee(4, Some(date(2026, 5, 1))));

        let due = f.sut.list_due_employees().await.unwrap();

        let ids: Vec<_> = due.iter().map(|e| e.id().as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    // ===== enroll_employees =====

    #[tokio::test]
    async fn test_enroll_employees_従業員ごとにpendingの依頼を作る() {
        let f = fixture(date(2026, 1, 10));
        f.employees.add_employee(employee(1, None));
        f.employees.add_employee(employee(2, None));
        let campaign = f.sut.create_campaign(details("春季")).await.unwrap();

        let created = f
            .sut
            .enroll_employees(campaign.id(), &[EmployeeId::new(1), EmployeeId::new(2)])
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert!(
            f.requests
                .all()
                .iter()
                .all(|r| r.status() == CheckRequestStatus::Pending
                    && r.campaign_id() == campaign.id())
        );
    }

    #[tokio::test]
    async fn test_enroll_employees_存在しない従業員が含まれると1件も作らない() {
        let f = fixture(date(2026, 1, 10));
        f.employees.add_employee(employee(1, None));
        let campaign = f.sut.create_campaign(details("春季")).await.unwrap();

        let err = f
            .sut
            .enroll_employees(campaign.id(), &[EmployeeId::new(1), EmployeeId::new(2)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound(msg) if msg == "Employee が見つかりません: 2"));
        assert!(f.requests.all().is_empty());
    }

    #[tokio::test]
    async fn test_enroll_employees_存在しないキャンペーンはnot_found() {
        let f = fixture(date(2026, 1, 10));
        f.employees.add_employee(employee(1, None));

        let err = f
            .sut
            .enroll_employees(CampaignId::new(5), &[EmployeeId::new(1)])
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound(msg) if msg == "Campaign が見つかりません: 5"));
        assert!(f.requests.all().is_empty());
    }

    #[tokio::test]
    async fn test_enroll_employees_重複登録を許容する() {
        let f = fixture(date(2026, 1, 10));
        f.employees.add_employee(employee(1, None));
        let campaign = f.sut.create_campaign(details("春季")).await.unwrap();

        f.sut
            .enroll_employees(campaign.id(), &[EmployeeId::new(1), EmployeeId::new(1)])
            .await
            .unwrap();

        assert_eq!(f.requests.all().len(), 2);
    }

    // ===== mark_campaign_sent =====

    #[tokio::test]
    async fn test_mark_campaign_sent_2回目は依頼を変えずscheduledを維持する() {
        let f = fixture(date(2026, 1, 10));
        f.employees.add_employee(employee(1, None));
        f.employees.add_employee(employee(2, None));
        let campaign = f.sut.create_campaign(details("春季")).await.unwrap();
        f.sut
            .enroll_employees(campaign.id(), &[EmployeeId::new(1), EmployeeId::new(2)])
            .await
            .unwrap();

        let first = f.sut.mark_campaign_sent(campaign.id()).await.unwrap();
        let after_first = f.requests.all();
        let second = f.sut.mark_campaign_sent(campaign.id()).await.unwrap();

        assert_eq!(first.status(), CampaignStatus::Scheduled);
        assert_eq!(second.status(), CampaignStatus::Scheduled);
        assert!(
            after_first
                .iter()
                .all(|r| r.status() == CheckRequestStatus::SentToHis)
        );
        assert_eq!(f.requests.all(), after_first);
        let stored = f.sut.get_campaign(campaign.id()).await.unwrap();
        assert_eq!(stored.status(), CampaignStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_mark_campaign_sent_他キャンペーンの依頼は変更しない() {
        let f = fixture(date(2026, 1, 10));
        f.employees.add_employee(employee(1, None));
        let target = f.sut.create_campaign(details("春季")).await.unwrap();
        let other = f.sut.create_campaign(details("秋季")).await.unwrap();
        f.sut
            .enroll_employees(other.id(), &[EmployeeId::new(1)])
            .await
            .unwrap();

        f.sut.mark_campaign_sent(target.id()).await.unwrap();

        let pending = f
            .sut
            .list_requests_by_status(CheckRequestStatus::Pending)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].campaign_id(), other.id());
        assert_eq!(
            f.sut.get_campaign(other.id()).await.unwrap().status(),
            CampaignStatus::Planning
        );
    }

    #[tokio::test]
    async fn test_mark_campaign_sent_依頼0件でもscheduledになる() {
        let f = fixture(date(2026, 1, 10));
        let campaign = f.sut.create_campaign(details("春季")).await.unwrap();

        let scheduled = f.sut.mark_campaign_sent(campaign.id()).await.unwrap();

        assert_eq!(scheduled.status(), CampaignStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_mark_campaign_sent_存在しないキャンペーンはnot_found() {
        let f = fixture(date(2026, 1, 10));

        let err = f
            .sut
            .mark_campaign_sent(CampaignId::new(3))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound(_)));
        assert!(f.campaigns.all().is_empty());
    }

    // ===== record_result =====

    fn input(employee_id: i64, check_date: NaiveDate, status: &str) -> RecordResultInput {
        RecordResultInput {
            employee_id:       EmployeeId::new(employee_id),
            check_date,
            health_status:     status.to_string(),
            doctor_conclusion: "Good".to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_result_最終受診日を進め古い結果では巻き戻さない() {
        let f = fixture(date(2026, 2, 10));
        f.employees.add_employee(employee(1, None));

        let first = f
            .sut
            .record_result(input(1, date(2026, 2, 6), "Type 1"))
            .await
            .unwrap();
        let second = f
            .sut
            .record_result(input(1, date(2025, 1, 1), "Type 2"))
            .await
            .unwrap();

        assert_eq!(first.request_id(), None);
        assert_eq!(first.health_status(), "Type 1");
        assert_eq!(second.check_date(), date(2025, 1, 1));
        assert_eq!(f.results.all().len(), 2);
        let stored = f.employees.all().remove(0);
        assert_eq!(stored.last_health_check_date(), Some(date(2026, 2, 6)));
    }

    #[tokio::test]
    async fn test_record_result_存在しない従業員はnot_foundで結果を作らない() {
        let f = fixture(date(2026, 2, 10));

        let err = f
            .sut
            .record_result(input(8, date(2026, 2, 6), "Type 1"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound(msg) if msg == "Employee が見つかりません: 8"));
        assert!(f.results.all().is_empty());
    }

    #[tokio::test]
    async fn test_list_employee_results_新しい順で返す() {
        let f = fixture(date(2026, 2, 10));
        f.employees.add_employee(employee(1, None));
        f.sut
            .record_result(input(1, date(2025, 1, 1), "Type 2"))
            .await
            .unwrap();
        f.sut
            .record_result(input(1, date(2026, 2, 6), "Type 1"))
            .await
            .unwrap();

        let results = f
            .sut
            .list_employee_results(EmployeeId::new(1))
            .await
            .unwrap();

        let dates: Vec<_> = results.iter().map(|r| r.check_date()).collect();
        assert_eq!(dates, vec![date(2026, 2, 6), date(2025, 1, 1)]);
    }

    #[tokio::test]
    async fn test_list_campaign_requests_存在しないキャンペーンはnot_found() {
        let f = fixture(date(2026, 2, 10));

        let err = f
            .sut
            .list_campaign_requests(CampaignId::new(1))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::NotFound(_)));
    }
}
