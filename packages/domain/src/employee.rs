//! # 従業員
//!
//! 人事システムが管理する従業員のうち、健康診断管理が参照する部分。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Employee`] | 従業員 | 最終受診日を持つ。キャンペーン登録と結果取り込みで参照される |
//! | 受診対象者 | Due employee | 最終受診日が未設定、または 1 年より前の従業員 |
//!
//! ## 不変条件
//!
//! - 最終受診日は前にしか進まない（古い日付の結果で巻き戻さない）

use chrono::{Months, NaiveDate};

define_serial_id! {
    /// 従業員 ID
    pub struct EmployeeId;
}

/// 受診期限の基準日を求める
///
/// `today` のちょうど 1 年前（暦年）。2/29 の 1 年前は 2/28 に丸める。
pub fn due_cutoff(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN)
}

/// 従業員の人事情報（健康診断管理では参照のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name:  String,
    pub email:      Option<String>,
    pub department: Option<String>,
}

/// 従業員エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id:                     EmployeeId,
    profile:                EmployeeProfile,
    last_health_check_date: Option<NaiveDate>,
}

impl Employee {
    /// 既存のデータから従業員を復元する
    pub fn from_db(
        id: EmployeeId,
        profile: EmployeeProfile,
        last_health_check_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            profile,
            last_health_check_date,
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn profile(&self) -> &EmployeeProfile {
        &self.profile
    }

    pub fn last_health_check_date(&self) -> Option<NaiveDate> {
        self.last_health_check_date
    }

    /// 受診対象者か判定する
    ///
    /// 未受診、または最終受診日が基準日より厳密に前なら対象。
    /// ちょうど 1 年前に受診した従業員は対象外。
    pub fn is_due_for_check(&self, today: NaiveDate) -> bool {
        match self.last_health_check_date {
            None => true,
            Some(last) => last < due_cutoff(today),
        }
    }

    /// 受診日を反映した従業員を返す
    ///
    /// 最終受診日が未設定か、`check_date` がそれより後の場合のみ `Some`。
    /// 同日・過去日の結果では最終受診日を動かさない。
    pub fn with_check_recorded(&self, check_date: NaiveDate) -> Option<Self> {
        let advances = match self.last_health_check_date {
            None => true,
            Some(last) => check_date > last,
        };
        advances.then(|| Self {
            last_health_check_date: Some(check_date),
            ..self.clone()
        })
    }
}
