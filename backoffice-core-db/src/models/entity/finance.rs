use backoffice_core_api::domain::{AssetClass, EntityKind, PublicationStatus};
use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common_enums::FinanceFlow;
use crate::models::identifiable::Identifiable;
use crate::models::reviewable::{to_asset_ref, AssetOwner, AssetRef, Reviewable};

/// # Documentation
/// Database model for an income or expense record.
///
/// `proof` references the receipt image hosted in the external object store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceModel {
    pub id: Uuid,

    pub name: HeaplessString<255>,

    pub flow: FinanceFlow,

    pub category: HeaplessString<100>,

    pub amount: Decimal,

    pub transaction_date: NaiveDate,

    /// Work program this transaction is booked against
    pub work_program_id: Option<Uuid>,

    /// External object id (or legacy URL) of the proof image
    pub proof: Option<AssetRef>,

    pub status: PublicationStatus,

    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(PartialEq)]
struct FinanceSubstance<'a> {
    name: &'a str,
    flow: FinanceFlow,
    category: &'a str,
    amount: Decimal,
    transaction_date: NaiveDate,
    work_program_id: Option<Uuid>,
}

impl FinanceModel {
    fn substance(&self) -> FinanceSubstance<'_> {
        FinanceSubstance {
            name: &self.name,
            flow: self.flow,
            category: &self.category,
            amount: self.amount,
            transaction_date: self.transaction_date,
            work_program_id: self.work_program_id,
        }
    }
}

impl Identifiable for FinanceModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Reviewable for FinanceModel {
    const KIND: EntityKind = EntityKind::Finance;

    fn title(&self) -> &str {
        &self.name
    }

    fn status(&self) -> PublicationStatus {
        self.status
    }

    fn set_status(&mut self, status: PublicationStatus) {
        self.status = status;
    }

    fn owner_id(&self) -> Uuid {
        self.user_id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn differs_substantively(&self, other: &Self) -> bool {
        self.substance() != other.substance()
    }
}

impl AssetOwner for FinanceModel {
    const ASSET_CLASSES: &'static [AssetClass] = &[AssetClass::FinanceProof];

    fn asset_ref(&self, class: AssetClass) -> Option<&str> {
        match class {
            AssetClass::FinanceProof => self.proof.as_deref(),
            _ => None,
        }
    }

    fn set_asset_ref(&mut self, class: AssetClass, reference: Option<&str>) -> Result<(), String> {
        match class {
            AssetClass::FinanceProof => {
                self.proof = to_asset_ref(reference)?;
                Ok(())
            }
            other => Err(format!("Finance has no {} field", other.field_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> FinanceModel {
        let now = Utc::now();
        FinanceModel {
            id: Uuid::new_v4(),
            name: HeaplessString::try_from("Venue rental").unwrap(),
            flow: FinanceFlow::Expense,
            category: HeaplessString::try_from("Operations").unwrap(),
            amount: Decimal::from_str("150000.00").unwrap(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            work_program_id: None,
            proof: Some(HeaplessString::try_from("old123").unwrap()),
            status: PublicationStatus::Publish,
            user_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_timestamps_and_proof_are_not_substantive() {
        let original = sample();
        let mut edited = original.clone();
        edited.status = PublicationStatus::Draft;
        edited.updated_at = original.updated_at + chrono::Duration::days(1);
        edited.proof = Some(HeaplessString::try_from("new456").unwrap());

        assert!(!original.differs_substantively(&edited));
    }

    #[test]
    fn test_amount_change_is_substantive() {
        let original = sample();
        let mut edited = original.clone();
        edited.amount = Decimal::from_str("175000").unwrap();

        assert!(original.differs_substantively(&edited));
    }

    #[test]
    fn test_name_change_is_substantive() {
        let original = sample();
        let mut edited = original.clone();
        edited.name = HeaplessString::try_from("Venue rental (deposit)").unwrap();

        assert!(original.differs_substantively(&edited));
    }

    #[test]
    fn test_amount_scale_is_not_substantive() {
        let original = sample();
        let mut edited = original.clone();
        edited.amount = Decimal::from_str("150000").unwrap();

        assert!(!original.differs_substantively(&edited));
    }

    #[test]
    fn test_proof_reference_accessors() {
        let mut finance = sample();
        assert_eq!(finance.asset_ref(AssetClass::FinanceProof), Some("old123"));

        finance.set_asset_ref(AssetClass::FinanceProof, None).unwrap();
        assert_eq!(finance.proof, None);
        assert!(finance.set_asset_ref(AssetClass::EventThumbnail, Some("x")).is_err());
    }
}
