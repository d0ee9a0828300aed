use backoffice_core_api::domain::PublicationStatus;
use backoffice_core_db::models::entity::{
    DocumentCategory, DocumentModel, EventModel, FinanceFlow, FinanceModel, LetterDirection,
    LetterModel, ManagementModel, WorkProgramModel,
};
use chrono::{DateTime, Duration, NaiveDate, SubsecRound, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Current time at the precision PostgreSQL stores
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn create_test_work_program() -> WorkProgramModel {
    let now = now();
    WorkProgramModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from("Community outreach").unwrap(),
        description: Some("Quarterly visits to partner schools".to_string()),
        person_in_charge: None,
        start_date: date(2025, 1, 1),
        end_date: date(2025, 3, 31),
        budget: Decimal::new(5_000_000_00, 2),
        status: PublicationStatus::Draft,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn create_test_event() -> EventModel {
    let now = now();
    EventModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from("General assembly").unwrap(),
        description: None,
        category: HeaplessString::try_from("Meeting").unwrap(),
        starts_at: now + Duration::days(7),
        ends_at: Some(now + Duration::days(7) + Duration::hours(3)),
        location: None,
        work_program_id: None,
        thumbnail: None,
        status: PublicationStatus::Draft,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn create_test_finance() -> FinanceModel {
    let now = now();
    FinanceModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from("Venue rental").unwrap(),
        flow: FinanceFlow::Expense,
        category: HeaplessString::try_from("Operations").unwrap(),
        amount: Decimal::new(150_000_00, 2),
        transaction_date: date(2025, 2, 14),
        work_program_id: None,
        proof: Some(HeaplessString::try_from("1OldProofObject").unwrap()),
        status: PublicationStatus::Draft,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn create_test_document() -> DocumentModel {
    let now = now();
    DocumentModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from("Bylaws").unwrap(),
        category: DocumentCategory::General,
        content: Some("Article 1".to_string()),
        work_program_id: None,
        status: PublicationStatus::Draft,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn create_test_letter() -> LetterModel {
    let now = now();
    LetterModel {
        id: Uuid::new_v4(),
        number: HeaplessString::try_from("001/SEC/II/2025").unwrap(),
        subject: HeaplessString::try_from("Invitation").unwrap(),
        recipient: HeaplessString::try_from("Partner office").unwrap(),
        direction: LetterDirection::Outgoing,
        letter_date: date(2025, 2, 3),
        content: None,
        status: PublicationStatus::Draft,
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}

pub fn create_test_management() -> ManagementModel {
    let now = now();
    ManagementModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from("Board 2025").unwrap(),
        period_start: date(2025, 1, 1),
        period_end: date(2025, 12, 31),
        decree: None,
        structure: Some(HeaplessString::try_from("1StructureObject").unwrap()),
        user_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}
