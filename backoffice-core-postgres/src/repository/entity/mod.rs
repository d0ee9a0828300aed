pub mod document_repository;
pub mod event_repository;
pub mod finance_repository;
pub mod letter_repository;
pub mod management_repository;
pub mod work_program_repository;
#[cfg(test)]
pub mod test_utils;

pub use document_repository::DocumentRepositoryImpl;
pub use event_repository::EventRepositoryImpl;
pub use finance_repository::FinanceRepositoryImpl;
pub use letter_repository::LetterRepositoryImpl;
pub use management_repository::ManagementRepositoryImpl;
pub use work_program_repository::WorkProgramRepositoryImpl;
