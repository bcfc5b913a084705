use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::members::domain::model::{LoanEntity, MemberEntity};
use crate::utils::date::serializer;

// LoanDto abstracts the book that is borrowed by a member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanDto {
    pub member_id: String,
    pub book_id: String,
    pub title: String,
    #[serde(with = "serializer")]
    pub borrowed_on: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_on: NaiveDateTime,
}

impl LoanDto {
    pub fn from_member_loan(member_id: &str, loan: &LoanEntity) -> Self {
        Self {
            member_id: member_id.to_string(),
            book_id: loan.book_id.to_string(),
            title: loan.title.to_string(),
            borrowed_on: loan.borrowed_on,
            due_on: loan.due_on,
        }
    }
}

// MemberDto abstracts library member.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MemberDto {
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub loans: Vec<LoanDto>,
    #[serde(with = "serializer")]
    pub joined_on: NaiveDateTime,
}

impl Identifiable for MemberDto {
    fn id(&self) -> String {
        self.member_id.to_string()
    }
}

impl From<&MemberEntity> for MemberDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            member_id: other.member_id.to_string(),
            name: other.name.to_string(),
            email: other.email.to_string(),
            loans: other.loans.iter()
                .map(|l| LoanDto::from_member_loan(other.member_id.as_str(), l)).collect(),
            joined_on: other.joined_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crate::books::domain::model::BookEntity;
    use crate::members::domain::model::{LoanEntity, MemberEntity};
    use crate::members::dto::MemberDto;

    #[tokio::test]
    async fn test_should_build_member() {
        let now = Utc::now().naive_utc();
        let book = BookEntity::new("B0001", "Dune", "Herbert", 1, now);
        let mut member = MemberEntity::new("M0001", "Alice", "a@x.com", now);
        member.loans.push(LoanEntity::for_book(&book, now, 14).expect("should build loan"));

        let dto = MemberDto::from(&member);
        assert_eq!("a@x.com", dto.email.as_str());
        assert_eq!(1, dto.loans.len());
        assert_eq!("M0001", dto.loans[0].member_id.as_str());
        assert_eq!("Dune", dto.loans[0].title.as_str());
    }
}
