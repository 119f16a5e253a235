//! PostgreSQL implementation of CallRepository

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use haggle::{
    BestDeal, CallCompletion, CallRecord, CallRepository, CallStatus, DomainError, NewCallRecord,
};

/// Bound for writes, point lookups and the best-deal aggregate
const WRITE_TIMEOUT: Duration = Duration::from_secs(5);
/// Bound for unpaginated listings
const LIST_TIMEOUT: Duration = Duration::from_secs(10);

const SELECT_CALLS: &str = r#"
    SELECT id, user_id, call_id, model, year, zipcode, dealer_name, phone_number,
           msrp, listing_price, status, is_available, deal_price, remarks,
           created_at, updated_at
    FROM calls
"#;

/// PostgreSQL implementation of CallRepository
pub struct PgCallRepository {
    pool: PgPool,
}

impl PgCallRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct CallRow {
    id: i64,
    user_id: String,
    call_id: String,
    model: String,
    year: i32,
    zipcode: String,
    dealer_name: String,
    phone_number: String,
    msrp: i64,
    listing_price: i64,
    status: String,
    is_available: Option<bool>,
    deal_price: Option<i64>,
    remarks: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<CallRow> for CallRecord {
    type Error = DomainError;

    fn try_from(row: CallRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<CallStatus>().map_err(DomainError::Repository)?;
        Ok(Self {
            id: row.id,
            call_id: row.call_id,
            user_id: row.user_id,
            model: row.model,
            year: row.year,
            zipcode: row.zipcode,
            dealer_name: row.dealer_name,
            phone_number: row.phone_number,
            msrp: row.msrp,
            listing_price: row.listing_price,
            status,
            is_available: row.is_available,
            deal_price: row.deal_price,
            remarks: row.remarks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Run a query under a deadline, folding both failure kinds into DomainError
async fn bounded<T, F>(operation: &str, after: Duration, query: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(after, query).await {
        Ok(result) => result.map_err(|e| DomainError::Repository(e.to_string())),
        Err(_) => Err(DomainError::timeout(operation, after)),
    }
}

#[async_trait]
impl CallRepository for PgCallRepository {
    async fn create(&self, record: &NewCallRecord) -> Result<(), DomainError> {
        let query = sqlx::query(
            r#"
            INSERT INTO calls (user_id, call_id, model, year, zipcode, dealer_name,
                               phone_number, msrp, listing_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'pending')
            "#,
        )
        .bind(&record.user_id)
        .bind(&record.call_id)
        .bind(&record.model)
        .bind(record.year)
        .bind(&record.zipcode)
        .bind(&record.dealer_name)
        .bind(&record.phone_number)
        .bind(record.msrp)
        .bind(record.listing_price)
        .execute(&self.pool);

        bounded("create call", WRITE_TIMEOUT, query).await?;
        Ok(())
    }

    async fn complete_by_call_id(&self, completion: &CallCompletion) -> Result<(), DomainError> {
        let status = CallStatus::from_availability(completion.is_available);

        let query = sqlx::query(
            r#"
            UPDATE calls
            SET is_available = $2, deal_price = $3, remarks = $4, status = $5, updated_at = NOW()
            WHERE call_id = $1
            "#,
        )
        .bind(&completion.call_id)
        .bind(completion.is_available)
        .bind(completion.deal_price)
        .bind(&completion.remarks)
        .bind(status.as_str())
        .execute(&self.pool);

        let result = bounded("complete call", WRITE_TIMEOUT, query).await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Call", &completion.call_id));
        }
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<CallRecord, DomainError> {
        let sql = format!("{SELECT_CALLS} WHERE user_id = $1 ORDER BY id LIMIT 1");
        let query = sqlx::query_as::<_, CallRow>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool);

        bounded("find call by user", WRITE_TIMEOUT, query)
            .await?
            .ok_or_else(|| DomainError::not_found("Call for user", user_id))?
            .try_into()
    }

    async fn list_all(&self, status: Option<CallStatus>) -> Result<Vec<CallRecord>, DomainError> {
        let sql = format!(
            "{SELECT_CALLS} WHERE ($1::text IS NULL OR status = $1) ORDER BY created_at DESC, id DESC"
        );
        let query = sqlx::query_as::<_, CallRow>(&sql)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(&self.pool);

        bounded("list calls", LIST_TIMEOUT, query)
            .await?
            .into_iter()
            .map(CallRecord::try_from)
            .collect()
    }

    async fn best_deal(
        &self,
        model: &str,
        year: i32,
        zipcode: &str,
    ) -> Result<BestDeal, DomainError> {
        let query = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT MIN(deal_price) FROM calls
            WHERE model = $1 AND year = $2 AND zipcode = $3
              AND status = 'completed' AND is_available = TRUE AND deal_price > 0
            "#,
        )
        .bind(model)
        .bind(year)
        .bind(zipcode)
        .fetch_one(&self.pool);

        let price = bounded("best deal lookup", WRITE_TIMEOUT, query).await?;
        Ok(BestDeal::from(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> CallRow {
        CallRow {
            id: 7,
            user_id: "u1".to_string(),
            call_id: "c1".to_string(),
            model: "Camry".to_string(),
            year: 2024,
            zipcode: "75007".to_string(),
            dealer_name: "X Toyota".to_string(),
            phone_number: "555-1234".to_string(),
            msrp: 30000,
            listing_price: 28000,
            status: status.to_string(),
            is_available: Some(true),
            deal_price: Some(27000),
            remarks: Some("ok".to_string()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_row_maps_to_record() {
        let record = CallRecord::try_from(row("completed")).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.status, CallStatus::Completed);
        assert!(record.is_confirmed_deal());
    }

    #[test]
    fn test_unknown_status_is_repository_error() {
        let err = CallRecord::try_from(row("ringing")).unwrap_err();
        assert!(matches!(err, DomainError::Repository(_)));
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, sqlx::Error>(())
        };
        let err = bounded("slow op", Duration::from_millis(10), slow).await.unwrap_err();
        assert!(matches!(err, DomainError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_bounded_maps_sqlx_error() {
        let failing = async { Err::<(), _>(sqlx::Error::RowNotFound) };
        let err = bounded("failing op", WRITE_TIMEOUT, failing).await.unwrap_err();
        assert!(matches!(err, DomainError::Repository(_)));
    }

    fn new_call(call_id: &str, user_id: &str, zipcode: &str) -> NewCallRecord {
        NewCallRecord {
            user_id: user_id.to_string(),
            call_id: call_id.to_string(),
            model: "Camry".to_string(),
            year: 2024,
            zipcode: zipcode.to_string(),
            dealer_name: "X Toyota".to_string(),
            phone_number: "555-1234".to_string(),
            msrp: 30000,
            listing_price: 28000,
        }
    }

    fn completion(call_id: &str, is_available: bool, deal_price: i64) -> CallCompletion {
        CallCompletion {
            call_id: call_id.to_string(),
            is_available,
            deal_price,
            remarks: "ok".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_pg_best_deal_counts_only_confirmed_deals(pool: PgPool) {
        let repo = PgCallRepository::new(pool);
        for (call_id, zip) in [("c1", "75007"), ("c2", "75007"), ("c3", "75007"), ("c4", "75007"), ("c5", "75008")] {
            repo.create(&new_call(call_id, "u1", zip)).await.unwrap();
        }

        assert_eq!(repo.best_deal("Camry", 2024, "75007").await.unwrap(), BestDeal::none());

        repo.complete_by_call_id(&completion("c1", true, 21000)).await.unwrap();
        repo.complete_by_call_id(&completion("c2", true, 19500)).await.unwrap();
        repo.complete_by_call_id(&completion("c3", false, 15000)).await.unwrap();
        repo.complete_by_call_id(&completion("c4", true, 0)).await.unwrap();
        repo.complete_by_call_id(&completion("c5", true, 12000)).await.unwrap();

        assert_eq!(repo.best_deal("Camry", 2024, "75007").await.unwrap(), BestDeal::at(19500));
        assert_eq!(repo.best_deal("Camry", 2023, "75007").await.unwrap(), BestDeal::none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_pg_find_by_user_id_returns_oldest(pool: PgPool) {
        let repo = PgCallRepository::new(pool);
        repo.create(&new_call("first", "u1", "75007")).await.unwrap();
        repo.create(&new_call("second", "u1", "75007")).await.unwrap();

        let record = repo.find_by_user_id("u1").await.unwrap();
        assert_eq!(record.call_id, "first");
        assert_eq!(record.status, CallStatus::Pending);

        assert!(repo.find_by_user_id("nobody").await.unwrap_err().is_not_found());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_pg_list_all_filters_by_status(pool: PgPool) {
        let repo = PgCallRepository::new(pool);
        repo.create(&new_call("c1", "u1", "75007")).await.unwrap();
        repo.create(&new_call("c2", "u2", "75007")).await.unwrap();
        repo.complete_by_call_id(&completion("c1", true, 27000)).await.unwrap();

        let all = repo.list_all(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let completed = repo.list_all(Some(CallStatus::Completed)).await.unwrap();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].call_id, "c1");
        assert_eq!(completed[0].deal_price, Some(27000));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_pg_complete_unknown_call_is_not_found(pool: PgPool) {
        let repo = PgCallRepository::new(pool);

        let err = repo
            .complete_by_call_id(&completion("missing", true, 1))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires a Postgres DATABASE_URL"]
    async fn test_pg_duplicate_call_id_is_repository_error(pool: PgPool) {
        let repo = PgCallRepository::new(pool);
        repo.create(&new_call("c1", "u1", "75007")).await.unwrap();

        let err = repo.create(&new_call("c1", "u2", "75007")).await.unwrap_err();
        assert!(matches!(err, DomainError::Repository(_)));
    }
}
