use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::enums::PaymentStatus;
use crate::models::payment::Payment;
use crate::utils::errors::AppError;

/// Operaciones de persistencia sobre pagos
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn get_by_id(&self, id: i32) -> Result<Option<Payment>, AppError>;
    async fn add(&self, payment: &Payment) -> Result<Payment, AppError>;
    async fn update_status(&self, id: i32, status: PaymentStatus) -> Result<(), AppError>;
}

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(payment)
    }

    async fn add(&self, payment: &Payment) -> Result<Payment, AppError> {
        let stored = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (date, payment_method, payment_status, amount, details)
            VALUES (NOW(), $1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(payment.payment_method)
        .bind(payment.payment_status)
        .bind(payment.amount)
        .bind(&payment.details)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update_status(&self, id: i32, status: PaymentStatus) -> Result<(), AppError> {
        sqlx::query("UPDATE payments SET payment_status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
