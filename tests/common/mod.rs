#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use randombox_backend::entities::prize_entity;
use randombox_backend::error::{AppError, AppResult};
use randombox_backend::external::{FulfillmentProvider, FulfillmentReceipt, FulfillmentRequest};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Fresh in-memory store with the schema and the seeded catalog.
///
/// One connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect sqlite memory db");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub struct PrizeSeed {
    pub name: &'static str,
    pub stock: i64,
    pub weight: i32,
    pub goods_code: &'static str,
}

pub fn prize(name: &'static str, stock: i64, weight: i32) -> PrizeSeed {
    PrizeSeed {
        name,
        stock,
        weight,
        goods_code: "G-TEST",
    }
}

/// Replace the seeded catalog with `seeds`, returning the stored rows in order.
pub async fn seed_catalog(db: &DatabaseConnection, seeds: &[PrizeSeed]) -> Vec<prize_entity::Model> {
    prize_entity::Entity::delete_many()
        .exec(db)
        .await
        .expect("clear prizes");

    let mut rows = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let now = Utc::now();
        let row = prize_entity::ActiveModel {
            name: Set(seed.name.to_string()),
            image_url: Set(format!("/images/{}.png", seed.name)),
            stock: Set(seed.stock),
            weight: Set(seed.weight),
            fulfillment_goods_code: Set(seed.goods_code.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("insert prize");
        rows.push(row);
    }
    rows
}

pub async fn prize_stock(db: &DatabaseConnection, id: i64) -> i64 {
    prize_entity::Entity::find_by_id(id)
        .one(db)
        .await
        .expect("load prize")
        .expect("prize exists")
        .stock
}

/// Fulfillment fake that records every call.
#[derive(Default)]
pub struct RecordingProvider {
    calls: AtomicUsize,
    fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
    requests: Mutex<Vec<FulfillmentRequest>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let provider = Self::default();
        provider.set_failing(true);
        provider
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<FulfillmentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FulfillmentProvider for RecordingProvider {
    async fn send(&self, request: &FulfillmentRequest) -> AppResult<FulfillmentReceipt> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requests.lock().unwrap().push(request.clone());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::ExternalApiError("[E999] vendor unavailable".into()));
        }
        Ok(FulfillmentReceipt {
            transaction_id: format!("ORDER-{n}"),
        })
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}
