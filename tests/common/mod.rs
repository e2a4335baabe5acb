#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, Response};
use clinic_chat_relay::config::Config;
use clinic_chat_relay::routes::create_router;
use clinic_chat_relay::services::provider::{CompletionProvider, ProviderError};
use clinic_chat_relay::services::usage::{
    AdvisoryUsage, Reservation, StorageError, UsageCheck, UsageStore,
};
use clinic_chat_relay::state::AppState;
use serde_json::Value;

#[derive(Clone, Copy, Debug)]
pub enum Behavior {
    Reply,
    Quota,
    Busy,
    Broken,
    Panic,
}

pub struct FakeProvider {
    pub behavior: Behavior,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(system.contains("おく内科消化器クリニック"));
        match self.behavior {
            Behavior::Reply => Ok(format!("ご質問ありがとうございます: {user}")),
            Behavior::Quota => Err(ProviderError::InsufficientQuota("quota exceeded".into())),
            Behavior::Busy => Err(ProviderError::RateLimited("slow down".into())),
            Behavior::Broken => Err(ProviderError::Api {
                status: 500,
                message: "upstream stack trace".into(),
            }),
            Behavior::Panic => panic!("provider exploded"),
        }
    }
}

/// Storage double holding today's count in memory.
pub struct FakeStorage {
    pub count: AtomicU64,
    pub limit: u64,
    pub reachable: bool,
    pub fail_record: bool,
    pub recorded: AtomicU64,
}

impl FakeStorage {
    fn build(today: u64, limit: u64, reachable: bool, fail_record: bool) -> Arc<Self> {
        Arc::new(Self {
            count: AtomicU64::new(today),
            limit,
            reachable,
            fail_record,
            recorded: AtomicU64::new(0),
        })
    }

    pub fn new(today: u64, limit: u64) -> Arc<Self> {
        Self::build(today, limit, true, false)
    }

    pub fn unreachable(limit: u64) -> Arc<Self> {
        Self::build(0, limit, false, true)
    }

    pub fn failing_writes(limit: u64) -> Arc<Self> {
        Self::build(0, limit, true, true)
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    fn down() -> StorageError {
        StorageError::Sql(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl UsageStore for FakeStorage {
    async fn check(&self) -> Result<UsageCheck, StorageError> {
        if !self.reachable {
            return Err(Self::down());
        }
        Ok(UsageCheck::new(self.count(), self.limit))
    }

    async fn reserve(&self) -> Result<Reservation, StorageError> {
        if !self.reachable {
            return Err(Self::down());
        }
        let claimed = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.limit).then_some(n + 1)
            })
            .is_ok();
        Ok(if claimed {
            Reservation::Granted
        } else {
            Reservation::Exhausted { limit: self.limit }
        })
    }

    async fn release(&self) -> Result<(), StorageError> {
        if !self.reachable {
            return Err(Self::down());
        }
        let _ = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        Ok(())
    }

    async fn record(&self) -> Result<(), StorageError> {
        if self.fail_record {
            return Err(Self::down());
        }
        self.recorded.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        if self.reachable {
            Ok(())
        } else {
            Err(Self::down())
        }
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub fn test_config() -> Config {
    Config {
        static_dir: "tests/no-static-site".to_string(),
        ..Config::default()
    }
}

pub fn app_with_config(
    config: Config,
    provider: Arc<FakeProvider>,
    usage: Arc<dyn UsageStore>,
) -> Router {
    create_router(Arc::new(AppState::new(config, provider, usage)))
}

pub fn app_with(provider: Arc<FakeProvider>, usage: Arc<dyn UsageStore>) -> Router {
    app_with_config(test_config(), provider, usage)
}

pub fn app(provider: Arc<FakeProvider>) -> Router {
    app_with(provider, Arc::new(AdvisoryUsage::new(1000)))
}

pub fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Chat request as it arrives from `peer`, optionally carrying `X-Forwarded-For`.
pub fn chat_request_from(peer: &str, forwarded_for: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json");
    if let Some(value) = forwarded_for {
        builder = builder.header("x-forwarded-for", value);
    }
    let mut req = builder
        .body(Body::from(r#"{"message":"こんにちは"}"#))
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
    req
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
