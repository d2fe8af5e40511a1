//! Shared fakes for probe and scheduler tests.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use conntester::observability::metrics::{MetricsError, MetricsSink};
use conntester::observability::tags::TagSet;
use conntester::probe::{Connection, Connector, DbError};

/// Scripted outcome of a fake database step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Ok,
    Fail,
    /// Never completes; only the deadline ends it.
    Hang,
}

/// Connector whose handles follow a script.
#[derive(Debug, Clone)]
pub struct FakeConnector {
    pub open_ok: bool,
    pub ping: Step,
    pub query: Step,
    pub ping_delay: Duration,
    pub opened: Arc<AtomicUsize>,
    pub dropped: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn healthy() -> Self {
        Self {
            open_ok: true,
            ping: Step::Ok,
            query: Step::Ok,
            ping_delay: Duration::ZERO,
            opened: Arc::new(AtomicUsize::new(0)),
            dropped: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl Connector for FakeConnector {
    type Conn = FakeConnection;

    fn open(&self, _uri: &str) -> Result<FakeConnection, DbError> {
        if !self.open_ok {
            return Err(DbError::InvalidUri("scripted failure".into()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeConnection {
            ping: self.ping,
            query: self.query,
            ping_delay: self.ping_delay,
            dropped: self.dropped.clone(),
        })
    }
}

pub struct FakeConnection {
    ping: Step,
    query: Step,
    ping_delay: Duration,
    dropped: Arc<AtomicUsize>,
}

async fn perform(step: Step, error: DbError) -> Result<(), DbError> {
    match step {
        Step::Ok => Ok(()),
        Step::Fail => Err(error),
        Step::Hang => std::future::pending().await,
    }
}

#[async_trait]
impl Connection for FakeConnection {
    async fn ping(&mut self) -> Result<(), DbError> {
        if !self.ping_delay.is_zero() {
            tokio::time::sleep(self.ping_delay).await;
        }
        perform(self.ping, DbError::Connect("scripted refusal".into())).await
    }

    async fn test_query(&mut self) -> Result<(), DbError> {
        perform(self.query, DbError::Query("scripted syntax error".into())).await
    }
}

impl Drop for FakeConnection {
    fn drop(&mut self) {
        self.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Counter,
    Distribution,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub kind: Kind,
    pub name: String,
    pub value: f64,
    pub tags: Vec<String>,
}

/// Sink that records every emission, optionally failing each one after
/// recording it.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub emissions: Mutex<Vec<Emission>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            emissions: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().unwrap().clone()
    }

    pub fn named(&self, name: &str) -> Vec<Emission> {
        self.emissions()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    fn record(&self, kind: Kind, name: &str, value: f64, tags: &TagSet) -> Result<(), MetricsError> {
        self.emissions.lock().unwrap().push(Emission {
            kind,
            name: name.to_string(),
            value,
            tags: tags.as_slice().to_vec(),
        });

        if self.fail {
            return Err(MetricsError::Send {
                metric: name.to_string(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "collector down").into(),
            });
        }
        Ok(())
    }
}

impl MetricsSink for RecordingSink {
    fn incr(&self, name: &str, tags: &TagSet) -> Result<(), MetricsError> {
        self.record(Kind::Counter, name, 1.0, tags)
    }

    fn distribution(&self, name: &str, value: f64, tags: &TagSet) -> Result<(), MetricsError> {
        self.record(Kind::Distribution, name, value, tags)
    }
}
