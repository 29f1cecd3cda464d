// crates/deploy-canary-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Helpers
// Description: Recording fakes for the hook's outbound clients.
// Purpose: Script target behavior and capture reporting calls.
// Dependencies: deploy-canary-core
// ============================================================================

//! ## Overview
//! Shared fakes for hook integration tests. Each fake records every call it
//! receives and replays a scripted result.

use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use deploy_canary_core::AlertPublisher;
use deploy_canary_core::ClientError;
use deploy_canary_core::EXPECTED_RESPONSE;
use deploy_canary_core::FunctionInvoker;
use deploy_canary_core::HookClients;
use deploy_canary_core::HookLogger;
use deploy_canary_core::HookSettings;
use deploy_canary_core::InvokeResponse;
use deploy_canary_core::LifecycleAck;
use deploy_canary_core::LifecycleReporter;
use deploy_canary_core::LifecycleStatus;
use deploy_canary_core::LogLevel;
use deploy_canary_core::LogRecord;
use deploy_canary_core::LogSink;
use deploy_canary_core::PublishAck;
use deploy_canary_core::ValidationHook;

/// Target identifier used by the fixtures.
pub const TARGET: &str = "connect4-trainer:live";
/// Alert channel used by the fixtures.
pub const TOPIC: &str = "arn:aws:sns:ap-southeast-2:123456789012:connect4-alerts";

// ============================================================================
// SECTION: Scripted Results
// ============================================================================

/// Scripted behavior for the fake invoker.
#[derive(Clone)]
pub enum InvokeScript {
    /// Return this response.
    Respond(InvokeResponse),
    /// Fail the call with this backend message.
    Fail(String),
}

impl InvokeScript {
    /// Target answers with the expected payload.
    pub fn correct() -> Self {
        Self::Respond(InvokeResponse::new(200, EXPECTED_RESPONSE))
    }

    /// Target answers 200 with `payload`.
    pub fn payload(payload: &str) -> Self {
        Self::Respond(InvokeResponse::new(200, payload))
    }

    /// Target answers with a non-200 status and an error marker.
    pub fn status(status_code: i32) -> Self {
        Self::Respond(InvokeResponse {
            status_code,
            payload: None,
            function_error: Some("Unhandled".to_string()),
        })
    }
}

/// Scripted behavior for the fake reporter and publisher.
#[derive(Clone)]
pub enum AckScript {
    /// Acknowledge with an identifier.
    Ack,
    /// Return an acknowledgment without an identifier.
    Empty,
    /// Fail the call with this backend message.
    Fail(String),
}

// ============================================================================
// SECTION: Fakes
// ============================================================================

/// Fake invoker recording targets and payloads.
pub struct FakeInvoker {
    /// Scripted result.
    script: InvokeScript,
    /// Recorded (target, payload) pairs.
    pub calls: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FakeInvoker {
    /// Creates an invoker replaying `script`.
    pub fn new(script: InvokeScript) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl FunctionInvoker for FakeInvoker {
    fn invoke(&self, target: &str, payload: &[u8]) -> Result<InvokeResponse, ClientError> {
        self.calls.lock().unwrap().push((target.to_string(), payload.to_vec()));
        match &self.script {
            InvokeScript::Respond(response) => Ok(response.clone()),
            InvokeScript::Fail(message) => Err(ClientError::Backend(message.clone())),
        }
    }
}

/// Fake orchestrator recording lifecycle reports.
pub struct FakeReporter {
    /// Scripted acknowledgment.
    script: AckScript,
    /// Recorded (deployment, execution, status) triples.
    pub calls: Mutex<Vec<(String, String, LifecycleStatus)>>,
}

impl FakeReporter {
    /// Creates a reporter replaying `script`.
    pub fn new(script: AckScript) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns recorded calls.
    pub fn recorded(&self) -> Vec<(String, String, LifecycleStatus)> {
        self.calls.lock().unwrap().clone()
    }
}

impl LifecycleReporter for FakeReporter {
    fn report(
        &self,
        deployment_id: &str,
        execution_id: &str,
        status: LifecycleStatus,
    ) -> Result<LifecycleAck, ClientError> {
        self.calls.lock().unwrap().push((
            deployment_id.to_string(),
            execution_id.to_string(),
            status,
        ));
        match &self.script {
            AckScript::Ack => Ok(LifecycleAck {
                execution_id: Some(execution_id.to_string()),
            }),
            AckScript::Empty => Ok(LifecycleAck::default()),
            AckScript::Fail(message) => Err(ClientError::Backend(message.clone())),
        }
    }
}

/// Fake alert channel recording publishes.
pub struct FakePublisher {
    /// Scripted acknowledgment.
    script: AckScript,
    /// Recorded (channel, subject, message) triples.
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl FakePublisher {
    /// Creates a publisher replaying `script`.
    pub fn new(script: AckScript) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns recorded calls.
    pub fn recorded(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl AlertPublisher for FakePublisher {
    fn publish(
        &self,
        channel: &str,
        subject: &str,
        message: &str,
    ) -> Result<PublishAck, ClientError> {
        self.calls.lock().unwrap().push((
            channel.to_string(),
            subject.to_string(),
            message.to_string(),
        ));
        match &self.script {
            AckScript::Ack => Ok(PublishAck {
                message_id: Some("msg-1".to_string()),
            }),
            AckScript::Empty => Ok(PublishAck::default()),
            AckScript::Fail(message) => Err(ClientError::Backend(message.clone())),
        }
    }
}

/// Log sink capturing records in memory.
#[derive(Default)]
pub struct MemoryLogSink {
    /// Captured records.
    pub records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogSink {
    /// Returns the event labels in emission order.
    pub fn events(&self) -> Vec<&'static str> {
        self.records.lock().unwrap().iter().map(|record| record.event).collect()
    }
}

impl LogSink for MemoryLogSink {
    fn record(&self, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// Clonable in-memory writer for JSON-line sink tests.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    /// Shared byte buffer.
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Returns the buffer contents as text.
    pub fn text(&self) -> String {
        String::from_utf8(self.inner.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Hook wired to fakes, with handles for assertions.
pub struct Harness {
    /// Hook under test.
    pub hook: ValidationHook,
    /// Fake invoker.
    pub invoker: Arc<FakeInvoker>,
    /// Fake orchestrator.
    pub reporter: Arc<FakeReporter>,
    /// Fake alert channel.
    pub publisher: Arc<FakePublisher>,
    /// Captured logs.
    pub logs: Arc<MemoryLogSink>,
}

impl Harness {
    /// Builds a harness with acknowledging backends and a configured topic.
    pub fn new(invoke: InvokeScript) -> Self {
        Self::with(invoke, AckScript::Ack, AckScript::Ack, Some(TOPIC))
    }

    /// Builds a harness with explicit scripts.
    pub fn with(
        invoke: InvokeScript,
        report: AckScript,
        publish: AckScript,
        topic: Option<&str>,
    ) -> Self {
        let invoker = Arc::new(FakeInvoker::new(invoke));
        let reporter = Arc::new(FakeReporter::new(report));
        let publisher = Arc::new(FakePublisher::new(publish));
        let logs = Arc::new(MemoryLogSink::default());
        let clients = HookClients {
            invoker: invoker.clone(),
            reporter: reporter.clone(),
            publisher: publisher.clone(),
        };
        let settings = HookSettings {
            target: TARGET.to_string(),
            alert_channel: topic.map(str::to_string),
        };
        let logger = HookLogger::new(logs.clone(), LogLevel::Debug);
        Self {
            hook: ValidationHook::new(settings, clients, logger),
            invoker,
            reporter,
            publisher,
            logs,
        }
    }
}
