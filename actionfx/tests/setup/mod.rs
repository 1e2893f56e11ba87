/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use actionfx::prelude::*;

// Ensures tracing initialization happens only once across all tests.
static INIT: Once = Once::new();

/// Initializes the global tracing subscriber for tests.
///
/// Sets up a `FmtSubscriber` writing to `logs/effect_tests.txt` with an
/// `EnvFilter` controlling per-target levels. Uses `std::sync::Once` so
/// the initialization logic runs only once even when called from many
/// tests.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        std::fs::create_dir_all("logs").expect("could not create logs dir");

        let file_appender = RollingFileAppender::new(Rotation::NEVER, "logs", "effect_tests.txt");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Leak the guard so the non-blocking writer is not dropped before process exit
        Box::leak(Box::new(guard));

        let filter = EnvFilter::new("trace")
            .add_directive("actionfx_core::tool=trace".parse().unwrap())
            .add_directive("actionfx_core::effect=trace".parse().unwrap())
            .add_directive(tracing_subscriber::filter::LevelFilter::TRACE.into());

        let subscriber = FmtSubscriber::builder()
            .with_span_events(FmtSpan::NONE)
            .with_max_level(Level::TRACE)
            .compact()
            .with_line_number(true)
            .without_time()
            .with_target(true)
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");
    });
}

/// Drains every signal currently buffered on the receiver.
pub fn drain_signals(rx: &mut tokio::sync::mpsc::UnboundedReceiver<ToolSignal>) -> Vec<ToolSignal> {
    let mut signals = Vec::new();
    while let Ok(signal) = rx.try_recv() {
        signals.push(signal);
    }
    signals
}

/// Yields a few times so freshly spawned continuations get polled and
/// register their timers before the test advances the paused clock.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Waits for the next `EffectCallback` signal, skipping everything else.
pub async fn next_effect_callback(
    rx: &mut tokio::sync::mpsc::UnboundedReceiver<ToolSignal>,
) -> EffectId {
    loop {
        match rx.recv().await {
            Some(ToolSignal::EffectCallback(id)) => return id,
            Some(_) => continue,
            None => panic!("signal channel closed while waiting for effect callback"),
        }
    }
}

/// A common effect that counts how many times its trigger fired.
pub fn counting_effect(
    ids: &EffectIds,
    trigger: TriggerPoint,
) -> (Arc<CommonEffect>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let effect = CommonEffect::new(ids, trigger, move |_tool| {
        counter.fetch_add(1, Ordering::SeqCst);
        ToolReply::ready()
    });
    (effect, count)
}

/// Records every lifecycle call an effect receives, in order.
#[derive(Debug)]
pub struct Recorder {
    id: EffectId,
    name: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new(ids: &EffectIds, name: &'static str) -> (Arc<Self>, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::new(Self {
            id: ids.allocate::<Self>(),
            name,
            log: log.clone(),
        });
        (recorder, log)
    }

    fn record(&self, event: &str) {
        self.log
            .lock()
            .expect("recorder log poisoned")
            .push(format!("{}:{}", self.name, event));
    }
}

#[async_trait]
impl ToolEffect for Recorder {
    fn id(&self) -> EffectId {
        self.id
    }

    async fn on_use(self: Arc<Self>, _tool: &Tool) {
        self.record("use");
    }

    async fn on_end_use(self: Arc<Self>, _tool: &Tool) {
        self.record("end_use");
    }

    async fn on_use_failed(self: Arc<Self>, _tool: &Tool) {
        self.record("use_failed");
    }

    async fn on_cancel_use(self: Arc<Self>, _tool: &Tool) {
        self.record("cancel_use");
    }

    fn tool_enabled(&self, _tool: &Tool) {
        self.record("enabled");
    }

    fn tool_disabled(&self, _tool: &Tool) {
        self.record("disabled");
    }

    fn tool_destroyed(&self, _tool: &Tool) {
        self.record("destroyed");
    }
}

/// Reads a recorder log into a plain vector.
pub fn log_entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().expect("recorder log poisoned").clone()
}

/// A dependency gate with a switchable verdict.
#[derive(Debug, Default)]
pub struct SwitchGate {
    allow: std::sync::atomic::AtomicBool,
    queries: AtomicUsize,
}

impl SwitchGate {
    pub fn new(allow: bool) -> Arc<Self> {
        let gate = Arc::new(Self::default());
        gate.allow.store(allow, Ordering::SeqCst);
        gate
    }

    pub fn set_allow(&self, allow: bool) {
        self.allow.store(allow, Ordering::SeqCst);
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl ActionDependency for SwitchGate {
    fn can_use(&self, _tool: &Tool) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.allow.load(Ordering::SeqCst)
    }
}
