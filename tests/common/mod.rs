#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use console_bootstrap::bootstrap_core::errors::BootstrapError;
use console_bootstrap::bootstrap_core::models::{RecoveryChoice, SignIn};
use console_bootstrap::bootstrap_core::traits::{
    AuthClient, BundleSource, DeviceController, LogLevelSink, PageHost, ResourceLoader,
};
use console_bootstrap::bootstrap_core::types::SessionToken;
use console_bootstrap::config::{LogLevel, Settings};
use console_bootstrap::engine::render::RouteTable;
use console_bootstrap::engine::{Bootstrap, Collaborators};
use console_bootstrap::host::{HeadlessPage, ScriptedPrompt};
use console_bootstrap::i18n::bundles::{BundleLookup, BundleRegistry};
use console_bootstrap::i18n::detector::StaticDetector;
use console_bootstrap::store::MemoryStore;

/// Shared, ordered record of collaborator calls.
#[derive(Clone, Default)]
pub struct Timeline(Arc<Mutex<Vec<String>>>);

impl Timeline {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

pub struct RecordingSink {
    timeline: Timeline,
    pub levels: Mutex<Vec<LogLevel>>,
}

impl LogLevelSink for RecordingSink {
    fn set_level(&self, level: LogLevel) {
        self.timeline.push(format!("log_level:{}", level));
        self.levels.lock().unwrap().push(level);
    }
}

pub struct StubResources {
    timeline: Timeline,
    pub fail: bool,
}

#[async_trait]
impl ResourceLoader for StubResources {
    async fn load(&self, locale: &str, namespace: &str) -> Result<Value, BootstrapError> {
        self.timeline.push(format!("resources:{}/{}", locale, namespace));
        if self.fail {
            return Err(BootstrapError::Localization("backend unavailable".into()));
        }
        Ok(match locale {
            "fr" => json!({ "Restore Defaults": "Restaurer les paramètres par défaut" }),
            _ => json!({}),
        })
    }
}

pub struct CountingBundles {
    timeline: Timeline,
    registry: BundleRegistry,
    calls: AtomicUsize,
    pub requested: Mutex<Vec<String>>,
}

impl CountingBundles {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BundleSource for CountingBundles {
    async fn load(&self, locale: &str) -> BundleLookup {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.timeline.push(format!("bundle:{}", locale));
        self.requested.lock().unwrap().push(locale.to_string());
        self.registry.lookup(locale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Accept,
    Reject,
    Unreachable,
}

pub struct StubAuth {
    timeline: Timeline,
    mode: AuthMode,
    pub presented: Mutex<Vec<String>>,
}

#[async_trait]
impl AuthClient for StubAuth {
    async fn sign_in(&self, token: &SessionToken) -> Result<SignIn, BootstrapError> {
        self.timeline.push("signin");
        self.presented.lock().unwrap().push(token.as_str().to_string());
        match self.mode {
            AuthMode::Accept => Ok(SignIn {
                authenticated: true,
                name: Some("operator".into()),
            }),
            AuthMode::Reject => Ok(SignIn::rejected()),
            AuthMode::Unreachable => {
                Err(BootstrapError::Authentication("connection refused".into()))
            }
        }
    }
}

pub struct StubController {
    timeline: Timeline,
    pub fail: bool,
}

#[async_trait]
impl DeviceController for StubController {
    async fn connect(&self, _token: &SessionToken) -> Result<(), BootstrapError> {
        self.timeline.push("connect");
        if self.fail {
            return Err(BootstrapError::DeviceConnection("socket closed".into()));
        }
        Ok(())
    }
}

/// Headless page that also stamps the timeline on mount.
pub struct RecordingPage {
    timeline: Timeline,
    pub inner: HeadlessPage,
}

impl PageHost for RecordingPage {
    fn mount(&self, routes: &RouteTable) -> Result<(), BootstrapError> {
        self.timeline.push("mount");
        self.inner.mount(routes)
    }

    fn remove_element(&self, id: &str) -> bool {
        self.inner.remove_element(id)
    }

    fn set_background_color(&self, color: &str) {
        self.inner.set_background_color(color)
    }

    fn suppress_file_drop(&self) {
        self.inner.suppress_file_drop()
    }
}

pub struct Harness {
    pub timeline: Timeline,
    pub settings: Arc<Settings>,
    pub store: Arc<MemoryStore>,
    pub sink: Arc<RecordingSink>,
    pub resources: Arc<StubResources>,
    pub bundles: Arc<CountingBundles>,
    pub auth: Arc<StubAuth>,
    pub controller: Arc<StubController>,
    pub page: Arc<RecordingPage>,
    pub prompt: Arc<ScriptedPrompt>,
    locales: Vec<String>,
}

impl Harness {
    pub fn new(store: MemoryStore) -> Self {
        Self::build(store, AuthMode::Accept, &["en"], Vec::new(), false, false)
    }

    pub fn build(
        store: MemoryStore,
        auth: AuthMode,
        locales: &[&str],
        choices: Vec<RecoveryChoice>,
        resources_fail: bool,
        controller_fail: bool,
    ) -> Self {
        let timeline = Timeline::default();
        Self {
            settings: Arc::new(Settings::default()),
            store: Arc::new(store),
            sink: Arc::new(RecordingSink {
                timeline: timeline.clone(),
                levels: Mutex::new(Vec::new()),
            }),
            resources: Arc::new(StubResources {
                timeline: timeline.clone(),
                fail: resources_fail,
            }),
            bundles: Arc::new(CountingBundles {
                timeline: timeline.clone(),
                registry: BundleRegistry::builtin(),
                calls: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            }),
            auth: Arc::new(StubAuth {
                timeline: timeline.clone(),
                mode: auth,
                presented: Mutex::new(Vec::new()),
            }),
            controller: Arc::new(StubController {
                timeline: timeline.clone(),
                fail: controller_fail,
            }),
            page: Arc::new(RecordingPage {
                timeline: timeline.clone(),
                inner: HeadlessPage::new("/"),
            }),
            prompt: Arc::new(ScriptedPrompt::new(choices)),
            locales: locales.iter().map(|s| s.to_string()).collect(),
            timeline,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new(
            self.settings.clone(),
            Collaborators {
                store: self.store.clone(),
                log_sink: self.sink.clone(),
                detector: Arc::new(StaticDetector(self.locales.clone())),
                resources: self.resources.clone(),
                bundles: self.bundles.clone(),
                auth: self.auth.clone(),
                controller: self.controller.clone(),
                page: self.page.clone(),
                prompt: self.prompt.clone(),
            },
        )
    }
}
