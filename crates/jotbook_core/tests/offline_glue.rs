use jotbook_core::offline::UPDATE_PROMPT;
use jotbook_core::{
    check_cache_status, register_offline_glue, CacheInspector, CacheListing, CacheStatus,
    OfflineCallbacks, OfflineError, OfflineRegistrar, UpdatePrompt, UpdateTrigger,
};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Registrar that keeps the callbacks so tests can fire them.
#[derive(Default)]
struct ScriptedRegistrar {
    callbacks: Option<OfflineCallbacks>,
    reloads: Rc<RefCell<Vec<bool>>>,
}

impl ScriptedRegistrar {
    fn need_refresh(&mut self) {
        (self.callbacks.as_mut().unwrap().on_need_refresh)();
    }

    fn offline_ready(&mut self) {
        (self.callbacks.as_mut().unwrap().on_offline_ready)();
    }
}

impl OfflineRegistrar for ScriptedRegistrar {
    fn is_supported(&self) -> bool {
        true
    }

    fn register(&mut self, callbacks: OfflineCallbacks) -> Result<UpdateTrigger, OfflineError> {
        self.callbacks = Some(callbacks);
        let reloads = Rc::clone(&self.reloads);
        Ok(Rc::new(move |reload: bool| reloads.borrow_mut().push(reload)))
    }
}

struct ScriptedPrompt {
    answer: bool,
    asked: RefCell<Vec<String>>,
}

impl UpdatePrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}

#[derive(Default)]
struct FakeCaches {
    caches: BTreeMap<String, Vec<String>>,
    fail_on: Option<String>,
    entry_queries: Cell<usize>,
}

impl CacheInspector for FakeCaches {
    fn is_supported(&self) -> bool {
        true
    }

    fn registrations(&self) -> Result<Vec<String>, OfflineError> {
        Ok(vec!["scope=/".to_string()])
    }

    fn cache_names(&self) -> Result<Vec<String>, OfflineError> {
        Ok(self.caches.keys().cloned().collect())
    }

    fn cache_entries(&self, cache_name: &str) -> Result<Vec<String>, OfflineError> {
        self.entry_queries.set(self.entry_queries.get() + 1);
        if self.fail_on.as_deref() == Some(cache_name) {
            return Err(OfflineError::Platform(format!("cannot open {cache_name}")));
        }
        Ok(self.caches.get(cache_name).cloned().unwrap_or_default())
    }
}

fn caches() -> FakeCaches {
    let mut caches = BTreeMap::new();
    caches.insert(
        "precache-v1".to_string(),
        vec!["/index.html".to_string(), "/app.js".to_string()],
    );
    caches.insert("runtime".to_string(), Vec::new());
    FakeCaches {
        caches,
        ..FakeCaches::default()
    }
}

#[test]
fn accepted_refresh_triggers_reload() {
    let mut registrar = ScriptedRegistrar::default();
    let prompt = Rc::new(ScriptedPrompt {
        answer: true,
        asked: RefCell::default(),
    });
    let trigger = register_offline_glue(&mut registrar, prompt.clone(), Rc::new(caches()));
    assert!(trigger.is_some());

    registrar.need_refresh();
    assert_eq!(*prompt.asked.borrow(), vec![UPDATE_PROMPT.to_string()]);
    assert_eq!(*registrar.reloads.borrow(), vec![true]);
}

#[test]
fn declined_refresh_does_not_reload() {
    let mut registrar = ScriptedRegistrar::default();
    let prompt = Rc::new(ScriptedPrompt {
        answer: false,
        asked: RefCell::default(),
    });
    register_offline_glue(&mut registrar, prompt.clone(), Rc::new(caches()));

    registrar.need_refresh();
    assert_eq!(prompt.asked.borrow().len(), 1);
    assert!(registrar.reloads.borrow().is_empty());
}

#[test]
fn offline_ready_runs_cache_diagnostic() {
    let mut registrar = ScriptedRegistrar::default();
    let inspector = Rc::new(caches());
    let prompt = Rc::new(ScriptedPrompt {
        answer: true,
        asked: RefCell::default(),
    });
    register_offline_glue(&mut registrar, prompt, inspector.clone());

    registrar.offline_ready();
    assert_eq!(inspector.entry_queries.get(), 2);
}

#[test]
fn cache_status_lists_every_cache() {
    let status = check_cache_status(&caches());
    assert_eq!(
        status,
        CacheStatus::Inspected {
            registrations: vec!["scope=/".to_string()],
            caches: vec![
                CacheListing {
                    name: "precache-v1".to_string(),
                    urls: vec!["/index.html".to_string(), "/app.js".to_string()],
                },
                CacheListing {
                    name: "runtime".to_string(),
                    urls: Vec::new(),
                },
            ],
        }
    );
}

#[test]
fn cache_status_failure_is_caught() {
    let inspector = FakeCaches {
        fail_on: Some("precache-v1".to_string()),
        ..caches()
    };
    match check_cache_status(&inspector) {
        CacheStatus::Failed(message) => assert!(message.contains("precache-v1")),
        other => panic!("unexpected status: {other:?}"),
    }
    assert_eq!(inspector.entry_queries.get(), 1);
}
