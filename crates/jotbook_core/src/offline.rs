//! Offline-cache glue.
//!
//! # Responsibility
//! - Register update-available / offline-ready callbacks with the platform's
//!   offline cache.
//! - Run a best-effort diagnostic listing of registered caches.
//!
//! # Invariants
//! - Diagnostics never return an error to the caller and never retry.
//! - The update trigger only fires after the user confirms the prompt.
//! - Missing platform support is logged and short-circuited.

use log::{debug, error, info, warn};
use once_cell::unsync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Prompt shown when a newer version is available.
pub const UPDATE_PROMPT: &str = "New content available. Reload?";

/// Platform-provided update function; the flag requests a reload.
pub type UpdateTrigger = Rc<dyn Fn(bool)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfflineError {
    Unsupported,
    Platform(String),
}

impl Display for OfflineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "offline cache is not supported on this platform"),
            Self::Platform(message) => write!(f, "offline cache error: {message}"),
        }
    }
}

impl Error for OfflineError {}

/// Callback pair handed to the platform at registration.
pub struct OfflineCallbacks {
    pub on_need_refresh: Box<dyn FnMut()>,
    pub on_offline_ready: Box<dyn FnMut()>,
}

/// Platform offline-cache registration entry point.
pub trait OfflineRegistrar {
    fn is_supported(&self) -> bool;
    fn register(&mut self, callbacks: OfflineCallbacks) -> Result<UpdateTrigger, OfflineError>;
}

/// Yes/no confirmation surface.
pub trait UpdatePrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Read-only view over the platform's caches.
pub trait CacheInspector {
    fn is_supported(&self) -> bool;
    fn registrations(&self) -> Result<Vec<String>, OfflineError>;
    fn cache_names(&self) -> Result<Vec<String>, OfflineError>;
    /// Request URLs held by one cache.
    fn cache_entries(&self, cache_name: &str) -> Result<Vec<String>, OfflineError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheListing {
    pub name: String,
    pub urls: Vec<String>,
}

/// Outcome of `check_cache_status`; informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    Unsupported,
    Inspected {
        registrations: Vec<String>,
        caches: Vec<CacheListing>,
    },
    Failed(String),
}

/// Platform stand-in for hosts without an offline cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl OfflineRegistrar for UnsupportedPlatform {
    fn is_supported(&self) -> bool {
        false
    }

    fn register(&mut self, _callbacks: OfflineCallbacks) -> Result<UpdateTrigger, OfflineError> {
        Err(OfflineError::Unsupported)
    }
}

impl CacheInspector for UnsupportedPlatform {
    fn is_supported(&self) -> bool {
        false
    }

    fn registrations(&self) -> Result<Vec<String>, OfflineError> {
        Err(OfflineError::Unsupported)
    }

    fn cache_names(&self) -> Result<Vec<String>, OfflineError> {
        Err(OfflineError::Unsupported)
    }

    fn cache_entries(&self, _cache_name: &str) -> Result<Vec<String>, OfflineError> {
        Err(OfflineError::Unsupported)
    }
}

/// Enumerates registrations and cache contents into the log.
pub fn check_cache_status(inspector: &dyn CacheInspector) -> CacheStatus {
    if !inspector.is_supported() {
        info!("event=cache_check module=offline status=unsupported");
        return CacheStatus::Unsupported;
    }

    match inspect(inspector) {
        Ok((registrations, caches)) => {
            info!(
                "event=cache_check module=offline status=ok registrations={} caches={}",
                registrations.len(),
                caches.len()
            );
            for listing in &caches {
                debug!(
                    "event=cache_check module=offline cache={} entries={} urls={}",
                    listing.name,
                    listing.urls.len(),
                    listing.urls.join(",")
                );
            }
            CacheStatus::Inspected {
                registrations,
                caches,
            }
        }
        Err(err) => {
            error!("event=cache_check module=offline status=error error={err}");
            CacheStatus::Failed(err.to_string())
        }
    }
}

fn inspect(
    inspector: &dyn CacheInspector,
) -> Result<(Vec<String>, Vec<CacheListing>), OfflineError> {
    let registrations = inspector.registrations()?;
    debug!(
        "event=cache_check module=offline registrations={}",
        registrations.join(",")
    );

    let mut caches = Vec::new();
    for name in inspector.cache_names()? {
        let urls = inspector.cache_entries(&name)?;
        caches.push(CacheListing { name, urls });
    }
    Ok((registrations, caches))
}

/// Registers the refresh/offline-ready callbacks.
///
/// Returns the platform update trigger, or `None` when the platform has no
/// offline cache or registration failed.
pub fn register_offline_glue(
    registrar: &mut dyn OfflineRegistrar,
    prompt: Rc<dyn UpdatePrompt>,
    inspector: Rc<dyn CacheInspector>,
) -> Option<UpdateTrigger> {
    if !registrar.is_supported() {
        info!("event=offline_register module=offline status=unsupported");
        return None;
    }

    // The refresh callback needs the trigger that registration returns.
    let trigger_slot: Rc<OnceCell<UpdateTrigger>> = Rc::new(OnceCell::new());

    let refresh_slot = Rc::clone(&trigger_slot);
    let on_need_refresh: Box<dyn FnMut()> = Box::new(move || {
        if !prompt.confirm(UPDATE_PROMPT) {
            info!("event=update_prompt module=offline status=declined");
            return;
        }
        match refresh_slot.get() {
            Some(trigger) => {
                info!("event=update_prompt module=offline status=accepted reload=true");
                trigger(true);
            }
            None => warn!("event=update_prompt module=offline status=error reason=trigger_missing"),
        }
    });

    let on_offline_ready: Box<dyn FnMut()> = Box::new(move || {
        info!("event=offline_ready module=offline status=ok");
        check_cache_status(inspector.as_ref());
    });

    let callbacks = OfflineCallbacks {
        on_need_refresh,
        on_offline_ready,
    };
    match registrar.register(callbacks) {
        Ok(trigger) => {
            let _ = trigger_slot.set(Rc::clone(&trigger));
            info!("event=offline_register module=offline status=ok");
            Some(trigger)
        }
        Err(err) => {
            warn!("event=offline_register module=offline status=error error={err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        check_cache_status, register_offline_glue, CacheStatus, UnsupportedPlatform,
        UpdatePrompt,
    };
    use std::rc::Rc;

    struct AlwaysYes;

    impl UpdatePrompt for AlwaysYes {
        fn confirm(&self, _message: &str) -> bool {
            true
        }
    }

    #[test]
    fn unsupported_platform_short_circuits() {
        assert_eq!(check_cache_status(&UnsupportedPlatform), CacheStatus::Unsupported);

        let mut registrar = UnsupportedPlatform;
        let trigger =
            register_offline_glue(&mut registrar, Rc::new(AlwaysYes), Rc::new(UnsupportedPlatform));
        assert!(trigger.is_none());
    }
}
