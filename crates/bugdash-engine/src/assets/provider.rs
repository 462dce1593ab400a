use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::render::Image;

use super::{AssetError, AssetId, AssetLoader, AssetManifest};

/// One-shot completion callback for a load.
///
/// Receives `Ok(())` once every asset of the most recent `load` is available,
/// or the first failure once every asset has settled.
pub type ReadyCallback = Box<dyn FnOnce(Result<(), AssetError>) + Send + 'static>;

/// Asset source consumed by the game loop.
///
/// `get` has defined results only after the ready callback for the load that
/// declared the identifier has fired.
pub trait ResourceProvider: Send + Sync {
    /// Starts fetching every identifier of `manifest` in the background.
    fn load(&self, manifest: &AssetManifest);

    /// Registers `callback` to run once the most recent load has settled.
    ///
    /// Runs immediately (on the caller's thread) if it already has.
    fn on_ready(&self, callback: ReadyCallback);

    /// Resolves a loaded asset.
    fn get(&self, id: &str) -> Result<Arc<Image>, AssetError>;
}

/// Thread-backed resource provider with an in-memory cache.
///
/// Every identifier not already cached is fetched on its own loader thread.
/// Results from a load that has since been superseded by a newer `load` call
/// still populate the cache but never complete the newer load.
pub struct Resources {
    loader: Arc<dyn AssetLoader>,
    shared: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    state: Mutex<LoadState>,
}

#[derive(Default)]
struct LoadState {
    cache: HashMap<AssetId, Arc<Image>>,
    generation: u64,
    pending: usize,
    failure: Option<AssetError>,
    outcome: Option<Result<(), AssetError>>,
    waiting: Vec<ReadyCallback>,
}

impl Resources {
    pub fn new(loader: impl AssetLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            shared: Arc::new(Shared::default()),
        }
    }

    /// Provider whose cache is filled up front; identifiers outside `images`
    /// fail to load with `NotLoaded`.
    pub fn preloaded<I, K>(images: I) -> Self
    where
        I: IntoIterator<Item = (K, Image)>,
        K: Into<AssetId>,
    {
        let resources = Self::new(|id: &AssetId| -> Result<Image, AssetError> {
            Err(AssetError::NotLoaded(id.clone()))
        });
        {
            let mut st = resources.shared.lock();
            st.cache
                .extend(images.into_iter().map(|(id, img)| (id.into(), Arc::new(img))));
        }
        resources
    }

    /// Number of assets currently cached.
    pub fn cached(&self) -> usize {
        self.shared.lock().cache.len()
    }

    /// Whether the most recent load has settled successfully.
    pub fn is_ready(&self) -> bool {
        matches!(self.shared.lock().outcome, Some(Ok(())))
    }
}

impl ResourceProvider for Resources {
    fn load(&self, manifest: &AssetManifest) {
        let (generation, to_fetch, settled) = {
            let mut st = self.shared.lock();
            st.generation += 1;
            st.failure = None;
            st.outcome = None;

            let to_fetch: Vec<AssetId> = manifest
                .iter()
                .filter(|id| !st.cache.contains_key(id.as_str()))
                .cloned()
                .collect();
            st.pending = to_fetch.len();

            let settled = if to_fetch.is_empty() {
                st.outcome = Some(Ok(()));
                Some(std::mem::take(&mut st.waiting))
            } else {
                None
            };

            (st.generation, to_fetch, settled)
        };

        log::info!(
            "loading {} assets ({} already cached)",
            to_fetch.len(),
            manifest.len() - to_fetch.len()
        );

        if let Some(callbacks) = settled {
            notify(callbacks, Ok(()));
            return;
        }

        for id in to_fetch {
            let loader = Arc::clone(&self.loader);
            let shared = Arc::clone(&self.shared);
            let thread_id = id.clone();

            let spawned = thread::Builder::new()
                .name("asset-loader".to_string())
                .spawn(move || {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| loader.load(&thread_id)))
                        .unwrap_or_else(|payload| {
                            Err(AssetError::Panicked {
                                id: thread_id.clone(),
                                message: panic_message(payload.as_ref()),
                            })
                        });
                    shared.finish(generation, thread_id, result);
                });

            if let Err(e) = spawned {
                let message = e.to_string();
                self.shared
                    .finish(generation, id.clone(), Err(AssetError::Spawn { id, message }));
            }
        }
    }

    fn on_ready(&self, callback: ReadyCallback) {
        let outcome = {
            let mut st = self.shared.lock();
            match &st.outcome {
                Some(outcome) => outcome.clone(),
                None => {
                    st.waiting.push(callback);
                    return;
                }
            }
        };
        callback(outcome);
    }

    fn get(&self, id: &str) -> Result<Arc<Image>, AssetError> {
        self.shared
            .lock()
            .cache
            .get(id)
            .cloned()
            .ok_or_else(|| AssetError::NotLoaded(AssetId::new(id)))
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, LoadState> {
        // A panicking loader thread never holds the lock across user code.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self, generation: u64, id: AssetId, result: Result<Image, AssetError>) {
        let (callbacks, outcome) = {
            let mut st = self.lock();

            match result {
                Ok(img) => {
                    log::debug!("loaded `{id}`");
                    st.cache.insert(id, Arc::new(img));
                }
                Err(e) => {
                    log::error!("{e}");
                    if st.generation == generation && st.failure.is_none() {
                        st.failure = Some(e);
                    }
                }
            }

            if st.generation != generation {
                return;
            }

            st.pending = st.pending.saturating_sub(1);
            if st.pending > 0 {
                return;
            }

            let outcome = match st.failure.take() {
                Some(e) => Err(e),
                None => Ok(()),
            };
            st.outcome = Some(outcome.clone());
            (std::mem::take(&mut st.waiting), outcome)
        };

        notify(callbacks, outcome);
    }
}

fn notify(callbacks: Vec<ReadyCallback>, outcome: Result<(), AssetError>) {
    match &outcome {
        Ok(()) => log::info!("assets ready"),
        Err(e) => log::error!("asset loading failed: {e}"),
    }
    for callback in callbacks {
        callback(outcome.clone());
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Rgba8;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn solid(_: &AssetId) -> Result<Image, AssetError> {
        Ok(Image::filled(2, 2, Rgba8::WHITE))
    }

    fn ready_channel(provider: &Resources) -> mpsc::Receiver<Result<(), AssetError>> {
        let (tx, rx) = mpsc::channel();
        provider.on_ready(Box::new(move |outcome| {
            let _ = tx.send(outcome);
        }));
        rx
    }

    #[test]
    fn empty_manifest_is_ready_immediately() {
        let provider = Resources::new(solid);
        let fired = Arc::new(AtomicUsize::new(0));

        provider.load(&AssetManifest::new());
        let f = Arc::clone(&fired);
        provider.on_ready(Box::new(move |r| {
            assert!(r.is_ok());
            f.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(provider.is_ready());
    }

    #[test]
    fn reverse_completion_fires_once_after_both() {
        // img1 blocks until img2 has been produced, forcing reverse completion.
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let gate_tx = Mutex::new(gate_tx);
        let gate_rx = Mutex::new(gate_rx);
        let order = Arc::new(Mutex::new(Vec::new()));
        let order_in_loader = Arc::clone(&order);

        let provider = Resources::new(move |id: &AssetId| -> Result<Image, AssetError> {
            if id.as_str() == "img1.png" {
                gate_rx.lock().unwrap().recv_timeout(WAIT).unwrap();
            }
            order_in_loader.lock().unwrap().push(id.to_string());
            if id.as_str() == "img2.png" {
                gate_tx.lock().unwrap().send(()).unwrap();
            }
            Ok(Image::filled(1, 1, Rgba8::WHITE))
        });

        let fired = Arc::new(AtomicUsize::new(0));
        let f = Arc::clone(&fired);
        let (tx, rx) = mpsc::channel();

        provider.load(&["img1.png", "img2.png"].into_iter().collect());
        provider.on_ready(Box::new(move |r| {
            f.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(r);
        }));

        rx.recv_timeout(WAIT).unwrap().unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(*order.lock().unwrap(), ["img2.png", "img1.png"]);
        assert!(provider.get("img1.png").is_ok());
        assert!(provider.get("img2.png").is_ok());
    }

    #[test]
    fn every_waiting_callback_fires_once() {
        let provider = Resources::new(solid);
        let fired = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel();

        provider.load(&["a", "b", "c"].into_iter().collect());
        for _ in 0..3 {
            let f = Arc::clone(&fired);
            let tx = tx.clone();
            provider.on_ready(Box::new(move |_| {
                f.fetch_add(1, Ordering::SeqCst);
                let _ = tx.send(());
            }));
        }
        drop(tx);

        for _ in 0..3 {
            rx.recv_timeout(WAIT).unwrap();
        }
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn late_registration_fires_immediately() {
        let provider = Resources::new(solid);
        let rx = {
            provider.load(&["a"].into_iter().collect());
            ready_channel(&provider)
        };
        rx.recv_timeout(WAIT).unwrap().unwrap();

        let again = ready_channel(&provider);
        assert_eq!(again.try_recv().unwrap(), Ok(()));
    }

    #[test]
    fn failure_is_reported_once_after_all_settle() {
        let provider = Resources::new(|id: &AssetId| -> Result<Image, AssetError> {
            if id.as_str() == "bad.png" {
                Err(AssetError::Decode { id: id.clone(), message: "corrupt".into() })
            } else {
                Ok(Image::filled(1, 1, Rgba8::WHITE))
            }
        });

        provider.load(&["good.png", "bad.png"].into_iter().collect());
        let rx = ready_channel(&provider);

        let err = rx.recv_timeout(WAIT).unwrap().unwrap_err();
        assert_eq!(err.id().as_str(), "bad.png");
        assert!(provider.get("good.png").is_ok());
        assert!(!provider.is_ready());
    }

    #[test]
    fn panicking_loader_still_settles_the_load() {
        let provider = Resources::new(|id: &AssetId| -> Result<Image, AssetError> {
            if id.as_str() == "bad.png" {
                panic!("decoder blew up");
            }
            Ok(Image::filled(1, 1, Rgba8::WHITE))
        });

        provider.load(&["good.png", "bad.png"].into_iter().collect());
        let rx = ready_channel(&provider);

        let err = rx.recv_timeout(WAIT).unwrap().unwrap_err();
        assert_eq!(
            err,
            AssetError::Panicked { id: AssetId::new("bad.png"), message: "decoder blew up".into() }
        );
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        assert!(provider.get("good.png").is_ok());
        assert!(!provider.is_ready());
    }

    #[test]
    fn unknown_identifier_is_not_loaded() {
        let provider = Resources::preloaded([("known.png", Image::filled(1, 1, Rgba8::WHITE))]);
        assert!(provider.get("known.png").is_ok());
        assert_eq!(
            provider.get("unknown.png").unwrap_err(),
            AssetError::NotLoaded(AssetId::new("unknown.png"))
        );
    }

    #[test]
    fn cached_assets_are_not_fetched_again() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let provider = Resources::new(move |_: &AssetId| -> Result<Image, AssetError> {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(Image::filled(1, 1, Rgba8::WHITE))
        });

        let manifest: AssetManifest = ["a", "b"].into_iter().collect();
        provider.load(&manifest);
        ready_channel(&provider).recv_timeout(WAIT).unwrap().unwrap();

        provider.load(&manifest);
        assert_eq!(ready_channel(&provider).try_recv().unwrap(), Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(provider.cached(), 2);
    }
}
