use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use anyhow::Result;
use futures::StreamExt;
use kube::runtime::{watcher, WatchStreamExt};
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::core::client::kube_resources::{PodGroup, PriorityClass, Queue, ResourceBinding};
use crate::core::state::dispatcher::cache_object::{CacheObject, Notification};
use crate::core::state::dispatcher::dispatcher_cache::DispatcherCache;

type ObjectKey = (String, String);

/// Turns raw watcher events into add/update/delete notifications.
///
/// Remembers the last object seen per key so an `Apply` of a known key
/// becomes `Update(previous, new)`. After a re-list, keys that were not
/// listed again are emitted as deletes.
#[derive(Debug, Default)]
pub struct WatchEventTranslator {
    known: HashMap<ObjectKey, CacheObject>,
    relisted: Option<HashSet<ObjectKey>>,
}

impl WatchEventTranslator {
    pub fn translate(&mut self, event: watcher::Event<CacheObject>) -> Vec<Notification> {
        match event {
            watcher::Event::Init => {
                self.relisted = Some(HashSet::new());
                Vec::new()
            }
            watcher::Event::InitApply(obj) => {
                if let (Some(relisted), Some(key)) = (self.relisted.as_mut(), obj.object_key()) {
                    relisted.insert(key);
                }
                self.apply(obj)
            }
            watcher::Event::InitDone => {
                let Some(relisted) = self.relisted.take() else {
                    return Vec::new();
                };
                let stale: Vec<ObjectKey> = self
                    .known
                    .keys()
                    .filter(|key| !relisted.contains(*key))
                    .cloned()
                    .collect();
                stale
                    .into_iter()
                    .filter_map(|key| self.known.remove(&key))
                    .map(Notification::Delete)
                    .collect()
            }
            watcher::Event::Apply(obj) => self.apply(obj),
            watcher::Event::Delete(obj) => {
                let Some(key) = obj.object_key() else {
                    return Vec::new();
                };
                self.known.remove(&key);
                vec![Notification::Delete(obj)]
            }
        }
    }

    fn apply(&mut self, obj: CacheObject) -> Vec<Notification> {
        let Some(key) = obj.object_key() else {
            debug!("Skipping unnamed {} from watch", obj.kind());
            return Vec::new();
        };

        match self.known.insert(key, obj.clone()) {
            None => vec![Notification::Add(obj)],
            Some(previous) if previous == obj => Vec::new(),
            Some(previous) => vec![Notification::Update(previous, obj)],
        }
    }
}

fn into_cache_event<K: Into<CacheObject>>(event: watcher::Event<K>) -> watcher::Event<CacheObject> {
    match event {
        watcher::Event::Apply(obj) => watcher::Event::Apply(obj.into()),
        watcher::Event::Delete(obj) => watcher::Event::Delete(obj.into()),
        watcher::Event::Init => watcher::Event::Init,
        watcher::Event::InitApply(obj) => watcher::Event::InitApply(obj.into()),
        watcher::Event::InitDone => watcher::Event::InitDone,
    }
}

/// Watch one resource kind and feed every event into the cache.
///
/// Runs until the stream ends; watch errors are logged and the watcher
/// backs off and reconnects.
pub async fn watch_into_cache<K>(api: Api<K>, cache: Arc<DispatcherCache>) -> Result<()>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
    K::DynamicType: Default,
    CacheObject: From<K>,
{
    let kind = K::kind(&K::DynamicType::default()).to_string();
    info!("Starting {} watcher...", kind);

    let mut translator = WatchEventTranslator::default();
    let mut stream = watcher(api, watcher::Config::default())
        .default_backoff()
        .boxed();

    while let Some(result) = stream.next().await {
        match result {
            Ok(event) => {
                for notification in translator.translate(into_cache_event(event)) {
                    cache.handle(&notification).await;
                }
            }
            Err(e) => {
                error!("{} watcher error: {:?}", kind, e);
            }
        }
    }

    Ok(())
}

/// Start one watcher per cached kind. Returns join handles for the
/// background tasks.
pub fn start_watchers(client: Client, cache: Arc<DispatcherCache>) -> Vec<JoinHandle<()>> {
    let handles = vec![
        spawn_watch(Api::<Queue>::all(client.clone()), Arc::clone(&cache)),
        spawn_watch(Api::<PodGroup>::all(client.clone()), Arc::clone(&cache)),
        spawn_watch(Api::<PriorityClass>::all(client.clone()), Arc::clone(&cache)),
        spawn_watch(Api::<ResourceBinding>::all(client), cache),
    ];

    info!("All dispatcher cache watchers started");
    handles
}

fn spawn_watch<K>(api: Api<K>, cache: Arc<DispatcherCache>) -> JoinHandle<()>
where
    K: Resource + Clone + DeserializeOwned + Debug + Send + Sync + 'static,
    K::DynamicType: Default,
    CacheObject: From<K>,
{
    tokio::spawn(async move {
        if let Err(e) = watch_into_cache(api, cache).await {
            error!("Watcher error: {:?}", e);
        }
    })
}
