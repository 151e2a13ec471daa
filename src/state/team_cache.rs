use cfb_api::TeamSummary;
use cfb_api::client::LeagueSource;
use futures_util::FutureExt;
use futures_util::future::{Shared, join, join_all};
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

/// A lookup started by one batch that later batches can wait on.
type InFlight = Shared<oneshot::Receiver<Option<TeamSummary>>>;

#[derive(Debug, Default)]
struct Directory {
    entries: HashMap<String, Option<TeamSummary>>,
    in_flight: HashMap<String, InFlight>,
}

/// Team metadata resolved for one mounted view.
///
/// Append-only: an entry is never replaced or evicted once inserted. A
/// resolved absence (the server answered "no such team") is cached like a
/// hit. A transport failure is reported as "no data" for that batch only, so
/// a later batch gets another chance at the name. Overlapping batches share
/// a lookup that is already running rather than starting their own.
#[derive(Debug, Default)]
pub struct TeamDirectoryCache {
    directory: Mutex<Directory>,
}

impl TeamDirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Directory> {
        self.directory.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.lock().entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Resolve every name, fetching only the ones neither cached nor already
    /// being fetched. All lookups of the batch run concurrently and the call
    /// returns once each has settled; one failing lookup never fails the batch.
    pub async fn resolve<S, I>(&self, source: &S, names: I) -> HashMap<String, Option<TeamSummary>>
    where
        S: LeagueSource,
        I: IntoIterator<Item = String>,
    {
        let wanted: BTreeSet<String> = names
            .into_iter()
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty())
            .collect();

        let mut resolved = HashMap::with_capacity(wanted.len());
        let mut leading = Vec::new();
        let mut following = Vec::new();
        {
            let mut directory = self.lock();
            for name in wanted {
                if let Some(team) = directory.entries.get(&name) {
                    resolved.insert(name, team.clone());
                    continue;
                }
                // A settled entry here means its batch went away without answering.
                if let Some(lookup) = directory.in_flight.get(&name)
                    && lookup.peek().is_none()
                {
                    following.push((name, lookup.clone()));
                    continue;
                }
                let (answer, lookup) = oneshot::channel();
                directory.in_flight.insert(name.clone(), lookup.shared());
                leading.push((name, answer));
            }
        }

        if leading.is_empty() && following.is_empty() {
            return resolved;
        }
        debug!(
            "resolving {} team(s), {} already in flight, {} cached",
            leading.len(),
            following.len(),
            resolved.len()
        );

        let lookups = leading.into_iter().map(|(name, answer)| async move {
            let result = source.fetch_team(&name).await;
            let team = {
                let mut directory = self.lock();
                directory.in_flight.remove(&name);
                match result {
                    Ok(team) => {
                        if team.is_none() {
                            debug!("no team named {name:?}");
                        }
                        directory.entries.entry(name.clone()).or_insert(team).clone()
                    }
                    Err(e) => {
                        warn!("team lookup for {name:?} failed: {e}");
                        None
                    }
                }
            };
            let _ = answer.send(team.clone());
            (name, team)
        });
        let waits = following
            .into_iter()
            .map(|(name, lookup)| async move { (name, lookup.await.ok().flatten()) });

        let (fetched, shared) = join(join_all(lookups), join_all(waits)).await;
        resolved.extend(fetched);
        resolved.extend(shared);
        resolved
    }
}
