use crate::config::FeedNames;
use crate::feeds::{dedup_trains, DataFeed, TrainRecord};
use crate::flight::FlightRecord;
use crate::source::{fetch_json, FeedSource};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// The feeds as of one refresh cycle. Never mutated, replaced wholesale.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub flights: Vec<FlightRecord>,
    pub data: DataFeed,
    pub trains: Vec<TrainRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Owns the latest snapshot and keeps it fresh. Readers never block a refresh
/// for longer than the pointer swap.
pub struct FeedService {
    source: Box<dyn FeedSource>,
    names: FeedNames,
    latest: RwLock<Option<Arc<Snapshot>>>,
    subscribers: Mutex<Vec<Sender<Arc<Snapshot>>>>,
    refreshing: Mutex<()>,
}

impl FeedService {
    pub fn new(source: Box<dyn FeedSource>, names: FeedNames) -> FeedService {
        FeedService {
            source,
            names,
            latest: RwLock::new(None),
            subscribers: Mutex::new(vec![]),
            refreshing: Mutex::new(()),
        }
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.latest.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// True until the first refresh cycle has completed.
    pub fn is_loading(&self) -> bool {
        self.latest().is_none()
    }

    pub fn subscribe(&self) -> Receiver<Arc<Snapshot>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner).push(tx);
        rx
    }

    fn fetch_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        match fetch_json(self.source.as_ref(), name) {
            Ok(value) => value,
            Err(e) => {
                warn!(feed = name, error = %e, "feed unavailable, using empty default");
                T::default()
            }
        }
    }

    /// Fetches every feed concurrently and publishes the result. Failed feeds
    /// come back empty; this never fails.
    pub fn refresh(&self) -> Arc<Snapshot> {
        let _cycle = self.refreshing.lock().unwrap_or_else(PoisonError::into_inner);

        let (flights, data, trains) = thread::scope(|s| {
            let flights = s.spawn(|| self.fetch_or_default::<Vec<FlightRecord>>(&self.names.flights));
            let data = s.spawn(|| self.fetch_or_default::<DataFeed>(&self.names.data));
            let trains = s.spawn(|| self.fetch_or_default::<Vec<TrainRecord>>(&self.names.trains));
            (
                flights.join().unwrap_or_default(),
                data.join().unwrap_or_default(),
                trains.join().unwrap_or_default(),
            )
        });

        let snapshot = Arc::new(Snapshot {
            flights,
            data,
            trains: dedup_trains(trains),
            fetched_at: Utc::now(),
        });
        info!(
            flights = snapshot.flights.len(),
            trains = snapshot.trains.len(),
            update_time = %snapshot.data.meta.update_time,
            "radar refreshed"
        );

        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
        snapshot
    }

    /// Refreshes immediately, then every `interval` until the returned handle
    /// is stopped or dropped. A zero interval refreshes once.
    pub fn spawn(self: &Arc<Self>, interval: Duration) -> PollHandle {
        let (stop, stopped) = mpsc::channel::<()>();
        let service = Arc::clone(self);
        let thread = thread::spawn(move || {
            loop {
                service.refresh();
                if interval.is_zero() {
                    debug!("single refresh requested, poller exiting");
                    break;
                }
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    _ => break,
                }
            }
        });
        PollHandle {
            stop,
            thread: Some(thread),
        }
    }
}

pub struct PollHandle {
    stop: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Cancels the schedule and waits for a refresh in flight to finish.
    pub fn stop(self) {
        drop(self)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        let _ = self.stop.send(());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("poller thread panicked");
            }
        }
    }
}
