//! Cancellable fetch scopes tied to a mounted view.

use std::future::Future;
use tokio::{sync::oneshot, task::JoinSet};

use crate::db::DataClient;

/// Owns the fetches started on behalf of one view. Dropping the scope aborts
/// every task still running in it.
#[derive(Default)]
pub struct ViewScope {
    tasks: JoinSet<()>,
}

/// Write-once result of a scoped fetch.
pub struct Slot<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Slot<T> {
    /// `None` when the producing task was aborted before finishing.
    pub async fn wait(self) -> Option<T> {
        self.rx.await.ok()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<F, T>(&mut self, fut: F) -> Slot<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.tasks.spawn(async move {
            // receiver gone means the view went away first
            let _ = tx.send(fut.await);
        });
        Slot { rx }
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn cancel(&mut self) {
        self.tasks.abort_all();
    }
}

/// A view whose initial data comes from the data store.
pub trait Loadable {
    type Output: Send + 'static;

    fn fetch(client: DataClient) -> impl Future<Output = Self::Output> + Send + 'static;

    fn receive(&mut self, output: Self::Output);
}

/// A view together with the scope running its fetch.
pub struct Mounted<V: Loadable> {
    view: V,
    scope: ViewScope,
    slot: Option<Slot<V::Output>>,
}

impl<V: Loadable> Mounted<V> {
    pub fn mount(view: V, client: &DataClient) -> Self {
        let mut scope = ViewScope::new();
        let slot = scope.load(V::fetch(client.clone()));
        Self {
            view,
            scope,
            slot: Some(slot),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Waits for the pending fetch, if any, and hands its result to the view.
    pub async fn settle(&mut self) -> &mut V {
        if let Some(slot) = self.slot.take() {
            if let Some(output) = slot.wait().await {
                self.view.receive(output);
            }
        }
        &mut self.view
    }

    pub async fn into_settled(mut self) -> V {
        self.settle().await;
        self.unmount()
    }

    /// Aborts anything still in flight and returns the view as it stands.
    pub fn unmount(mut self) -> V {
        self.scope.cancel();
        self.view
    }
}
