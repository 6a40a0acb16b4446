//! Runs user-triggered handlers and redraws after each one that changed visible state.
//!
//! Every handler, synchronous or not, is treated as a task that yields `Result<Outcome>`. A
//! synchronous handler is simply a task that is already complete (`std::future::ready`), so there
//! is one code path for both.
//!
//! - `Err`: the error propagates to the caller and nothing is redrawn.
//! - `Outcome::Skip`: nothing is redrawn.
//! - `Outcome::Changed`: exactly one redraw, after the task completes and before control returns
//!   to the caller.
//!
//! Redraws are not coalesced. Two handlers that each return `Changed` cause two redraws.

use crate::store::Shared;
use crate::view::View;
use crate::Result;
use std::future::Future;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::trace;

/// What a handler tells the scheduler about the state it touched.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Outcome {
    /// Visible state may have changed; redraw.
    Changed,
    /// Nothing visible changed; do not redraw.
    Skip,
}

/// Consumes each `View` produced by a redraw.
pub trait Renderer: Send {
    fn render(&mut self, view: &View) -> Result<()>;
}

/// Owns the session state handle and the renderers subscribed to it.
#[derive(Clone)]
pub struct Scheduler {
    store: Shared,
    renderers: Arc<Mutex<Vec<Box<dyn Renderer>>>>,
    redraws: Arc<AtomicU64>,
}

impl Scheduler {
    pub fn new(store: Shared) -> Self {
        Self {
            store,
            renderers: Arc::new(Mutex::new(Vec::new())),
            redraws: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns a new handle to the session state.
    pub fn store(&self) -> Shared {
        self.store.clone()
    }

    /// Adds a renderer that will receive every subsequent redraw.
    pub async fn subscribe(&self, renderer: Box<dyn Renderer>) {
        self.renderers.lock().await.push(renderer);
    }

    /// The number of redraws performed so far.
    pub fn redraws(&self) -> u64 {
        self.redraws.load(Ordering::SeqCst)
    }

    /// Runs `task` to completion and redraws if it reports `Changed`.
    pub async fn run<F>(&self, task: F) -> Result<Outcome>
    where
        F: Future<Output = Result<Outcome>>,
    {
        let outcome = task.await?;
        if outcome == Outcome::Changed {
            self.redraw().await?;
        } else {
            trace!("Handler skipped redraw");
        }
        Ok(outcome)
    }

    /// Binds `handler` to this scheduler. Firing the result passes the handler the session state
    /// and the event, then applies the redraw rule.
    pub fn wrap<E, H, F>(&self, handler: H) -> Wrapped<H>
    where
        H: Fn(Shared, E) -> F,
        F: Future<Output = Result<Outcome>>,
    {
        Wrapped {
            scheduler: self.clone(),
            handler,
        }
    }

    /// Rebuilds the `View` and hands it to every renderer.
    pub async fn redraw(&self) -> Result<()> {
        let view = self.store.lock().await.view();
        let count = self.redraws.fetch_add(1, Ordering::SeqCst) + 1;
        trace!("Redraw {count}");
        let mut renderers = self.renderers.lock().await;
        for renderer in renderers.iter_mut() {
            renderer.render(&view)?;
        }
        Ok(())
    }
}

/// A handler bound to a `Scheduler`.
pub struct Wrapped<H> {
    scheduler: Scheduler,
    handler: H,
}

impl<H> Wrapped<H> {
    pub async fn fire<E, F>(&self, event: E) -> Result<Outcome>
    where
        H: Fn(Shared, E) -> F,
        F: Future<Output = Result<Outcome>>,
    {
        let task = (self.handler)(self.scheduler.store(), event);
        self.scheduler.run(task).await
    }
}

/// A renderer that writes each `View` as one line of JSON.
pub struct JsonLines<W> {
    writer: W,
}

impl<W> JsonLines<W>
where
    W: Write + Send,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> Renderer for JsonLines<W>
where
    W: Write + Send,
{
    fn render(&mut self, view: &View) -> Result<()> {
        serde_json::to_writer(&mut self.writer, view)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
