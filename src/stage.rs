//! Stage definitions and registered stages

use std::future::Future;

use futures::future::BoxFuture;

use crate::Accumulator;

/// Boxed async result produced by every stage action and hook.
pub type StageFuture<V, E> = BoxFuture<'static, Result<V, E>>;

pub(crate) type UpFn<T, E> = Box<dyn Fn(Accumulator<T>) -> StageFuture<T, E> + Send + Sync>;
pub(crate) type DownFn<T, C, E> = Box<dyn Fn(T) -> StageFuture<C, E> + Send + Sync>;
pub(crate) type BeforeFn<T, E> = Box<dyn Fn(Accumulator<T>) -> StageFuture<(), E> + Send + Sync>;
pub(crate) type AfterFn<T, E> = Box<dyn Fn(T) -> StageFuture<(), E> + Send + Sync>;

/// Stage implementation handed to [`Saga::add_stage`](crate::Saga::add_stage).
///
/// `up` and `down` are required; registration rejects a definition missing
/// either one. `before` and `after` are optional hooks, normalized to no-ops
/// at registration time and never checked again afterwards.
///
/// # Example
///
/// ```rust,ignore
/// let definition = StageDefinition::new()
///     .up(|results| async move { place_order(&results).await })
///     .down(|order| async move { cancel_order(order).await })
///     .before(|results| async move { check_rate_limit(results.len()).await });
/// ```
pub struct StageDefinition<T, C, E> {
    pub(crate) up: Option<UpFn<T, E>>,
    pub(crate) down: Option<DownFn<T, C, E>>,
    pub(crate) before: Option<BeforeFn<T, E>>,
    pub(crate) after: Option<AfterFn<T, E>>,
}

impl<T, C, E> StageDefinition<T, C, E> {
    /// Create an empty definition
    pub fn new() -> Self {
        Self {
            up: None,
            down: None,
            before: None,
            after: None,
        }
    }

    /// Set the forward action.
    ///
    /// Receives a read-only snapshot of the results of all previously
    /// completed stages.
    pub fn up<F, Fut>(mut self, action: F) -> Self
    where
        F: Fn(Accumulator<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.up = Some(Box::new(move |results| Box::pin(action(results))));
        self
    }

    /// Set the compensating action.
    ///
    /// Receives the result this same stage produced when it originally ran.
    pub fn down<F, Fut>(mut self, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C, E>> + Send + 'static,
    {
        self.down = Some(Box::new(move |prior| Box::pin(action(prior))));
        self
    }

    /// Set the hook that runs immediately before the forward action.
    ///
    /// Receives the accumulator as it stood after all strictly-prior stages
    /// recorded their results. Its value is ignored except for failure.
    pub fn before<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Accumulator<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        self.before = Some(Box::new(move |results| Box::pin(hook(results))));
        self
    }

    /// Set the hook that runs immediately after the forward action succeeds.
    ///
    /// Receives the value the forward action produced. Its value is ignored
    /// except for failure.
    pub fn after<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
    {
        self.after = Some(Box::new(move |result| Box::pin(hook(result))));
        self
    }
}

impl<T, C, E> Default for StageDefinition<T, C, E> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn noop_before<T, E>() -> BeforeFn<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    Box::new(|_| Box::pin(async { Ok(()) }))
}

pub(crate) fn noop_after<T, E>() -> AfterFn<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    Box::new(|_| Box::pin(async { Ok(()) }))
}

/// A validated stage registered with a [`Saga`](crate::Saga).
///
/// The name is immutable once added; actions are only invoked by the engine.
pub struct Stage<T, C, E> {
    pub(crate) name: String,
    pub(crate) up: UpFn<T, E>,
    pub(crate) down: DownFn<T, C, E>,
    pub(crate) before: BeforeFn<T, E>,
    pub(crate) after: AfterFn<T, E>,
}

impl<T, C, E> Stage<T, C, E> {
    /// The stage's unique name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T, C, E> std::fmt::Debug for Stage<T, C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}
