//! Parallel work distribution.
//!
//! A [`TaskQueue`] hands independent closures to a rayon pool. Work is always
//! submitted inside [`TaskQueue::batch`], which does not return until every
//! task enqueued in it has finished; that return is the completion barrier.

use alloc::string::String;
use alloc::sync::Arc;
use core::marker::PhantomData;

use crate::error::CompressionError;

/// Settings for a dedicated worker pool.
#[derive(Clone, Debug, Default)]
pub struct QueueConfig {
    /// Worker count. `None` lets rayon pick (one per logical CPU).
    pub threads: Option<usize>,
    /// Worker thread name prefix; workers are named `{prefix}-{index}`.
    pub thread_name: Option<String>,
}

#[derive(Clone, Debug)]
enum Executor {
    Global,
    Pool(Arc<rayon::ThreadPool>),
    Inline,
}

/// Shared worker pool that drains enqueued tasks.
///
/// Cloning is cheap; clones share the same workers.
#[derive(Clone, Debug)]
pub struct TaskQueue {
    executor: Executor,
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::global()
    }
}

impl TaskQueue {
    /// Queue backed by rayon's global pool.
    pub fn global() -> Self {
        Self {
            executor: Executor::Global,
        }
    }

    /// Queue that runs each task on the calling thread as it is enqueued.
    pub fn inline() -> Self {
        Self {
            executor: Executor::Inline,
        }
    }

    /// Queue with its own worker pool.
    pub fn with_config(config: &QueueConfig) -> Result<Self, CompressionError> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        if let Some(prefix) = config.thread_name.clone() {
            builder = builder.thread_name(move |i| alloc::format!("{prefix}-{i}"));
        }
        let pool = builder
            .build()
            .map_err(|e| CompressionError::QueueBuild(alloc::format!("{e}")))?;
        Ok(Self {
            executor: Executor::Pool(Arc::new(pool)),
        })
    }

    /// Number of tasks that can run at once.
    pub fn concurrency(&self) -> usize {
        match &self.executor {
            Executor::Global => rayon::current_num_threads(),
            Executor::Pool(pool) => pool.current_num_threads(),
            Executor::Inline => 1,
        }
    }

    /// Run `submit`, which enqueues tasks on the given [`Batch`], then wait for all of them.
    ///
    /// Tasks may borrow anything that outlives the call.
    pub fn batch<'scope, F>(&self, submit: F)
    where
        F: for<'b> FnOnce(&Batch<'b, 'scope>) + Send,
    {
        match &self.executor {
            Executor::Global => rayon::scope(|scope| {
                submit(&Batch {
                    target: Target::Scoped(scope),
                })
            }),
            Executor::Pool(pool) => pool.scope(|scope| {
                submit(&Batch {
                    target: Target::Scoped(scope),
                })
            }),
            Executor::Inline => submit(&Batch {
                target: Target::Inline(PhantomData),
            }),
        }
    }
}

enum Target<'b, 'scope> {
    Scoped(&'b rayon::Scope<'scope>),
    Inline(PhantomData<&'b rayon::Scope<'scope>>),
}

/// Submission handle valid for the duration of one [`TaskQueue::batch`].
pub struct Batch<'b, 'scope> {
    target: Target<'b, 'scope>,
}

impl<'scope> Batch<'_, 'scope> {
    /// Submit one task. Tasks run in no particular order.
    pub fn enqueue<T>(&self, task: T)
    where
        T: FnOnce() + Send + 'scope,
    {
        match &self.target {
            Target::Scoped(scope) => scope.spawn(move |_| task()),
            Target::Inline(_) => task(),
        }
    }
}
