//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
    iter,
};

use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};
use tokio::task;

#[cfg(doc)]
use crate::Task;

/// Boxed error of a [`Task`] running in the [`Background`].
type BoxedError = Box<dyn Error + 'static>;

/// Background environment for running [`Task`]s.
///
/// [`Task`]s are spawned onto a [`task::LocalSet`], so they don't need to be
/// [`Send`], and are driven by awaiting the [`Background`] itself.
#[derive(Debug, Default)]
pub struct Background {
    /// Local set of tasks.
    set: task::LocalSet,

    /// Handles of spawned tasks.
    handles: Vec<task::JoinHandle<Result<(), BoxedError>>>,
}

impl Background {
    /// Spawns a new [`Task`] inside the [`Background`] environment.
    pub fn spawn<F, E>(&mut self, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        self.handles.push(
            self.set
                .spawn_local(future.map_err(|e| BoxedError::from(Box::new(e)))),
        );
    }
}

impl IntoFuture for Background {
    type Output = Result<(), BoxedError>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { set, handles } = self;
        future::try_join_all(iter::once(set.map(Ok).boxed_local()).chain(
            handles.into_iter().map(|h| {
                h.map(|r| match r {
                    Ok(res) => res,
                    Err(e) => Err(BoxedError::from(Box::new(e))),
                })
                .boxed_local()
            }),
        ))
        .map_ok(drop)
        .boxed_local()
    }
}

#[cfg(test)]
mod spec {
    use std::{convert::Infallible, future::IntoFuture as _};

    use super::Background;

    #[tokio::test]
    async fn completes_when_all_tasks_do() {
        let mut bg = Background::default();
        bg.spawn(async { Ok::<_, Infallible>(()) });
        bg.spawn(async { Ok::<_, Infallible>(()) });

        assert!(bg.into_future().await.is_ok());
    }

    #[tokio::test]
    async fn completes_without_tasks() {
        assert!(Background::default().into_future().await.is_ok());
    }

    #[tokio::test]
    async fn fails_when_any_task_does() {
        let mut bg = Background::default();
        bg.spawn(async { Ok::<_, Infallible>(()) });
        bg.spawn(async {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        });

        let err = bg.into_future().await.unwrap_err();

        assert_eq!(err.to_string(), "boom");
    }
}
