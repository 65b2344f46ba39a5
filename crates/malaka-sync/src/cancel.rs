//! Cooperative cancellation for sync runs.
//!
//! A [`CancelHandle`] flips a shared flag; every [`CancelToken`] cloned from
//! it observes the flip. Table steps race against the token, so a
//! cancellation fails the in-flight table and every table after it.

use std::future::Future;

use tokio::sync::watch;

use crate::{Error, Result};

/// Create a linked handle and token.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
  let (tx, rx) = watch::channel(false);
  (CancelHandle { tx }, CancelToken { rx })
}

pub struct CancelHandle {
  tx: watch::Sender<bool>,
}

impl CancelHandle {
  pub fn cancel(&self) {
    self.tx.send_replace(true);
  }

  pub fn token(&self) -> CancelToken {
    CancelToken { rx: self.tx.subscribe() }
  }
}

#[derive(Clone, Debug)]
pub struct CancelToken {
  rx: watch::Receiver<bool>,
}

impl CancelToken {
  /// A token that is never cancelled.
  pub fn never() -> Self {
    let (_tx, rx) = watch::channel(false);
    Self { rx }
  }

  pub fn is_cancelled(&self) -> bool {
    *self.rx.borrow()
  }

  /// Resolves once cancelled. Pends forever if the handle is dropped first.
  pub async fn cancelled(&self) {
    let mut rx = self.rx.clone();
    let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
    if closed {
      std::future::pending::<()>().await;
    }
  }

  /// Drive `step` unless cancellation wins first.
  pub(crate) async fn run<T>(&self, step: impl Future<Output = Result<T>>) -> Result<T> {
    if self.is_cancelled() {
      return Err(Error::Cancelled);
    }
    tokio::select! {
      biased;
      () = self.cancelled() => Err(Error::Cancelled),
      result = step => result,
    }
  }
}
