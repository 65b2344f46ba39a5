//! The extract, transform, load step shared by dimension and fact syncs.

use std::future::Future;

use malaka_core::{row::AnalyticalRow, store::AnalyticalStore};

use crate::{Error, Result};

/// Await `extract`, map every record with `map`, and load the rows into
/// `R::TABLE` as one batch. Errors name `table`, the table being synced.
pub(crate) async fn copy<A, E, S, R>(
  analytical: &A,
  table: &'static str,
  extract: impl Future<Output = Result<Vec<S>, E>>,
  map: fn(S) -> R,
) -> Result<u64>
where
  A: AnalyticalStore,
  E: std::error::Error + Send + Sync + 'static,
  R: AnalyticalRow,
{
  let source = extract
    .await
    .map_err(|e| Error::Extract { table, source: Box::new(e) })?;
  let rows: Vec<R> = source.into_iter().map(map).collect();
  analytical
    .load(rows)
    .await
    .map_err(|e| Error::Load { table, source: Box::new(e) })
}
