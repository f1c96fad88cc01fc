//! Single-writer actor for all database mutations.
//!
//! One background task owns one connection and processes write jobs
//! serially, each inside an immediate transaction. Serializing writes this
//! way is what makes the ledger's guard-check-then-commit sequences
//! atomic: a racing trade cannot observe the cash balance or position of
//! a commit still in flight.

use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

use paperfolio_core::errors::{Error, Result};

/// Error type for the transaction wrapper. Keeps domain errors (e.g. a
/// rejected oversell) intact through the rollback path instead of
/// flattening them to strings.
enum TxError {
    Storage(StorageError),
    Core(Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(e: diesel::result::Error) -> Self {
        TxError::Storage(StorageError::QueryFailed(e))
    }
}

impl From<TxError> for Error {
    fn from(e: TxError) -> Self {
        match e {
            TxError::Storage(e) => e.into(),
            TxError::Core(e) => e,
        }
    }
}

// A write job: runs against the actor's connection, replies through a
// oneshot. The Box<dyn Any> erases the job's return type on the channel.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for submitting jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a job on the writer's dedicated connection, inside an
    /// immediate transaction. The job either commits fully or rolls back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawns the writer actor and returns its handle.
///
/// The actor holds one pooled connection for its whole lifetime and exits
/// when every handle has been dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            // immediate_transaction takes the write lock up front, so the
            // guard reads inside a job see no concurrent commits.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, TxError, _>(|c| job(c).map_err(TxError::Core))
                .map_err(Error::from);

            // Receiver may have gone away (request cancelled); nothing to do.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
