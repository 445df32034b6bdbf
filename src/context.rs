//! Transaction context consulted when routing a connection request

use std::sync::{Arc, RwLock};

use crate::{Error, Result};

/// Snapshot of the transaction a request runs in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionContext {
   /// A transaction is actually in progress
   pub active: bool,
   /// The transaction was declared read-only
   pub read_only: bool,
   pub name: Option<String>,
}

impl TransactionContext {
   /// No transaction in progress.
   pub fn none() -> Self {
      Self::default()
   }

   pub fn read_write(name: impl Into<String>) -> Self {
      Self {
         active: true,
         read_only: false,
         name: Some(name.into()),
      }
   }

   pub fn read_only(name: impl Into<String>) -> Self {
      Self {
         active: true,
         read_only: true,
         name: Some(name.into()),
      }
   }
}

/// Source of the current transaction state.
///
/// The routing data source never mutates the state it reads. Implement this
/// for whatever tracks transactions in the application; an `Err` means the
/// state could not be read and fails the request.
pub trait TransactionStatus {
   fn snapshot(&self) -> Result<TransactionContext>;

   fn is_transaction_active(&self) -> Result<bool> {
      Ok(self.snapshot()?.active)
   }

   fn is_read_only(&self) -> Result<bool> {
      Ok(self.snapshot()?.read_only)
   }

   fn current_transaction_name(&self) -> Result<Option<String>> {
      Ok(self.snapshot()?.name)
   }
}

impl TransactionStatus for TransactionContext {
   fn snapshot(&self) -> Result<TransactionContext> {
      Ok(self.clone())
   }
}

impl<T: TransactionStatus + ?Sized> TransactionStatus for &T {
   fn snapshot(&self) -> Result<TransactionContext> {
      (**self).snapshot()
   }
}

impl<T: TransactionStatus + ?Sized> TransactionStatus for Arc<T> {
   fn snapshot(&self) -> Result<TransactionContext> {
      (**self).snapshot()
   }
}

/// Mutable transaction state for one logical unit of work.
///
/// Clones share the same state, so the code that begins a transaction and
/// the connection proxy that later routes a request see the same flags.
///
/// # Example
///
/// ```
/// use sqlx_routing_datasource::{TransactionScope, TransactionStatus};
///
/// # fn example() -> sqlx_routing_datasource::Result<()> {
/// let scope = TransactionScope::new();
/// assert!(!scope.is_transaction_active()?);
///
/// scope.begin("reports.monthly")?;
/// scope.set_read_only(true)?;
/// assert!(scope.is_read_only()?);
///
/// scope.end()?;
/// assert!(!scope.is_transaction_active()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionScope {
   state: Arc<RwLock<TransactionContext>>,
}

impl TransactionScope {
   pub fn new() -> Self {
      Self::default()
   }

   /// Mark a read-write transaction named `name` as active
   pub fn begin(&self, name: impl Into<String>) -> Result<()> {
      self.update(|ctx| *ctx = TransactionContext::read_write(name))
   }

   /// Set the read-only flag of the current transaction
   pub fn set_read_only(&self, read_only: bool) -> Result<()> {
      self.update(|ctx| ctx.read_only = read_only)
   }

   /// Clear the transaction state
   pub fn end(&self) -> Result<()> {
      self.update(|ctx| *ctx = TransactionContext::none())
   }

   fn update(&self, f: impl FnOnce(&mut TransactionContext)) -> Result<()> {
      let mut ctx = self
         .state
         .write()
         .map_err(|e| Error::ContextQuery(e.to_string()))?;
      f(&mut ctx);
      Ok(())
   }
}

impl TransactionStatus for TransactionScope {
   fn snapshot(&self) -> Result<TransactionContext> {
      self
         .state
         .read()
         .map(|ctx| ctx.clone())
         .map_err(|e| Error::ContextQuery(e.to_string()))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_scope_lifecycle() {
      let scope = TransactionScope::new();
      assert_eq!(scope.snapshot().unwrap(), TransactionContext::none());

      scope.begin("orders.create").unwrap();
      assert_eq!(
         scope.snapshot().unwrap(),
         TransactionContext::read_write("orders.create")
      );

      scope.set_read_only(true).unwrap();
      assert!(scope.is_read_only().unwrap());
      assert_eq!(
         scope.current_transaction_name().unwrap().as_deref(),
         Some("orders.create")
      );

      scope.end().unwrap();
      assert!(!scope.is_transaction_active().unwrap());
      assert_eq!(scope.current_transaction_name().unwrap(), None);
   }

   #[test]
   fn test_clones_share_state() {
      let scope = TransactionScope::new();
      let observer = scope.clone();

      scope.begin("tx").unwrap();
      assert!(observer.is_transaction_active().unwrap());
   }

   #[test]
   fn test_poisoned_scope_is_context_query_error() {
      let scope = TransactionScope::new();
      let poisoner = scope.clone();

      let _ = std::thread::spawn(move || {
         let _guard = poisoner.state.write().unwrap();
         panic!("transaction manager crashed while holding the lock");
      })
      .join();

      assert!(matches!(scope.snapshot(), Err(Error::ContextQuery(_))));
      assert!(matches!(scope.begin("tx"), Err(Error::ContextQuery(_))));
   }
}
