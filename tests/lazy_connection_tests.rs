//! Tests for deferred routing via LazyConnection.

use std::path::Path;

use sqlx::Sqlite;
use sqlx_routing_datasource::{
   CredentialSource, DataSourceConfig, Error, PoolConfig, PoolRole, Profile, Result,
   RoutingDataSource, TokenFetcherConfig, TransactionContext, TransactionScope,
   TransactionStatus,
};
use tempfile::TempDir;

fn local_config(path: &Path) -> DataSourceConfig {
   DataSourceConfig {
      writer: PoolConfig::new(format!("sqlite:{}?mode=rwc", path.display()), "app"),
      reader: PoolConfig::new(format!("sqlite:{}?mode=ro", path.display()), "app"),
      profile: Profile::Local,
      auth: TokenFetcherConfig::default(),
   }
}

async fn create_test_source() -> (RoutingDataSource<Sqlite>, TempDir) {
   let temp_dir = TempDir::new().expect("Failed to create temp directory");
   let db_path = temp_dir.path().join("lazy.db");

   let ds = RoutingDataSource::<Sqlite>::connect(local_config(&db_path), &CredentialSource::Static)
      .await
      .expect("Failed to build data source");

   (ds, temp_dir)
}

#[tokio::test]
async fn test_read_only_flag_set_after_begin_routes_to_reader() {
   let (ds, _temp) = create_test_source().await;
   let scope = TransactionScope::new();

   scope.begin("reports.daily").unwrap();
   let mut conn = ds.lazy(scope.clone());
   assert!(!conn.is_acquired());
   assert_eq!(conn.role(), None);

   // Flag finalized after the transaction began, before the first query
   scope.set_read_only(true).unwrap();

   let (one,): (i64,) = sqlx::query_as("SELECT 1")
      .fetch_one(conn.connection().await.unwrap())
      .await
      .unwrap();
   assert_eq!(one, 1);
   assert_eq!(conn.role(), Some(PoolRole::Reader));

   assert_eq!(conn.release(), Some(PoolRole::Reader));
   ds.close().await;
}

#[tokio::test]
async fn test_transaction_begun_after_proxy_creation_routes_to_writer() {
   let (ds, _temp) = create_test_source().await;
   let scope = TransactionScope::new();

   let mut conn = ds.lazy(scope.clone());
   scope.begin("items.create").unwrap();

   conn.connection().await.unwrap();
   assert_eq!(conn.role(), Some(PoolRole::Writer));

   drop(conn);
   ds.close().await;
}

#[tokio::test]
async fn test_physical_connection_is_reused_within_operation() {
   let (ds, _temp) = create_test_source().await;
   let scope = TransactionScope::new();
   scope.begin("scratch.work").unwrap();

   let mut conn = ds.lazy(scope.clone());

   // Temp tables are private to one physical connection
   sqlx::query("CREATE TEMP TABLE scratch (v INTEGER)")
      .execute(conn.connection().await.unwrap())
      .await
      .unwrap();
   sqlx::query("INSERT INTO scratch (v) VALUES (42)")
      .execute(conn.connection().await.unwrap())
      .await
      .expect("Second use must reach the same connection");

   let (v,): (i64,) = sqlx::query_as("SELECT v FROM scratch")
      .fetch_one(conn.connection().await.unwrap())
      .await
      .unwrap();
   assert_eq!(v, 42);

   drop(conn);
   ds.close().await;
}

#[tokio::test]
async fn test_decision_is_fixed_once_connection_is_acquired() {
   let (ds, _temp) = create_test_source().await;
   let scope = TransactionScope::new();
   scope.begin("items.update").unwrap();

   let mut conn = ds.lazy(scope.clone());
   conn.connection().await.unwrap();
   assert_eq!(conn.role(), Some(PoolRole::Writer));

   // Later flag changes do not move an acquired connection to another pool
   scope.set_read_only(true).unwrap();
   conn.connection().await.unwrap();
   assert_eq!(conn.role(), Some(PoolRole::Writer));

   drop(conn);

   // A new operation sees the new flag
   let mut next = ds.lazy(scope.clone());
   next.connection().await.unwrap();
   assert_eq!(next.role(), Some(PoolRole::Reader));

   drop(next);
   ds.close().await;
}

#[tokio::test]
async fn test_unused_proxy_never_touches_pool_or_context() {
   let (ds, _temp) = create_test_source().await;

   struct PanicsWhenRead;

   impl TransactionStatus for PanicsWhenRead {
      fn snapshot(&self) -> Result<TransactionContext> {
         panic!("transaction state must not be read before first use");
      }
   }

   let conn = ds.lazy(PanicsWhenRead);
   assert!(!conn.is_acquired());
   assert_eq!(conn.release(), None);

   ds.close().await;
}

#[tokio::test]
async fn test_context_failure_surfaces_on_first_use() {
   let (ds, _temp) = create_test_source().await;

   struct Unavailable;

   impl TransactionStatus for Unavailable {
      fn snapshot(&self) -> Result<TransactionContext> {
         Err(Error::ContextQuery("no transaction manager bound".into()))
      }
   }

   let mut conn = ds.lazy(Unavailable);
   let result = conn.connection().await;
   assert!(matches!(result, Err(Error::ContextQuery(_))));
   assert!(!conn.is_acquired());

   drop(conn);
   ds.close().await;
}

#[tokio::test]
async fn test_lazy_with_explicit_context() {
   let (ds, _temp) = create_test_source().await;

   let mut conn = ds.lazy(TransactionContext::none());
   conn.connection().await.unwrap();
   assert_eq!(conn.role(), Some(PoolRole::Reader));

   drop(conn);
   ds.close().await;
}
