//! Integration tests for the price sample store

use shared::{get_db_connection, run_migrations, PriceRepository, StoreError, TimeRange};
use std::sync::Arc;

async fn store() -> PriceRepository {
    let db = get_db_connection("sqlite::memory:").await.unwrap();
    run_migrations(&db).await.unwrap();
    PriceRepository::new(Arc::new(db))
}

fn points(samples: &[shared::PriceSample]) -> Vec<(f64, i64)> {
    samples.iter().map(|s| (s.price, s.timestamp)).collect()
}

#[tokio::test]
async fn test_reference_scenario() {
    let store = store().await;
    store.append("btc_usd", 50000.0, 1000).await.unwrap();
    store.append("btc_usd", 51000.0, 2000).await.unwrap();
    store.append("eth_usd", 3000.0, 1500).await.unwrap();

    let btc = store.query_all("btc_usd").await.unwrap();
    assert_eq!(points(&btc), vec![(51000.0, 2000), (50000.0, 1000)]);

    let latest = store.query_latest("btc_usd").await.unwrap().unwrap();
    assert_eq!((latest.price, latest.timestamp), (51000.0, 2000));

    let ranged = store
        .query_range("btc_usd", TimeRange::new(Some(1000), Some(1500)))
        .await
        .unwrap();
    assert_eq!(points(&ranged), vec![(50000.0, 1000)]);

    let eth = store.query_all("eth_usd").await.unwrap();
    assert_eq!(points(&eth), vec![(3000.0, 1500)]);

    assert!(store.query_latest("ltc_usd").await.unwrap().is_none());
}

#[tokio::test]
async fn test_append_round_trip() {
    let store = store().await;
    let sample = store.append("eth_usd", 3012.75, 1_700_000_000).await.unwrap();
    assert_eq!(sample.ticker, "eth_usd");

    let latest = store.query_latest("eth_usd").await.unwrap().unwrap();
    assert_eq!(latest, sample);
}

#[tokio::test]
async fn test_ids_increase_with_insertion_order() {
    let store = store().await;
    let first = store.append("btc_usd", 1.0, 500).await.unwrap();
    let second = store.append("eth_usd", 2.0, 100).await.unwrap();
    let third = store.append("btc_usd", 3.0, 100).await.unwrap();
    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

#[tokio::test]
async fn test_unknown_symbol_is_empty_not_error() {
    let store = store().await;
    assert!(store.query_all("btc_usd").await.unwrap().is_empty());
    assert!(store.query_latest("btc_usd").await.unwrap().is_none());
    assert!(store
        .query_range("btc_usd", TimeRange::new(Some(0), Some(i64::MAX)))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_query_all_orders_newest_first() {
    let store = store().await;
    // Inserted out of timestamp order on purpose
    for ts in [300, 100, 500, 200, 400] {
        store.append("btc_usd", ts as f64, ts).await.unwrap();
    }

    let timestamps: Vec<i64> = store
        .query_all("btc_usd")
        .await
        .unwrap()
        .iter()
        .map(|s| s.timestamp)
        .collect();
    assert_eq!(timestamps, vec![500, 400, 300, 200, 100]);
}

#[tokio::test]
async fn test_range_bounds() {
    let store = store().await;
    for ts in [100, 200, 300, 400, 500] {
        store.append("btc_usd", ts as f64, ts).await.unwrap();
    }
    let timestamps = |samples: Vec<shared::PriceSample>| -> Vec<i64> {
        samples.iter().map(|s| s.timestamp).collect()
    };

    let both = store
        .query_range("btc_usd", TimeRange::new(Some(200), Some(400)))
        .await
        .unwrap();
    assert_eq!(timestamps(both), vec![400, 300, 200]);

    let start_only = store
        .query_range("btc_usd", TimeRange::new(Some(400), None))
        .await
        .unwrap();
    assert_eq!(timestamps(start_only), vec![500, 400]);

    let end_only = store
        .query_range("btc_usd", TimeRange::new(None, Some(200)))
        .await
        .unwrap();
    assert_eq!(timestamps(end_only), vec![200, 100]);

    let unbounded = store
        .query_range("btc_usd", TimeRange::default())
        .await
        .unwrap();
    assert_eq!(unbounded, store.query_all("btc_usd").await.unwrap());

    let inverted = store
        .query_range("btc_usd", TimeRange::new(Some(400), Some(200)))
        .await
        .unwrap();
    assert!(inverted.is_empty());
}

#[tokio::test]
async fn test_same_timestamp_samples_are_kept_and_tie_break_on_id() {
    let store = store().await;
    let older = store.append("btc_usd", 50000.0, 1000).await.unwrap();
    let newer = store.append("btc_usd", 50001.0, 1000).await.unwrap();

    let all = store.query_all("btc_usd").await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, newer.id);
    assert_eq!(all[1].id, older.id);

    for _ in 0..3 {
        let latest = store.query_latest("btc_usd").await.unwrap().unwrap();
        assert_eq!(latest.id, newer.id);
    }
}

#[tokio::test]
async fn test_reads_are_idempotent() {
    let store = store().await;
    store.append("btc_usd", 50000.0, 1000).await.unwrap();
    store.append("btc_usd", 51000.0, 2000).await.unwrap();

    let range = TimeRange::new(Some(500), Some(2500));
    assert_eq!(
        store.query_all("btc_usd").await.unwrap(),
        store.query_all("btc_usd").await.unwrap()
    );
    assert_eq!(
        store.query_latest("btc_usd").await.unwrap(),
        store.query_latest("btc_usd").await.unwrap()
    );
    assert_eq!(
        store.query_range("btc_usd", range).await.unwrap(),
        store.query_range("btc_usd", range).await.unwrap()
    );
}

#[tokio::test]
async fn test_invalid_samples_are_rejected() {
    let store = store().await;
    for (ticker, price) in [("", 1.0), ("btc_usd", f64::NAN), ("btc_usd", f64::INFINITY), ("btc_usd", -0.5)] {
        assert!(matches!(
            store.append(ticker, price, 1000).await,
            Err(StoreError::InvalidSample(_))
        ));
    }
    assert!(store.query_all("btc_usd").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_appends_and_reads() {
    let store = store().await;
    let mut handles = Vec::new();
    for i in 0..20i64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.append("btc_usd", 100.0 + i as f64, 1000 + i).await.unwrap();
            store.query_latest("btc_usd").await.unwrap()
        }));
    }
    for handle in handles {
        // Every read after its own append sees at least one complete sample
        let latest = handle.await.unwrap().unwrap();
        assert_eq!(latest.price, 100.0 + (latest.timestamp - 1000) as f64);
    }

    let all = store.query_all("btc_usd").await.unwrap();
    assert_eq!(all.len(), 20);
    assert_eq!(all[0].timestamp, 1019);
}

#[tokio::test]
async fn test_unmigrated_store_reports_unavailable() {
    let db = get_db_connection("sqlite::memory:").await.unwrap();
    let store = PriceRepository::new(Arc::new(db));
    assert!(matches!(
        store.query_all("btc_usd").await,
        Err(StoreError::Unavailable(_))
    ));
    assert!(matches!(
        store.append("btc_usd", 1.0, 1).await,
        Err(StoreError::Unavailable(_))
    ));
}
