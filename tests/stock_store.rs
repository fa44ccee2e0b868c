use stock_lens::data::{SelectedStockStore, SqliteStockStore};

#[tokio::test]
async fn selection_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stocks.sqlite");
    let path = path.to_str().unwrap();

    {
        let store = SqliteStockStore::open(path).await.unwrap();
        store.add("RELIANCE").await.unwrap();
        store.add("TCS").await.unwrap();
        store.add("HDFCBANK").await.unwrap();
        store.remove("TCS").await.unwrap();
    }

    let reopened = SqliteStockStore::open(path).await.unwrap();
    assert_eq!(reopened.list().await.unwrap(), vec!["RELIANCE", "HDFCBANK"]);

    // Re-adding a removed symbol appends it at the end
    reopened.add("TCS").await.unwrap();
    assert_eq!(
        reopened.list().await.unwrap(),
        vec!["RELIANCE", "HDFCBANK", "TCS"]
    );
}
