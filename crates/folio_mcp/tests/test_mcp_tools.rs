use std::sync::Arc;

use folio_common::{FolioError, SiteConfig, Versioned};
use folio_core::{ConfigService, ConfigStore, MemoryStore};
use folio_mcp::{JsonRpcRequest, McpServer};
use folio_test_helpers::prelude::*;
use serde_json::{json, Value};

fn server_with(doc: SiteConfig) -> (McpServer, MemoryStore) {
    suppress_logs();
    let store = MemoryStore::with_config(doc);
    let server = McpServer::new(ConfigService::new(Arc::new(store.clone())));
    (server, store)
}

async fn call(server: &McpServer, name: &str, arguments: Value) -> String {
    let request: JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    }))
    .unwrap();

    let response = server.handle_request(request).await.expect("response");
    assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
    tool_text(&response.result.unwrap())
}

#[tokio::test]
async fn test_tools_list_names_every_operation() {
    let (server, _) = server_with(SiteConfig::default());
    let request: JsonRpcRequest =
        serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/list" }))
            .unwrap();

    let result = server.handle_request(request).await.unwrap().result.unwrap();
    let names: Vec<&str> = result["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["addItem", "deleteItem", "updateItem", "getConfig"]);
    for tool in result["tools"].as_array().unwrap() {
        assert_eq!(tool["inputSchema"]["type"], "object", "{}", tool["name"]);
    }
}

#[tokio::test]
async fn test_add_item_with_defaults() {
    let (server, store) = server_with(SiteConfig::default());

    let text = call(&server, "addItem", json!({ "id": "About" })).await;
    assert_eq!(text, "Item 'about' added successfully");

    let doc = serde_json::to_value(store.load().await.unwrap().config).unwrap();
    assert_eq!(
        doc,
        json!({
            "pages": [{ "id": "about", "title": "Page about", "content": "" }],
            "sidebar": [{ "id": "about", "label": "About", "active": false }]
        })
    );
}

#[tokio::test]
async fn test_add_duplicate_is_reported_as_text() {
    let (server, store) = server_with(sample_config());

    let text = call(&server, "addItem", json!({ "id": "HOME" })).await;
    assert_eq!(text, "Failed to add item: Item with id 'home' already exists");
    assert_eq!(store.load().await.unwrap().config, sample_config());
}

#[tokio::test]
async fn test_add_without_id_is_reported_as_text() {
    let (server, _) = server_with(SiteConfig::default());

    let text = call(&server, "addItem", json!({ "title": "No id" })).await;
    assert!(text.starts_with("Failed to add item: Invalid input"), "{}", text);
}

#[tokio::test]
async fn test_delete_item() {
    let (server, store) = server_with(sample_config());

    let text = call(&server, "deleteItem", json!({ "id": "blog" })).await;
    assert_eq!(text, "Item 'blog' deleted successfully");

    let doc = serde_json::to_value(store.load().await.unwrap().config).unwrap();
    assert_eq!(page_ids(&doc), vec!["home"]);
    assert_eq!(sidebar_ids(&doc), vec!["home"]);
}

#[tokio::test]
async fn test_delete_missing_item() {
    let (server, _) = server_with(sample_config());

    let text = call(&server, "deleteItem", json!({ "id": "contact" })).await;
    assert_eq!(text, "Failed to delete item: Item with id 'contact' not found");
}

#[tokio::test]
async fn test_update_item_renames() {
    let (server, store) = server_with(sample_config());

    let text = call(
        &server,
        "updateItem",
        json!({ "oldId": "blog", "newItem": { "id": "news", "label": "News" } }),
    )
    .await;
    assert_eq!(text, "Item 'blog' renamed to 'news' and updated successfully");

    let doc = store.load().await.unwrap().config;
    assert_eq!(doc.pages[1].id, "news");
    assert_eq!(doc.pages[1].title, "Blog");
    assert_eq!(doc.sidebar[1], sidebar_item("news", "News"));
}

#[tokio::test]
async fn test_update_missing_item() {
    let (server, _) = server_with(sample_config());

    let text = call(&server, "updateItem", json!({ "oldId": "ghost", "newItem": {} })).await;
    assert_eq!(text, "Failed to update item: Item with id 'ghost' not found");
}

#[tokio::test]
async fn test_get_config_returns_document_json() {
    let (server, _) = server_with(sample_config());

    let text = call(&server, "getConfig", Value::Null).await;
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(page_ids(&doc), vec!["home", "blog"]);
}

/// Store standing in for an unreachable or read-only database
struct FailingStore {
    inner: MemoryStore,
    reads_fail: bool,
}

#[async_trait::async_trait]
impl ConfigStore for FailingStore {
    async fn load(&self) -> folio_common::Result<Versioned> {
        if self.reads_fail {
            return Err(FolioError::StoreRead("503 Service Unavailable".to_string()));
        }
        self.inner.load().await
    }

    async fn save(&self, _expected: u64, _config: &SiteConfig) -> folio_common::Result<u64> {
        Err(FolioError::StoreWrite("500 Internal Server Error".to_string()))
    }
}

fn failing_server(reads_fail: bool) -> McpServer {
    suppress_logs();
    let store = FailingStore {
        inner: MemoryStore::with_config(sample_config()),
        reads_fail,
    };
    McpServer::new(ConfigService::new(Arc::new(store)))
}

#[tokio::test]
async fn test_read_failure_is_reported_as_text() {
    let server = failing_server(true);

    let text = call(&server, "addItem", json!({ "id": "about" })).await;
    assert_eq!(
        text,
        "Failed to add item: Failed to read config: 503 Service Unavailable"
    );

    let text = call(&server, "getConfig", json!({})).await;
    assert_eq!(
        text,
        "Failed to get config: Failed to read config: 503 Service Unavailable"
    );
}

#[tokio::test]
async fn test_write_failure_is_reported_as_text() {
    let server = failing_server(false);

    let text = call(&server, "deleteItem", json!({ "id": "home" })).await;
    assert_eq!(
        text,
        "Failed to delete item: Failed to save config: 500 Internal Server Error"
    );
}
