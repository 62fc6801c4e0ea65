//! Tool catalogue and handlers
//!
//! Every tool answers with a single text block. Rejected input and storage
//! failures are described in that text rather than raised as JSON-RPC errors.

use folio_common::{DeleteItem, FolioError, NewItem, UpdateItem};
use folio_core::ConfigService;
use once_cell::sync::Lazy;
use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

/// A tool as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Arguments of `getConfig` (none)
#[allow(dead_code)]
#[derive(JsonSchema)]
struct NoArguments {}

/// JSON schema for `T`, with nested types inlined and optional fields
/// declared by their plain type
fn input_schema<T: JsonSchema>() -> Value {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.option_add_null_type = false;
        s.option_nullable = false;
    });
    let schema = settings.into_generator().into_root_schema_for::<T>();

    let mut value = serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" }));
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    value
}

pub static TOOLS: Lazy<Vec<ToolSpec>> = Lazy::new(|| {
    vec![
        ToolSpec {
            name: "addItem",
            description: "Add a page and its sidebar entry. The id is stored lowercased; \
                          title defaults to \"Page {id}\", label to the capitalized id.",
            input_schema: input_schema::<NewItem>(),
        },
        ToolSpec {
            name: "deleteItem",
            description: "Delete the page and sidebar entry with the given id.",
            input_schema: input_schema::<DeleteItem>(),
        },
        ToolSpec {
            name: "updateItem",
            description: "Update the page and sidebar entry identified by oldId. \
                          Fields omitted from newItem keep their current value; \
                          newItem.id renames the item.",
            input_schema: input_schema::<UpdateItem>(),
        },
        ToolSpec {
            name: "getConfig",
            description: "Return the stored pages and sidebar as JSON.",
            input_schema: input_schema::<NoArguments>(),
        },
    ]
});

/// Whether `name` is a tool this server knows
pub fn is_known_tool(name: &str) -> bool {
    TOOLS.iter().any(|t| t.name == name)
}

/// Wrap text in the tool result envelope
pub fn text_result(text: impl Into<String>) -> Value {
    json!({ "content": [{ "type": "text", "text": text.into() }] })
}

fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, FolioError> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments).map_err(|e| FolioError::InvalidInput(e.to_string()))
}

/// Verb phrase used in failure text
fn operation(name: &str) -> &'static str {
    match name {
        "addItem" => "add item",
        "deleteItem" => "delete item",
        "updateItem" => "update item",
        "getConfig" => "get config",
        _ => "run tool",
    }
}

async fn run(service: &ConfigService, name: &str, arguments: Value) -> Result<String, FolioError> {
    match name {
        "addItem" => {
            let item: NewItem = parse_arguments(arguments)?;
            Ok(service.add_item(item).await?.message)
        }
        "deleteItem" => {
            let args: DeleteItem = parse_arguments(arguments)?;
            Ok(service.delete_item(&args.id).await?.message)
        }
        "updateItem" => {
            let args: UpdateItem = parse_arguments(arguments)?;
            Ok(service.update_item(&args.old_id, args.new_item).await?.message)
        }
        "getConfig" => {
            let doc = service.get_config().await?;
            Ok(serde_json::to_string_pretty(&doc)?)
        }
        other => Err(FolioError::InvalidInput(format!("Unknown tool: {}", other))),
    }
}

/// Run tool `name` and render its text reply
pub async fn call_tool(service: &ConfigService, name: &str, arguments: Value) -> Value {
    let text = match run(service, name, arguments).await {
        Ok(text) => text,
        Err(e) => format!("Failed to {}: {}", operation(name), e),
    };
    text_result(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_names() {
        let names: Vec<_> = TOOLS.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["addItem", "deleteItem", "updateItem", "getConfig"]);
        assert!(is_known_tool("addItem"));
        assert!(!is_known_tool("add_item"));
    }

    #[test]
    fn test_add_schema_shape() {
        let schema = &TOOLS[0].input_schema;
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["id"]));
        assert_eq!(schema["properties"]["id"]["type"], "string");
        assert_eq!(schema["properties"]["title"]["type"], "string");
        assert_eq!(schema["properties"]["active"]["type"], "boolean");
        assert!(schema.get("$schema").is_none());
    }

    #[test]
    fn test_update_schema_inlines_patch() {
        let schema = &TOOLS[2].input_schema;
        assert_eq!(schema["required"], json!(["oldId"]));
        assert!(schema["properties"].get("newItem").is_some());
        assert!(schema.get("definitions").is_none());
        assert!(!schema.to_string().contains("$ref"));
    }

    #[test]
    fn test_bad_arguments_are_invalid_input() {
        let err = parse_arguments::<DeleteItem>(json!({ "id": 5 })).unwrap_err();
        assert!(matches!(err, FolioError::InvalidInput(_)));

        let err = parse_arguments::<DeleteItem>(Value::Null).unwrap_err();
        assert!(err.to_string().contains("missing field `id`"));
    }
}
