//! OpenAPI description of the plugin-facing routes.
//!
//! The plugin manifest points clients here. ChatGPT's plugin loader rejects a
//! document whose `components.schemas` is missing or not an object, so the
//! component schemas are always emitted.

use serde_json::{json, Value};

pub const TITLE: &str = "Steer the Story";
pub const VERSION: &str = "3.0.2";

/// Tag for operations that need the user id from an issued URL.
pub const USER_ID_TAG: &str = "uses-user-id";

/// Builds the OpenAPI document with `base_url` as the only server.
pub fn document(base_url: &str) -> Value {
    json!({
        "openapi": "3.0.2",
        "info": {
            "title": TITLE,
            "version": VERSION,
            "description": "An API that allows users to put in a conditional and compare it to specified values generated by ChatGPT",
        },
        "servers": [{ "url": base_url }],
        "tags": [{
            "name": USER_ID_TAG,
            "description": "Uses user ID. This can be retrieved from the unique URL generated.",
        }],
        "paths": paths(),
        "components": { "schemas": component_schemas() },
    })
}

fn paths() -> Value {
    json!({
        "/get_unique_url/": {
            "get": {
                "summary": "Get Unique Url",
                "operationId": "get_unique_url",
                "responses": {
                    "200": json_response("Issued URL", "UniqueUrlResponse"),
                },
            },
        },
        "/submit-form": {
            "post": {
                "summary": "Submit Form",
                "operationId": "submit_form",
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": { "schema": schema_ref("ConditionRecord") },
                    },
                },
                "responses": {
                    "200": json_response("Conditions stored", "SubmitResponse"),
                    "400": json_response("Invalid user id", "ErrorBody"),
                    "503": json_response("Store unavailable", "ErrorBody"),
                },
            },
        },
        "/validate-conditions/{candidate}": {
            "post": {
                "tags": [USER_ID_TAG],
                "summary": "Validate Conditions",
                "operationId": "validate_conditions",
                "parameters": [
                    {
                        "name": "candidate",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string", "title": "Candidate" },
                    },
                    {
                        "name": "user_id",
                        "in": "query",
                        "required": true,
                        "schema": { "type": "string", "title": "User Id" },
                    },
                ],
                "responses": {
                    "200": {
                        "description": "\"valid\", or the first condition the candidate fails",
                        "content": {
                            "text/plain": { "schema": { "type": "string" } },
                        },
                    },
                    "400": json_response("Missing user id", "ErrorBody"),
                    "404": json_response("No conditions stored for the user", "ErrorBody"),
                },
            },
        },
    })
}

fn component_schemas() -> Value {
    json!({
        "ConditionRecord": {
            "title": "ConditionRecord",
            "type": "object",
            "required": ["userId"],
            "properties": {
                "contains": { "type": "string", "title": "Contains" },
                "min": { "type": "integer", "format": "int64", "title": "Min" },
                "max": { "type": "integer", "format": "int64", "title": "Max" },
                "userId": { "type": "string", "title": "User Id" },
            },
        },
        "UniqueUrlResponse": {
            "title": "UniqueUrlResponse",
            "type": "object",
            "required": ["unique_url"],
            "properties": {
                "unique_url": { "type": "string", "title": "Unique Url" },
            },
        },
        "SubmitResponse": {
            "title": "SubmitResponse",
            "type": "object",
            "required": ["success"],
            "properties": {
                "success": { "type": "boolean", "title": "Success" },
            },
        },
        "ErrorBody": {
            "title": "ErrorBody",
            "type": "object",
            "required": ["error", "kind"],
            "properties": {
                "error": { "type": "string", "title": "Error" },
                "kind": { "type": "string", "title": "Kind" },
            },
        },
    })
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_response(description: &str, schema: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": schema_ref(schema) },
        },
    })
}
