// rest/routes/home.rs: GET / (API information).

use axum::Json;
use serde_json::{json, Value};

pub async fn home() -> Json<Value> {
    Json(json!({
        "name": "Task Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "REST API for managing tasks",
        "endpoints": {
            "GET /": "API information",
            "GET /health": "Health check",
            "GET /api/tasks": "List all tasks",
            "GET /api/tasks/{id}": "Get specific task",
            "POST /api/tasks": "Create new task",
            "PUT /api/tasks/{id}": "Update task",
            "DELETE /api/tasks/{id}": "Delete task",
        },
    }))
}
