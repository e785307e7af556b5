//! Test data helpers for creating backend rows

use serde_json::{json, Value};

/// API key configured in test settings and required by the mock backend
pub fn test_api_key() -> &'static str {
    "test-anon-key"
}

/// A members-table row as the backend returns it
pub fn member_row(id: &str, first_name: &str, last_name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "first_name": first_name,
        "last_name": last_name,
        "email": format!("{}@example.org", first_name.to_lowercase()),
        "phone": null,
        "address": null,
        "role": role,
        "status": "active",
        "group_ids": [],
        "project_ids": [],
        "created_at": "2025-01-10T09:00:00+00:00",
        "updated_at": "2025-03-02T17:45:12.123456+00:00"
    })
}

/// A small roster covering several roles, ordered by last name
pub fn sample_roster() -> Vec<Value> {
    vec![
        member_row("m-1", "Claire", "Bernard", "admin"),
        member_row("m-2", "Yusuf", "Demir", "volunteer"),
        member_row("m-3", "Lina", "Moreau", "member"),
        member_row("m-4", "Tom", "Petit", "volunteer"),
    ]
}

/// Rows of `roster` holding `role`
pub fn rows_with_role(roster: &[Value], role: &str) -> Vec<Value> {
    roster.iter().filter(|row| row["role"] == role).cloned().collect()
}
