use anyhow::Result;
use file_agent_core::tools::{EntryKind, FileOpErrorKind, FileOps, ToolRegistry};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const MAX_FILE_SIZE: u64 = 1024;

fn registry(temp_dir: &TempDir) -> Result<ToolRegistry> {
    Ok(ToolRegistry::new(FileOps::new(temp_dir.path(), MAX_FILE_SIZE)?))
}

#[tokio::test]
async fn test_builtin_tools_are_declared() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = registry(&temp_dir)?;

    let names: Vec<String> = registry
        .declarations()
        .into_iter()
        .map(|declaration| declaration.name)
        .collect();
    assert_eq!(
        names,
        vec!["create_file", "edit_file", "show_file", "delete_file", "list_directory"]
    );
    Ok(())
}

#[tokio::test]
async fn test_create_edit_show_through_registry() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = registry(&temp_dir)?;

    let created = registry
        .execute_tool(
            "create_file",
            json!({"path": "notes/biology.md", "content": "# Cells\n"}),
        )
        .await;
    assert!(created.success, "{}", created.message);
    assert_eq!(created.message, "File created successfully: notes/biology.md");
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("notes/biology.md"))?,
        "# Cells\n"
    );

    let appended = registry
        .execute_tool(
            "edit_file",
            json!({"path": "notes/biology.md", "content": "- mitosis\n", "mode": "append"}),
        )
        .await;
    assert!(appended.success, "{}", appended.message);

    let shown = registry
        .execute_tool("show_file", json!({"path": "notes/biology.md"}))
        .await;
    assert_eq!(shown.content.as_deref(), Some("# Cells\n- mitosis\n"));
    assert_eq!(shown.language.as_deref(), Some("markdown"));

    let rendered = registry.format_result("show_file", &shown);
    assert!(rendered.starts_with("File contents of notes/biology.md:"));
    assert!(rendered.ends_with("# Cells\n- mitosis\n"));
    Ok(())
}

#[tokio::test]
async fn test_escaping_paths_never_touch_the_filesystem() -> Result<()> {
    let outer = TempDir::new()?;
    let root = outer.path().join("workspace");
    fs::create_dir(&root)?;
    let registry = ToolRegistry::new(FileOps::new(&root, MAX_FILE_SIZE)?);

    for path in ["../outside.txt", "a/../../outside.txt"] {
        let result = registry
            .execute_tool("create_file", json!({"path": path, "content": "x"}))
            .await;
        assert!(!result.success);
        assert_eq!(result.error_kind(), Some(FileOpErrorKind::PathEscape));
        assert_eq!(
            result.message,
            format!("Path {path} is outside the allowed directory")
        );
    }
    assert!(!outer.path().join("outside.txt").exists());

    let absolute = outer.path().join("outside.txt");
    let result = registry
        .execute_tool(
            "create_file",
            json!({"path": absolute.to_string_lossy(), "content": "x"}),
        )
        .await;
    assert_eq!(result.error_kind(), Some(FileOpErrorKind::PathEscape));
    assert!(!absolute.exists());
    Ok(())
}

#[tokio::test]
async fn test_oversized_writes_leave_targets_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = registry(&temp_dir)?;
    fs::write(temp_dir.path().join("keep.txt"), "original")?;
    let too_big = "x".repeat(MAX_FILE_SIZE as usize + 1);

    let created = registry
        .execute_tool("create_file", json!({"path": "new.txt", "content": too_big}))
        .await;
    assert_eq!(created.error_kind(), Some(FileOpErrorKind::SizeExceeded));
    assert!(!temp_dir.path().join("new.txt").exists());

    let replaced = registry
        .execute_tool("edit_file", json!({"path": "keep.txt", "content": too_big}))
        .await;
    assert_eq!(replaced.error_kind(), Some(FileOpErrorKind::SizeExceeded));

    let appended = registry
        .execute_tool(
            "edit_file",
            json!({"path": "keep.txt", "content": "y".repeat(MAX_FILE_SIZE as usize - 4), "mode": "append"}),
        )
        .await;
    assert_eq!(appended.error_kind(), Some(FileOpErrorKind::SizeExceeded));
    assert_eq!(fs::read_to_string(temp_dir.path().join("keep.txt"))?, "original");
    Ok(())
}

#[tokio::test]
async fn test_delete_lifecycle() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = registry(&temp_dir)?;
    fs::write(temp_dir.path().join("old.txt"), "bye")?;

    let unconfirmed = registry
        .execute_tool("delete_file", json!({"path": "old.txt", "confirm": false}))
        .await;
    assert_eq!(
        unconfirmed.error_kind(),
        Some(FileOpErrorKind::ConfirmationRequired)
    );
    assert!(temp_dir.path().join("old.txt").exists());

    let missing_flag = registry
        .execute_tool("delete_file", json!({"path": "old.txt"}))
        .await;
    assert_eq!(
        missing_flag.error_kind(),
        Some(FileOpErrorKind::InvalidArguments)
    );
    assert!(temp_dir.path().join("old.txt").exists());

    let deleted = registry
        .execute_tool("delete_file", json!({"path": "old.txt", "confirm": true}))
        .await;
    assert!(deleted.success, "{}", deleted.message);
    assert!(!temp_dir.path().join("old.txt").exists());

    let again = registry
        .execute_tool("delete_file", json!({"path": "old.txt", "confirm": true}))
        .await;
    assert_eq!(again.error_kind(), Some(FileOpErrorKind::NotFound));
    Ok(())
}

#[tokio::test]
async fn test_list_directory_sorted_and_tagged() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = registry(&temp_dir)?;
    fs::write(temp_dir.path().join("c.md"), "# c")?;
    fs::write(temp_dir.path().join("a.txt"), "hello")?;
    fs::create_dir(temp_dir.path().join("b"))?;

    let listed = registry.execute_tool("list_directory", json!({})).await;
    assert!(listed.success, "{}", listed.message);
    assert_eq!(listed.path.as_deref(), Some("."));

    let entries = listed.entries.clone().unwrap_or_default();
    let summary: Vec<(&str, EntryKind)> = entries
        .iter()
        .map(|entry| (entry.name.as_str(), entry.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a.txt", EntryKind::File),
            ("b", EntryKind::Directory),
            ("c.md", EntryKind::File),
        ]
    );
    assert_eq!(entries[0].size, Some(5));
    assert_eq!(entries[1].size, None);

    let rendered = registry.format_result("list_directory", &listed);
    assert!(rendered.contains("📁 b/"));
    Ok(())
}

#[tokio::test]
async fn test_results_serialize_without_empty_fields() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = registry(&temp_dir)?;

    let missing = registry
        .execute_tool("show_file", json!({"path": "nope.txt"}))
        .await;
    let value = serde_json::to_value(&missing)?;
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["error"], json!("not_found"));
    assert_eq!(value["message"], json!("Path does not exist: nope.txt"));
    assert!(value.get("content").is_none());
    Ok(())
}
