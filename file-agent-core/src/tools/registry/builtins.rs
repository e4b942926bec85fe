use super::ToolRegistry;
use super::declarations::{
    create_file_declaration, delete_file_declaration, edit_file_declaration,
    list_directory_declaration, show_file_declaration,
};
use super::format::{format_listing, format_show};
use super::registration::ToolRegistration;
use tracing::warn;

pub(super) fn register_builtin_tools(registry: &mut ToolRegistry) {
    for registration in builtin_tool_registrations() {
        let tool_name = registration.name().to_string();
        if let Err(err) = registry.register_tool(registration) {
            warn!(tool = %tool_name, error = %err, "failed to register built-in tool");
        }
    }
}

pub(super) fn builtin_tool_registrations() -> Vec<ToolRegistration> {
    vec![
        ToolRegistration::new(create_file_declaration(), ToolRegistry::create_file_executor),
        ToolRegistration::new(edit_file_declaration(), ToolRegistry::edit_file_executor),
        ToolRegistration::new(show_file_declaration(), ToolRegistry::show_file_executor)
            .with_formatter(format_show),
        ToolRegistration::new(delete_file_declaration(), ToolRegistry::delete_file_executor),
        ToolRegistration::new(
            list_directory_declaration(),
            ToolRegistry::list_directory_executor,
        )
        .with_formatter(format_listing),
    ]
}
