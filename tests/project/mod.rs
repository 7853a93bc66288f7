pub mod tests_workspace_loader;
