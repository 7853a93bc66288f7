#[path = "helpers/mod.rs"]
mod helpers;

#[path = "semantic/mod.rs"]
mod semantic;

#[path = "ide/mod.rs"]
mod ide;

#[path = "project/mod.rs"]
mod project;
