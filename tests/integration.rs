#[path = "integration/common.rs"]
mod common;

#[path = "integration/runtime_spawn.rs"]
mod runtime_spawn;

#[path = "integration/tool_calls.rs"]
mod tool_calls;
