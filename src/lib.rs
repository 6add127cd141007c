// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive CLI.
//
// Module responsibilities:
// - `config`: Resolves the API key (environment, `.env` file, secrets
//   file, in that order) and carries the endpoint and sampling settings.
// - `persona`: Maps the selectable expert personas to their fixed
//   system instructions, with a generic fallback for unknown labels.
// - `api`: Encapsulates HTTP interactions with the chat-completion
//   endpoint (completion requests, model listing).
// - `ui`: Implements the terminal-based user interface flows and
//   delegates requests to `api`.
//
// Keeping this separation makes it easier to test the mapping and
// request-building logic or replace the UI in the future (for example,
// adding a TUI or a web front-end).
pub mod api;
pub mod config;
pub mod persona;
pub mod ui;
