/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat` — Interactive console conversation with the catalog
- `list` — Print the seeded catalog and exit

These handlers are intentionally small and use the library components:
the catalog store, the dialogue engine, and the transport boundary.
*/

pub mod chat;
pub mod list;
