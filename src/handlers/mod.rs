// Handlers are split by security tier:
// public    - no token required (todo CRUD, token acquisition, demos)
// protected - bearer token required, role-gated per route
pub mod protected;
pub mod public;
